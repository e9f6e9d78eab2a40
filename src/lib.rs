//! Feeder View Library
//!
//! View-state synchronization for a power-distribution dashboard: which
//! layers are toggled on, which geometry and metrics are loaded for them,
//! which display mode is active and what has been fetched for each mode.
//! Rendering is left to the host; it drives a [`app::Session`] and listens
//! for [`app::ViewEvent`]s.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod logging;
pub mod services;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
