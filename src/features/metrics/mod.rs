//! Metrics Feature

mod controller;

pub use controller::*;
