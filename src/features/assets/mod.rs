//! Assets Feature

mod controller;

pub use controller::*;
