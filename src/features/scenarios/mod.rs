//! Scenarios Feature

mod controller;

pub use controller::*;
