//! Snapshots Feature

mod controller;

pub use controller::*;
