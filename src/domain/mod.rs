//! Domain - Pure Data Structures and Protocol Types
//!
//! These types carry no IO and no runtime state.

pub mod config;
pub mod layer;
pub mod mode;
pub mod payload;
pub mod stats;
