//! Utils - Configuration Persistence and Numeric Helpers

pub mod config_store;
pub mod format;
