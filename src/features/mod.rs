//! Features - Dashboard Pages
//!
//! Each feature is a page model: its state containers plus the glue that
//! turns actions and completions into requests and view events.

pub mod assets;
pub mod metrics;
mod mode_select;
pub mod scenarios;
pub mod snapshots;
