//! State - Page State Containers
//!
//! Plain owned structs mutated only by user events and fetch completions.
//! None of them do IO; they return the requests a session must issue.

pub mod activity_log;
pub mod mode_state;
pub mod toggle_state;
pub mod view_model;
