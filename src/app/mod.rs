//! Application Layer
//!
//! The page model contract and the session that drives a page against a data
//! source.

pub mod page;
pub mod session;

pub use page::{Effects, PageModel, ViewEvent};
pub use session::Session;
