//! Service Layer
//!
//! Everything that touches the network: resources and their paths, the data
//! source abstraction, typed decoding, and the runtime fetch tasks run on.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       FetchAdapter                        │
//! │  ┌────────────┐   ┌──────────────┐   ┌───────────────┐   │
//! │  │  Resource  │──▶│  DataSource  │──▶│ decode→Payload│   │
//! │  │  (paths)   │   │ (HttpSource) │   │   (serde)     │   │
//! │  └────────────┘   └──────────────┘   └───────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ Completion
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Page state (via Session)                 │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod adapter;
mod events;
mod resource;
mod runtime;
#[cfg(test)]
pub(crate) mod scripted;
mod source;

pub use adapter::*;
pub use events::*;
pub use resource::*;
pub use runtime::*;
pub use source::*;
