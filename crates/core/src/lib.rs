//! Clicker core data models.
//!
//! This crate defines the task catalog, the progress state a play session
//! accumulates, and the gesture vocabulary that drives it.

#![warn(missing_docs)]

// Identities
mod id;

// Catalog and progress
mod task;
mod state;

// Input vocabulary
mod gesture;

// Shared
mod error;
pub mod limits;

// Re-exports
pub use id::SessionId;

pub use task::{Task, TaskCatalog, TaskId};
pub use state::{CompletionSet, ProgressSnapshot, ProgressState};
pub use gesture::{FlingDirection, GestureEvent, GestureKind, RawInput};
pub use error::{ClickerError, Result};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
