//! Progress Tracking
//!
//! Gesture classification, the scoring rule table, and the single-owner
//! store that turns gestures into score and unlocked tasks.

#![warn(missing_docs)]

pub mod classifier;
pub mod engine;
pub mod store;
pub mod session;

pub use classifier::{GestureClassifier, GestureSession};
pub use engine::{Applied, Condition, Milestone, ProgressEngine, Rule};
pub use store::ProgressStore;
pub use session::{GameSession, InputPort, Session, SessionHandle};
