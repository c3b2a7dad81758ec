//! Case lifecycle state machine.
//!
//! This module implements the per-role transition table, the transition
//! guard, and the service that applies a transition against the record
//! store as one atomic unit.
//!
//! # Modules
//!
//! - `types` - Case status and its classification helpers
//! - `table` - Per-role transition table and the transition guard
//! - `error` - Workflow-specific error types
//! - `service` - Transition application against the record store

pub mod error;
pub mod service;
pub mod table;
pub mod types;

#[cfg(test)]
mod table_props;

pub use error::WorkflowError;
pub use service::{LifecycleService, TransitionInput, TransitionOutcome};
pub use table::{allowed_next_statuses, can_transition};
pub use types::Status;
