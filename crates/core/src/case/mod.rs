//! Case records, audit actions, and notification rows.

pub mod types;

pub use types::{Case, CaseAction, Notification};
