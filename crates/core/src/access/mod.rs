//! Visibility and edit authorization.
//!
//! Every decision here is a pure function over a resolved [`Actor`] and a
//! case; resolving the actor (loading mapping rows) happens once in
//! [`crate::org::DirectoryService`]. Decisions fail closed.
//!
//! # Modules
//!
//! - `engine` - Per-case view and edit decisions
//! - `filter` - Bulk visibility predicate for case listings

pub mod engine;
pub mod filter;

#[cfg(test)]
mod engine_props;

pub use engine::{Actor, can_edit, can_view};
pub use filter::CaseFilter;
