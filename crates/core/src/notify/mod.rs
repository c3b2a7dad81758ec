//! Notification fan-out for case events.
//!
//! Recipient computation is a pure function over pre-fetched rows;
//! [`Dispatcher`] does the store traffic and pushes messages through the
//! [`crate::store::Notifier`] on a bounded pool. Dispatch is best-effort
//! and decoupled from the transition that triggered it.
//!
//! # Modules
//!
//! - `types` - Case events and their message templates
//! - `recipients` - Deduplicated recipient computation
//! - `dispatcher` - Store-backed fan-out on a bounded worker pool

pub mod dispatcher;
pub mod recipients;
pub mod types;

#[cfg(test)]
mod recipients_props;

pub use dispatcher::Dispatcher;
pub use recipients::{RecipientSources, compute_recipients};
pub use types::CaseEvent;
