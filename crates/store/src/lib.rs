//! In-memory implementations of the Remedia collaborator contracts.
//!
//! [`MemoryStore`] backs the decision core for tests and single-process
//! embedders; the notifiers cover log-only delivery, timeout enforcement,
//! and test recording. A database-backed store would implement the same
//! [`remedia_core::store::RecordStore`] contract.

pub mod memory;
pub mod notifier;

pub use memory::MemoryStore;
pub use notifier::{RecordingNotifier, SentMessage, TimeoutNotifier, TracingNotifier};
