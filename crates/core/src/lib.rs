//! Core decision logic for Remedia.
//!
//! This crate contains the authorization, workflow, and notification rules of
//! the corrective-action case tracker, with ZERO web or database dependencies.
//! Persistence and message delivery are abstract collaborators (see [`store`]).
//!
//! # Modules
//!
//! - `org` - Roles, departments, and the management hierarchy
//! - `case` - Case records, audit actions, and notifications
//! - `store` - Record store and notifier collaborator contracts
//! - `access` - Visibility and edit authorization
//! - `workflow` - Status state machine and transition application
//! - `notify` - Recipient computation and dispatch

pub mod access;
pub mod case;
pub mod notify;
pub mod org;
pub mod store;
pub mod workflow;
