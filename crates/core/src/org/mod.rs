//! Organizational model for Remedia.
//!
//! This module defines the role taxonomy, departments, and the mapping
//! tables that describe which departments a manager oversees and which
//! managers report to a director.
//!
//! # Modules
//!
//! - `types` - Role, user, department, and hierarchy link types
//! - `directory` - Managed-department resolution over a record store

pub mod directory;
pub mod types;

pub use directory::DirectoryService;
pub use types::{Department, DepartmentLink, DirectorLink, Role, User};
