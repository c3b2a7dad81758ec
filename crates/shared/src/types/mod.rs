//! Common types used across the application.

mod id;


pub use id::{CaseActionId, CaseId, DepartmentId, NotificationId, UserId};
