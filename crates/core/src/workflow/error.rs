//! Workflow error types for the case lifecycle.

use remedia_shared::types::{CaseId, UserId};
use thiserror::Error;

use crate::store::StoreError;
use crate::workflow::types::Status;

/// Errors that can occur while applying a case transition.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The actor may not act on this case at all.
    ///
    /// An expected, user-facing outcome; distinct from
    /// [`WorkflowError::IllegalTransition`] so callers can show
    /// "not allowed for you" versus "not allowed from this state".
    #[error("user {user_id} is not allowed to act on case {case_id}")]
    AuthorizationDenied {
        /// The acting user.
        user_id: UserId,
        /// The case acted on.
        case_id: CaseId,
    },

    /// The requested target is not reachable for this actor from the
    /// case's current status.
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition {
        /// The current status.
        from: Status,
        /// The attempted target status.
        to: Status,
    },

    /// A responsible department must be assigned first.
    #[error("a responsible department is required before moving to {0}")]
    DepartmentRequired(Status),

    /// The case does not exist.
    #[error("case {0} not found")]
    CaseNotFound(CaseId),

    /// The acting user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The record store failed; nothing was applied.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl WorkflowError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AuthorizationDenied { .. } => "AUTHORIZATION_DENIED",
            Self::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            Self::DepartmentRequired(_) => "DEPARTMENT_REQUIRED",
            Self::CaseNotFound(_) => "CASE_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = WorkflowError::IllegalTransition {
            from: Status::Draft,
            to: Status::Closed,
        };
        assert_eq!(err.error_code(), "ILLEGAL_TRANSITION");
        assert_eq!(err.to_string(), "illegal transition from draft to closed");
    }

    #[test]
    fn test_store_error_converts() {
        let err = WorkflowError::from(StoreError::Backend("boom".to_string()));
        assert_eq!(err.error_code(), "PERSISTENCE_FAILURE");
    }
}
