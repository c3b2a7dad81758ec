//! Collaborator contracts for persistence and message delivery.
//!
//! The decision core never talks to a database or a mail gateway directly.
//! Embedders supply a [`RecordStore`] for records and a [`Notifier`] for
//! out-of-band delivery; the `remedia-store` crate ships an in-memory pair.

use remedia_shared::types::{CaseId, DepartmentId, NotificationId, UserId};
use thiserror::Error;

use crate::access::filter::CaseFilter;
use crate::case::types::{Case, CaseAction, Notification};
use crate::org::types::{DepartmentLink, DirectorLink, Role, User};

/// Error raised by a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// A concurrent update conflicted with this one.
    #[error("conflicting update for case {0}")]
    Conflict(CaseId),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::Conflict(_) => "STORE_CONFLICT",
            Self::Backend(_) => "STORE_BACKEND",
        }
    }
}

/// Error raised by a notifier when delivering one message.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The send did not finish within the configured timeout.
    #[error("notification send timed out after {0}s")]
    Timeout(u64),

    /// The delivery channel reported a failure.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Persistence contract for cases, users, hierarchy links, and notifications.
///
/// Implementations must make `save_case` atomic: the case update and its
/// audit action land together or not at all. Serializing two transitions
/// racing on one case is also the store's job: a save whose action was
/// built from a stale read must be rejected with [`StoreError::Conflict`].
pub trait RecordStore: Send + Sync {
    /// Fetch a case by id.
    fn get_case(
        &self,
        id: CaseId,
    ) -> impl std::future::Future<Output = Result<Option<Case>, StoreError>> + Send;

    /// Persist a case update together with its audit action, atomically.
    ///
    /// A save whose `action.old_status` no longer matches the stored
    /// case's status fails with [`StoreError::Conflict`].
    fn save_case(
        &self,
        case: Case,
        action: CaseAction,
    ) -> impl std::future::Future<Output = Result<CaseAction, StoreError>> + Send;

    /// List cases matching a visibility filter.
    fn query_cases(
        &self,
        filter: &CaseFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Case>, StoreError>> + Send;

    /// Fetch a user by id.
    fn get_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Mapping rows granting a manager oversight of departments.
    fn managed_department_links(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<DepartmentLink>, StoreError>> + Send;

    /// Mapping rows placing managers under a director.
    fn director_links(
        &self,
        director_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<DirectorLink>, StoreError>> + Send;

    /// Mapping rows granting oversight of one department, across managers.
    fn department_links_for(
        &self,
        department_id: DepartmentId,
    ) -> impl std::future::Future<Output = Result<Vec<DepartmentLink>, StoreError>> + Send;

    /// Directors a given manager reports to.
    fn directors_of_manager(
        &self,
        manager_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<DirectorLink>, StoreError>> + Send;

    /// Active users whose home department is the given one.
    fn department_members(
        &self,
        department_id: DepartmentId,
    ) -> impl std::future::Future<Output = Result<Vec<User>, StoreError>> + Send;

    /// Active single-department managers of the given department.
    fn department_managers(
        &self,
        department_id: DepartmentId,
    ) -> impl std::future::Future<Output = Result<Vec<User>, StoreError>> + Send;

    /// Every active user holding the given role.
    fn active_users_in_role(
        &self,
        role: Role,
    ) -> impl std::future::Future<Output = Result<Vec<User>, StoreError>> + Send;

    /// Persist one notification row.
    fn insert_notification(
        &self,
        notification: Notification,
    ) -> impl std::future::Future<Output = Result<NotificationId, StoreError>> + Send;
}

/// Out-of-band delivery contract (e-mail, chat, or log-only).
///
/// Implementations enforce their own per-send timeout; a failed send must
/// not undo the persistent notification row already written for the
/// recipient.
pub trait Notifier: Send + Sync {
    /// Deliver one message to one recipient.
    fn send(
        &self,
        recipient: &User,
        message: &str,
        case_id: Option<CaseId>,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}
