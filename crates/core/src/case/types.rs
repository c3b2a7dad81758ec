//! Case domain types.

use chrono::{DateTime, Utc};
use remedia_shared::types::{CaseActionId, CaseId, DepartmentId, NotificationId, UserId};
use serde::{Deserialize, Serialize};

use crate::workflow::types::Status;

/// A corrective-action case.
///
/// A case is created by a reporter, routed to a department by a reviewer,
/// worked by that department's manager, and closed by a reviewer once the
/// originating side confirms the fix. Every status change appends a
/// [`CaseAction`] to the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Unique case identifier.
    pub id: CaseId,
    /// Short summary. Titles starting with [`Case::LINKED_PREFIX`] mark
    /// follow-up cases spawned from a closed parent.
    pub title: String,
    /// Full description of the nonconformity.
    pub description: String,
    /// Current workflow status.
    pub status: Status,
    /// The user who opened the case.
    pub created_by: UserId,
    /// The individual assignee, if one was picked during routing.
    pub assigned_to: Option<UserId>,
    /// The department responsible for remediation, once routed.
    pub department_id: Option<DepartmentId>,
    /// When the case was opened.
    pub created_at: DateTime<Utc>,
    /// When the case last changed.
    pub updated_at: DateTime<Utc>,
    /// Set exactly when the case enters a terminal status.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Case {
    /// Title prefix marking a follow-up case linked to a closed parent.
    pub const LINKED_PREFIX: &'static str = "[Linked #";

    /// Creates a case submitted directly for review.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CaseId::new(),
            title: title.into(),
            description: description.into(),
            status: Status::PendingReview,
            created_by,
            assigned_to: None,
            department_id: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    /// Creates a case that starts as a private draft.
    #[must_use]
    pub fn draft(title: impl Into<String>, description: impl Into<String>, created_by: UserId) -> Self {
        Self {
            status: Status::Draft,
            ..Self::new(title, description, created_by)
        }
    }

    /// Returns true if this is a follow-up case spawned from a closed parent.
    ///
    /// Linked cases are excluded from primary case listings.
    #[must_use]
    pub fn is_linked_case(&self) -> bool {
        self.title.starts_with(Self::LINKED_PREFIX)
    }

    /// Builds the title of a follow-up case for a closed parent.
    #[must_use]
    pub fn linked_title(parent: CaseId, title: &str) -> String {
        format!("{}{parent}] {title}", Self::LINKED_PREFIX)
    }
}

/// Audit trail entry recording one status change or comment on a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseAction {
    /// Unique action identifier.
    pub id: CaseActionId,
    /// The case the action belongs to.
    pub case_id: CaseId,
    /// The user who performed the action.
    pub user_id: UserId,
    /// Status before the action, if it changed status.
    pub old_status: Option<Status>,
    /// Status after the action, if it changed status.
    pub new_status: Option<Status>,
    /// Free-text comment accompanying the action.
    pub comment: Option<String>,
    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
}

impl CaseAction {
    /// Records a status transition.
    #[must_use]
    pub fn transition(
        case_id: CaseId,
        user_id: UserId,
        old_status: Status,
        new_status: Status,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: CaseActionId::new(),
            case_id,
            user_id,
            old_status: Some(old_status),
            new_status: Some(new_status),
            comment,
            created_at: Utc::now(),
        }
    }

    /// Records a comment without a status change.
    #[must_use]
    pub fn comment(case_id: CaseId, user_id: UserId, comment: impl Into<String>) -> Self {
        Self {
            id: CaseActionId::new(),
            case_id,
            user_id,
            old_status: None,
            new_status: None,
            comment: Some(comment.into()),
            created_at: Utc::now(),
        }
    }
}

/// Persistent in-app notification row for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient.
    pub user_id: UserId,
    /// The case the notification is about, if any.
    pub case_id: Option<CaseId>,
    /// Human-readable message.
    pub message: String,
    /// Whether the recipient has seen the notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(user_id: UserId, case_id: Option<CaseId>, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            case_id,
            message: message.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
