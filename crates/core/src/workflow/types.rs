//! Workflow domain types for the case lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Case status in the corrective-action workflow.
///
/// Cases progress through review, routing, planning, implementation, and
/// source-side verification before being closed. The nominal path is:
/// Draft → `PendingReview` → `UnderReview` → Assigned → Planning →
/// Implementation → Completed → Resolved → Closed. `Rejected` ends a case
/// during review; `InProgress` sends an unsatisfying fix back to planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Private draft visible only to the creator.
    Draft,
    /// Submitted and waiting for a reviewer to pick it up.
    PendingReview,
    /// A reviewer is evaluating the case.
    UnderReview,
    /// Routed to a responsible department.
    Assigned,
    /// The department is drafting a remediation plan.
    Planning,
    /// The approved plan is being carried out.
    Implementation,
    /// The department reports the remediation done.
    Completed,
    /// The originating side is verifying the fix.
    SourceReview,
    /// The originating side accepted the fix; awaiting final closure.
    Resolved,
    /// Terminal: the case is closed.
    Closed,
    /// Terminal: the case was rejected during review.
    Rejected,
    /// The fix was found unsatisfying; rework is required.
    InProgress,
}

impl Status {
    /// Every status, in nominal pipeline order.
    pub const ALL: [Self; 12] = [
        Self::Draft,
        Self::PendingReview,
        Self::UnderReview,
        Self::Assigned,
        Self::Planning,
        Self::Implementation,
        Self::Completed,
        Self::SourceReview,
        Self::Resolved,
        Self::Closed,
        Self::Rejected,
        Self::InProgress,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::UnderReview => "under_review",
            Self::Assigned => "assigned",
            Self::Planning => "planning",
            Self::Implementation => "implementation",
            Self::Completed => "completed",
            Self::SourceReview => "source_review",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Rejected => "rejected",
            Self::InProgress => "in_progress",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_review" => Some(Self::PendingReview),
            "under_review" => Some(Self::UnderReview),
            "assigned" => Some(Self::Assigned),
            "planning" => Some(Self::Planning),
            "implementation" => Some(Self::Implementation),
            "completed" => Some(Self::Completed),
            "source_review" => Some(Self::SourceReview),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            "rejected" => Some(Self::Rejected),
            "in_progress" => Some(Self::InProgress),
            _ => None,
        }
    }

    /// Returns true for terminal statuses. Terminal cases are immutable;
    /// continuing work requires a linked follow-up case.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Rejected)
    }

    /// Returns true while the case sits with reviewers, before routing.
    #[must_use]
    pub fn is_in_review(&self) -> bool {
        matches!(self, Self::PendingReview | Self::UnderReview)
    }

    /// Returns true for statuses a case may hold before a department
    /// has been assigned.
    #[must_use]
    pub fn allows_missing_department(&self) -> bool {
        matches!(
            self,
            Self::Draft | Self::PendingReview | Self::UnderReview | Self::Rejected
        )
    }

    /// Returns true while the creator may still edit the case themselves.
    #[must_use]
    pub fn is_creator_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::PendingReview)
    }

    /// Returns true while the originating side is judging the fix.
    #[must_use]
    pub fn is_source_verification(&self) -> bool {
        matches!(self, Self::Completed | Self::SourceReview)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
