//! Case events and their message templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::case::types::Case;
use crate::workflow::types::Status;

/// The notification-worthy event derived from a status transition.
///
/// The event picks the message template only; the recipient set is the
/// same for every event (see [`super::recipients`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseEvent {
    /// A case was submitted for review or review started.
    Created,
    /// The case was routed (or re-routed) to a responsible department.
    Reassigned,
    /// A remediation plan was submitted for approval.
    PlanSubmitted,
    /// The remediation plan was approved; implementation begins.
    PlanApproved,
    /// The plan was sent back, or the case was reworked in place.
    PlanRevisionRequested,
    /// The department reported the remediation complete.
    RemediationComplete,
    /// The originating side accepted the fix.
    SourceApproved,
    /// The originating side found the fix unsatisfying.
    SourceRejected,
    /// The case was rejected during review.
    Rejected,
    /// The case was closed.
    Closed,
}

impl CaseEvent {
    /// Returns the string representation of the event.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Reassigned => "reassigned",
            Self::PlanSubmitted => "plan_submitted",
            Self::PlanApproved => "plan_approved",
            Self::PlanRevisionRequested => "plan_revision_requested",
            Self::RemediationComplete => "remediation_complete",
            Self::SourceApproved => "source_approved",
            Self::SourceRejected => "source_rejected",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        }
    }

    /// Derives the event from a committed transition.
    ///
    /// A same-status transition is always a revision of the current work
    /// product, whatever the status.
    #[must_use]
    pub fn for_transition(from: Status, to: Status) -> Self {
        if from == to {
            return Self::PlanRevisionRequested;
        }
        match to {
            Status::Draft | Status::PendingReview | Status::UnderReview => Self::Created,
            Status::Assigned => {
                if from == Status::Planning {
                    // The reviewer sent the plan back for another pass.
                    Self::PlanRevisionRequested
                } else {
                    Self::Reassigned
                }
            }
            Status::Planning => Self::PlanSubmitted,
            Status::Implementation => Self::PlanApproved,
            Status::Completed | Status::SourceReview => Self::RemediationComplete,
            Status::Resolved => Self::SourceApproved,
            Status::InProgress => Self::SourceRejected,
            Status::Rejected => Self::Rejected,
            Status::Closed => Self::Closed,
        }
    }

    /// Renders the human-readable message for this event on a case.
    #[must_use]
    pub fn message_for(&self, case: &Case) -> String {
        let title = &case.title;
        let id = case.id;
        match self {
            Self::Created => format!("Case '{title}' ({id}) was submitted for review."),
            Self::Reassigned => {
                format!("Case '{title}' ({id}) was assigned to a responsible department.")
            }
            Self::PlanSubmitted => {
                format!("A remediation plan was submitted for case '{title}' ({id}).")
            }
            Self::PlanApproved => format!(
                "The remediation plan for case '{title}' ({id}) was approved; implementation begins."
            ),
            Self::PlanRevisionRequested => {
                format!("A revision was requested on case '{title}' ({id}).")
            }
            Self::RemediationComplete => format!(
                "Remediation for case '{title}' ({id}) was reported complete and awaits source review."
            ),
            Self::SourceApproved => format!(
                "The originating department accepted the fix for case '{title}' ({id})."
            ),
            Self::SourceRejected => format!(
                "The fix for case '{title}' ({id}) was found unsatisfying; rework is required."
            ),
            Self::Rejected => format!("Case '{title}' ({id}) was rejected during review."),
            Self::Closed => format!("Case '{title}' ({id}) was closed."),
        }
    }
}

impl fmt::Display for CaseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
