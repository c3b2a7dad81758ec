//! Transition application against the record store.

use std::sync::Arc;

use chrono::Utc;
use remedia_shared::types::{CaseId, DepartmentId, UserId};
use tracing::info;

use crate::access::engine::{can_edit, can_view};
use crate::case::types::{Case, CaseAction};
use crate::notify::types::CaseEvent;
use crate::org::directory::DirectoryService;
use crate::store::RecordStore;
use crate::workflow::error::WorkflowError;
use crate::workflow::table::can_transition;
use crate::workflow::types::Status;

/// One requested transition.
#[derive(Debug, Clone)]
pub struct TransitionInput {
    /// The case to move.
    pub case_id: CaseId,
    /// The requested target status.
    pub target: Status,
    /// Free-text comment recorded on the audit action.
    pub comment: Option<String>,
    /// Department to route the case to (routing transitions).
    pub department: Option<DepartmentId>,
    /// Individual assignee to record (routing transitions).
    pub assignee: Option<UserId>,
}

impl TransitionInput {
    /// Creates a plain transition with no routing changes.
    #[must_use]
    pub fn new(case_id: CaseId, target: Status) -> Self {
        Self {
            case_id,
            target,
            comment: None,
            department: None,
            assignee: None,
        }
    }

    /// Attaches a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Routes the case to a department.
    #[must_use]
    pub fn with_department(mut self, department: DepartmentId) -> Self {
        self.department = Some(department);
        self
    }

    /// Records an individual assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// A committed transition, ready for notification dispatch.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// The case as persisted.
    pub case: Case,
    /// The audit action appended with the case.
    pub action: CaseAction,
    /// The event to fan out for this transition.
    pub event: CaseEvent,
}

/// Applies status transitions as one atomic unit of work.
///
/// The service never mutates history: a revert is a new forward
/// transition, and a closed case is reopened only by creating a new
/// linked case.
pub struct LifecycleService<S> {
    store: Arc<S>,
    directory: DirectoryService<S>,
}

impl<S: RecordStore> LifecycleService<S> {
    /// Creates a lifecycle service over a record store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            directory: DirectoryService::new(Arc::clone(&store)),
            store,
        }
    }

    /// Moves a case to `input.target` on behalf of `actor_id`.
    ///
    /// Authorization, transition legality, and the department invariant
    /// are checked in that order; the status mutation and its audit
    /// action then commit together through [`RecordStore::save_case`].
    /// Notification dispatch is the caller's next step, after commit.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::AuthorizationDenied`] if the actor may not act
    ///   on the case;
    /// - [`WorkflowError::IllegalTransition`] if the target is not
    ///   reachable for the actor from the current status;
    /// - [`WorkflowError::DepartmentRequired`] if the target needs a
    ///   responsible department and none is set or supplied;
    /// - [`WorkflowError::Persistence`] if the store fails; nothing is
    ///   applied.
    pub async fn apply_transition(
        &self,
        actor_id: UserId,
        input: TransitionInput,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let user = self
            .store
            .get_user(actor_id)
            .await?
            .ok_or(WorkflowError::UserNotFound(actor_id))?;
        let case = self
            .store
            .get_case(input.case_id)
            .await?
            .ok_or(WorkflowError::CaseNotFound(input.case_id))?;
        let creator_department = self
            .store
            .get_user(case.created_by)
            .await?
            .and_then(|creator| creator.department_id);

        let actor = self.directory.actor(user).await;
        if !can_edit(&actor, &case, creator_department) {
            return Err(WorkflowError::AuthorizationDenied {
                user_id: actor_id,
                case_id: case.id,
            });
        }
        if !can_transition(&actor, &case, creator_department, input.target) {
            return Err(WorkflowError::IllegalTransition {
                from: case.status,
                to: input.target,
            });
        }

        let from = case.status;
        let mut updated = case.clone();
        if let Some(department) = input.department {
            updated.department_id = Some(department);
        }
        if let Some(assignee) = input.assignee {
            updated.assigned_to = Some(assignee);
        }
        if !input.target.allows_missing_department() && updated.department_id.is_none() {
            return Err(WorkflowError::DepartmentRequired(input.target));
        }

        let now = Utc::now();
        updated.status = input.target;
        updated.updated_at = now;
        if input.target.is_terminal() {
            updated.closed_at = Some(now);
        }

        let action = CaseAction::transition(case.id, actor_id, from, input.target, input.comment);
        let action = self.store.save_case(updated.clone(), action).await?;

        info!(case_id = %case.id, from = %from, to = %input.target, actor = %actor_id, "case transition applied");
        Ok(TransitionOutcome {
            case: updated,
            event: CaseEvent::for_transition(from, input.target),
            action,
        })
    }

    /// Decides whether `actor_id` may view the case, loading both records.
    ///
    /// Convenience wrapper used by embedders answering single-case reads;
    /// missing records deny.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Persistence`] if the store fails.
    pub async fn may_view(&self, actor_id: UserId, case_id: CaseId) -> Result<bool, WorkflowError> {
        let Some(user) = self.store.get_user(actor_id).await? else {
            return Ok(false);
        };
        let Some(case) = self.store.get_case(case_id).await? else {
            return Ok(false);
        };
        let creator_department = self
            .store
            .get_user(case.created_by)
            .await?
            .and_then(|creator| creator.department_id);
        let actor = self.directory.actor(user).await;
        Ok(can_view(&actor, &case, creator_department))
    }

    /// Opens a follow-up case linked to a closed parent.
    ///
    /// The parent is never mutated; the new case starts back at review
    /// with the linked-title convention marking its origin.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::CaseNotFound`] / [`WorkflowError::UserNotFound`]
    ///   if either record is missing;
    /// - [`WorkflowError::IllegalTransition`] if the parent is not
    ///   terminal;
    /// - [`WorkflowError::Persistence`] if the store fails.
    pub async fn open_linked_case(
        &self,
        actor_id: UserId,
        parent_id: CaseId,
        description: impl Into<String> + Send,
    ) -> Result<Case, WorkflowError> {
        let parent = self
            .store
            .get_case(parent_id)
            .await?
            .ok_or(WorkflowError::CaseNotFound(parent_id))?;
        self.store
            .get_user(actor_id)
            .await?
            .ok_or(WorkflowError::UserNotFound(actor_id))?;
        if !parent.status.is_terminal() {
            return Err(WorkflowError::IllegalTransition {
                from: parent.status,
                to: parent.status,
            });
        }

        let mut follow_up = Case::new(
            Case::linked_title(parent.id, &parent.title),
            description,
            actor_id,
        );
        follow_up.department_id = parent.department_id;
        let action = CaseAction::comment(
            follow_up.id,
            actor_id,
            format!("Opened as follow-up to closed case {}", parent.id),
        );
        self.store.save_case(follow_up.clone(), action).await?;
        info!(parent = %parent.id, case_id = %follow_up.id, "follow-up case opened");
        Ok(follow_up)
    }
}
