//! Per-role transition table and the transition guard.
//!
//! [`allowed_next_statuses`] is a pure lookup: it answers "what may this
//! role ever do from this status", with no knowledge of the concrete case.
//! [`can_transition`] layers the department and identity guards on top.

use crate::access::engine::{Actor, can_edit};
use crate::case::types::Case;
use crate::org::types::Role;
use crate::workflow::types::Status;
use remedia_shared::types::DepartmentId;

/// Returns the statuses the role may move a case to from `current`.
///
/// Pairs with no entry return the empty slice; callers must treat that as
/// a rejected request, never coerce to the nearest legal state.
#[must_use]
pub fn allowed_next_statuses(role: Role, current: Status) -> &'static [Status] {
    use Status as S;
    match (role, current) {
        // Admins drive the full pipeline.
        (Role::Admin, S::Draft) => &[S::PendingReview],
        (Role::Admin, S::PendingReview) => &[S::UnderReview, S::Assigned, S::Rejected],
        (Role::Admin, S::UnderReview) => &[S::Assigned, S::Rejected],
        (Role::Admin, S::Assigned) => &[S::Planning],
        (Role::Admin, S::Planning) => &[S::Implementation, S::Assigned],
        (Role::Admin, S::Implementation) => &[S::Completed],
        (Role::Admin, S::Completed) => &[S::SourceReview],
        (Role::Admin, S::SourceReview) => &[S::Resolved, S::InProgress],
        (Role::Admin, S::InProgress) => &[S::Planning],
        (Role::Admin, S::Resolved) => &[S::Closed, S::InProgress],

        // Reviewers route cases in and close them out.
        (Role::QualityManager, S::PendingReview) => &[S::UnderReview, S::Assigned, S::Rejected],
        (Role::QualityManager, S::UnderReview) => &[S::Assigned, S::Rejected],
        (Role::QualityManager, S::Planning) => &[S::Implementation, S::Assigned],
        (Role::QualityManager, S::Resolved) => &[S::Closed, S::InProgress],

        // Department managers work their own remediation.
        (Role::DepartmentManager | Role::FranchiseDepartmentManager, S::Assigned) => {
            &[S::Planning]
        }
        (Role::DepartmentManager | Role::FranchiseDepartmentManager, S::Implementation) => {
            &[S::Completed]
        }
        (Role::DepartmentManager | Role::FranchiseDepartmentManager, S::Completed) => {
            &[S::Resolved, S::InProgress]
        }
        (Role::DepartmentManager | Role::FranchiseDepartmentManager, S::InProgress) => {
            &[S::Planning]
        }

        // Members only submit their own drafts.
        (Role::Member, S::Draft) => &[S::PendingReview],

        // Directors and multi-department trackers watch; they never drive.
        _ => &[],
    }
}

/// Decides whether the actor may move the case to `target`.
///
/// Beyond the table lookup this enforces:
/// - department ownership for single-department manager roles, with the
///   terminal-satisfaction exception (`Completed` → `Resolved`/`InProgress`
///   belongs to the case's originating department, or the creator);
/// - creator identity for members submitting a draft;
/// - two always-available safety valves for oversight roles: reject while
///   the case is still in review, and reopen a resolved case;
/// - re-entering the current status as a no-status-change revision, legal
///   for anyone who may edit a non-terminal case.
#[must_use]
pub fn can_transition(
    actor: &Actor,
    case: &Case,
    creator_department: Option<DepartmentId>,
    target: Status,
) -> bool {
    if !actor.user.active {
        return false;
    }
    let role = actor.user.role;
    let current = case.status;

    if target == current {
        return !current.is_terminal() && can_edit(actor, case, creator_department);
    }

    if role.sees_everything() {
        if target == Status::Rejected && current.is_in_review() {
            return true;
        }
        if target == Status::InProgress && current == Status::Resolved {
            return true;
        }
    }

    if !allowed_next_statuses(role, current).contains(&target) {
        return false;
    }

    match role {
        Role::Admin | Role::QualityManager => true,
        Role::Member => case.created_by == actor.user.id,
        Role::DepartmentManager | Role::FranchiseDepartmentManager => {
            let owns_case = case.department_id.is_some_and(|d| actor.manages(d));
            if current == Status::Completed
                && matches!(target, Status::Resolved | Status::InProgress)
            {
                owns_case
                    || case.created_by == actor.user.id
                    || creator_department.is_some_and(|d| actor.manages(d))
            } else {
                owns_case
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use remedia_shared::types::UserId;
    use rstest::rstest;

    use super::*;
    use crate::org::types::User;

    fn actor(role: Role, department: Option<DepartmentId>) -> Actor {
        Actor::new(User::new("u", role, department), BTreeSet::new())
    }

    fn case_in(department: Option<DepartmentId>, status: Status) -> Case {
        let mut case = Case::new("t", "d", UserId::new());
        case.department_id = department;
        case.status = status;
        case
    }

    #[rstest]
    #[case(Role::QualityManager, Status::PendingReview, Status::Assigned, true)]
    #[case(Role::QualityManager, Status::PendingReview, Status::Rejected, true)]
    #[case(Role::QualityManager, Status::UnderReview, Status::Assigned, true)]
    #[case(Role::QualityManager, Status::Planning, Status::Implementation, true)]
    #[case(Role::QualityManager, Status::Assigned, Status::Planning, false)]
    #[case(Role::Member, Status::Planning, Status::Implementation, false)]
    #[case(Role::Director, Status::Assigned, Status::Planning, false)]
    #[case(Role::GroupManager, Status::Assigned, Status::Planning, false)]
    fn test_table_entries(
        #[case] role: Role,
        #[case] from: Status,
        #[case] to: Status,
        #[case] allowed: bool,
    ) {
        assert_eq!(allowed_next_statuses(role, from).contains(&to), allowed);
    }

    #[test]
    fn test_terminal_statuses_have_no_exits() {
        for role in [Role::Admin, Role::QualityManager, Role::DepartmentManager] {
            assert!(allowed_next_statuses(role, Status::Closed).is_empty());
            assert!(allowed_next_statuses(role, Status::Rejected).is_empty());
        }
    }

    #[test]
    fn test_member_submits_only_own_draft() {
        let mut case = case_in(None, Status::Draft);
        let a = actor(Role::Member, None);
        assert!(!can_transition(&a, &case, None, Status::PendingReview));
        case.created_by = a.user.id;
        assert!(can_transition(&a, &case, None, Status::PendingReview));
    }

    #[test]
    fn test_department_guard_blocks_foreign_manager() {
        let mine = DepartmentId::new();
        let theirs = DepartmentId::new();
        let a = actor(Role::DepartmentManager, Some(mine));
        let case = case_in(Some(theirs), Status::Assigned);
        assert!(!can_transition(&a, &case, None, Status::Planning));

        let own_case = case_in(Some(mine), Status::Assigned);
        assert!(can_transition(&a, &own_case, None, Status::Planning));
    }

    #[test]
    fn test_satisfaction_belongs_to_originating_department() {
        let remediating = DepartmentId::new();
        let originating = DepartmentId::new();
        let case = case_in(Some(remediating), Status::Completed);

        // The originating department's manager signs off even though the
        // case is routed elsewhere.
        let source_manager = actor(Role::DepartmentManager, Some(originating));
        assert!(can_transition(&source_manager, &case, Some(originating), Status::Resolved));
        assert!(can_transition(&source_manager, &case, Some(originating), Status::InProgress));
        // But cannot touch earlier stages of the foreign case.
        let early = case_in(Some(remediating), Status::Assigned);
        assert!(!can_transition(&source_manager, &early, Some(originating), Status::Planning));
    }

    #[test]
    fn test_creator_may_judge_satisfaction() {
        let remediating = DepartmentId::new();
        let mut case = case_in(Some(remediating), Status::Completed);
        let a = actor(Role::DepartmentManager, Some(DepartmentId::new()));
        case.created_by = a.user.id;
        assert!(can_transition(&a, &case, None, Status::Resolved));
    }

    #[test]
    fn test_oversight_safety_valves() {
        let a = actor(Role::QualityManager, None);
        let reviewing = case_in(None, Status::UnderReview);
        assert!(can_transition(&a, &reviewing, None, Status::Rejected));

        let resolved = case_in(Some(DepartmentId::new()), Status::Resolved);
        assert!(can_transition(&a, &resolved, None, Status::InProgress));

        // No valve for non-oversight roles.
        let manager = actor(Role::DepartmentManager, None);
        assert!(!can_transition(&manager, &reviewing, None, Status::Rejected));
    }

    #[test]
    fn test_same_status_revision() {
        let dept = DepartmentId::new();
        let a = actor(Role::DepartmentManager, Some(dept));
        let case = case_in(Some(dept), Status::Planning);
        assert!(can_transition(&a, &case, None, Status::Planning));

        // Terminal statuses never re-enter.
        let closed = case_in(Some(dept), Status::Closed);
        assert!(!can_transition(&actor(Role::Admin, None), &closed, None, Status::Closed));
    }
}
