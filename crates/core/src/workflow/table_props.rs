//! Property-based tests for the transition table and guard.

use std::collections::BTreeSet;

use proptest::prelude::*;
use uuid::Uuid;

use remedia_shared::types::{DepartmentId, UserId};

use crate::access::engine::Actor;
use crate::case::types::Case;
use crate::org::types::{Role, User};
use crate::workflow::table::{allowed_next_statuses, can_transition};
use crate::workflow::types::Status;

const ALL_ROLES: [Role; 9] = [
    Role::Admin,
    Role::QualityManager,
    Role::GroupManager,
    Role::DepartmentManager,
    Role::Member,
    Role::Director,
    Role::FranchiseDepartmentManager,
    Role::ProjectsQualityTracking,
    Role::BranchesQualityTracking,
];

fn arb_role() -> impl Strategy<Value = Role> {
    proptest::sample::select(ALL_ROLES.to_vec())
}

fn arb_status() -> impl Strategy<Value = Status> {
    proptest::sample::select(Status::ALL.to_vec())
}

fn arb_department() -> impl Strategy<Value = Option<DepartmentId>> {
    prop_oneof![
        Just(None),
        (0u128..3).prop_map(|n| Some(DepartmentId::from_uuid(Uuid::from_u128(n + 1)))),
    ]
}

prop_compose! {
    fn arb_actor()(
        role in arb_role(),
        department in arb_department(),
        managed in proptest::collection::btree_set(
            (0u128..3).prop_map(|n| DepartmentId::from_uuid(Uuid::from_u128(n + 1))),
            0..3,
        ),
    ) -> Actor {
        Actor::new(User::new("prop", role, department), managed)
    }
}

prop_compose! {
    fn arb_case()(
        status in arb_status(),
        department in arb_department(),
        created_by in (0u128..4).prop_map(|n| UserId::from_uuid(Uuid::from_u128(n + 1))),
    ) -> Case {
        let mut case = Case::new("prop case", "generated", created_by);
        case.status = status;
        case.department_id = department;
        case
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// The table never leads anywhere from a terminal status.
    #[test]
    fn prop_terminal_statuses_have_no_successors(role in arb_role()) {
        prop_assert!(allowed_next_statuses(role, Status::Closed).is_empty());
        prop_assert!(allowed_next_statuses(role, Status::Rejected).is_empty());
    }

    /// The table itself never contains a self-loop; re-entry is only the
    /// guard's revision rule.
    #[test]
    fn prop_table_has_no_self_loops(role in arb_role(), status in arb_status()) {
        prop_assert!(!allowed_next_statuses(role, status).contains(&status));
    }

    /// View-only roles have no entries anywhere in the table.
    #[test]
    fn prop_view_only_roles_drive_nothing(status in arb_status()) {
        for role in [
            Role::GroupManager,
            Role::Director,
            Role::ProjectsQualityTracking,
            Role::BranchesQualityTracking,
        ] {
            prop_assert!(allowed_next_statuses(role, status).is_empty());
        }
    }

    /// Whatever the guard allows is either a table entry, an oversight
    /// safety valve, or a same-status revision.
    #[test]
    fn prop_guard_never_exceeds_table(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department(),
        target in arb_status(),
    ) {
        if can_transition(&actor, &case, creator_department, target) {
            let table: BTreeSet<Status> =
                allowed_next_statuses(actor.user.role, case.status).iter().copied().collect();
            let revision = target == case.status;
            let valve = actor.user.role.sees_everything()
                && ((target == Status::Rejected && case.status.is_in_review())
                    || (target == Status::InProgress && case.status == Status::Resolved));
            prop_assert!(table.contains(&target) || revision || valve);
        }
    }

    /// Inactive actors can never transition anything.
    #[test]
    fn prop_inactive_actor_is_denied(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department(),
        target in arb_status(),
    ) {
        let mut actor = actor;
        actor.user.active = false;
        prop_assert!(!can_transition(&actor, &case, creator_department, target));
    }

    /// Nothing ever leaves a terminal case.
    #[test]
    fn prop_terminal_cases_never_transition(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department(),
        target in arb_status(),
    ) {
        let mut case = case;
        case.status = Status::Rejected;
        prop_assert!(!can_transition(&actor, &case, creator_department, target));
    }
}
