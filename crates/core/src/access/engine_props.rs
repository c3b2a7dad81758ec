//! Property-based tests for the access engine.
//!
//! The central property: editing implies viewing. No combination of role,
//! scope, and case state may allow a user to act on a case they cannot see.

use std::collections::BTreeSet;

use proptest::prelude::*;
use uuid::Uuid;

use remedia_shared::types::{DepartmentId, UserId};

use crate::access::engine::{Actor, can_edit, can_view};
use crate::case::types::Case;
use crate::org::types::{Role, User};
use crate::workflow::types::Status;

/// Small pools so that collisions (actor == creator, shared departments)
/// actually occur.
fn arb_user_id() -> impl Strategy<Value = UserId> {
    (0u128..4).prop_map(|n| UserId::from_uuid(Uuid::from_u128(n + 1)))
}

fn arb_department_id() -> impl Strategy<Value = Option<DepartmentId>> {
    prop_oneof![
        Just(None),
        (0u128..3).prop_map(|n| Some(DepartmentId::from_uuid(Uuid::from_u128(n + 1)))),
    ]
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::QualityManager),
        Just(Role::GroupManager),
        Just(Role::DepartmentManager),
        Just(Role::Member),
        Just(Role::Director),
        Just(Role::FranchiseDepartmentManager),
        Just(Role::ProjectsQualityTracking),
        Just(Role::BranchesQualityTracking),
    ]
}

fn arb_status() -> impl Strategy<Value = Status> {
    proptest::sample::select(Status::ALL.to_vec())
}

fn arb_managed() -> impl Strategy<Value = BTreeSet<DepartmentId>> {
    proptest::collection::btree_set(
        (0u128..3).prop_map(|n| DepartmentId::from_uuid(Uuid::from_u128(n + 1))),
        0..3,
    )
}

prop_compose! {
    fn arb_actor()(
        id in arb_user_id(),
        role in arb_role(),
        department in arb_department_id(),
        managed in arb_managed(),
        active in any::<bool>(),
    ) -> Actor {
        let mut user = User::new("prop", role, department);
        user.id = id;
        user.active = active;
        Actor::new(user, managed)
    }
}

prop_compose! {
    fn arb_case()(
        created_by in arb_user_id(),
        assigned_to in proptest::option::of(arb_user_id()),
        department in arb_department_id(),
        status in arb_status(),
    ) -> Case {
        let mut case = Case::new("prop case", "generated", created_by);
        case.assigned_to = assigned_to;
        case.department_id = department;
        case.status = status;
        case
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Anyone who can edit a case can also view it.
    #[test]
    fn prop_edit_implies_view(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department_id(),
    ) {
        if can_edit(&actor, &case, creator_department) {
            prop_assert!(
                can_view(&actor, &case, creator_department),
                "role {} could edit a case it cannot view",
                actor.user.role
            );
        }
    }

    /// Inactive users can never view or edit anything.
    #[test]
    fn prop_inactive_users_are_denied(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department_id(),
    ) {
        let mut actor = actor;
        actor.user.active = false;
        prop_assert!(!can_view(&actor, &case, creator_department));
        prop_assert!(!can_edit(&actor, &case, creator_department));
    }

    /// Members never see cases they neither created nor were assigned.
    #[test]
    fn prop_members_see_only_their_own(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department_id(),
    ) {
        let mut actor = actor;
        actor.user.role = Role::Member;
        if can_view(&actor, &case, creator_department) {
            prop_assert!(
                case.created_by == actor.user.id || case.assigned_to == Some(actor.user.id)
            );
        }
    }

    /// Terminal cases accept no edits from anyone below admin.
    #[test]
    fn prop_terminal_cases_are_frozen(
        actor in arb_actor(),
        case in arb_case(),
        creator_department in arb_department_id(),
    ) {
        let mut case = case;
        case.status = Status::Closed;
        if actor.user.role != Role::Admin {
            prop_assert!(!can_edit(&actor, &case, creator_department));
        }
    }
}
