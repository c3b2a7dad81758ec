//! Property-based tests for recipient computation.

use proptest::prelude::*;
use uuid::Uuid;

use remedia_shared::types::UserId;

use crate::notify::recipients::{RecipientSources, compute_recipients};
use crate::org::types::{Role, User};

fn arb_user() -> impl Strategy<Value = User> {
    ((0u128..6), any::<bool>()).prop_map(|(n, active)| {
        let mut user = User::new(format!("u{n}"), Role::Member, None);
        user.id = UserId::from_uuid(Uuid::from_u128(n + 1));
        user.active = active;
        user
    })
}

fn arb_users(max: usize) -> impl Strategy<Value = Vec<User>> {
    proptest::collection::vec(arb_user(), 0..max)
}

prop_compose! {
    fn arb_sources()(
        creator in proptest::option::of(arb_user()),
        assignee in proptest::option::of(arb_user()),
        department_managers in arb_users(4),
        source_department_managers in arb_users(4),
        reviewers in arb_users(4),
        directors in arb_users(4),
    ) -> RecipientSources {
        RecipientSources {
            creator,
            assignee,
            department_managers,
            source_department_managers,
            reviewers,
            directors,
        }
    }
}

fn arb_actor() -> impl Strategy<Value = Option<UserId>> {
    proptest::option::of((0u128..6).prop_map(|n| UserId::from_uuid(Uuid::from_u128(n + 1))))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// No recipient appears twice, however many rules they qualify under.
    #[test]
    fn prop_no_duplicate_recipients(sources in arb_sources(), actor in arb_actor()) {
        let recipients = compute_recipients(sources, actor);
        let mut ids: Vec<_> = recipients.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), recipients.len());
    }

    /// Inactive users never receive notifications.
    #[test]
    fn prop_only_active_recipients(sources in arb_sources(), actor in arb_actor()) {
        let recipients = compute_recipients(sources, actor);
        prop_assert!(recipients.iter().all(|u| u.active));
    }

    /// The actor is excluded whenever anyone else is eligible.
    #[test]
    fn prop_actor_excluded_unless_sole(sources in arb_sources(), actor in arb_actor()) {
        let recipients = compute_recipients(sources, actor);
        if let Some(actor) = actor {
            if recipients.len() > 1 {
                prop_assert!(recipients.iter().all(|u| u.id != actor));
            }
        }
    }
}
