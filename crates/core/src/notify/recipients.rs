//! Deduplicated recipient computation.

use std::collections::BTreeSet;

use remedia_shared::types::UserId;

use crate::org::types::User;

/// Pre-fetched candidate rows for one dispatch, grouped by rule.
///
/// Fetching is [`super::Dispatcher`]'s job; keeping this a plain struct
/// keeps the dedup/exclusion logic pure and testable.
#[derive(Debug, Clone, Default)]
pub struct RecipientSources {
    /// The case creator.
    pub creator: Option<User>,
    /// The current assignee.
    pub assignee: Option<User>,
    /// Managers of the department the case is routed to.
    pub department_managers: Vec<User>,
    /// Managers of the creator's home department.
    pub source_department_managers: Vec<User>,
    /// Every active reviewer, notified on every event.
    pub reviewers: Vec<User>,
    /// Directors reachable through the case department's managers.
    pub directors: Vec<User>,
}

/// Flattens the sources into the final recipient list.
///
/// Rules are additive; a user qualifying under several rules appears once.
/// Inactive users are dropped. The acting user is removed unless they are
/// the sole eligible recipient.
#[must_use]
pub fn compute_recipients(sources: RecipientSources, actor: Option<UserId>) -> Vec<User> {
    let RecipientSources {
        creator,
        assignee,
        department_managers,
        source_department_managers,
        reviewers,
        directors,
    } = sources;

    let mut seen: BTreeSet<UserId> = BTreeSet::new();
    let mut recipients = Vec::new();
    let candidates = creator
        .into_iter()
        .chain(assignee)
        .chain(department_managers)
        .chain(source_department_managers)
        .chain(reviewers)
        .chain(directors);
    for user in candidates {
        if user.active && seen.insert(user.id) {
            recipients.push(user);
        }
    }

    if let Some(actor) = actor {
        if recipients.len() > 1 {
            recipients.retain(|u| u.id != actor);
        }
    }
    recipients
}
