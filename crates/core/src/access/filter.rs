//! Bulk visibility predicate for case listings.

use std::collections::BTreeSet;

use remedia_shared::types::{DepartmentId, UserId};
use serde::{Deserialize, Serialize};

use crate::case::types::Case;

/// Visibility predicate applied when listing cases for a user.
///
/// Built once per request by
/// [`crate::org::DirectoryService::visibility_filter`] and evaluated by the
/// record store; its decisions mirror [`super::engine::can_view`].
/// Follow-up (linked) cases are excluded from every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseFilter {
    /// Matches nothing. Used when scope resolution fails.
    Nothing,
    /// Matches every primary case (oversight roles).
    All,
    /// Cases the user created or was assigned.
    CreatedOrAssigned(UserId),
    /// Department-scoped visibility.
    Departments {
        /// Departments whose cases are visible.
        departments: BTreeSet<DepartmentId>,
        /// Users whose created cases are visible regardless of routing
        /// (the members of a single-department manager's department).
        creators: BTreeSet<UserId>,
        /// The user themselves; their own and assigned cases always match.
        user: UserId,
    },
}

impl CaseFilter {
    /// Evaluates the predicate against one case.
    #[must_use]
    pub fn matches(&self, case: &Case) -> bool {
        if case.is_linked_case() {
            return false;
        }
        match self {
            Self::Nothing => false,
            Self::All => true,
            Self::CreatedOrAssigned(user) => {
                case.created_by == *user || case.assigned_to == Some(*user)
            }
            Self::Departments {
                departments,
                creators,
                user,
            } => {
                case.department_id.is_some_and(|d| departments.contains(&d))
                    || creators.contains(&case.created_by)
                    || case.created_by == *user
                    || case.assigned_to == Some(*user)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use remedia_shared::types::CaseId;

    use super::*;

    #[test]
    fn test_nothing_matches_nothing() {
        let case = Case::new("t", "d", UserId::new());
        assert!(!CaseFilter::Nothing.matches(&case));
    }

    #[test]
    fn test_all_excludes_linked_cases() {
        let mut case = Case::new("t", "d", UserId::new());
        assert!(CaseFilter::All.matches(&case));
        case.title = Case::linked_title(CaseId::new(), "t");
        assert!(!CaseFilter::All.matches(&case));
    }

    #[test]
    fn test_created_or_assigned() {
        let user = UserId::new();
        let mut case = Case::new("t", "d", UserId::new());
        let filter = CaseFilter::CreatedOrAssigned(user);
        assert!(!filter.matches(&case));
        case.assigned_to = Some(user);
        assert!(filter.matches(&case));
    }

    #[test]
    fn test_department_scope_matches_routing_and_origin() {
        let dept = DepartmentId::new();
        let reporter = UserId::new();
        let manager = UserId::new();
        let filter = CaseFilter::Departments {
            departments: BTreeSet::from([dept]),
            creators: BTreeSet::from([reporter]),
            user: manager,
        };

        let mut routed = Case::new("t", "d", UserId::new());
        routed.department_id = Some(dept);
        assert!(filter.matches(&routed));

        let raised = Case::new("t", "d", reporter);
        assert!(filter.matches(&raised));

        let unrelated = Case::new("t", "d", UserId::new());
        assert!(!filter.matches(&unrelated));
    }
}
