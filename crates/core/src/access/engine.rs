//! Per-case view and edit decisions.

use std::collections::BTreeSet;

use remedia_shared::types::DepartmentId;

use crate::case::types::Case;
use crate::org::types::{Role, User};

/// A user together with their resolved managed-department set.
///
/// Built by [`crate::org::DirectoryService::actor`]; the set is empty for
/// roles without department scope, which makes every scoped check fail
/// closed.
#[derive(Debug, Clone)]
pub struct Actor {
    /// The acting user.
    pub user: User,
    /// Departments the user manages, resolved from mapping rows.
    pub managed: BTreeSet<DepartmentId>,
}

impl Actor {
    /// Creates an actor from a user and a resolved managed set.
    #[must_use]
    pub fn new(user: User, managed: BTreeSet<DepartmentId>) -> Self {
        Self { user, managed }
    }

    /// Returns true if the actor manages the given department.
    ///
    /// Single-department managers implicitly manage their home department
    /// even when no mapping row exists for it.
    #[must_use]
    pub fn manages(&self, department: DepartmentId) -> bool {
        self.managed.contains(&department)
            || (self.user.role.is_single_department_manager()
                && self.user.department_id == Some(department))
    }
}

/// Decides whether the actor may view the case.
///
/// `creator_department` is the home department of the case's creator;
/// single-department managers see cases raised by their own people even
/// when the case was routed elsewhere.
#[must_use]
pub fn can_view(actor: &Actor, case: &Case, creator_department: Option<DepartmentId>) -> bool {
    if !actor.user.active {
        return false;
    }
    if actor.user.role.sees_everything() {
        return true;
    }
    // Creators and assignees always see their own cases.
    if case.created_by == actor.user.id || case.assigned_to == Some(actor.user.id) {
        return true;
    }
    let role = actor.user.role;
    if role.is_department_scoped() {
        if case.department_id.is_some_and(|d| actor.manages(d)) {
            return true;
        }
        if role.is_single_department_manager()
            && creator_department.is_some_and(|d| actor.manages(d))
        {
            return true;
        }
    }
    false
}

/// Decides whether the actor may edit the case or act on it.
///
/// Editing implies viewing: every branch here is covered by a matching
/// [`can_view`] branch.
#[must_use]
pub fn can_edit(actor: &Actor, case: &Case, creator_department: Option<DepartmentId>) -> bool {
    if !actor.user.active {
        return false;
    }
    let role = actor.user.role;
    if role == Role::Admin {
        return true;
    }
    if role.sees_everything() {
        // Reviewers may act on any case that is still open.
        return !case.status.is_terminal();
    }
    // Creators may rework their own case until review picks it up.
    if case.created_by == actor.user.id && case.status.is_creator_editable() {
        return true;
    }
    if role.is_department_scoped()
        && !case.status.is_terminal()
        && case.department_id.is_some_and(|d| actor.manages(d))
    {
        return true;
    }
    // Managers of the originating department judge the fix during
    // source-side verification.
    if role.is_single_department_manager()
        && case.status.is_source_verification()
        && creator_department.is_some_and(|d| actor.manages(d))
    {
        return true;
    }
    false
}
