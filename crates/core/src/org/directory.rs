//! Managed-department resolution over a record store.

use std::collections::BTreeSet;
use std::sync::Arc;

use remedia_shared::types::DepartmentId;
use tracing::warn;

use crate::access::engine::Actor;
use crate::access::filter::CaseFilter;
use crate::org::types::{Role, User};
use crate::store::RecordStore;

/// Resolves a user's department scope from the mapping tables.
///
/// Scope resolution fails closed: any store error yields an empty managed
/// set (or [`CaseFilter::Nothing`]), never a broader one.
pub struct DirectoryService<S> {
    store: Arc<S>,
}

impl<S> Clone for DirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> DirectoryService<S> {
    /// Creates a directory service over a record store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves the set of departments the user manages.
    ///
    /// - Single-department managers manage their home department.
    /// - Multi-department managers manage the departments their mapping
    ///   rows grant them.
    /// - Directors manage the union of the managed sets of every
    ///   multi-department manager linked to them.
    /// - Everyone else manages nothing.
    pub async fn managed_departments(&self, user: &User) -> BTreeSet<DepartmentId> {
        if !user.active {
            return BTreeSet::new();
        }
        let role = user.role;
        if role.is_single_department_manager() {
            return user.department_id.into_iter().collect();
        }
        if role.is_multi_department_manager() {
            return self.links_of(user).await;
        }
        if role == Role::Director {
            return self.departments_under_director(user).await;
        }
        BTreeSet::new()
    }

    async fn links_of(&self, user: &User) -> BTreeSet<DepartmentId> {
        match self.store.managed_department_links(user.id).await {
            Ok(links) => links.into_iter().map(|l| l.department_id).collect(),
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "failed to load department links; scope is empty");
                BTreeSet::new()
            }
        }
    }

    async fn departments_under_director(&self, director: &User) -> BTreeSet<DepartmentId> {
        let links = match self.store.director_links(director.id).await {
            Ok(links) => links,
            Err(err) => {
                warn!(user_id = %director.id, error = %err, "failed to load director links; scope is empty");
                return BTreeSet::new();
            }
        };

        let mut managed = BTreeSet::new();
        for link in links {
            let manager = match self.store.get_user(link.manager_id).await {
                Ok(Some(manager)) => manager,
                Ok(None) => continue,
                Err(err) => {
                    warn!(user_id = %link.manager_id, error = %err, "failed to load linked manager; skipping");
                    continue;
                }
            };
            if manager.role.is_multi_department_manager() {
                managed.extend(self.links_of(&manager).await);
            }
        }
        managed
    }

    /// Resolves a user into an [`Actor`] ready for access decisions.
    pub async fn actor(&self, user: User) -> Actor {
        let managed = self.managed_departments(&user).await;
        Actor::new(user, managed)
    }

    /// Builds the case-listing predicate for a user.
    pub async fn visibility_filter(&self, user: &User) -> CaseFilter {
        if !user.active {
            return CaseFilter::Nothing;
        }
        let role = user.role;
        if role.sees_everything() {
            return CaseFilter::All;
        }
        if role.is_single_department_manager() {
            let Some(department) = user.department_id else {
                return CaseFilter::Nothing;
            };
            let creators = match self.store.department_members(department).await {
                Ok(members) => members.into_iter().map(|m| m.id).collect(),
                Err(err) => {
                    warn!(user_id = %user.id, error = %err, "failed to load department members; scope is empty");
                    return CaseFilter::Nothing;
                }
            };
            return CaseFilter::Departments {
                departments: BTreeSet::from([department]),
                creators,
                user: user.id,
            };
        }
        if role.is_department_scoped() {
            let departments = self.managed_departments(user).await;
            if departments.is_empty() {
                // Still see own and assigned cases.
                return CaseFilter::CreatedOrAssigned(user.id);
            }
            return CaseFilter::Departments {
                departments,
                creators: BTreeSet::new(),
                user: user.id,
            };
        }
        CaseFilter::CreatedOrAssigned(user.id)
    }
}
