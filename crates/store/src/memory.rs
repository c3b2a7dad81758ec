//! `DashMap`-backed in-memory record store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use remedia_core::access::filter::CaseFilter;
use remedia_core::case::types::{Case, CaseAction, Notification};
use remedia_core::org::types::{Department, DepartmentLink, DirectorLink, Role, User};
use remedia_core::store::{RecordStore, StoreError};
use remedia_shared::types::{CaseId, DepartmentId, NotificationId, UserId};

/// In-memory [`RecordStore`] implementation.
///
/// A per-case async mutex serializes concurrent `save_case` calls for the
/// same case, and a save whose action was built from a stale read (its
/// `old_status` no longer matches the stored case) is rejected with
/// [`StoreError::Conflict`]. Together these make the status mutation and
/// its audit append one atomic unit. Seed helpers (`add_user`,
/// `link_manager`, ...) set up fixtures for tests and demos.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    departments: DashMap<DepartmentId, Department>,
    cases: DashMap<CaseId, Case>,
    actions: DashMap<CaseId, Vec<CaseAction>>,
    notifications: DashMap<NotificationId, Notification>,
    department_links: RwLock<Vec<DepartmentLink>>,
    director_links: RwLock<Vec<DirectorLink>>,
    case_locks: DashMap<CaseId, Arc<tokio::sync::Mutex<()>>>,
    fail_next_save: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user.
    pub fn add_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Seeds a department.
    pub fn add_department(&self, department: Department) {
        self.departments.insert(department.id, department);
    }

    /// Seeds a case without going through the lifecycle service.
    pub fn add_case(&self, case: Case) {
        self.cases.insert(case.id, case);
    }

    /// Grants a multi-department manager oversight of a department.
    pub fn link_manager(&self, user_id: UserId, department_id: DepartmentId) {
        self.department_links
            .write()
            .expect("department links lock poisoned")
            .push(DepartmentLink::new(user_id, department_id));
    }

    /// Places a manager under a director.
    pub fn link_director(&self, director_id: UserId, manager_id: UserId) {
        self.director_links
            .write()
            .expect("director links lock poisoned")
            .push(DirectorLink::new(director_id, manager_id));
    }

    /// Test aid: the next `save_case` fails without applying anything.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Audit actions recorded for a case, oldest first.
    #[must_use]
    pub fn actions_for(&self, case_id: CaseId) -> Vec<CaseAction> {
        self.actions
            .get(&case_id)
            .map(|actions| actions.value().clone())
            .unwrap_or_default()
    }

    /// Notification rows for a recipient, oldest first.
    #[must_use]
    pub fn notifications_for(&self, user_id: UserId) -> Vec<Notification> {
        let mut rows: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|n| n.created_at);
        rows
    }

    fn lock_for(&self, case_id: CaseId) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(
            &self
                .case_locks
                .entry(case_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
        )
    }
}

impl RecordStore for MemoryStore {
    async fn get_case(&self, id: CaseId) -> Result<Option<Case>, StoreError> {
        Ok(self.cases.get(&id).map(|case| case.value().clone()))
    }

    async fn save_case(&self, case: Case, action: CaseAction) -> Result<CaseAction, StoreError> {
        let lock = self.lock_for(case.id);
        let _guard = lock.lock().await;
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected save failure".to_string()));
        }
        // A transition built from a stale read must not clobber one that
        // committed after the read.
        if let Some(old) = action.old_status {
            let current = self.cases.get(&case.id).map(|c| c.value().status);
            if current.is_some_and(|status| status != old) {
                return Err(StoreError::Conflict(case.id));
            }
        }
        self.cases.insert(case.id, case);
        self.actions
            .entry(action.case_id)
            .or_default()
            .push(action.clone());
        Ok(action)
    }

    async fn query_cases(&self, filter: &CaseFilter) -> Result<Vec<Case>, StoreError> {
        let mut cases: Vec<Case> = self
            .cases
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        cases.sort_by_key(|c| c.created_at);
        Ok(cases)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn managed_department_links(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DepartmentLink>, StoreError> {
        let links = self
            .department_links
            .read()
            .map_err(|_| StoreError::Backend("department links lock poisoned".to_string()))?;
        Ok(links.iter().filter(|l| l.user_id == user_id).copied().collect())
    }

    async fn director_links(&self, director_id: UserId) -> Result<Vec<DirectorLink>, StoreError> {
        let links = self
            .director_links
            .read()
            .map_err(|_| StoreError::Backend("director links lock poisoned".to_string()))?;
        Ok(links
            .iter()
            .filter(|l| l.director_id == director_id)
            .copied()
            .collect())
    }

    async fn department_links_for(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<DepartmentLink>, StoreError> {
        let links = self
            .department_links
            .read()
            .map_err(|_| StoreError::Backend("department links lock poisoned".to_string()))?;
        Ok(links
            .iter()
            .filter(|l| l.department_id == department_id)
            .copied()
            .collect())
    }

    async fn directors_of_manager(
        &self,
        manager_id: UserId,
    ) -> Result<Vec<DirectorLink>, StoreError> {
        let links = self
            .director_links
            .read()
            .map_err(|_| StoreError::Backend("director links lock poisoned".to_string()))?;
        Ok(links
            .iter()
            .filter(|l| l.manager_id == manager_id)
            .copied()
            .collect())
    }

    async fn department_members(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.active && u.department_id == Some(department_id))
            .map(|u| u.value().clone())
            .collect())
    }

    async fn department_managers(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .filter(|u| {
                u.active
                    && u.role.is_single_department_manager()
                    && u.department_id == Some(department_id)
            })
            .map(|u| u.value().clone())
            .collect())
    }

    async fn active_users_in_role(&self, role: Role) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.active && u.role == role)
            .map(|u| u.value().clone())
            .collect())
    }

    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<NotificationId, StoreError> {
        let id = notification.id;
        self.notifications.insert(id, notification);
        Ok(id)
    }
}
