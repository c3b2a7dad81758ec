//! Store-backed notification fan-out on a bounded worker pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::StreamExt;
use remedia_shared::AppConfig;
use remedia_shared::config::DispatchConfig;
use remedia_shared::types::{DepartmentId, UserId};
use tracing::{debug, error, warn};

use crate::case::types::{Case, Notification};
use crate::notify::recipients::{RecipientSources, compute_recipients};
use crate::notify::types::CaseEvent;
use crate::org::types::{Role, User};
use crate::store::{Notifier, RecordStore};

/// Fans a case event out to every stakeholder.
///
/// One [`Notification`] row is written per recipient per call; delivery
/// through the [`Notifier`] is best-effort on a pool of
/// [`DispatchConfig::workers`] concurrent sends. Failures are logged per
/// recipient and never propagate to the transition that triggered them.
pub struct Dispatcher<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    config: DispatchConfig,
}

impl<S: RecordStore, N: Notifier> Dispatcher<S, N> {
    /// Creates a dispatcher with an explicit dispatch configuration.
    #[must_use]
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: DispatchConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Creates a dispatcher from the application configuration.
    #[must_use]
    pub fn from_config(store: Arc<S>, notifier: Arc<N>, config: &AppConfig) -> Self {
        Self::new(store, notifier, config.dispatch.clone())
    }

    /// Notifies every stakeholder of `event` on `case`.
    ///
    /// `actor` is the user who caused the event; they are excluded unless
    /// they are the sole eligible recipient. Returns the number of
    /// notification rows created. Must be called after the transition has
    /// committed, never inside it.
    pub async fn dispatch(&self, case: &Case, event: CaseEvent, actor: Option<UserId>) -> usize {
        let sources = self.collect_sources(case).await;
        let recipients = compute_recipients(sources, actor);
        let message = event.message_for(case);
        let delivered = AtomicUsize::new(0);

        futures::stream::iter(recipients)
            .for_each_concurrent(self.config.workers.max(1), |recipient| {
                let message = message.clone();
                let delivered = &delivered;
                async move {
                    let row = Notification::new(recipient.id, Some(case.id), message.clone());
                    match self.store.insert_notification(row).await {
                        Ok(_) => {
                            delivered.fetch_add(1, Ordering::Relaxed);
                            if let Err(err) =
                                self.notifier.send(&recipient, &message, Some(case.id)).await
                            {
                                // The row stands; only out-of-band delivery failed.
                                error!(
                                    recipient = %recipient.id,
                                    case_id = %case.id,
                                    error = %err,
                                    "notification delivery failed"
                                );
                            }
                        }
                        Err(err) => {
                            error!(
                                recipient = %recipient.id,
                                case_id = %case.id,
                                error = %err,
                                "failed to record notification"
                            );
                        }
                    }
                }
            })
            .await;

        let count = delivered.into_inner();
        debug!(case_id = %case.id, event = %event, count, "dispatch complete");
        count
    }

    async fn collect_sources(&self, case: &Case) -> RecipientSources {
        let creator = self.user_or_warn(case.created_by).await;
        let assignee = match case.assigned_to {
            Some(id) => self.user_or_warn(id).await,
            None => None,
        };
        let department_managers = match case.department_id {
            Some(d) => self.managers_or_warn(d).await,
            None => Vec::new(),
        };
        let source_department_managers = match creator.as_ref().and_then(|c| c.department_id) {
            Some(d) => self.managers_or_warn(d).await,
            None => Vec::new(),
        };
        let reviewers = match self.store.active_users_in_role(Role::QualityManager).await {
            Ok(users) => users,
            Err(err) => {
                warn!(case_id = %case.id, error = %err, "failed to load reviewers; skipping rule");
                Vec::new()
            }
        };
        let directors = match case.department_id {
            Some(d) => self.directors_of_department(d).await,
            None => Vec::new(),
        };
        RecipientSources {
            creator,
            assignee,
            department_managers,
            source_department_managers,
            reviewers,
            directors,
        }
    }

    /// Walks department link → multi-department manager → director link.
    async fn directors_of_department(&self, department: DepartmentId) -> Vec<User> {
        let links = match self.store.department_links_for(department).await {
            Ok(links) => links,
            Err(err) => {
                warn!(%department, error = %err, "failed to load department links; skipping rule");
                return Vec::new();
            }
        };

        let mut directors = Vec::new();
        for link in links {
            let Some(manager) = self.user_or_warn(link.user_id).await else {
                continue;
            };
            if !manager.active || !manager.role.is_multi_department_manager() {
                continue;
            }
            let director_links = match self.store.directors_of_manager(manager.id).await {
                Ok(links) => links,
                Err(err) => {
                    warn!(manager = %manager.id, error = %err, "failed to load director links; skipping manager");
                    continue;
                }
            };
            for director_link in director_links {
                if let Some(director) = self.user_or_warn(director_link.director_id).await {
                    if director.active && director.role == Role::Director {
                        directors.push(director);
                    }
                }
            }
        }
        directors
    }

    async fn user_or_warn(&self, id: UserId) -> Option<User> {
        match self.store.get_user(id).await {
            Ok(user) => user,
            Err(err) => {
                warn!(user_id = %id, error = %err, "failed to load user; skipping recipient");
                None
            }
        }
    }

    async fn managers_or_warn(&self, department: DepartmentId) -> Vec<User> {
        match self.store.department_managers(department).await {
            Ok(managers) => managers,
            Err(err) => {
                warn!(%department, error = %err, "failed to load department managers; skipping rule");
                Vec::new()
            }
        }
    }
}
