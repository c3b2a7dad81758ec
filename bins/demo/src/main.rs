//! Remedia pipeline demo.
//!
//! Seeds an in-memory organization, walks one case from submission to
//! closure, and prints who got notified at each step.
//!
//! Usage: cargo run --bin demo

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remedia_core::case::types::Case;
use remedia_core::notify::Dispatcher;
use remedia_core::org::types::{Department, Role, User};
use remedia_core::workflow::{LifecycleService, Status, TransitionInput};
use remedia_shared::AppConfig;
use remedia_shared::types::UserId;
use remedia_store::{MemoryStore, TimeoutNotifier, TracingNotifier};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remedia=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("failed to load configuration");
    info!(workers = config.dispatch.workers, "configuration loaded");

    let store = Arc::new(MemoryStore::new());
    let production = Department::new("Production");
    let maintenance = Department::new("Maintenance");
    let reviewer = User::new("Quality Manager", Role::QualityManager, None);
    let production_manager =
        User::new("Production Manager", Role::DepartmentManager, Some(production.id));
    let maintenance_manager =
        User::new("Maintenance Manager", Role::DepartmentManager, Some(maintenance.id));
    let reporter = User::new("Line Operator", Role::Member, Some(production.id));

    store.add_department(production);
    store.add_department(maintenance.clone());
    for user in [&reviewer, &production_manager, &maintenance_manager, &reporter] {
        store.add_user(user.clone());
    }

    let lifecycle = LifecycleService::new(Arc::clone(&store));
    let notifier = Arc::new(TimeoutNotifier::from_config(TracingNotifier, &config.dispatch));
    let dispatcher = Dispatcher::from_config(Arc::clone(&store), notifier, &config);

    let case = Case::new(
        "Conveyor misalignment on line 3",
        "Belt drift is marking product edges",
        reporter.id,
    );
    println!("Case {} opened by {}", case.id, reporter.name);
    store.add_case(case.clone());

    let steps: Vec<(UserId, TransitionInput)> = vec![
        (reviewer.id, TransitionInput::new(case.id, Status::UnderReview)),
        (
            reviewer.id,
            TransitionInput::new(case.id, Status::Assigned)
                .with_department(maintenance.id)
                .with_assignee(maintenance_manager.id),
        ),
        (
            maintenance_manager.id,
            TransitionInput::new(case.id, Status::Planning).with_comment("Realign and re-tension"),
        ),
        (reviewer.id, TransitionInput::new(case.id, Status::Implementation)),
        (maintenance_manager.id, TransitionInput::new(case.id, Status::Completed)),
        (production_manager.id, TransitionInput::new(case.id, Status::Resolved)),
        (reviewer.id, TransitionInput::new(case.id, Status::Closed)),
    ];

    for (actor, input) in steps {
        let target = input.target;
        let outcome = lifecycle
            .apply_transition(actor, input)
            .await
            .expect("transition should apply");
        let notified = dispatcher.dispatch(&outcome.case, outcome.event, Some(actor)).await;
        println!("  -> {target}: {notified} stakeholder(s) notified ({})", outcome.event);
    }

    println!("\nAudit trail:");
    for action in store.actions_for(case.id) {
        let from = action.old_status.map_or_else(|| "-".to_string(), |s| s.to_string());
        let to = action.new_status.map_or_else(|| "-".to_string(), |s| s.to_string());
        println!("  {from} -> {to}");
    }

    println!("\nNotifications for {}:", reporter.name);
    for note in store.notifications_for(reporter.id) {
        println!("  {}", note.message);
    }
}
