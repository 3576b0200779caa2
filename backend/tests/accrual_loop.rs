//! Earnings accrual over the in-memory store, driven by paused Tokio time.

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use taskapi::domain::ports::{TaskRepository, UserRepository};
use taskapi::domain::{
    AccrualConfig, AccrualReport, EarningsAccrual, NewTask, PassportReference, RateDivision,
    TaskId, TaskStatus, UserDraft,
};
use tokio_util::sync::CancellationToken;

#[path = "support/in_memory.rs"]
mod in_memory;

use in_memory::InMemoryStore;

struct Seeded {
    store: InMemoryStore,
    running: TaskId,
    pending: TaskId,
}

#[fixture]
async fn seeded() -> Seeded {
    let store = InMemoryStore::new();
    let owner = UserRepository::create(
        &store,
        &UserDraft {
            name: "Ann".into(),
            passport: PassportReference::new("1234", "567890"),
        },
    )
    .await
    .expect("create user");
    let mut ids = Vec::new();
    for description in ["running", "pending"] {
        let id = TaskRepository::create(
            &store,
            &NewTask {
                user_id: owner.id,
                description: description.into(),
                rate: 3600,
                deadline: 5,
            },
        )
        .await
        .expect("create task");
        ids.push(id);
    }
    store
        .update_status(ids[0], TaskStatus::Running)
        .await
        .expect("start task");
    Seeded {
        store,
        running: ids[0],
        pending: ids[1],
    }
}

fn accrual(store: &InMemoryStore, interval: Duration) -> EarningsAccrual {
    EarningsAccrual::new(
        Arc::new(store.clone()),
        AccrualConfig::new(interval, RateDivision::Truncating),
    )
}

#[rstest]
#[tokio::test]
async fn earnings_stop_growing_once_the_deadline_is_spent(#[future] seeded: Seeded) {
    let Seeded {
        store,
        running,
        pending,
    } = seeded.await;
    let service = accrual(&store, Duration::from_secs(60));

    for _ in 0..5 {
        let report = service.run_tick().await.expect("tick");
        assert_eq!(
            report,
            AccrualReport {
                updated: 1,
                ..AccrualReport::default()
            }
        );
    }
    assert_eq!(
        store.task_state(running),
        Some((300.0, 0, TaskStatus::Running))
    );

    let report = service.run_tick().await.expect("tick");
    assert_eq!(report.skipped, 1);
    assert_eq!(
        store.task_state(running),
        Some((300.0, 0, TaskStatus::Running))
    );
    assert_eq!(
        store.task_state(pending),
        Some((0.0, 5, TaskStatus::Pending))
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn spawned_loop_ticks_on_the_interval_until_cancelled(#[future] seeded: Seeded) {
    let Seeded { store, running, .. } = seeded.await;
    let cancel = CancellationToken::new();
    let handle = accrual(&store, Duration::from_secs(60)).spawn(cancel.clone());

    tokio::time::sleep(Duration::from_secs(150)).await;
    cancel.cancel();
    handle.await.expect("accrual loop joins");

    assert_eq!(
        store.task_state(running),
        Some((180.0, 2, TaskStatus::Running))
    );

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(
        store.task_state(running),
        Some((180.0, 2, TaskStatus::Running))
    );
}

#[rstest]
#[tokio::test]
async fn stopped_tasks_are_not_accrued(#[future] seeded: Seeded) {
    let Seeded { store, running, .. } = seeded.await;
    store
        .update_status(running, TaskStatus::Finished)
        .await
        .expect("stop task");

    let report = accrual(&store, Duration::from_secs(60))
        .run_tick()
        .await
        .expect("tick");

    assert_eq!(report, AccrualReport::default());
    assert_eq!(
        store.task_state(running),
        Some((0.0, 5, TaskStatus::Finished))
    );
}
