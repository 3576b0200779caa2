//! Tests for the earnings accrual loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rstest::rstest;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::domain::ports::MockTaskRepository;

fn active(id: i32, rate: i32, earned: f64, deadline: i32) -> ActiveTask {
    ActiveTask {
        id: TaskId::new(id),
        rate,
        earned,
        deadline,
    }
}

#[rstest]
#[case(3600, RateDivision::Truncating, 60.0)]
#[case(59, RateDivision::Truncating, 0.0)]
#[case(90, RateDivision::Truncating, 1.0)]
#[case(90, RateDivision::Exact, 1.5)]
#[case(100, RateDivision::Exact, 100.0 / 60.0)]
#[case(-90, RateDivision::Truncating, -1.0)]
fn per_tick_follows_division_mode(
    #[case] rate: i32,
    #[case] division: RateDivision,
    #[case] expected: f64,
) {
    assert_eq!(division.per_tick(rate), expected);
}

#[rstest]
#[case(1.005, 1.0)]
#[case(1.235, 1.24)]
#[case(2.0 / 3.0, 0.67)]
#[case(-2.0 / 3.0, -0.67)]
fn rounds_to_cents(#[case] value: f64, #[case] expected: f64) {
    assert!((round_to_cents(value) - expected).abs() < 1e-9);
}

#[rstest]
fn accrue_adds_increment_and_spends_a_tick() {
    let update = accrue(&active(1, 3600, 10.0, 5), RateDivision::Truncating).expect("update");
    assert_eq!(
        update,
        AccrualUpdate {
            id: TaskId::new(1),
            earned: 70.0,
            deadline: 4
        }
    );
}

#[rstest]
fn exact_division_rounds_the_sum() {
    let update = accrue(&active(1, 100, 0.0, 2), RateDivision::Exact).expect("update");
    assert_eq!(update.earned, 1.67);
}

#[rstest]
#[case(0)]
#[case(-1)]
fn accrue_skips_spent_deadlines(#[case] deadline: i32) {
    assert!(accrue(&active(1, 3600, 12.0, deadline), RateDivision::Truncating).is_none());
}

#[rstest]
fn config_raises_tiny_intervals() {
    let config = AccrualConfig::new(Duration::ZERO, RateDivision::Exact);
    assert_eq!(config.interval(), Duration::from_secs(1));
    assert_eq!(config.rate_division(), RateDivision::Exact);
    assert_eq!(AccrualConfig::default().interval(), DEFAULT_INTERVAL);
}

#[tokio::test]
async fn tick_updates_running_tasks_and_skips_spent_ones() {
    let mut repo = MockTaskRepository::new();
    repo.expect_list_active()
        .times(1)
        .returning(|| Ok(vec![active(1, 3600, 0.0, 5), active(2, 120, 3.0, 0)]));
    repo.expect_update_earned()
        .withf(|id, earned, deadline| *id == TaskId::new(1) && *earned == 60.0 && *deadline == 4)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let accrual = EarningsAccrual::new(Arc::new(repo), AccrualConfig::default());
    let report = accrual.run_tick().await.expect("tick succeeds");

    assert_eq!(
        report,
        AccrualReport {
            updated: 1,
            skipped: 1,
            failed: 0
        }
    );
}

#[tokio::test]
async fn tick_continues_after_update_failure() {
    let mut repo = MockTaskRepository::new();
    repo.expect_list_active()
        .returning(|| Ok(vec![active(1, 60, 0.0, 1), active(2, 60, 0.0, 1)]));
    repo.expect_update_earned()
        .withf(|id, _, _| *id == TaskId::new(1))
        .times(1)
        .returning(|_, _, _| Err(TaskPersistenceError::query("deadlock detected")));
    repo.expect_update_earned()
        .withf(|id, _, _| *id == TaskId::new(2))
        .times(1)
        .returning(|_, _, _| Ok(()));

    let accrual = EarningsAccrual::new(Arc::new(repo), AccrualConfig::default());
    let report = accrual.run_tick().await.expect("tick succeeds");

    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn tick_aborts_when_listing_fails() {
    let mut repo = MockTaskRepository::new();
    repo.expect_list_active()
        .returning(|| Err(TaskPersistenceError::connection("pool timed out")));
    repo.expect_update_earned().never();

    let accrual = EarningsAccrual::new(Arc::new(repo), AccrualConfig::default());
    let err = accrual.run_tick().await.expect_err("listing fails");

    assert_eq!(err, TaskPersistenceError::connection("pool timed out"));
}

#[tokio::test(start_paused = true)]
async fn loop_ticks_immediately_then_every_interval() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut repo = MockTaskRepository::new();
    repo.expect_list_active().returning(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    });

    let cancel = CancellationToken::new();
    let accrual = EarningsAccrual::new(Arc::new(repo), AccrualConfig::default());
    let handle = accrual.spawn(cancel.clone());

    tokio::time::sleep(Duration::from_secs(125)).await;
    cancel.cancel();
    handle.await.expect("loop exits cleanly");

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn cancelled_loop_never_ticks() {
    let mut repo = MockTaskRepository::new();
    repo.expect_list_active().never();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let accrual = EarningsAccrual::new(Arc::new(repo), AccrualConfig::default());

    accrual.spawn(cancel).await.expect("loop exits cleanly");
}
