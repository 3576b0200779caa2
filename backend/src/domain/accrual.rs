//! Periodic earnings accrual for running tasks.
//!
//! Every interval the loop loads the running tasks, adds one minute's worth of
//! the hourly rate to `earned` (rounded to cents) and spends one deadline
//! tick. Tasks whose deadline has run out are left untouched; they stay
//! running with frozen earnings until stopped explicitly.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::ports::{TaskPersistenceError, TaskRepository};
use super::{ActiveTask, TaskId, TraceId};

/// Ticks per hour; the hourly rate is spread evenly over them.
const TICKS_PER_HOUR: i32 = 60;
/// Shortest interval the loop accepts.
const MIN_INTERVAL: Duration = Duration::from_secs(1);
/// Interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// How the hourly rate is divided into a per-tick increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateDivision {
    /// Integer division, dropping the remainder (`59 / 60 == 0`).
    #[default]
    Truncating,
    /// Floating-point division.
    Exact,
}

impl RateDivision {
    /// Amount added to `earned` per tick for the given hourly rate.
    pub fn per_tick(self, rate: i32) -> f64 {
        match self {
            Self::Truncating => f64::from(rate / TICKS_PER_HOUR),
            Self::Exact => f64::from(rate) / f64::from(TICKS_PER_HOUR),
        }
    }
}

/// Runtime parameters for [`EarningsAccrual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualConfig {
    interval: Duration,
    rate_division: RateDivision,
}

impl AccrualConfig {
    /// Intervals shorter than one second are raised to one second.
    pub fn new(interval: Duration, rate_division: RateDivision) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            rate_division,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn rate_division(&self) -> RateDivision {
        self.rate_division
    }
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, RateDivision::default())
    }
}

/// New accrual state for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualUpdate {
    pub id: TaskId,
    pub earned: f64,
    pub deadline: i32,
}

/// Round half away from zero to two decimal places.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the next accrual state, or `None` once the deadline is spent.
///
/// # Examples
/// ```
/// use taskapi::domain::accrual::{RateDivision, accrue};
/// use taskapi::domain::{ActiveTask, TaskId};
///
/// let task = ActiveTask { id: TaskId::new(1), rate: 3600, earned: 0.0, deadline: 5 };
/// let update = accrue(&task, RateDivision::Truncating).unwrap();
/// assert_eq!(update.earned, 60.0);
/// assert_eq!(update.deadline, 4);
/// ```
pub fn accrue(task: &ActiveTask, division: RateDivision) -> Option<AccrualUpdate> {
    if task.deadline <= 0 {
        return None;
    }
    Some(AccrualUpdate {
        id: task.id,
        earned: round_to_cents(task.earned + division.per_tick(task.rate)),
        deadline: task.deadline - 1,
    })
}

/// Outcome counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccrualReport {
    /// Tasks whose new earnings were persisted.
    pub updated: usize,
    /// Running tasks with no deadline left.
    pub skipped: usize,
    /// Tasks whose update failed.
    pub failed: usize,
}

/// Background service applying [`accrue`] to every running task.
#[derive(Clone)]
pub struct EarningsAccrual {
    tasks: Arc<dyn TaskRepository>,
    config: AccrualConfig,
}

impl EarningsAccrual {
    pub fn new(tasks: Arc<dyn TaskRepository>, config: AccrualConfig) -> Self {
        Self { tasks, config }
    }

    /// Run a single accrual pass.
    ///
    /// A failure to load the running tasks aborts the pass. Individual update
    /// failures are logged and counted, and the pass continues.
    pub async fn run_tick(&self) -> Result<AccrualReport, TaskPersistenceError> {
        let active = self.tasks.list_active().await?;
        let mut report = AccrualReport::default();
        for task in &active {
            let Some(update) = accrue(task, self.config.rate_division) else {
                report.skipped += 1;
                continue;
            };
            match self
                .tasks
                .update_earned(update.id, update.earned, update.deadline)
                .await
            {
                Ok(()) => report.updated += 1,
                Err(err) => {
                    warn!(task_id = %update.id, error = %err, "failed to persist accrued earnings");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn traced_tick(&self) {
        let trace_id = TraceId::generate();
        let outcome = TraceId::scope(trace_id, self.run_tick()).await;
        match outcome {
            Ok(report) => info!(
                %trace_id,
                updated = report.updated,
                skipped = report.skipped,
                failed = report.failed,
                "earnings accrual tick complete"
            ),
            Err(err) => error!(%trace_id, error = %err, "failed to load running tasks"),
        }
    }

    /// Tick until `cancel` fires. The first tick runs immediately.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.config.interval.as_secs(), "earnings accrual started");
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("earnings accrual stopped");
                    break;
                }
                _ = ticker.tick() => self.traced_tick().await,
            }
        }
    }

    /// Spawn [`EarningsAccrual::run`] onto the current runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}

#[cfg(test)]
#[path = "accrual_tests.rs"]
mod tests;
