//! Dashboard metric derivation.
//!
//! All values are read-only derivations over shift records; nothing here
//! is cached or stored. Window math is pure and unit-tested; the
//! repository only supplies the trailing-window scan.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;

use carelog_core::WorkerId;

use crate::db::{ShiftRepository, WorkerRepository};
use crate::error::ApiError;
use crate::models::ShiftRecord;

/// Trailing window for the per-shift average, in days.
const AVG_WINDOW_DAYS: i64 = 30;
/// Trailing window for weekly hours, in days.
const WEEK_WINDOW_DAYS: i64 = 7;

/// Per-worker dashboard metrics over trailing windows.
#[derive(Debug, Clone, Serialize)]
pub struct PerWorkerStats {
    /// Worker these metrics describe.
    pub worker_id: WorkerId,
    /// Display name, denormalized for the dashboard table.
    pub name: String,
    /// Shifts started in [start-of-today, start-of-tomorrow), UTC.
    pub clock_ins_today: i64,
    /// Completed-shift hours with clock-in within the trailing 7 days.
    /// Open shifts are excluded; their duration is not yet known.
    pub total_hours_this_week: f64,
    /// Completed-shift hours over the trailing 30 days divided by
    /// min(30, qualifying shift count). A per-shift proxy, not a
    /// per-elapsed-day average; kept for dashboard continuity.
    pub avg_hours_per_day: f64,
}

/// System-wide aggregate metrics for the manager dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateStats {
    /// Total distinct workers known to the system.
    pub total_workers: i64,
    /// Workers with an open shift right now.
    pub active_workers: i64,
    /// Shifts started today (UTC).
    pub shifts_started_today: i64,
    /// Hours across completed shifts started today.
    pub total_hours_today: f64,
}

/// The one canonical dashboard shape: the aggregate object plus the
/// per-worker array.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// System-wide rollup.
    pub aggregate: AggregateStats,
    /// One row per known worker.
    pub per_worker: Vec<PerWorkerStats>,
}

/// Dashboard metric service.
pub struct StatsAggregator<'a> {
    shifts: ShiftRepository<'a>,
    workers: WorkerRepository<'a>,
}

impl<'a> StatsAggregator<'a> {
    /// Create a new aggregator over the shared pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            shifts: ShiftRepository::new(pool),
            workers: WorkerRepository::new(pool),
        }
    }

    /// Metrics for one worker, evaluated at the current server time.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TransientStore`/`ApiError::Internal` on store
    /// failures.
    pub async fn per_worker(
        &self,
        worker_id: WorkerId,
        name: &str,
    ) -> Result<PerWorkerStats, ApiError> {
        let now = Utc::now();
        let cutoff = now - Duration::days(AVG_WINDOW_DAYS);
        let records = self.shifts.list_for_worker_since(worker_id, cutoff).await?;
        Ok(summarize_worker(worker_id, name, &records, now))
    }

    /// The full manager dashboard: aggregate rollup plus per-worker rows.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TransientStore`/`ApiError::Internal` on store
    /// failures.
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        let now = Utc::now();
        let cutoff = now - Duration::days(AVG_WINDOW_DAYS);

        let workers = self.workers.list_all().await?;
        let total_workers = workers.len() as i64;
        let active_workers = self.shifts.count_active().await?;
        let recent = self.shifts.list_started_since(cutoff).await?;

        let mut by_worker: HashMap<WorkerId, Vec<ShiftRecord>> = HashMap::new();
        for record in recent {
            by_worker.entry(record.worker_id).or_default().push(record);
        }

        let empty: Vec<ShiftRecord> = Vec::new();
        let mut today_shifts = 0_i64;
        let mut today_hours = 0.0_f64;
        let (today_start, today_end) = today_bounds(now);

        let per_worker: Vec<PerWorkerStats> = workers
            .iter()
            .map(|worker| {
                let records = by_worker.get(&worker.id).unwrap_or(&empty);
                for record in records {
                    if record.clock_in_at >= today_start && record.clock_in_at < today_end {
                        today_shifts += 1;
                        today_hours += record.duration_hours().unwrap_or(0.0);
                    }
                }
                summarize_worker(worker.id, &worker.name, records, now)
            })
            .collect();

        Ok(DashboardStats {
            aggregate: AggregateStats {
                total_workers,
                active_workers,
                shifts_started_today: today_shifts,
                total_hours_today: round2(today_hours),
            },
            per_worker,
        })
    }
}

/// Pure window math for one worker's records.
///
/// `records` must cover at least the trailing 30 days; older rows are
/// ignored by the window predicates anyway. Rounding is applied here,
/// once, on the final values.
#[must_use]
pub fn summarize_worker(
    worker_id: WorkerId,
    name: &str,
    records: &[ShiftRecord],
    now: DateTime<Utc>,
) -> PerWorkerStats {
    let (today_start, today_end) = today_bounds(now);
    let week_cutoff = now - Duration::days(WEEK_WINDOW_DAYS);
    let month_cutoff = now - Duration::days(AVG_WINDOW_DAYS);

    let clock_ins_today = records
        .iter()
        .filter(|r| r.clock_in_at >= today_start && r.clock_in_at < today_end)
        .count() as i64;

    let week_hours: f64 = records
        .iter()
        .filter(|r| r.clock_in_at >= week_cutoff)
        .filter_map(ShiftRecord::duration_hours)
        .sum();

    let month_completed: Vec<f64> = records
        .iter()
        .filter(|r| r.clock_in_at >= month_cutoff)
        .filter_map(ShiftRecord::duration_hours)
        .collect();

    let avg = if month_completed.is_empty() {
        0.0
    } else {
        let divisor = (month_completed.len() as i64).min(AVG_WINDOW_DAYS) as f64;
        month_completed.iter().sum::<f64>() / divisor
    };

    PerWorkerStats {
        worker_id,
        name: name.to_owned(),
        clock_ins_today,
        total_hours_this_week: round2(week_hours),
        avg_hours_per_day: round2(avg),
    }
}

/// [start-of-today, start-of-tomorrow) in UTC, the server's reference
/// timezone.
fn today_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc();
    (start, start + Duration::days(1))
}

/// Round to two decimal places for display.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
