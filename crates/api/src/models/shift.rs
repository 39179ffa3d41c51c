//! Shift record domain type.

use chrono::{DateTime, Utc};

use carelog_core::{Coordinates, ShiftId, WorkerId};

/// One work session for exactly one worker.
///
/// Created at clock-in with `clock_out_at` unset; mutated exactly once at
/// clock-out. Never deleted by normal operation (audit trail).
#[derive(Debug, Clone)]
pub struct ShiftRecord {
    /// Unique shift ID.
    pub id: ShiftId,
    /// Owning worker.
    pub worker_id: WorkerId,
    /// Server-clock timestamp of clock-in.
    pub clock_in_at: DateTime<Utc>,
    /// Server-clock timestamp of clock-out; `None` while the shift is open.
    pub clock_out_at: Option<DateTime<Utc>>,
    /// Optional note supplied at clock-in.
    pub clock_in_note: Option<String>,
    /// Optional note supplied at clock-out.
    pub clock_out_note: Option<String>,
    /// Optional position reported at clock-in.
    pub clock_in_location: Option<Coordinates>,
    /// Optional position reported at clock-out.
    pub clock_out_location: Option<Coordinates>,
}

impl ShiftRecord {
    /// Whether the shift is still open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.clock_out_at.is_none()
    }

    /// Duration in whole minutes, `None` while the shift is open.
    ///
    /// Always derived from the stored timestamps, never stored.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<i64> {
        self.clock_out_at
            .map(|out| (out - self.clock_in_at).num_minutes())
    }

    /// Duration in fractional hours, `None` while the shift is open.
    #[must_use]
    pub fn duration_hours(&self) -> Option<f64> {
        self.clock_out_at
            .map(|out| (out - self.clock_in_at).num_seconds() as f64 / 3600.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(open: bool) -> ShiftRecord {
        let clock_in_at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        ShiftRecord {
            id: ShiftId::new(1),
            worker_id: WorkerId::new(1),
            clock_in_at,
            clock_out_at: (!open).then(|| clock_in_at + chrono::Duration::minutes(450)),
            clock_in_note: None,
            clock_out_note: None,
            clock_in_location: None,
            clock_out_location: None,
        }
    }

    #[test]
    fn test_open_shift_has_no_duration() {
        let shift = record(true);
        assert!(shift.is_active());
        assert_eq!(shift.duration_minutes(), None);
        assert_eq!(shift.duration_hours(), None);
    }

    #[test]
    fn test_duration_derived_from_timestamps() {
        let shift = record(false);
        assert!(!shift.is_active());
        assert_eq!(shift.duration_minutes(), Some(450));
        let hours = shift.duration_hours().unwrap();
        assert!((hours - 7.5).abs() < 1e-9);
    }
}
