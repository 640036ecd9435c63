//! Day-count inference for estimated durations.
//!
//! Resolvers run in order and the first one that yields a non-negative day count wins; an
//! explicit day count is never replaced.

use crate::context::FusionContext;
use crate::engine::{FusionError, FusionPlugin};
use tenderlens_core::{EstimatedDuration, MasterTender, Observation};

pub const DAYS_PER_MONTH: i64 = 30;
pub const DAYS_PER_YEAR: i64 = 365;

type Resolver = fn(&EstimatedDuration) -> Option<i64>;

const CASCADE: &[(&str, Resolver)] = &[
    ("dates", from_dates),
    ("months", from_months),
    ("years", from_years),
];

fn from_dates(d: &EstimatedDuration) -> Option<i64> {
    let start = d.estimated_start_date?;
    let end = d.estimated_completion_date?;
    Some((end - start).whole_days()).filter(|days| *days >= 0)
}

fn from_months(d: &EstimatedDuration) -> Option<i64> {
    d.estimated_duration_in_months
        .filter(|m| *m >= 0)
        .and_then(|m| m.checked_mul(DAYS_PER_MONTH))
}

fn from_years(d: &EstimatedDuration) -> Option<i64> {
    d.estimated_duration_in_years
        .filter(|y| *y >= 0)
        .and_then(|y| y.checked_mul(DAYS_PER_YEAR))
}

/// Fill `estimated_duration_in_days` from the first resolver that applies.
///
/// Returns the resolver name when a value was assigned.
pub fn resolve_days(duration: &mut EstimatedDuration) -> Option<&'static str> {
    for (name, resolver) in CASCADE {
        if duration.estimated_duration_in_days.is_some() {
            return None;
        }
        if let Some(days) = resolver(duration) {
            duration.estimated_duration_in_days = Some(days);
            return Some(*name);
        }
    }
    None
}

pub struct DurationInDaysPlugin;

impl<O> FusionPlugin<O, MasterTender> for DurationInDaysPlugin {
    fn name(&self) -> &'static str {
        "duration_in_days"
    }

    fn fuse(
        &self,
        _observations: &[Observation<O>],
        record: &mut MasterTender,
        _ctx: &FusionContext<'_>,
    ) -> Result<(), FusionError> {
        if let Some(source) = resolve_days(&mut record.duration) {
            tracing::debug!(tender_id = %record.id, source, "tender duration inferred");
        }
        for lot in &mut record.lots {
            resolve_days(&mut lot.duration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderlens_test_util::date;

    #[test]
    fn explicit_days_are_kept() {
        let mut d = EstimatedDuration {
            estimated_duration_in_days: Some(12),
            estimated_duration_in_months: Some(3),
            ..EstimatedDuration::default()
        };
        assert_eq!(resolve_days(&mut d), None);
        assert_eq!(d.estimated_duration_in_days, Some(12));
    }

    #[test]
    fn dates_win_over_months() {
        let mut d = EstimatedDuration {
            estimated_start_date: Some(date("2024-01-01")),
            estimated_completion_date: Some(date("2024-03-01")),
            estimated_duration_in_months: Some(1),
            ..EstimatedDuration::default()
        };
        assert_eq!(resolve_days(&mut d), Some("dates"));
        assert_eq!(d.estimated_duration_in_days, Some(60));
    }

    #[test]
    fn negative_date_span_falls_through_to_months() {
        let mut d = EstimatedDuration {
            estimated_start_date: Some(date("2024-03-01")),
            estimated_completion_date: Some(date("2024-01-01")),
            estimated_duration_in_months: Some(2),
            ..EstimatedDuration::default()
        };
        assert_eq!(resolve_days(&mut d), Some("months"));
        assert_eq!(d.estimated_duration_in_days, Some(60));
    }

    #[test]
    fn years_are_last_resort() {
        let mut d = EstimatedDuration {
            estimated_duration_in_years: Some(2),
            ..EstimatedDuration::default()
        };
        assert_eq!(resolve_days(&mut d), Some("years"));
        assert_eq!(d.estimated_duration_in_days, Some(730));
    }

    #[test]
    fn nothing_to_infer_from() {
        let mut d = EstimatedDuration {
            estimated_start_date: Some(date("2024-03-01")),
            ..EstimatedDuration::default()
        };
        assert_eq!(resolve_days(&mut d), None);
        assert_eq!(d.estimated_duration_in_days, None);
    }
}
