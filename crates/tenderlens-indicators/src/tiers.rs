//! Per-country tiered thresholds.
//!
//! Keys, for country `c` and metric `m`:
//! - `indicator.c.m.100.length`, `indicator.c.m.50.length`: interval sets per tier
//! - `indicator.c.m.missing`: score when the measured input is absent (`100`, `50`, else 0)
//!
//! A metric counts as configured for a country when its top tier has intervals.

use crate::plugin::{IndicatorContext, IndicatorError};
use tenderlens_core::IntervalSet;
use tenderlens_types::Score;

/// Tiers tested in order; the first whose intervals contain the value wins.
pub const TIERS: &[u32] = &[100, 50];
pub const LOWEST_TIER: f64 = 0.0;

pub fn tier_key(country: &str, metric: &str, tier: u32) -> String {
    format!("indicator.{country}.{metric}.{tier}.length")
}

pub fn missing_key(country: &str, metric: &str) -> String {
    format!("indicator.{country}.{metric}.missing")
}

#[derive(Debug, Clone, Copy)]
pub struct TieredMetric {
    pub indicator: &'static str,
    pub metric: &'static str,
}

impl TieredMetric {
    pub const fn new(indicator: &'static str, metric: &'static str) -> Self {
        Self { indicator, metric }
    }

    pub fn is_configured(&self, country: &str, ctx: &IndicatorContext<'_>) -> bool {
        let top = TIERS.first().copied().unwrap_or(100);
        ctx.params
            .get(&tier_key(country, self.metric, top))
            .is_some()
    }

    /// Score for an absent input; absent policy means "not problematic".
    pub fn missing_score(&self, country: &str, ctx: &IndicatorContext<'_>) -> f64 {
        match ctx.params.get(&missing_key(country, self.metric)).map(str::trim) {
            None | Some("100") => Score::MAX.value(),
            Some("50") => Score::HALF.value(),
            Some(_) => Score::MIN.value(),
        }
    }

    pub fn score(
        &self,
        country: &str,
        value: i64,
        ctx: &IndicatorContext<'_>,
    ) -> Result<f64, IndicatorError> {
        for &tier in TIERS {
            let key = tier_key(country, self.metric, tier);
            let Some(text) = ctx.params.get(&key) else {
                continue;
            };
            let intervals =
                IntervalSet::parse(text).map_err(|source| IndicatorError::MalformedInterval {
                    indicator: self.indicator,
                    key: key.clone(),
                    source,
                })?;
            if intervals.contains(value) {
                return Ok(f64::from(tier));
            }
        }
        Ok(LOWEST_TIER)
    }
}
