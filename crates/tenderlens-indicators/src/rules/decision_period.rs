//! Decision period: days from the bid deadline to the lot's award decision.

use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::tiers::TieredMetric;
use serde_json::json;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, Metadata, ids};

const METRIC: TieredMetric =
    TieredMetric::new(ids::INDICATOR_DECISION_PERIOD, ids::METRIC_DECISION_PERIOD);

#[derive(Debug, Clone, Copy)]
pub struct DecisionPeriod;

impl LotIndicator for DecisionPeriod {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_DECISION_PERIOD
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let Some(country) = tender.country.as_deref() else {
            return Ok(IndicatorResult::insufficient());
        };
        if !METRIC.is_configured(country, ctx) {
            return Ok(IndicatorResult::undefined());
        }
        let Some(deadline) = tender.bid_deadline else {
            return Ok(IndicatorResult::calculated(METRIC.missing_score(country, ctx)));
        };

        let Some(decided) = lot.award_decision_date else {
            return Ok(if tender.has_included_award() {
                IndicatorResult::insufficient()
            } else {
                IndicatorResult::undefined()
            });
        };

        let length = (decided - deadline.date()).whole_days();
        let mut metadata = Metadata::new();
        metadata.insert(ids::META_DECISION_PERIOD_LENGTH.to_string(), json!(length));

        if length < 0 {
            return Ok(IndicatorResult::insufficient_with(metadata));
        }

        let score = METRIC.score(country, length, ctx)?;
        Ok(IndicatorResult::calculated_with(score, metadata))
    }
}
