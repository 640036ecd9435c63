use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

/// Start-or-end date present, and some duration present.
#[derive(Debug, Clone, Copy)]
pub struct DurationInfoMissing;

impl LotIndicator for DurationInfoMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_DURATION_INFO_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        _tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let d = &lot.duration;
        let mut score = RatioScore::new();
        score.test(d.estimated_start_date.is_some() || d.estimated_completion_date.is_some());
        score.test(d.has_any_duration());
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
