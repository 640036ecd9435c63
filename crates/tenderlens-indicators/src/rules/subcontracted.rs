use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

#[derive(Debug, Clone, Copy)]
pub struct BidIsSubcontractedMissing;

impl LotIndicator for BidIsSubcontractedMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_SUBCONTRACTED_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        _tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let Some(winner) = lot.first_winning_bid() else {
            return Ok(IndicatorResult::insufficient());
        };

        let mut score = RatioScore::new();
        score.test(winner.is_subcontracted.is_some());
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
