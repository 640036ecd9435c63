use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender, SelectionMethod};
use tenderlens_types::{IndicatorResult, ids};

/// Named and weighted award criteria on MEAT procedures.
#[derive(Debug, Clone, Copy)]
pub struct AwardCriteriaMissing;

impl LotIndicator for AwardCriteriaMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_AWARD_CRITERIA_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        if tender.selection_method != Some(SelectionMethod::Meat) {
            return Ok(IndicatorResult::undefined());
        }

        let mut score = RatioScore::new();
        let criteria = lot.award_criteria.as_ref().or(tender.award_criteria.as_ref());
        for criterion in criteria.into_iter().flatten() {
            score.test(criterion.name.is_some());
            score.test(criterion.weight.is_some());
        }
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
