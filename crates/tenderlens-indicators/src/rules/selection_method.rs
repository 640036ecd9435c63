use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

#[derive(Debug, Clone, Copy)]
pub struct SelectionMethodMissing;

impl LotIndicator for SelectionMethodMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_SELECTION_METHOD_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let mut score = RatioScore::new();
        score.test(lot.selection_method.or(tender.selection_method).is_some());
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
