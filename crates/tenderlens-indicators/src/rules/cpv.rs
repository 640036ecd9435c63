use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

#[derive(Debug, Clone, Copy)]
pub struct CpvMissing;

impl LotIndicator for CpvMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_CPV_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let mut score = RatioScore::new();
        let cpvs = lot.cpvs.as_ref().or(tender.cpvs.as_ref());
        for cpv in cpvs.into_iter().flatten() {
            score.test(cpv.code.is_some());
        }
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
