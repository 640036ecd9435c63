use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

/// Each funding says whether it is an EU fund. No funding list at all is UNDEFINED.
#[derive(Debug, Clone, Copy)]
pub struct FundingsMissing;

impl LotIndicator for FundingsMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_FUNDINGS_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let Some(fundings) = lot.fundings.as_ref().or(tender.fundings.as_ref()) else {
            return Ok(IndicatorResult::undefined());
        };

        let mut score = RatioScore::new();
        for funding in fundings {
            score.test(funding.is_eu_fund.is_some());
        }
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
