use crate::plugin::{IndicatorContext, IndicatorError, TenderIndicator};
use crate::score::RatioScore;
use tenderlens_core::MasterTender;
use tenderlens_types::{IndicatorResult, ids};

#[derive(Debug, Clone, Copy)]
pub struct EligibleBidLanguagesMissing;

impl TenderIndicator for EligibleBidLanguagesMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_ELIGIBLE_BID_LANGUAGES_MISSING
    }

    fn evaluate(
        &self,
        tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let mut score = RatioScore::new();
        score.test(tender.eligible_bid_languages.is_some());
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
