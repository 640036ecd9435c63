use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

/// Every winning bid carries a price.
#[derive(Debug, Clone, Copy)]
pub struct ValueMissing;

impl LotIndicator for ValueMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_VALUE_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        _tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let mut score = RatioScore::new();
        for bid in lot.winning_bids() {
            let priced = bid
                .price
                .as_ref()
                .is_some_and(|p| p.net_amount.is_some() || p.net_amount_eur.is_some());
            score.test(priced);
        }

        if score.tests() == 0 {
            return Ok(IndicatorResult::insufficient());
        }
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
