//! Winning-bidder identification: registration id and name.

use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use crate::score::RatioScore;
use tenderlens_core::{MasterBody, MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, ids};

fn score_winning_bidders(lot: &MasterLot, test: fn(&MasterBody) -> bool) -> IndicatorResult {
    let mut score = RatioScore::new();
    for bidder in lot.winning_bids().flat_map(|b| &b.bidders) {
        // An unresolved reference identifies nobody.
        score.test(bidder.body.as_ref().is_some_and(test));
    }

    if score.tests() == 0 {
        return IndicatorResult::insufficient();
    }
    IndicatorResult::calculated(score.ratio())
}

#[derive(Debug, Clone, Copy)]
pub struct BidderIdMissing;

impl LotIndicator for BidderIdMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_BIDDER_ID_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        _tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        Ok(score_winning_bidders(lot, MasterBody::has_registration_id))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BidderNameMissing;

impl LotIndicator for BidderNameMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_BIDDER_NAME_MISSING
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        _tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        Ok(score_winning_bidders(lot, |body| {
            body.name.as_deref().is_some_and(|n| !n.trim().is_empty())
        }))
    }
}
