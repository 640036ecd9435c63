//! Winner registered in a tax haven.
//!
//! Uses the year of the earliest contract award, the country of the first bidder with a known
//! country across the lot's winning bids, and the first buyer's country.

use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator};
use serde_json::json;
use tenderlens_core::{MasterLot, MasterTender, PublicationFormType};
use tenderlens_types::{IndicatorResult, Metadata, Score, ids};

pub fn tax_haven_key(bidder_country: &str, year: i32) -> String {
    format!(
        "indicator.{bidder_country}.{}.{year}",
        ids::METRIC_TAX_HAVEN
    )
}

#[derive(Debug, Clone, Copy)]
pub struct TaxHaven;

impl LotIndicator for TaxHaven {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_TAX_HAVEN
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        if !tender.has_publication_of_type(PublicationFormType::ContractAward) {
            return Ok(IndicatorResult::undefined());
        }
        let Some(awarded) = tender.earliest_publication_date(PublicationFormType::ContractAward)
        else {
            return Ok(IndicatorResult::insufficient());
        };
        let Some(bidder) = lot
            .winning_bids()
            .flat_map(|bid| &bid.bidders)
            .find(|b| b.country().is_some())
        else {
            return Ok(IndicatorResult::insufficient());
        };
        let (Some(bidder_country), Some(buyer_country)) =
            (bidder.country(), tender.first_buyer_country())
        else {
            return Ok(IndicatorResult::insufficient());
        };

        let listed = ctx
            .params
            .get(&tax_haven_key(bidder_country, awarded.year()))
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("YES"));
        let score = if listed && !bidder_country.eq_ignore_ascii_case(buyer_country) {
            Score::MIN
        } else {
            Score::MAX
        };

        let mut metadata = Metadata::new();
        if let Some(group_id) = &bidder.group_id {
            metadata.insert(ids::META_BIDDER_GROUP_ID.to_string(), json!(group_id));
        }
        Ok(IndicatorResult::calculated_with(score.value(), metadata))
    }
}
