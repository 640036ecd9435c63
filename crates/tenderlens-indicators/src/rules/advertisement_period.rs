//! Advertisement period: days from the oldest contract notice to the bid deadline.

use crate::plugin::{IndicatorContext, IndicatorError, TenderIndicator};
use crate::tiers::TieredMetric;
use serde_json::json;
use tenderlens_core::dates::datetime_text;
use tenderlens_core::{MasterTender, PublicationFormType};
use tenderlens_types::{IndicatorResult, Metadata, ids};
use time::{Date, PrimitiveDateTime};

const METRIC: TieredMetric =
    TieredMetric::new(ids::INDICATOR_ADVERTISEMENT_PERIOD, ids::METRIC_ADVERTISEMENT_PERIOD);

struct Inputs<'t> {
    country: Option<&'t str>,
    bid_deadline: Option<PrimitiveDateTime>,
    call_for_tender: Option<Date>,
}

type Guard = fn(&Inputs<'_>, &IndicatorContext<'_>) -> Option<IndicatorResult>;

/// Checked in order; the first guard that returns a result decides.
const GUARDS: &[Guard] = &[no_country, not_configured, no_bid_deadline, no_call_for_tender];

fn no_country(i: &Inputs<'_>, _ctx: &IndicatorContext<'_>) -> Option<IndicatorResult> {
    i.country.is_none().then(IndicatorResult::insufficient)
}

fn not_configured(i: &Inputs<'_>, ctx: &IndicatorContext<'_>) -> Option<IndicatorResult> {
    let country = i.country?;
    (!METRIC.is_configured(country, ctx)).then(IndicatorResult::undefined)
}

fn no_bid_deadline(i: &Inputs<'_>, ctx: &IndicatorContext<'_>) -> Option<IndicatorResult> {
    let country = i.country?;
    i.bid_deadline
        .is_none()
        .then(|| IndicatorResult::calculated(METRIC.missing_score(country, ctx)))
}

fn no_call_for_tender(i: &Inputs<'_>, _ctx: &IndicatorContext<'_>) -> Option<IndicatorResult> {
    i.call_for_tender.is_none().then(IndicatorResult::insufficient)
}

#[derive(Debug, Clone, Copy)]
pub struct AdvertisementPeriod;

impl TenderIndicator for AdvertisementPeriod {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_ADVERTISEMENT_PERIOD
    }

    fn evaluate(
        &self,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let inputs = Inputs {
            country: tender.country.as_deref(),
            bid_deadline: tender.bid_deadline,
            call_for_tender: tender.earliest_publication_date(PublicationFormType::ContractNotice),
        };

        if let Some(decided) = GUARDS.iter().find_map(|guard| guard(&inputs, ctx)) {
            return Ok(decided);
        }

        let (Some(country), Some(deadline), Some(call)) =
            (inputs.country, inputs.bid_deadline, inputs.call_for_tender)
        else {
            return Ok(IndicatorResult::insufficient());
        };

        let length = (deadline.date() - call).whole_days();
        let mut metadata = Metadata::new();
        metadata.insert(ids::META_ADVERTISEMENT_PERIOD_LENGTH.to_string(), json!(length));
        metadata.insert(ids::META_CALL_FOR_TENDER_DATE.to_string(), json!(call.to_string()));
        metadata.insert(ids::META_BID_DEADLINE.to_string(), json!(datetime_text(deadline)));

        if length < 0 {
            return Ok(IndicatorResult::insufficient_with(metadata));
        }

        let score = METRIC.score(country, length, ctx)?;
        Ok(IndicatorResult::calculated_with(score, metadata))
    }
}
