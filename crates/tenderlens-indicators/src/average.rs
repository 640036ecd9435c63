//! Lot-to-tender aggregation.

use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator, TenderIndicator};
use serde_json::json;
use tenderlens_core::{MasterLot, MasterTender};
use tenderlens_types::{IndicatorResult, IndicatorStatus, Metadata, ids};

/// Tender score = mean of the lots' CALCULATED scores.
///
/// A tender without lots is scored on a bid-less lot mirroring its own fields. When no lot is
/// CALCULATED the result is INSUFFICIENT if any lot was, else UNDEFINED.
#[derive(Debug, Clone)]
pub struct LotAverage<L> {
    lot_rule: L,
}

impl<L> LotAverage<L> {
    pub fn new(lot_rule: L) -> Self {
        Self { lot_rule }
    }
}

impl<L: LotIndicator> TenderIndicator for LotAverage<L> {
    fn indicator_type(&self) -> &'static str {
        self.lot_rule.indicator_type()
    }

    fn evaluate(
        &self,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        if tender.lots.is_empty() {
            let lot = MasterLot::mirroring(tender);
            return self.lot_rule.evaluate(&lot, tender, ctx);
        }

        let mut scores = Vec::with_capacity(tender.lots.len());
        let mut any_insufficient = false;
        for lot in &tender.lots {
            let result = self.lot_rule.evaluate(lot, tender, ctx)?;
            match result.status() {
                IndicatorStatus::Calculated => scores.extend(result.score()),
                IndicatorStatus::Insufficient => any_insufficient = true,
                IndicatorStatus::Undefined => {}
            }
        }

        if scores.is_empty() {
            return Ok(if any_insufficient {
                IndicatorResult::insufficient()
            } else {
                IndicatorResult::undefined()
            });
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let mut metadata = Metadata::new();
        metadata.insert(ids::META_LOTS_CALCULATED.to_string(), json!(scores.len()));
        Ok(IndicatorResult::calculated_with(mean, metadata))
    }
}
