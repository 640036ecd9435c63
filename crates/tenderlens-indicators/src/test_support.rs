use crate::plugin::{IndicatorContext, LotIndicator, TenderIndicator};
use tenderlens_core::{MapConfig, MasterLot, MasterTender};
use tenderlens_test_util::{contract_award, contract_notice, tender};
use tenderlens_types::IndicatorResult;

pub fn params(pairs: &[(&str, &str)]) -> MapConfig {
    pairs.iter().copied().collect()
}

pub fn eval_tender(rule: &dyn TenderIndicator, t: &MasterTender, p: &MapConfig) -> IndicatorResult {
    rule.evaluate(t, &IndicatorContext::new(p))
        .expect("rule evaluates")
}

pub fn eval_lot(
    rule: &dyn LotIndicator,
    lot: &MasterLot,
    t: &MasterTender,
    p: &MapConfig,
) -> IndicatorResult {
    rule.evaluate(lot, t, &IndicatorContext::new(p))
        .expect("rule evaluates")
}

/// Tender with a contract notice (2024-03-05) and an included award (2024-05-10).
pub fn published_tender(country: Option<&str>) -> MasterTender {
    let mut t = tender("t1", country);
    t.publications = vec![contract_notice("2024-03-05"), contract_award("2024-05-10")];
    t
}
