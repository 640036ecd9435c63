//! Name -> constructor tables, built once at start-up.

use crate::average::LotAverage;
use crate::plugin::{LotIndicator, TenderIndicator};
use crate::rules;
use std::collections::BTreeSet;
use tenderlens_types::ids;
use tracing::warn;

type TenderCtor = fn() -> Box<dyn TenderIndicator>;
type LotCtor = fn() -> Box<dyn LotIndicator>;

fn boxed_tender<T: TenderIndicator + 'static>(rule: T) -> Box<dyn TenderIndicator> {
    Box::new(rule)
}

fn boxed_lot<L: LotIndicator + 'static>(rule: L) -> Box<dyn LotIndicator> {
    Box::new(rule)
}

const TENDER_LEVEL: &[(&str, TenderCtor)] = &[
    (ids::RULE_AWARD_CRITERIA_MISSING, || {
        boxed_tender(LotAverage::new(rules::award_criteria_missing()))
    }),
    (ids::RULE_CPV_MISSING, || {
        boxed_tender(LotAverage::new(rules::cpv_missing()))
    }),
    (ids::RULE_DURATION_INFO_MISSING, || {
        boxed_tender(LotAverage::new(rules::duration_info_missing()))
    }),
    (ids::RULE_SELECTION_METHOD_MISSING, || {
        boxed_tender(LotAverage::new(rules::selection_method_missing()))
    }),
    (ids::RULE_FUNDINGS_MISSING, || {
        boxed_tender(LotAverage::new(rules::fundings_missing()))
    }),
    (ids::RULE_BID_IS_SUBCONTRACTED_MISSING, || {
        boxed_tender(LotAverage::new(rules::bid_is_subcontracted_missing()))
    }),
    (ids::RULE_VALUE_MISSING, || {
        boxed_tender(LotAverage::new(rules::value_missing()))
    }),
    (ids::RULE_BIDDER_ID_MISSING, || {
        boxed_tender(LotAverage::new(rules::bidder_id_missing()))
    }),
    (ids::RULE_BIDDER_NAME_MISSING, || {
        boxed_tender(LotAverage::new(rules::bidder_name_missing()))
    }),
    (ids::RULE_ADDRESS_OF_IMPLEMENTATION_MISSING, || {
        boxed_tender(rules::address_of_implementation_missing())
    }),
    (ids::RULE_ELIGIBLE_BID_LANGUAGES_MISSING, || {
        boxed_tender(rules::eligible_bid_languages_missing())
    }),
    (ids::RULE_ADVERTISEMENT_PERIOD, || {
        boxed_tender(rules::AdvertisementPeriod)
    }),
    (ids::RULE_DECISION_PERIOD, || {
        boxed_tender(LotAverage::new(rules::DecisionPeriod))
    }),
    (ids::RULE_TAX_HAVEN, || {
        boxed_tender(LotAverage::new(rules::TaxHaven))
    }),
];

const LOT_LEVEL: &[(&str, LotCtor)] = &[
    (ids::RULE_AWARD_CRITERIA_MISSING, || boxed_lot(rules::award_criteria_missing())),
    (ids::RULE_CPV_MISSING, || boxed_lot(rules::cpv_missing())),
    (ids::RULE_DURATION_INFO_MISSING, || boxed_lot(rules::duration_info_missing())),
    (ids::RULE_SELECTION_METHOD_MISSING, || boxed_lot(rules::selection_method_missing())),
    (ids::RULE_FUNDINGS_MISSING, || boxed_lot(rules::fundings_missing())),
    (ids::RULE_BID_IS_SUBCONTRACTED_MISSING, || {
        boxed_lot(rules::bid_is_subcontracted_missing())
    }),
    (ids::RULE_VALUE_MISSING, || boxed_lot(rules::value_missing())),
    (ids::RULE_BIDDER_ID_MISSING, || boxed_lot(rules::bidder_id_missing())),
    (ids::RULE_BIDDER_NAME_MISSING, || boxed_lot(rules::bidder_name_missing())),
    (ids::RULE_DECISION_PERIOD, || boxed_lot(rules::DecisionPeriod)),
    (ids::RULE_TAX_HAVEN, || boxed_lot(rules::TaxHaven)),
];

/// Every rule name usable at tender level, in catalogue order.
pub fn tender_level_names() -> Vec<&'static str> {
    TENDER_LEVEL.iter().map(|(name, _)| *name).collect()
}

/// Every rule name usable at lot level, in catalogue order.
pub fn lot_level_names() -> Vec<&'static str> {
    LOT_LEVEL.iter().map(|(name, _)| *name).collect()
}

/// Rule names chosen by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSelection {
    pub tender_level: Vec<String>,
    pub lot_level: Vec<String>,
}

impl Default for IndicatorSelection {
    fn default() -> Self {
        Self {
            tender_level: tender_level_names().into_iter().map(String::from).collect(),
            lot_level: lot_level_names().into_iter().map(String::from).collect(),
        }
    }
}

/// Instantiated rules for one worker.
pub struct IndicatorSuite {
    tender: Vec<(&'static str, Box<dyn TenderIndicator>)>,
    lot: Vec<(&'static str, Box<dyn LotIndicator>)>,
}

fn instantiate<C: Copy, T>(
    level: &'static str,
    table: &[(&'static str, C)],
    names: &[String],
    build: impl Fn(C) -> T,
) -> Vec<(&'static str, T)> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }
        match table.iter().find(|(known, _)| *known == name.as_str()) {
            Some((known, ctor)) => out.push((*known, build(*ctor))),
            None => warn!(rule_level = level, indicator = %name, "unknown indicator plugin; skipping"),
        }
    }
    out
}

impl IndicatorSuite {
    pub fn from_selection(selection: &IndicatorSelection) -> Self {
        Self {
            tender: instantiate("tender", TENDER_LEVEL, &selection.tender_level, |c: TenderCtor| c()),
            lot: instantiate("lot", LOT_LEVEL, &selection.lot_level, |c: LotCtor| c()),
        }
    }

    pub fn all() -> Self {
        Self::from_selection(&IndicatorSelection::default())
    }

    pub fn tender_rules(&self) -> impl Iterator<Item = (&'static str, &dyn TenderIndicator)> {
        self.tender.iter().map(|(name, rule)| (*name, rule.as_ref()))
    }

    pub fn lot_rules(&self) -> impl Iterator<Item = (&'static str, &dyn LotIndicator)> {
        self.lot.iter().map(|(name, rule)| (*name, rule.as_ref()))
    }

    pub fn tender_names(&self) -> Vec<&'static str> {
        self.tender.iter().map(|(name, _)| *name).collect()
    }

    pub fn lot_names(&self) -> Vec<&'static str> {
        self.lot.iter().map(|(name, _)| *name).collect()
    }
}

impl std::fmt::Debug for IndicatorSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorSuite")
            .field("tender", &self.tender_names())
            .field("lot", &self.lot_names())
            .finish()
    }
}
