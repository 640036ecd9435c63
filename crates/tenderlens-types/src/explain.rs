//! Explain registry for indicator rules.
//!
//! Maps rule names and indicator types to a human-readable description of what the rule
//! measures, when it reports a red flag, and which configuration keys drive it.

use crate::ids;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Configuration handle (`AdvertisementPeriod`).
    pub rule: &'static str,
    /// Persisted indicator type (`INTEGRITY_ADVERTISEMENT_PERIOD`).
    pub indicator_type: &'static str,
    pub title: &'static str,
    /// What the rule measures.
    pub description: &'static str,
    /// How the score is derived, including the INSUFFICIENT / UNDEFINED cases.
    pub scoring: &'static str,
    /// Configuration keys read by the rule; empty for pure completeness rules.
    pub config_keys: &'static [&'static str],
}

/// Look up an explanation by rule name or indicator type.
///
/// Several rules share nothing but their indicator type, so lookups by type return the single
/// rule that produces it.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    all_explanations()
        .into_iter()
        .find(|e| e.rule == identifier || e.indicator_type == identifier)
}

/// List all known rule names, in catalogue order.
pub fn all_rule_names() -> &'static [&'static str] {
    &[
        ids::RULE_AWARD_CRITERIA_MISSING,
        ids::RULE_CPV_MISSING,
        ids::RULE_DURATION_INFO_MISSING,
        ids::RULE_SELECTION_METHOD_MISSING,
        ids::RULE_FUNDINGS_MISSING,
        ids::RULE_BID_IS_SUBCONTRACTED_MISSING,
        ids::RULE_VALUE_MISSING,
        ids::RULE_BIDDER_ID_MISSING,
        ids::RULE_BIDDER_NAME_MISSING,
        ids::RULE_ADDRESS_OF_IMPLEMENTATION_MISSING,
        ids::RULE_ELIGIBLE_BID_LANGUAGES_MISSING,
        ids::RULE_ADVERTISEMENT_PERIOD,
        ids::RULE_DECISION_PERIOD,
        ids::RULE_TAX_HAVEN,
    ]
}

pub fn all_explanations() -> Vec<Explanation> {
    vec![
        Explanation {
            rule: ids::RULE_AWARD_CRITERIA_MISSING,
            indicator_type: ids::INDICATOR_AWARD_CRITERIA_MISSING,
            title: "Missing or incomplete award criteria",
            description: "\
Checks that every award criterion of a MEAT procedure carries both a name and a weight.
Lot criteria are used when present, otherwise the tender-level criteria.",
            scoring: "\
100 x (named + weighted criteria fields) / (2 x criteria). UNDEFINED without a contract
notice or when the selection method is not MEAT. Tender score is the mean over lots.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_CPV_MISSING,
            indicator_type: ids::INDICATOR_CPV_MISSING,
            title: "Missing or incomplete CPV codes",
            description: "Checks that each CPV classification entry carries a code.",
            scoring: "\
100 x (CPVs with a code) / CPVs, 0 when no CPV is listed. UNDEFINED without a contract
notice. Tender score is the mean over lots.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_DURATION_INFO_MISSING,
            indicator_type: ids::INDICATOR_DURATION_INFO_MISSING,
            title: "Missing or incomplete duration info",
            description: "\
Checks that a lot states when it starts or ends, and for how long it runs.",
            scoring: "\
Two tests: start-or-completion date present, any duration (days, months, years) present.
UNDEFINED without a contract notice. Tender score is the mean over lots.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_SELECTION_METHOD_MISSING,
            indicator_type: ids::INDICATOR_SELECTION_METHOD_MISSING,
            title: "Missing selection method",
            description: "Checks that the lot (or the tender) states its selection method.",
            scoring: "100 when present, 0 otherwise. UNDEFINED without a contract notice.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_FUNDINGS_MISSING,
            indicator_type: ids::INDICATOR_FUNDINGS_MISSING,
            title: "Missing or incomplete fundings info",
            description: "Checks that each funding entry says whether it is an EU fund.",
            scoring: "\
100 x (fundings with the EU flag) / fundings. UNDEFINED without a contract award or when no
funding list exists at lot or tender level.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_BID_IS_SUBCONTRACTED_MISSING,
            indicator_type: ids::INDICATOR_SUBCONTRACTED_MISSING,
            title: "Missing subcontracting info",
            description: "Checks that the winning bid states whether it is subcontracted.",
            scoring: "\
100 when the flag is present, 0 otherwise. INSUFFICIENT without a winning bid, UNDEFINED
without a contract award.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_VALUE_MISSING,
            indicator_type: ids::INDICATOR_VALUE_MISSING,
            title: "Missing contract value",
            description: "Checks that every winning bid carries a price.",
            scoring: "\
100 x (winning bids with a price) / winning bids. INSUFFICIENT without a winning bid,
UNDEFINED without a contract award.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_BIDDER_ID_MISSING,
            indicator_type: ids::INDICATOR_BIDDER_ID_MISSING,
            title: "Missing bidder identifier",
            description: "Checks that every winning bidder has a registration identifier.",
            scoring: "\
100 x (winning bidders with an id) / winning bidders. INSUFFICIENT without a winning bidder,
UNDEFINED without a contract award.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_BIDDER_NAME_MISSING,
            indicator_type: ids::INDICATOR_BIDDER_NAME_MISSING,
            title: "Missing bidder name",
            description: "Checks that every winning bidder has a name.",
            scoring: "\
100 x (winning bidders with a name) / winning bidders. INSUFFICIENT without a winning bidder,
UNDEFINED without a contract award.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_ADDRESS_OF_IMPLEMENTATION_MISSING,
            indicator_type: ids::INDICATOR_ADDRESS_OF_IMPLEMENTATION_MISSING,
            title: "Missing NUTS of the place of performance",
            description: "Checks that the address of implementation lists NUTS codes.",
            scoring: "\
100 when the address lists at least one NUTS code, 0 otherwise. UNDEFINED without a contract
award.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_ELIGIBLE_BID_LANGUAGES_MISSING,
            indicator_type: ids::INDICATOR_ELIGIBLE_BID_LANGUAGES_MISSING,
            title: "Missing eligible bid languages",
            description: "Checks that the tender lists the languages bids may be written in.",
            scoring: "100 when present, 0 otherwise. UNDEFINED without a contract notice.",
            config_keys: &[],
        },
        Explanation {
            rule: ids::RULE_ADVERTISEMENT_PERIOD,
            indicator_type: ids::INDICATOR_ADVERTISEMENT_PERIOD,
            title: "Advertisement period length",
            description: "\
Days between the oldest contract notice and the bid deadline. Very short periods restrict
competition.",
            scoring: "\
Tier 100 or 50 when the length falls in that tier's intervals (checked highest first), else 0.
A missing bid deadline scores the configured missing policy (default 100). UNDEFINED when the
country has no tier-100 intervals; INSUFFICIENT without a dated contract notice or when the
period is negative.",
            config_keys: &[
                "indicator.<country>.advertisementPeriod.100.length",
                "indicator.<country>.advertisementPeriod.50.length",
                "indicator.<country>.advertisementPeriod.missing",
            ],
        },
        Explanation {
            rule: ids::RULE_DECISION_PERIOD,
            indicator_type: ids::INDICATOR_DECISION_PERIOD,
            title: "Decision period length",
            description: "Days between the bid deadline and the lot's award decision.",
            scoring: "\
Tiered like the advertisement period. Without a decision date the lot is INSUFFICIENT when the
tender has an included contract award, UNDEFINED otherwise.",
            config_keys: &[
                "indicator.<country>.decisionPeriod.100.length",
                "indicator.<country>.decisionPeriod.50.length",
                "indicator.<country>.decisionPeriod.missing",
            ],
        },
        Explanation {
            rule: ids::RULE_TAX_HAVEN,
            indicator_type: ids::INDICATOR_TAX_HAVEN,
            title: "Winner registered in a tax haven",
            description: "\
Compares the winning bidder's country with the buyer's country and the tax-haven list for the
year of the earliest contract award.",
            scoring: "\
0 when the countries differ and the bidder country is a tax haven in that year, else 100.
UNDEFINED without a contract award; INSUFFICIENT without an award date, bidder country or
buyer country.",
            config_keys: &["indicator.<bidderCountry>.taxHaven.<year>"],
        },
    ]
}
