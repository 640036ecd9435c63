//! Stable identifiers for indicators, rule names and metadata keys.
//!
//! Indicator types are SCREAMING_SNAKE_CASE and are what gets persisted next to a result.
//! Rule names are the CamelCase handles used in configuration to select rules.

// Indicator types
pub const INDICATOR_AWARD_CRITERIA_MISSING: &str =
    "TRANSPARENCY_MISSING_OR_INCOMPLETE_AWARD_CRITERIA";
pub const INDICATOR_CPV_MISSING: &str = "TRANSPARENCY_MISSING_OR_INCOMPLETE_CPVS";
pub const INDICATOR_DURATION_INFO_MISSING: &str =
    "TRANSPARENCY_MISSING_OR_INCOMPLETE_DURATION_INFO";
pub const INDICATOR_SELECTION_METHOD_MISSING: &str = "TRANSPARENCY_MISSING_SELECTION_METHOD";
pub const INDICATOR_FUNDINGS_MISSING: &str = "TRANSPARENCY_MISSING_OR_INCOMPLETE_FUNDINGS_INFO";
pub const INDICATOR_SUBCONTRACTED_MISSING: &str = "TRANSPARENCY_MISSING_SUBCONTRACTED_INFO";
pub const INDICATOR_VALUE_MISSING: &str = "TRANSPARENCY_VALUE_MISSING";
pub const INDICATOR_BIDDER_ID_MISSING: &str = "TRANSPARENCY_BIDDER_ID_MISSING";
pub const INDICATOR_BIDDER_NAME_MISSING: &str = "TRANSPARENCY_BIDDER_NAME_MISSING";
pub const INDICATOR_ADDRESS_OF_IMPLEMENTATION_MISSING: &str =
    "TRANSPARENCY_MISSING_ADDRESS_OF_IMPLEMENTATION_NUTS";
pub const INDICATOR_ELIGIBLE_BID_LANGUAGES_MISSING: &str =
    "TRANSPARENCY_MISSING_ELIGIBLE_BID_LANGUAGES";
pub const INDICATOR_ADVERTISEMENT_PERIOD: &str = "INTEGRITY_ADVERTISEMENT_PERIOD";
pub const INDICATOR_DECISION_PERIOD: &str = "INTEGRITY_DECISION_PERIOD";
pub const INDICATOR_TAX_HAVEN: &str = "INTEGRITY_TAX_HAVEN";

// Rule names (configuration handles)
pub const RULE_AWARD_CRITERIA_MISSING: &str = "AwardCriteriaMissing";
pub const RULE_CPV_MISSING: &str = "CpvMissing";
pub const RULE_DURATION_INFO_MISSING: &str = "DurationInfoMissing";
pub const RULE_SELECTION_METHOD_MISSING: &str = "SelectionMethodMissing";
pub const RULE_FUNDINGS_MISSING: &str = "FundingsMissing";
pub const RULE_BID_IS_SUBCONTRACTED_MISSING: &str = "BidIsSubcontractedMissing";
pub const RULE_VALUE_MISSING: &str = "ValueMissing";
pub const RULE_BIDDER_ID_MISSING: &str = "BidderIdMissing";
pub const RULE_BIDDER_NAME_MISSING: &str = "BidderNameMissing";
pub const RULE_ADDRESS_OF_IMPLEMENTATION_MISSING: &str = "AddressOfImplementationMissing";
pub const RULE_ELIGIBLE_BID_LANGUAGES_MISSING: &str = "EligibleBidLanguagesMissing";
pub const RULE_ADVERTISEMENT_PERIOD: &str = "AdvertisementPeriod";
pub const RULE_DECISION_PERIOD: &str = "DecisionPeriod";
pub const RULE_TAX_HAVEN: &str = "TaxHaven";

// Threshold metrics (the `<metric>` segment of `indicator.<country>.<metric>...`)
pub const METRIC_ADVERTISEMENT_PERIOD: &str = "advertisementPeriod";
pub const METRIC_DECISION_PERIOD: &str = "decisionPeriod";
pub const METRIC_TAX_HAVEN: &str = "taxHaven";

// Indicator metadata keys
pub const META_ADVERTISEMENT_PERIOD_LENGTH: &str = "advertisementPeriodLength";
pub const META_CALL_FOR_TENDER_DATE: &str = "callForTenderDate";
pub const META_BID_DEADLINE: &str = "bidDeadline";
pub const META_DECISION_PERIOD_LENGTH: &str = "decisionPeriodLength";
pub const META_BIDDER_GROUP_ID: &str = "bidderGroupId";
pub const META_LOTS_CALCULATED: &str = "lotsCalculated";

// Tender metadata keys
pub const TENDER_META_ELIGIBLE: &str = "opentender";
pub const TENDER_META_ELIGIBLE_REASON: &str = "opentenderReason";
