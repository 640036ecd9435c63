//! Rule catalogue.
//!
//! Lot rules come wrapped in their publication guard; the tender-level form of a lot rule is
//! its [`LotAverage`](crate::average::LotAverage).

mod address_of_implementation;
mod advertisement_period;
mod award_criteria;
mod bidders;
mod cpv;
mod decision_period;
mod duration_info;
mod eligible_bid_languages;
mod fundings;
mod selection_method;
mod subcontracted;
mod tax_haven;
mod value;


pub use address_of_implementation::AddressOfImplementationMissing;
pub use advertisement_period::AdvertisementPeriod;
pub use award_criteria::AwardCriteriaMissing;
pub use bidders::{BidderIdMissing, BidderNameMissing};
pub use cpv::CpvMissing;
pub use decision_period::DecisionPeriod;
pub use duration_info::DurationInfoMissing;
pub use eligible_bid_languages::EligibleBidLanguagesMissing;
pub use fundings::FundingsMissing;
pub use selection_method::SelectionMethodMissing;
pub use subcontracted::BidIsSubcontractedMissing;
pub use tax_haven::{TaxHaven, tax_haven_key};
pub use value::ValueMissing;

use crate::guard::RequiresPublication;

pub fn award_criteria_missing() -> RequiresPublication<AwardCriteriaMissing> {
    RequiresPublication::contract_notice(AwardCriteriaMissing)
}

pub fn cpv_missing() -> RequiresPublication<CpvMissing> {
    RequiresPublication::contract_notice(CpvMissing)
}

pub fn duration_info_missing() -> RequiresPublication<DurationInfoMissing> {
    RequiresPublication::contract_notice(DurationInfoMissing)
}

pub fn selection_method_missing() -> RequiresPublication<SelectionMethodMissing> {
    RequiresPublication::contract_notice(SelectionMethodMissing)
}

pub fn fundings_missing() -> RequiresPublication<FundingsMissing> {
    RequiresPublication::contract_award(FundingsMissing)
}

pub fn bid_is_subcontracted_missing() -> RequiresPublication<BidIsSubcontractedMissing> {
    RequiresPublication::contract_award(BidIsSubcontractedMissing)
}

pub fn value_missing() -> RequiresPublication<ValueMissing> {
    RequiresPublication::contract_award(ValueMissing)
}

pub fn bidder_id_missing() -> RequiresPublication<BidderIdMissing> {
    RequiresPublication::contract_award(BidderIdMissing)
}

pub fn bidder_name_missing() -> RequiresPublication<BidderNameMissing> {
    RequiresPublication::contract_award(BidderNameMissing)
}

pub fn address_of_implementation_missing() -> RequiresPublication<AddressOfImplementationMissing>
{
    RequiresPublication::contract_award(AddressOfImplementationMissing)
}

pub fn eligible_bid_languages_missing() -> RequiresPublication<EligibleBidLanguagesMissing> {
    RequiresPublication::contract_notice(EligibleBidLanguagesMissing)
}
