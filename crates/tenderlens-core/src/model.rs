use crate::dates::{iso_date, iso_datetime};
use serde::{Deserialize, Serialize};
use tenderlens_types::{Indicator, Metadata};
use time::{Date, PrimitiveDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplyType {
    Works,
    Supplies,
    Services,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMethod {
    /// Most economically advantageous tender.
    Meat,
    LowestPrice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationFormType {
    ContractNotice,
    ContractAward,
    PriorInformationNotice,
    ContractCancellation,
    ContractAmendment,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub net_amount: Option<f64>,
    pub currency: Option<String>,
    /// Net amount converted to EUR.
    pub net_amount_eur: Option<f64>,
}

impl Price {
    pub fn eur(amount: f64) -> Self {
        Self {
            net_amount: Some(amount),
            currency: Some("EUR".to_string()),
            net_amount_eur: Some(amount),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpv {
    pub code: Option<String>,
    pub is_main: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardCriterion {
    pub name: Option<String>,
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Funding {
    pub source: Option<String>,
    pub is_eu_fund: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub country: Option<String>,
    pub city: Option<String>,
    pub nuts: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyIdentifier {
    pub id: Option<String>,
    pub scope: Option<String>,
}

/// Buyer or bidder entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterBody {
    pub group_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub body_ids: Vec<BodyIdentifier>,
}

impl MasterBody {
    pub fn country(&self) -> Option<&str> {
        self.address.as_ref()?.country.as_deref()
    }

    pub fn has_registration_id(&self) -> bool {
        self.body_ids.iter().any(|b| b.id.is_some())
    }
}

/// Reference to a body by group id.
///
/// `body` is filled in by population before scoring and is never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyRef {
    pub group_id: Option<String>,
    #[serde(skip)]
    pub body: Option<MasterBody>,
}

impl BodyRef {
    pub fn to(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            body: None,
        }
    }

    pub fn country(&self) -> Option<&str> {
        self.body.as_ref()?.country()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub source_id: Option<String>,
    pub form_type: Option<PublicationFormType>,
    #[serde(with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Date>,
    pub is_included: Option<bool>,
    pub buyer_assigned_id: Option<String>,
}

/// Estimated timing shared by tenders and lots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatedDuration {
    #[serde(with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub estimated_start_date: Option<Date>,
    #[serde(with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub estimated_completion_date: Option<Date>,
    pub estimated_duration_in_days: Option<i64>,
    pub estimated_duration_in_months: Option<i64>,
    pub estimated_duration_in_years: Option<i64>,
}

impl EstimatedDuration {
    pub fn has_any_duration(&self) -> bool {
        self.estimated_duration_in_days.is_some()
            || self.estimated_duration_in_months.is_some()
            || self.estimated_duration_in_years.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterBid {
    pub bid_id: Option<String>,
    pub bidders: Vec<BodyRef>,
    pub price: Option<Price>,
    pub is_winning: Option<bool>,
    pub is_subcontracted: Option<bool>,
}

impl MasterBid {
    pub fn is_winning(&self) -> bool {
        self.is_winning == Some(true)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterLot {
    pub lot_id: Option<String>,
    pub title: Option<String>,
    pub bids: Vec<MasterBid>,
    pub cpvs: Option<Vec<Cpv>>,
    pub selection_method: Option<SelectionMethod>,
    pub award_criteria: Option<Vec<AwardCriterion>>,
    pub fundings: Option<Vec<Funding>>,
    pub estimated_price: Option<Price>,
    #[serde(flatten)]
    pub duration: EstimatedDuration,
    #[serde(with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub award_decision_date: Option<Date>,
    pub indicators: Vec<Indicator>,
}

impl MasterLot {
    /// Bid-less lot carrying the tender-level fields, for tenders that list no lots.
    pub fn mirroring(tender: &MasterTender) -> Self {
        Self {
            lot_id: None,
            title: tender.title.clone(),
            bids: Vec::new(),
            cpvs: tender.cpvs.clone(),
            selection_method: tender.selection_method,
            award_criteria: tender.award_criteria.clone(),
            fundings: tender.fundings.clone(),
            estimated_price: tender.estimated_price.clone(),
            duration: tender.duration.clone(),
            award_decision_date: None,
            indicators: Vec::new(),
        }
    }

    pub fn winning_bids(&self) -> impl Iterator<Item = &MasterBid> {
        self.bids.iter().filter(|b| b.is_winning())
    }

    pub fn first_winning_bid(&self) -> Option<&MasterBid> {
        self.winning_bids().next()
    }
}

/// The fused tender.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterTender {
    pub id: String,
    pub group_id: String,
    /// Source id of the worker that originated the record.
    pub created_by: Option<String>,
    pub country: Option<String>,
    pub title: Option<String>,
    pub buyer_assigned_id: Option<String>,
    pub supply_type: Option<SupplyType>,
    pub selection_method: Option<SelectionMethod>,
    pub buyers: Vec<BodyRef>,
    pub lots: Vec<MasterLot>,
    pub publications: Vec<Publication>,
    pub final_price: Option<Price>,
    pub estimated_price: Option<Price>,
    #[serde(with = "iso_datetime::option", skip_serializing_if = "Option::is_none")]
    pub bid_deadline: Option<PrimitiveDateTime>,
    pub cpvs: Option<Vec<Cpv>>,
    pub award_criteria: Option<Vec<AwardCriterion>>,
    pub fundings: Option<Vec<Funding>>,
    pub address_of_implementation: Option<Address>,
    pub eligible_bid_languages: Option<Vec<String>>,
    #[serde(flatten)]
    pub duration: EstimatedDuration,
    pub metadata: Metadata,
    pub indicators: Vec<Indicator>,
}

impl MasterTender {
    pub fn has_publication_of_type(&self, form_type: PublicationFormType) -> bool {
        self.publications
            .iter()
            .any(|p| p.form_type == Some(form_type))
    }

    /// True when at least one included publication is a contract award.
    pub fn has_included_award(&self) -> bool {
        self.publications.iter().any(|p| {
            p.is_included == Some(true) && p.form_type == Some(PublicationFormType::ContractAward)
        })
    }

    /// Earliest publication date among publications of `form_type`.
    pub fn earliest_publication_date(&self, form_type: PublicationFormType) -> Option<Date> {
        self.publications
            .iter()
            .filter(|p| p.form_type == Some(form_type))
            .filter_map(|p| p.publication_date)
            .min()
    }

    /// Country of the first buyer whose populated body has one.
    pub fn first_buyer_country(&self) -> Option<&str> {
        self.buyers.iter().find_map(BodyRef::country)
    }

    /// Code of the CPV flagged main, if any.
    pub fn main_cpv_code(&self) -> Option<&str> {
        main_cpv(self.cpvs.as_deref())
    }
}

/// Only an entry flagged main counts; unflagged lists have no main CPV.
pub fn main_cpv(cpvs: Option<&[Cpv]>) -> Option<&str> {
    cpvs?
        .iter()
        .find(|c| c.is_main == Some(true))
        .and_then(|c| c.code.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::{date, datetime};

    #[test]
    fn tender_parses_dates_and_flattened_duration() {
        let raw = json!({
            "id": "t1",
            "group_id": "g1",
            "bid_deadline": "2024-03-15T12:00:00",
            "estimated_start_date": "2024-04-01",
            "estimated_duration_in_months": 6,
            "publications": [
                { "form_type": "CONTRACT_NOTICE", "publication_date": "2024-03-05" }
            ],
            "buyers": [ { "group_id": "b1" } ]
        });

        let tender: MasterTender = serde_json::from_value(raw).expect("parse tender");
        assert_eq!(tender.bid_deadline, Some(datetime!(2024-03-15 12:00:00)));
        assert_eq!(tender.duration.estimated_start_date, Some(date!(2024 - 04 - 01)));
        assert_eq!(tender.duration.estimated_duration_in_months, Some(6));
        assert_eq!(
            tender.earliest_publication_date(PublicationFormType::ContractNotice),
            Some(date!(2024 - 03 - 05))
        );
        assert!(tender.buyers[0].body.is_none());
    }

    #[test]
    fn populated_body_is_not_serialized() {
        let mut buyer = BodyRef::to("b1");
        buyer.body = Some(MasterBody {
            group_id: "b1".to_string(),
            name: Some("City of Example".to_string()),
            ..MasterBody::default()
        });
        let value = serde_json::to_value(&buyer).expect("serialize");
        assert_eq!(value, json!({ "group_id": "b1" }));
    }

    #[test]
    fn included_award_requires_inclusion_flag() {
        let mut tender = MasterTender::default();
        tender.publications.push(Publication {
            form_type: Some(PublicationFormType::ContractAward),
            ..Publication::default()
        });
        assert!(tender.has_publication_of_type(PublicationFormType::ContractAward));
        assert!(!tender.has_included_award());

        tender.publications[0].is_included = Some(true);
        assert!(tender.has_included_award());
    }

    #[test]
    fn main_cpv_is_the_flagged_entry() {
        let cpvs = vec![
            Cpv {
                code: Some("30000000".to_string()),
                is_main: None,
            },
            Cpv {
                code: Some("45000000".to_string()),
                is_main: Some(true),
            },
        ];
        assert_eq!(main_cpv(Some(&cpvs)), Some("45000000"));
        assert_eq!(main_cpv(Some(&cpvs[..1])), None);
        assert_eq!(main_cpv(None), None);
    }
}
