use crate::decision::{Classification, Decision, Reason};
use crate::dedup::has_newer_generation;
use crate::error::EligibilityError;
use crate::price::representative_price;
use crate::works::is_works;
use serde_json::json;
use tenderlens_core::{BodyStore, EligibilityPolicy, MasterTender, TenderStore};
use tenderlens_types::ids;
use tracing::{debug, info};

/// Decides export eligibility once per tender.
///
/// The decision is written into the tender's metadata; a tender that already carries one is
/// returned as [`Classification::Cached`] without any lookups.
pub struct EligibilityClassifier<'a> {
    policy: &'a EligibilityPolicy,
    tenders: &'a dyn TenderStore,
    bodies: &'a dyn BodyStore,
}

impl<'a> EligibilityClassifier<'a> {
    pub fn new(
        policy: &'a EligibilityPolicy,
        tenders: &'a dyn TenderStore,
        bodies: &'a dyn BodyStore,
    ) -> Self {
        Self {
            policy,
            tenders,
            bodies,
        }
    }

    /// Previously recorded decision, if any. A non-boolean value reads as "not eligible".
    pub fn cached_decision(tender: &MasterTender) -> Option<bool> {
        tender
            .metadata
            .get(ids::TENDER_META_ELIGIBLE)
            .map(|v| v.as_bool().unwrap_or(false))
    }

    pub fn classify(&self, tender: &mut MasterTender) -> Result<Classification, EligibilityError> {
        if let Some(eligible) = Self::cached_decision(tender) {
            debug!(tender_id = %tender.id, eligible, "eligibility already decided");
            return Ok(Classification::Cached { eligible });
        }

        let decision = self.decide(tender)?;
        tender
            .metadata
            .insert(ids::TENDER_META_ELIGIBLE.to_string(), json!(decision.eligible));
        tender.metadata.insert(
            ids::TENDER_META_ELIGIBLE_REASON.to_string(),
            json!(decision.reason.as_str()),
        );
        info!(
            tender_id = %tender.id,
            eligible = decision.eligible,
            reason = %decision.reason,
            "eligibility decided"
        );
        Ok(Classification::Decided(decision))
    }

    /// Pure decision; does not consult or write the cached value.
    pub fn decide(&self, tender: &MasterTender) -> Result<Decision, EligibilityError> {
        let Some(origin) = tender.created_by.as_deref() else {
            return Ok(Decision::excluded(Reason::MissingOrigin));
        };
        if self.policy.allow_listed_sources.contains(origin) {
            return Ok(Decision::eligible(Reason::AllowListedSource));
        }

        let eu_wide = self.policy.is_eu_wide(origin);
        if eu_wide
            && tender
                .country
                .as_ref()
                .is_some_and(|c| self.policy.eu_wide_countries.contains(c))
        {
            return Ok(Decision::eligible(Reason::AllowListedEuCountry));
        }

        let by_price = self.price_decision(tender, eu_wide);
        if !by_price.eligible {
            return Ok(by_price);
        }

        for pair in self.policy.dedup.iter().filter(|p| p.old_source == origin) {
            let duplicate = has_newer_generation(pair, tender, self.tenders, self.bodies)
                .map_err(|source| EligibilityError::Lookup {
                    tender_id: tender.id.clone(),
                    source,
                })?;
            if duplicate {
                debug!(tender_id = %tender.id, newer_source = %pair.new_source, "superseded by newer generation");
                return Ok(Decision::excluded(Reason::CrossGenerationDuplicate));
            }
        }
        Ok(by_price)
    }

    fn price_decision(&self, tender: &MasterTender, eu_wide: bool) -> Decision {
        let Some(price) = representative_price(tender) else {
            return Decision::eligible(Reason::PriceUndetermined);
        };
        let above = price > self.policy.threshold_for(is_works(tender));

        match (eu_wide, above, self.policy.eu_wide_above_threshold_eligible) {
            (true, true, false) | (true, false, true) => {
                Decision::excluded(Reason::EuWideOutsideThreshold)
            }
            (true, true, true) => Decision::eligible(Reason::PriceAboveThreshold),
            (_, false, _) => Decision::eligible(Reason::PriceWithinThreshold),
            (false, true, _) => Decision::excluded(Reason::PriceAboveThreshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStores;
    use tenderlens_core::{Price, SupplyType};
    use tenderlens_test_util::tender;

    fn priced(source: &str, country: &str, price: Option<f64>) -> MasterTender {
        let mut t = tender("t1", Some(country));
        t.created_by = Some(source.to_string());
        t.final_price = price.map(Price::eur);
        t
    }

    fn decide_with(policy: &EligibilityPolicy, t: &MasterTender) -> Decision {
        let stores = FakeStores::default();
        EligibilityClassifier::new(policy, &stores, &stores)
            .decide(t)
            .expect("decide")
    }

    fn decide(t: &MasterTender) -> Decision {
        decide_with(&EligibilityPolicy::default(), t)
    }

    #[test]
    fn missing_origin_is_excluded() {
        let mut t = priced("cz.vvz", "CZ", Some(10.0));
        t.created_by = None;
        assert_eq!(decide(&t), Decision::excluded(Reason::MissingOrigin));
    }

    #[test]
    fn allow_listed_sources_ignore_price() {
        assert_eq!(
            decide(&priced("pl.uzp", "PL", Some(9e9))),
            Decision::eligible(Reason::AllowListedSource)
        );
        assert_eq!(
            decide(&priced("eu.ted", "DE", Some(9e9))),
            Decision::eligible(Reason::AllowListedEuCountry)
        );
    }

    #[test]
    fn national_sources_cover_the_range_under_threshold() {
        assert_eq!(
            decide(&priced("cz.vvz", "CZ", Some(135_000.0))),
            Decision::eligible(Reason::PriceWithinThreshold)
        );
        assert_eq!(
            decide(&priced("cz.vvz", "CZ", Some(135_000.01))),
            Decision::excluded(Reason::PriceAboveThreshold)
        );
    }

    #[test]
    fn eu_wide_above_threshold_is_excluded_by_default() {
        assert_eq!(
            decide(&priced("eu.ted", "FR", Some(200_000.0))),
            Decision::excluded(Reason::EuWideOutsideThreshold)
        );
        assert_eq!(
            decide(&priced("eu.ted", "FR", Some(100_000.0))),
            Decision::eligible(Reason::PriceWithinThreshold)
        );
    }

    #[test]
    fn inverted_eu_wide_policy() {
        let policy = EligibilityPolicy {
            eu_wide_above_threshold_eligible: true,
            ..EligibilityPolicy::default()
        };
        assert_eq!(
            decide_with(&policy, &priced("eu.ted_csv", "FR", Some(200_000.0))),
            Decision::eligible(Reason::PriceAboveThreshold)
        );
        assert_eq!(
            decide_with(&policy, &priced("eu.ted_csv", "FR", Some(100_000.0))),
            Decision::excluded(Reason::EuWideOutsideThreshold)
        );
        assert_eq!(
            decide_with(&policy, &priced("cz.vvz", "CZ", Some(200_000.0))),
            Decision::excluded(Reason::PriceAboveThreshold)
        );
    }

    #[test]
    fn works_use_the_higher_threshold() {
        let mut t = priced("cz.vvz", "CZ", Some(1_000_000.0));
        assert!(!decide(&t).eligible);
        t.supply_type = Some(SupplyType::Works);
        assert_eq!(decide(&t), Decision::eligible(Reason::PriceWithinThreshold));
    }

    #[test]
    fn missing_price_does_not_exclude() {
        assert_eq!(
            decide(&priced("eu.ted", "FR", None)),
            Decision::eligible(Reason::PriceUndetermined)
        );
    }

    #[test]
    fn classify_records_decision_in_metadata() {
        let stores = FakeStores::default();
        let policy = EligibilityPolicy::default();
        let classifier = EligibilityClassifier::new(&policy, &stores, &stores);
        let mut t = priced("cz.vvz", "CZ", Some(500_000.0));

        let outcome = classifier.classify(&mut t).expect("classify");
        assert_eq!(
            outcome,
            Classification::Decided(Decision::excluded(Reason::PriceAboveThreshold))
        );
        assert_eq!(t.metadata.get(ids::TENDER_META_ELIGIBLE), Some(&json!(false)));
        assert_eq!(
            t.metadata.get(ids::TENDER_META_ELIGIBLE_REASON),
            Some(&json!("price_above_threshold"))
        );
    }

    #[test]
    fn cached_decision_is_never_altered() {
        let stores = FakeStores::offline();
        let policy = EligibilityPolicy::default();
        let classifier = EligibilityClassifier::new(&policy, &stores, &stores);
        let mut t = priced("es.pce", "ES", Some(500_000.0));
        t.metadata
            .insert(ids::TENDER_META_ELIGIBLE.to_string(), json!(true));
        let before = t.clone();

        let outcome = classifier.classify(&mut t).expect("cached");
        assert_eq!(outcome, Classification::Cached { eligible: true });
        assert!(!outcome.is_new());
        assert_eq!(t, before);
    }

    #[test]
    fn failed_duplicate_lookup_leaves_tender_undecided() {
        let stores = FakeStores::offline();
        let policy = EligibilityPolicy::default();
        let classifier = EligibilityClassifier::new(&policy, &stores, &stores);
        let mut t = priced("es.pce", "ES", Some(1_000.0));
        t.buyer_assigned_id = Some("EXP-1".to_string());
        t.title = Some("Obras".to_string());
        t.buyers = vec![tenderlens_core::BodyRef {
            group_id: Some("b1".to_string()),
            body: None,
        }];

        let err = classifier.classify(&mut t).expect_err("offline store");
        assert!(err.is_recoverable());
        assert!(EligibilityClassifier::cached_decision(&t).is_none());
    }

    #[test]
    fn old_generation_duplicate_is_suppressed() {
        let mut old = priced("ro.apa", "RO", Some(1_000.0));
        let mut award = tenderlens_test_util::contract_award("2016-04-01");
        award.buyer_assigned_id = Some("CN42".to_string());
        old.publications = vec![award];

        let mut new = tender("sicap-1", Some("RO"));
        new.created_by = Some("ro.sicap".to_string());
        let mut notice = tenderlens_test_util::contract_notice("2016-02-01");
        notice.source_id = Some("CN42".to_string());
        new.publications = vec![notice];

        let stores = FakeStores::default().with_tender(new);
        let policy = EligibilityPolicy::default();
        let classifier = EligibilityClassifier::new(&policy, &stores, &stores);
        assert_eq!(
            classifier.decide(&old).expect("decide"),
            Decision::excluded(Reason::CrossGenerationDuplicate)
        );
    }
}
