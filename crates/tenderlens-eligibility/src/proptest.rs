//! Property-based tests for eligibility.
//!
//! These tests use proptest to verify invariants around:
//! - Similarity bounds and identity
//! - Text folding being idempotent
//! - National-source decisions following the threshold exactly

use crate::classifier::EligibilityClassifier;
use crate::similarity::{TRIGRAM, fold, folded_similarity, ngram_similarity};
use crate::test_support::FakeStores;
use proptest::prelude::*;
use tenderlens_core::{EligibilityPolicy, Price};
use tenderlens_test_util::tender;

proptest! {
    #[test]
    fn similarity_is_bounded(a in "[a-zé ]{0,24}", b in "[a-zé ]{0,24}") {
        let sim = ngram_similarity(&a, &b, TRIGRAM);
        prop_assert!((0.0..=1.0).contains(&sim), "{sim}");
    }

    #[test]
    fn text_is_fully_similar_to_itself(a in "\\PC{0,30}") {
        prop_assert_eq!(folded_similarity(&a, &a), 1.0);
    }

    #[test]
    fn folding_is_idempotent(a in "[a-zA-ZÀ-ÿ ]{0,30}") {
        let once = fold(&a);
        prop_assert_eq!(fold(&once), once);
    }

    #[test]
    fn national_decision_follows_threshold(price in 0.0f64..1_000_000.0) {
        let policy = EligibilityPolicy::default();
        let stores = FakeStores::default();
        let mut t = tender("t1", Some("CZ"));
        t.created_by = Some("cz.vvz".to_string());
        t.final_price = Some(Price::eur(price));

        let decision = EligibilityClassifier::new(&policy, &stores, &stores)
            .decide(&t)
            .expect("no lookups for national sources");
        prop_assert_eq!(decision.eligible, price <= policy.threshold);
    }
}
