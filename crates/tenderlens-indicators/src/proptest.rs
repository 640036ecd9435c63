//! Property-based tests for indicator scoring.
//!
//! These tests use proptest to verify invariants around:
//! - Ratio scores staying within 0..=100
//! - Lot averages staying within the range of the lots' scores
//! - Tier lookup agreeing with direct interval membership

use crate::average::LotAverage;
use crate::plugin::IndicatorContext;
use crate::rules::value_missing;
use crate::score::RatioScore;
use crate::test_support::{eval_tender, params, published_tender};
use crate::tiers::TieredMetric;
use crate::{IndicatorSuite, score_tender};
use proptest::prelude::*;
use tenderlens_core::{IntervalSet, MapConfig};
use tenderlens_test_util::{bid, lot, winning_bid};

// ============================================================================
// Strategies
// ============================================================================

/// Per lot: (priced winners, unpriced winners, losing bids).
fn arb_lot_shape() -> impl Strategy<Value = (usize, usize, usize)> {
    (0usize..3, 0usize..3, 0usize..2)
}

fn arb_interval_text() -> impl Strategy<Value = String> {
    prop::collection::vec((0i64..60, prop::option::of(0i64..60)), 1..4).prop_map(|segments| {
        segments
            .into_iter()
            .map(|(low, span)| match span {
                Some(span) => format!("{low}-{}", low + span),
                None => format!("{low}-"),
            })
            .collect::<Vec<_>>()
            .join(";")
    })
}

const METRIC: TieredMetric = TieredMetric::new("TEST", "decisionPeriod");

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn ratio_is_a_percentage(outcomes in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut score = RatioScore::new();
        for passed in &outcomes {
            score.test(*passed);
        }
        let ratio = score.ratio();
        prop_assert!((0.0..=100.0).contains(&ratio));
        prop_assert_eq!(score.tests() as usize, outcomes.len());
        if outcomes.iter().all(|p| *p) && !outcomes.is_empty() {
            prop_assert_eq!(ratio, 100.0);
        }
    }

    #[test]
    fn lot_average_stays_within_lot_scores(shapes in prop::collection::vec(arb_lot_shape(), 1..6)) {
        let p = params(&[]);
        let mut t = published_tender(Some("CZ"));
        t.lots = shapes
            .iter()
            .map(|&(priced, unpriced, losing)| {
                let mut bids = Vec::new();
                bids.extend((0..priced).map(|_| winning_bid(Some(1.0), vec![])));
                bids.extend((0..unpriced).map(|_| winning_bid(None, vec![])));
                bids.extend((0..losing).map(|_| bid(false, None, vec![])));
                lot(bids)
            })
            .collect();

        let lot_scores: Vec<f64> = shapes
            .iter()
            .filter(|(priced, unpriced, _)| priced + unpriced > 0)
            .map(|&(priced, unpriced, _)| 100.0 * priced as f64 / (priced + unpriced) as f64)
            .collect();

        let result = eval_tender(&LotAverage::new(value_missing()), &t, &p);
        match result.score() {
            Some(mean) => {
                let lo = lot_scores.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = lot_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
            }
            None => prop_assert!(lot_scores.is_empty()),
        }
    }

    #[test]
    fn single_tier_matches_interval_membership(text in arb_interval_text(), value in 0i64..150) {
        let config = MapConfig::new().with("indicator.CZ.decisionPeriod.100.length", text.clone());
        let ctx = IndicatorContext::new(&config);
        let expected = if IntervalSet::parse(&text).expect("generated text parses").contains(value) {
            100.0
        } else {
            0.0
        };
        prop_assert_eq!(METRIC.score("CZ", value, &ctx).expect("score"), expected);
    }

    #[test]
    fn scoring_assigns_one_indicator_per_rule(lots in 0usize..4) {
        let p = params(&[]);
        let suite = IndicatorSuite::all();
        let mut t = published_tender(Some("CZ"));
        t.lots = (0..lots).map(|_| lot(vec![winning_bid(Some(5.0), vec![])])).collect();

        let summary = score_tender(&suite, &mut t, &IndicatorContext::new(&p)).expect("score");
        prop_assert_eq!(t.indicators.len(), suite.tender_names().len());
        for l in &t.lots {
            prop_assert_eq!(l.indicators.len(), suite.lot_names().len());
        }
        prop_assert_eq!(
            summary.calculated + summary.insufficient + summary.undefined,
            suite.tender_names().len() + lots * suite.lot_names().len()
        );
    }
}
