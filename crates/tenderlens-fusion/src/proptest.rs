//! Property-based tests for the fusion crate.
//!
//! These tests use proptest to verify invariants around:
//! - Email selection independence from observation order
//! - Positional lot/bid id assignment
//! - The duration cascade never overwriting or going negative

use crate::plugins::duration::resolve_days;
use crate::plugins::email::EmailPlugin;
use crate::plugins::ids::assign_ids;
use crate::{CachedBlacklist, FusionContext, FusionEngine};
use proptest::prelude::*;
use std::sync::Arc;
use tenderlens_core::{
    Blacklist, EstimatedDuration, FusionPolicy, LookupError, MasterBody, Observation,
    ObservedBody,
};
use tenderlens_test_util::{body_observation, date, lot, tender, winning_bid};
use time::Duration;

// ============================================================================
// Strategies
// ============================================================================

/// (email index, object index, day offset) with a small domain so collisions are common.
fn arb_sighting() -> impl Strategy<Value = (u8, u8, Option<i64>)> {
    (0u8..4, 0u8..6, prop::option::weighted(0.8, 0i64..4))
}

fn to_observations(sightings: &[(u8, u8, Option<i64>)]) -> Vec<Observation<ObservedBody>> {
    let base = date("2024-01-01");
    sightings
        .iter()
        .map(|&(email, object, offset)| {
            let mut o = body_observation(
                "src",
                &format!("obj-{object}"),
                None,
                Some(&format!("e{email}@city.example")),
            );
            o.publication_date = offset.map(|d| base + Duration::days(d));
            o
        })
        .collect()
}

fn arb_duration() -> impl Strategy<Value = EstimatedDuration> {
    (
        prop::option::of(0i64..400),
        prop::option::of(0i64..400),
        prop::option::of(-5i64..400),
        prop::option::of(-5i64..24),
        prop::option::of(-5i64..5),
    )
        .prop_map(|(start, end, days, months, years)| {
            let base = date("2024-01-01");
            EstimatedDuration {
                estimated_start_date: start.map(|d| base + Duration::days(d)),
                estimated_completion_date: end.map(|d| base + Duration::days(d)),
                estimated_duration_in_days: days,
                estimated_duration_in_months: months,
                estimated_duration_in_years: years,
            }
        })
}

struct FirstEmailListed;

impl Blacklist for FirstEmailListed {
    fn is_blacklisted(&self, email: &str) -> Result<bool, LookupError> {
        Ok(email == "e0@city.example")
    }
}

fn fused_email(observations: Vec<Observation<ObservedBody>>) -> Option<String> {
    let policy = FusionPolicy::default();
    let blacklist = CachedBlacklist::new(Arc::new(FirstEmailListed));
    let ctx = FusionContext::new(date("2024-06-01"), &policy, &blacklist);
    let engine: FusionEngine<ObservedBody, MasterBody> = FusionEngine::new().with(EmailPlugin);
    let mut body = MasterBody::default();
    engine
        .fuse(observations, &mut body, &ctx)
        .expect("in-memory blacklist never fails");
    body.email
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn email_choice_ignores_observation_order(
        (sightings, shuffled) in prop::collection::vec(arb_sighting(), 0..12)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(
            fused_email(to_observations(&sightings)),
            fused_email(to_observations(&shuffled))
        );
    }

    #[test]
    fn fused_email_was_observed(sightings in prop::collection::vec(arb_sighting(), 1..12)) {
        let observations = to_observations(&sightings);
        let reported: Vec<Option<String>> =
            observations.iter().map(|o| o.fields.email.clone()).collect();
        let chosen = fused_email(observations);
        prop_assert!(chosen.is_some());
        prop_assert!(reported.contains(&chosen));
    }

    #[test]
    fn ids_are_positional(bid_counts in prop::collection::vec(0usize..4, 0..6)) {
        let mut t = tender("G", None);
        t.lots = bid_counts
            .iter()
            .map(|n| lot((0..*n).map(|_| winning_bid(None, vec![])).collect()))
            .collect();
        assign_ids(&mut t);

        for (k, l) in t.lots.iter().enumerate() {
            let expected_lot = format!("G_{}", k + 1);
            prop_assert_eq!(l.lot_id.as_deref(), Some(expected_lot.as_str()));
            for (j, b) in l.bids.iter().enumerate() {
                let expected_bid = format!("G_{}_{}", k + 1, j + 1);
                prop_assert_eq!(b.bid_id.as_deref(), Some(expected_bid.as_str()));
            }
        }
    }

    #[test]
    fn cascade_keeps_explicit_days_and_never_goes_negative(d in arb_duration()) {
        let explicit = d.estimated_duration_in_days;
        let mut resolved = d.clone();
        resolve_days(&mut resolved);

        if let Some(days) = explicit {
            prop_assert_eq!(resolved.estimated_duration_in_days, Some(days));
        } else if let Some(days) = resolved.estimated_duration_in_days {
            prop_assert!(days >= 0);
        }
    }

    #[test]
    fn cascade_is_idempotent(d in arb_duration()) {
        let mut once = d.clone();
        resolve_days(&mut once);
        let mut twice = once.clone();
        resolve_days(&mut twice);
        prop_assert_eq!(once, twice);
    }
}
