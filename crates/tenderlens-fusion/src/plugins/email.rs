//! Email fusion for bodies.
//!
//! An email is trusted once enough distinct source objects report it, it is not blacklisted,
//! and its latest sighting is recent. Without a trusted candidate the most recent sighting wins.

use crate::context::FusionContext;
use crate::engine::{FusionError, FusionPlugin};
use std::collections::BTreeMap;
use tenderlens_core::dates::{UNDATED_SENTINEL, years_before};
use tenderlens_core::{MasterBody, Observation, ObservedBody};
use time::Date;
use tracing::{debug, info};

pub const PLUGIN_NAME: &str = "email";

pub struct EmailPlugin;

/// Per-email corroboration: source object id -> latest date that object reported it.
#[derive(Debug, Default)]
struct Tally<'a> {
    objects: BTreeMap<&'a str, Date>,
}

impl Tally<'_> {
    fn count(&self) -> usize {
        self.objects.len()
    }

    fn most_recent(&self) -> Date {
        self.objects.values().copied().max().unwrap_or(UNDATED_SENTINEL)
    }

    /// Date of the observation at which, walking most recent first, the tally reached `needed`.
    fn reached_at(&self, needed: usize) -> Option<Date> {
        if needed == 0 || self.count() < needed {
            return None;
        }
        let mut dates: Vec<Date> = self.objects.values().copied().collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.get(needed - 1).copied()
    }
}

impl FusionPlugin<ObservedBody, MasterBody> for EmailPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn fuse(
        &self,
        observations: &[Observation<ObservedBody>],
        record: &mut MasterBody,
        ctx: &FusionContext<'_>,
    ) -> Result<(), FusionError> {
        let sightings: Vec<(&str, &str, Date)> = observations
            .iter()
            .filter_map(|o| {
                let email = o.fields.email.as_deref().map(str::trim)?;
                (!email.is_empty()).then(|| {
                    (
                        email,
                        o.object_id.as_str(),
                        o.publication_date.unwrap_or(UNDATED_SENTINEL),
                    )
                })
            })
            .collect();

        if sightings.is_empty() {
            return Ok(());
        }

        let mut tallies: BTreeMap<&str, Tally<'_>> = BTreeMap::new();
        for &(email, object_id, date) in &sightings {
            let latest = tallies
                .entry(email)
                .or_default()
                .objects
                .entry(object_id)
                .or_insert(date);
            if date > *latest {
                *latest = date;
            }
        }

        if let Some(email) = trusted_email(&tallies, ctx)? {
            debug!(group_id = %record.group_id, email, "corroborated email selected");
            record.email = Some(email.to_string());
            return Ok(());
        }

        let fallback = most_recent_email(&sightings, &tallies);
        if let Some(email) = fallback {
            info!(group_id = %record.group_id, email, "no corroborated email; using most recent");
            record.email = Some(email.to_string());
        }
        Ok(())
    }
}

fn trusted_email<'a>(
    tallies: &BTreeMap<&'a str, Tally<'a>>,
    ctx: &FusionContext<'_>,
) -> Result<Option<&'a str>, FusionError> {
    let needed = ctx.policy.email_corroborations;
    let oldest_allowed = years_before(ctx.today, ctx.policy.email_max_age_years);

    let mut candidates: Vec<(&'a str, Date, usize, Date)> = tallies
        .iter()
        .filter_map(|(email, tally)| {
            let reached = tally.reached_at(needed)?;
            let most_recent = tally.most_recent();
            (most_recent >= oldest_allowed).then_some((*email, reached, tally.count(), most_recent))
        })
        .collect();

    // Earliest to reach the threshold, walking most recent first.
    candidates.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(b.2.cmp(&a.2))
            .then(b.3.cmp(&a.3))
            .then(a.0.cmp(b.0))
    });

    for (email, ..) in candidates {
        let listed = ctx
            .blacklist
            .is_blacklisted(email)
            .map_err(|source| FusionError::Lookup {
                plugin: PLUGIN_NAME,
                source,
            })?;
        if listed {
            debug!(email, "skipping blacklisted email");
            continue;
        }
        return Ok(Some(email));
    }
    Ok(None)
}

fn most_recent_email<'a>(
    sightings: &[(&'a str, &'a str, Date)],
    tallies: &BTreeMap<&'a str, Tally<'a>>,
) -> Option<&'a str> {
    let newest = sightings.iter().map(|s| s.2).max()?;
    sightings
        .iter()
        .filter(|s| s.2 == newest)
        .map(|s| s.0)
        .min_by(|a, b| {
            let count = |e: &str| tallies.get(e).map(Tally::count).unwrap_or(0);
            count(*b).cmp(&count(*a)).then(a.cmp(b))
        })
}
