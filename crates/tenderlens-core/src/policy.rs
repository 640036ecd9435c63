use std::collections::BTreeSet;

/// Email fusion knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct FusionPolicy {
    /// Distinct source objects that must report an email before it is trusted.
    pub email_corroborations: usize,
    /// A trusted email must have been seen within this many years of today.
    pub email_max_age_years: i32,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            email_corroborations: 3,
            email_max_age_years: 3,
        }
    }
}

/// How an old-system record is matched against the new system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Same buyer-assigned id, then title and first buyer name must both be similar.
    BuyerAssignedIdAndSimilarity,
    /// First publication's buyer-assigned id equals a new-system publication source id.
    /// The old record must carry a contract award publication.
    PublicationSourceId,
}

/// An old/new generation pair of one national data source.
#[derive(Clone, Debug, PartialEq)]
pub struct DedupPair {
    pub country: String,
    pub old_source: String,
    pub new_source: String,
    pub strategy: DedupStrategy,
    pub similarity_threshold: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EligibilityPolicy {
    /// Net EUR threshold for supplies and services.
    pub threshold: f64,
    /// Net EUR threshold for works.
    pub works_threshold: f64,
    /// National sources whose records are always eligible.
    pub allow_listed_sources: BTreeSet<String>,
    /// EU-wide sources.
    pub eu_wide_sources: BTreeSet<String>,
    /// Countries for which EU-wide records are always eligible.
    pub eu_wide_countries: BTreeSet<String>,
    /// When set, EU-wide records above the threshold are eligible and those at/under it are not.
    pub eu_wide_above_threshold_eligible: bool,
    pub dedup: Vec<DedupPair>,
}

pub const DEFAULT_THRESHOLD: f64 = 135_000.0;
pub const DEFAULT_WORKS_THRESHOLD: f64 = 5_186_000.0;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

pub const DEFAULT_ALLOW_LISTED_SOURCES: &[&str] = &["pl.uzp", "ge.spa"];
pub const DEFAULT_EU_WIDE_SOURCES: &[&str] = &["eu.ted", "eu.ted_csv"];
pub const DEFAULT_EU_WIDE_COUNTRIES: &[&str] = &[
    "DE", "IT", "SE", "BE", "FI", "AT", "DK", "GR", "LU", "CY", "MT", "IS", "RS", "AM",
];

impl EligibilityPolicy {
    pub fn is_eu_wide(&self, source: &str) -> bool {
        self.eu_wide_sources.contains(source)
    }

    pub fn threshold_for(&self, is_works: bool) -> f64 {
        if is_works {
            self.works_threshold
        } else {
            self.threshold
        }
    }

    pub fn default_dedup_pairs() -> Vec<DedupPair> {
        vec![
            DedupPair {
                country: "ES".to_string(),
                old_source: "es.pce".to_string(),
                new_source: "es.hacienda".to_string(),
                strategy: DedupStrategy::BuyerAssignedIdAndSimilarity,
                similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            },
            DedupPair {
                country: "RO".to_string(),
                old_source: "ro.apa".to_string(),
                new_source: "ro.sicap".to_string(),
                strategy: DedupStrategy::PublicationSourceId,
                similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            },
        ]
    }
}

fn set_of(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            works_threshold: DEFAULT_WORKS_THRESHOLD,
            allow_listed_sources: set_of(DEFAULT_ALLOW_LISTED_SOURCES),
            eu_wide_sources: set_of(DEFAULT_EU_WIDE_SOURCES),
            eu_wide_countries: set_of(DEFAULT_EU_WIDE_COUNTRIES),
            eu_wide_above_threshold_eligible: false,
            dedup: Self::default_dedup_pairs(),
        }
    }
}
