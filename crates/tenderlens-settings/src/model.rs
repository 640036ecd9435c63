use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CONFIG_SCHEMA_ID: &str = "tenderlens.config.v1";

/// `tenderlens.toml` schema v1.
///
/// Every field is optional; anything left out comes from the selected profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TenderlensConfigV1 {
    /// Optional schema string for tooling (`tenderlens.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset to start from: `full` (default) or `completeness`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default)]
    pub indicators: IndicatorsConfig,

    #[serde(default)]
    pub fusion: FusionConfig,

    #[serde(default)]
    pub eligibility: EligibilityConfig,

    /// Free-form rule parameters, flattened into dotted `indicator.*` keys.
    ///
    /// `[indicator.CZ.advertisementPeriod.100] length = "5-30"` becomes
    /// `indicator.CZ.advertisementPeriod.100.length = "5-30"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indicator: BTreeMap<String, ParamValue>,
}

/// Which rules run, by plugin name, in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndicatorsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tender_level: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_level: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FusionConfig {
    /// Distinct source records that must report an email before it is trusted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_corroborations: Option<u32>,

    /// Maximum age, in years, of the latest sighting of a trusted email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_max_age_years: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EligibilityConfig {
    /// Net EUR threshold for supplies and services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Net EUR threshold for works.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_listed_sources: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eu_wide_sources: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eu_wide_countries: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eu_wide_above_threshold_eligible: Option<bool>,

    /// Replaces the default old/new source pairs when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedup: Option<Vec<DedupPairConfig>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DedupPairConfig {
    pub country: String,
    pub old_source: String,
    pub new_source: String,

    /// `buyer_assigned_id_and_similarity` or `publication_source_id`.
    pub strategy: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,
}

/// Scalar or nested table of rule parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Table(BTreeMap<String, ParamValue>),
}
