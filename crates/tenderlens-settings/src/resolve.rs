use crate::model::{DedupPairConfig, ParamValue, TenderlensConfigV1};
use crate::presets::{self, DEFAULT_PROFILE, PROFILES};
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use tenderlens_core::{
    DedupPair, DedupStrategy, EligibilityPolicy, FusionPolicy, IntervalSet, MapConfig,
};
use tenderlens_core::policy::DEFAULT_SIMILARITY_THRESHOLD;
use tenderlens_indicators::{IndicatorSelection, lot_level_names, tender_level_names};

const PARAM_ROOT: &str = "indicator";
const INTERVAL_SUFFIX: &str = ".length";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    /// Extra `indicator.*` parameters; these win over the config file.
    pub params: Vec<(String, String)>,
    pub eu_wide_above_threshold_eligible: Option<bool>,
}

/// Everything a worker needs, fully validated.
#[derive(Clone, Debug)]
pub struct Settings {
    pub profile: String,
    pub selection: IndicatorSelection,
    pub fusion: FusionPolicy,
    pub eligibility: EligibilityPolicy,
    pub params: MapConfig,
}

pub fn resolve_config(cfg: TenderlensConfigV1, overrides: Overrides) -> anyhow::Result<Settings> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != crate::model::CONFIG_SCHEMA_ID
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            crate::model::CONFIG_SCHEMA_ID
        );
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
    let Some(preset) = presets::preset(&profile) else {
        anyhow::bail!("unknown profile: {profile} (expected one of {})", PROFILES.join("|"));
    };

    // Indicator selection
    let mut selection = preset.selection;
    if let Some(names) = cfg.indicators.tender_level {
        check_names("tender_level", &names, &tender_level_names())?;
        selection.tender_level = names;
    }
    if let Some(names) = cfg.indicators.lot_level {
        check_names("lot_level", &names, &lot_level_names())?;
        selection.lot_level = names;
    }

    // Fusion
    let mut fusion = preset.fusion;
    if let Some(n) = cfg.fusion.email_corroborations {
        anyhow::ensure!(n >= 1, "fusion.email_corroborations must be at least 1");
        fusion.email_corroborations = n as usize;
    }
    if let Some(years) = cfg.fusion.email_max_age_years {
        fusion.email_max_age_years =
            i32::try_from(years).context("fusion.email_max_age_years is too large")?;
    }

    // Eligibility
    let mut eligibility = preset.eligibility;
    let e = cfg.eligibility;
    if let Some(t) = e.threshold {
        eligibility.threshold = positive_amount("eligibility.threshold", t)?;
    }
    if let Some(t) = e.works_threshold {
        eligibility.works_threshold = positive_amount("eligibility.works_threshold", t)?;
    }
    if let Some(v) = e.allow_listed_sources {
        eligibility.allow_listed_sources = v.into_iter().collect();
    }
    if let Some(v) = e.eu_wide_sources {
        eligibility.eu_wide_sources = v.into_iter().collect();
    }
    if let Some(v) = e.eu_wide_countries {
        eligibility.eu_wide_countries = v.into_iter().collect();
    }
    if let Some(flag) = overrides
        .eu_wide_above_threshold_eligible
        .or(e.eu_wide_above_threshold_eligible)
    {
        eligibility.eu_wide_above_threshold_eligible = flag;
    }
    if let Some(pairs) = e.dedup {
        eligibility.dedup = pairs
            .iter()
            .map(parse_dedup_pair)
            .collect::<anyhow::Result<_>>()?;
    }

    // Rule parameters
    let mut params = preset.params;
    for (key, value) in flatten_params(&cfg.indicator) {
        params.insert(key, value);
    }
    for (key, value) in overrides.params {
        anyhow::ensure!(
            key.starts_with("indicator."),
            "parameter override must start with 'indicator.': {key}"
        );
        params.insert(key, value);
    }
    validate_params(&params)?;

    Ok(Settings {
        profile,
        selection,
        fusion,
        eligibility,
        params,
    })
}

/// Flatten the `[indicator]` table into dotted `indicator.*` keys with string values.
pub fn flatten_params(table: &BTreeMap<String, ParamValue>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (key, value) in table {
        flatten_into(&format!("{PARAM_ROOT}.{key}"), value, &mut out);
    }
    out
}

fn flatten_into(prefix: &str, value: &ParamValue, out: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Text(s) => out.push((prefix.to_string(), s.clone())),
        ParamValue::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        ParamValue::Float(f) => out.push((prefix.to_string(), f.to_string())),
        ParamValue::Bool(b) => out.push((prefix.to_string(), b.to_string())),
        ParamValue::Table(children) => {
            for (key, child) in children {
                flatten_into(&format!("{prefix}.{key}"), child, out);
            }
        }
    }
}

/// Every `*.length` parameter must be a well-formed interval set.
pub fn validate_params(params: &MapConfig) -> anyhow::Result<()> {
    for (key, value) in params.iter() {
        if key.ends_with(INTERVAL_SUFFIX) {
            IntervalSet::parse(value).with_context(|| format!("invalid interval for {key}"))?;
        }
    }
    Ok(())
}

fn check_names(section: &str, names: &[String], known: &[&str]) -> anyhow::Result<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        anyhow::ensure!(
            known.contains(&name.as_str()),
            "unknown {section} indicator: {name}"
        );
        anyhow::ensure!(
            seen.insert(name.as_str()),
            "duplicate {section} indicator: {name}"
        );
    }
    Ok(())
}

fn positive_amount(field: &str, value: f64) -> anyhow::Result<f64> {
    anyhow::ensure!(
        value.is_finite() && value > 0.0,
        "{field} must be a positive amount, got {value}"
    );
    Ok(value)
}

fn parse_dedup_pair(cfg: &DedupPairConfig) -> anyhow::Result<DedupPair> {
    let strategy = parse_strategy(&cfg.strategy)
        .with_context(|| format!("invalid dedup pair {} -> {}", cfg.old_source, cfg.new_source))?;
    let similarity_threshold = cfg.similarity_threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);
    anyhow::ensure!(
        (0.0..=1.0).contains(&similarity_threshold),
        "similarity_threshold for {} must be within 0..=1",
        cfg.old_source
    );
    Ok(DedupPair {
        country: cfg.country.clone(),
        old_source: cfg.old_source.clone(),
        new_source: cfg.new_source.clone(),
        strategy,
        similarity_threshold,
    })
}

fn parse_strategy(v: &str) -> anyhow::Result<DedupStrategy> {
    match v {
        "buyer_assigned_id_and_similarity" => Ok(DedupStrategy::BuyerAssignedIdAndSimilarity),
        "publication_source_id" => Ok(DedupStrategy::PublicationSourceId),
        other => anyhow::bail!(
            "unknown strategy: {other} (expected buyer_assigned_id_and_similarity|publication_source_id)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use tenderlens_core::ConfigSource;
    use tenderlens_types::ids;

    fn resolve(toml: &str) -> anyhow::Result<Settings> {
        resolve_config(parse_config_toml(toml)?, Overrides::default())
    }

    #[test]
    fn empty_config_is_the_full_preset() {
        let settings = resolve("").expect("resolve");
        assert_eq!(settings.profile, "full");
        assert_eq!(settings.selection, IndicatorSelection::default());
        assert_eq!(settings.eligibility, EligibilityPolicy::default());
        assert_eq!(settings.fusion, FusionPolicy::default());
        assert!(settings.params.is_empty());
    }

    #[test]
    fn indicator_table_is_flattened() {
        let settings = resolve(
            r#"
            [indicator.CZ.advertisementPeriod.100]
            length = "30-"

            [indicator.CZ.advertisementPeriod]
            missing = 50

            [indicator.CY.taxHaven]
            2024 = "YES"
            "#,
        )
        .expect("resolve");

        let params = &settings.params;
        assert_eq!(params.get("indicator.CZ.advertisementPeriod.100.length"), Some("30-"));
        assert_eq!(params.get("indicator.CZ.advertisementPeriod.missing"), Some("50"));
        assert_eq!(params.get("indicator.CY.taxHaven.2024"), Some("YES"));
    }

    #[test]
    fn malformed_interval_fails_at_resolution() {
        let err = resolve(
            r#"
            [indicator.CZ.decisionPeriod.50]
            length = "40-10"
            "#,
        )
        .expect_err("malformed");
        assert!(
            format!("{err:#}").contains("indicator.CZ.decisionPeriod.50.length"),
            "{err:#}"
        );
    }

    #[test]
    fn overrides_win_over_file() {
        let cfg = parse_config_toml(
            r#"
            profile = "full"
            [indicator.CZ.advertisementPeriod.100]
            length = "30-"
            "#,
        )
        .expect("parse");
        let settings = resolve_config(
            cfg,
            Overrides {
                profile: Some("completeness".to_string()),
                params: vec![(
                    "indicator.CZ.advertisementPeriod.100.length".to_string(),
                    "20-".to_string(),
                )],
                eu_wide_above_threshold_eligible: Some(true),
            },
        )
        .expect("resolve");

        assert_eq!(settings.profile, "completeness");
        assert!(!settings
            .selection
            .tender_level
            .iter()
            .any(|n| n == ids::RULE_TAX_HAVEN));
        assert_eq!(
            settings.params.get("indicator.CZ.advertisementPeriod.100.length"),
            Some("20-")
        );
        assert!(settings.eligibility.eu_wide_above_threshold_eligible);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(resolve("profile = \"lenient\"").is_err());
        assert!(resolve("[indicators]\ntender_level = [\"NoSuchRule\"]").is_err());
        assert!(resolve("[indicators]\nlot_level = [\"AdvertisementPeriod\"]").is_err());
        assert!(resolve("schema = \"tenderlens.config.v2\"").is_err());
    }

    #[test]
    fn eligibility_section() {
        let settings = resolve(
            r#"
            [eligibility]
            threshold = 140000.0
            eu_wide_countries = ["DE"]

            [[eligibility.dedup]]
            country = "ES"
            old_source = "es.pce"
            new_source = "es.hacienda"
            strategy = "buyer_assigned_id_and_similarity"
            similarity_threshold = 0.7
            "#,
        )
        .expect("resolve");

        let e = &settings.eligibility;
        assert_eq!(e.threshold, 140_000.0);
        assert_eq!(e.works_threshold, tenderlens_core::policy::DEFAULT_WORKS_THRESHOLD);
        assert_eq!(e.eu_wide_countries.len(), 1);
        assert_eq!(e.dedup.len(), 1);
        assert_eq!(e.dedup[0].similarity_threshold, 0.7);
    }

    #[test]
    fn invalid_eligibility_values() {
        assert!(resolve("[eligibility]\nthreshold = -1.0").is_err());
        assert!(
            resolve(
                "[[eligibility.dedup]]\ncountry = \"RO\"\nold_source = \"a\"\nnew_source = \"b\"\nstrategy = \"fuzzy\""
            )
            .is_err()
        );
        assert!(resolve("[fusion]\nemail_corroborations = 0").is_err());
    }
}
