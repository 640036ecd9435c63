//! Config parsing, presets and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{
    DedupPairConfig, EligibilityConfig, FusionConfig, IndicatorsConfig, ParamValue,
    TenderlensConfigV1, CONFIG_SCHEMA_ID,
};
pub use presets::{DEFAULT_PROFILE, PROFILES};
pub use resolve::{Overrides, Settings, flatten_params, validate_params};

/// Parse `tenderlens.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<TenderlensConfigV1> {
    let cfg: TenderlensConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings used by the worker (preset + config + overrides), validating
/// every interval parameter.
pub fn resolve_config(cfg: TenderlensConfigV1, overrides: Overrides) -> anyhow::Result<Settings> {
    resolve::resolve_config(cfg, overrides)
}
