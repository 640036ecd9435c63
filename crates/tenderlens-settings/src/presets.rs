use tenderlens_core::{EligibilityPolicy, FusionPolicy, MapConfig};
use tenderlens_indicators::{IndicatorSelection, lot_level_names, tender_level_names};
use tenderlens_types::ids;

pub const DEFAULT_PROFILE: &str = "full";
pub const PROFILES: &[&str] = &["full", "completeness"];

/// Profile defaults before the config file and overrides are applied.
#[derive(Clone, Debug)]
pub(crate) struct Preset {
    pub selection: IndicatorSelection,
    pub fusion: FusionPolicy,
    pub eligibility: EligibilityPolicy,
    pub params: MapConfig,
}

/// Preset profiles, or `None` for an unknown name.
pub(crate) fn preset(profile: &str) -> Option<Preset> {
    match profile {
        "full" => Some(full_profile()),
        "completeness" => Some(completeness_profile()),
        _ => None,
    }
}

fn full_profile() -> Preset {
    Preset {
        selection: IndicatorSelection::default(),
        fusion: FusionPolicy::default(),
        eligibility: EligibilityPolicy::default(),
        params: MapConfig::new(),
    }
}

/// Data-completeness rules only; no jurisdiction parameters needed.
fn completeness_profile() -> Preset {
    let tiered = [
        ids::RULE_ADVERTISEMENT_PERIOD,
        ids::RULE_DECISION_PERIOD,
        ids::RULE_TAX_HAVEN,
    ];
    let keep = |names: Vec<&'static str>| {
        names
            .into_iter()
            .filter(|n| !tiered.contains(n))
            .map(String::from)
            .collect()
    };
    Preset {
        selection: IndicatorSelection {
            tender_level: keep(tender_level_names()),
            lot_level: keep(lot_level_names()),
        },
        ..full_profile()
    }
}
