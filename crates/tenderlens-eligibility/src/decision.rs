use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a tender was (or was not) found eligible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    MissingOrigin,
    AllowListedSource,
    AllowListedEuCountry,
    PriceUndetermined,
    PriceWithinThreshold,
    PriceAboveThreshold,
    /// EU-wide record on the side of the threshold that the national sources cover.
    EuWideOutsideThreshold,
    CrossGenerationDuplicate,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::MissingOrigin => "missing_origin",
            Reason::AllowListedSource => "allow_listed_source",
            Reason::AllowListedEuCountry => "allow_listed_eu_country",
            Reason::PriceUndetermined => "price_undetermined",
            Reason::PriceWithinThreshold => "price_within_threshold",
            Reason::PriceAboveThreshold => "price_above_threshold",
            Reason::EuWideOutsideThreshold => "eu_wide_outside_threshold",
            Reason::CrossGenerationDuplicate => "cross_generation_duplicate",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub eligible: bool,
    pub reason: Reason,
}

impl Decision {
    pub const fn eligible(reason: Reason) -> Self {
        Self {
            eligible: true,
            reason,
        }
    }

    pub const fn excluded(reason: Reason) -> Self {
        Self {
            eligible: false,
            reason,
        }
    }
}

/// Result of classifying a tender in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// A decision was already recorded; the tender was not touched.
    Cached { eligible: bool },
    Decided(Decision),
}

impl Classification {
    pub fn eligible(&self) -> bool {
        match self {
            Classification::Cached { eligible } => *eligible,
            Classification::Decided(d) => d.eligible,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Classification::Decided(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_text_matches_serde_name() {
        for reason in [
            Reason::MissingOrigin,
            Reason::AllowListedEuCountry,
            Reason::EuWideOutsideThreshold,
            Reason::CrossGenerationDuplicate,
        ] {
            let json = serde_json::to_value(reason).expect("serialize");
            assert_eq!(json, serde_json::Value::String(reason.to_string()));
        }
    }
}
