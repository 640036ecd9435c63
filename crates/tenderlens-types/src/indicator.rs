use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Raw measured values kept next to a result for audit.
pub type Metadata = BTreeMap<String, JsonValue>;

/// A red-flag score: 100 = no red flag, 0 = maximal red flag.
///
/// Construction goes through [`Score::new`] or [`Score::clamped`], so a `Score` is always a
/// finite value within `[0, 100]`. Deserialization applies the same check.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const MIN: Score = Score(0.0);
    pub const HALF: Score = Score(50.0);
    pub const MAX: Score = Score(100.0);

    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// NaN maps to 0.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.clamp(0.0, 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreOutOfRange(pub f64);

impl std::fmt::Display for ScoreOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "indicator score {} is outside [0, 100]", self.0)
    }
}

impl std::error::Error for ScoreOutOfRange {}

impl TryFrom<f64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value).ok_or(ScoreOutOfRange(value))
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl JsonSchema for Score {
    fn schema_name() -> Cow<'static, str> {
        "Score".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "number",
            "minimum": 0.0,
            "maximum": 100.0
        })
    }
}

/// Outcome of one rule against one tender or lot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorResult {
    /// A required input is absent.
    Insufficient {
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        metadata: Metadata,
    },
    /// The rule does not apply, or is not configured for this jurisdiction.
    Undefined,
    Calculated {
        value: Score,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        metadata: Metadata,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorStatus {
    Insufficient,
    Undefined,
    Calculated,
}

impl IndicatorResult {
    pub fn insufficient() -> Self {
        IndicatorResult::Insufficient {
            metadata: Metadata::new(),
        }
    }

    pub fn insufficient_with(metadata: Metadata) -> Self {
        IndicatorResult::Insufficient { metadata }
    }

    pub fn undefined() -> Self {
        IndicatorResult::Undefined
    }

    pub fn calculated(value: f64) -> Self {
        Self::calculated_with(value, Metadata::new())
    }

    pub fn calculated_with(value: f64, metadata: Metadata) -> Self {
        IndicatorResult::Calculated {
            value: Score::clamped(value),
            metadata,
        }
    }

    pub fn status(&self) -> IndicatorStatus {
        match self {
            IndicatorResult::Insufficient { .. } => IndicatorStatus::Insufficient,
            IndicatorResult::Undefined => IndicatorStatus::Undefined,
            IndicatorResult::Calculated { .. } => IndicatorStatus::Calculated,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            IndicatorResult::Calculated { value, .. } => Some(value.value()),
            _ => None,
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            IndicatorResult::Insufficient { metadata }
            | IndicatorResult::Calculated { metadata, .. } => Some(metadata),
            IndicatorResult::Undefined => None,
        }
    }

    pub fn is_calculated(&self) -> bool {
        matches!(self, IndicatorResult::Calculated { .. })
    }
}

/// A typed result as attached to a tender or lot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Indicator {
    #[serde(rename = "type")]
    pub indicator_type: String,
    #[serde(flatten)]
    pub result: IndicatorResult,
}

impl Indicator {
    pub fn new(indicator_type: impl Into<String>, result: IndicatorResult) -> Self {
        Self {
            indicator_type: indicator_type.into(),
            result,
        }
    }
}
