//! Flat parameter source and the interval grammar used by threshold rules.
//!
//! Keys are dotted and namespaced: `indicator.<country>.<metric>.<tier>.<attribute>`.
//! Interval text is a `;`-separated list of closed (`low-high`) or open-ended (`low-`) ranges
//! over whole days, bounds inclusive.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Read-only lookup of configuration parameters.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<&str>;
}

/// `ConfigSource` backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapConfig {
    values: BTreeMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for MapConfig {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("unable to parse '{segment}' into an interval (in '{text}')")]
    MalformedInterval { text: String, segment: String },
}

/// Inclusive range; `high = None` is open-ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub low: i64,
    pub high: Option<i64>,
}

impl Interval {
    pub fn contains(&self, value: i64) -> bool {
        value >= self.low && self.high.is_none_or(|high| value <= high)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.high {
            Some(high) => write!(f, "{}-{}", self.low, high),
            None => write!(f, "{}-", self.low),
        }
    }
}

/// Union of intervals parsed from `"0-15;23-"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Parse interval text. Empty text (or only separators) is the empty set.
    pub fn parse(text: &str) -> Result<Self, ParamsError> {
        let malformed = |segment: &str| ParamsError::MalformedInterval {
            text: text.to_string(),
            segment: segment.to_string(),
        };

        let mut intervals = Vec::new();
        for segment in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((low, high)) = segment.split_once('-') else {
                return Err(malformed(segment));
            };
            let low: i64 = low.trim().parse().map_err(|_| malformed(segment))?;
            let high = match high.trim() {
                "" => None,
                bound => {
                    let high: i64 = bound.parse().map_err(|_| malformed(segment))?;
                    if high < low {
                        return Err(malformed(segment));
                    }
                    Some(high)
                }
            };
            intervals.push(Interval { low, high });
        }

        Ok(Self { intervals })
    }

    pub fn contains(&self, value: i64) -> bool {
        self.intervals.iter().any(|i| i.contains(value))
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl FromStr for IntervalSet {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, interval) in self.intervals.iter().enumerate() {
            if idx > 0 {
                f.write_str(";")?;
            }
            write!(f, "{interval}")?;
        }
        Ok(())
    }
}
