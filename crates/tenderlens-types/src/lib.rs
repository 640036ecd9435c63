//! Stable DTOs and IDs used across the tenderlens workspace.
//!
//! This crate is intentionally boring:
//! - stable string ids for indicator types, rule names and metadata keys
//! - the three-state indicator result attached to tenders and lots
//! - explain registry describing each rule

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod indicator;

pub use explain::{all_explanations, all_rule_names, lookup_explanation, Explanation};
pub use indicator::{
    Indicator, IndicatorResult, IndicatorStatus, Metadata, Score, ScoreOutOfRange,
};
