//! Pure indicator evaluation (no IO).
//!
//! Input: a fused tender with populated bodies and a parameter source.
//! Output: one ordered indicator list for the tender and one per lot.

#![forbid(unsafe_code)]

pub mod average;
pub mod guard;
pub mod rules;
pub mod score;
pub mod tiers;

mod engine;
mod plugin;
mod registry;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{ScoreSummary, score_tender};
pub use plugin::{IndicatorContext, IndicatorError, LotIndicator, TenderIndicator};
pub use registry::{
    IndicatorSelection, IndicatorSuite, lot_level_names, tender_level_names,
};
