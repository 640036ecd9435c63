//! Public facade over the tenderlens engines.
//!
//! Embedders that bring their own stores depend on this crate alone: it re-exports the canonical
//! model and ports, the fusion engines, indicator scoring and the eligibility classifier.

#![forbid(unsafe_code)]

pub use tenderlens_core::*;
pub use tenderlens_types::{Indicator, IndicatorResult, IndicatorStatus, Score, explain, ids};

pub mod fusion {
    pub use tenderlens_fusion::*;
}

pub mod indicators {
    pub use tenderlens_indicators::*;
}

pub mod eligibility {
    pub use tenderlens_eligibility::*;
}
