//! Field fusion (no IO beyond the blacklist port).
//!
//! Input: the observations of one entity and the canonical record under construction.
//! Output: the same record with each fused field set by exactly one plugin.

#![forbid(unsafe_code)]

mod blacklist;
mod context;
mod engine;
pub mod plugins;

#[cfg(test)]
mod proptest;

pub use blacklist::CachedBlacklist;
pub use context::FusionContext;
pub use engine::{
    FusionEngine, FusionError, FusionPlugin, body_engine, sort_most_recent_first, tender_engine,
};
