//! Fusion plugins. Each one owns a single field or field group.

pub mod duration;
pub mod email;
pub mod ids;
pub mod latest;
