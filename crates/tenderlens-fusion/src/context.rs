use crate::blacklist::CachedBlacklist;
use tenderlens_core::FusionPolicy;
use time::Date;

/// Inputs shared by every plugin of one fusion run.
#[derive(Debug, Clone, Copy)]
pub struct FusionContext<'a> {
    /// Reference day for staleness checks.
    pub today: Date,
    pub policy: &'a FusionPolicy,
    pub blacklist: &'a CachedBlacklist,
}

impl<'a> FusionContext<'a> {
    pub fn new(today: Date, policy: &'a FusionPolicy, blacklist: &'a CachedBlacklist) -> Self {
        Self {
            today,
            policy,
            blacklist,
        }
    }
}
