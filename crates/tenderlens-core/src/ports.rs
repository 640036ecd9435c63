//! Ports to the collaborators the engines read from and write to.
//!
//! All calls are blocking. Implementations report expected absence as `Ok(None)` / empty
//! vectors; only infrastructure failures and integrity violations are errors.

use crate::model::{MasterBody, MasterTender};
use crate::observation::{Observation, ObservedBody, ObservedTender};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{store} lookup timed out: {detail}")]
    Timeout { store: &'static str, detail: String },

    #[error("{store} is unavailable: {detail}")]
    Unavailable { store: &'static str, detail: String },

    #[error("integrity violation in {store}: {detail}")]
    Integrity { store: &'static str, detail: String },
}

impl LookupError {
    /// Timeouts and outages may succeed on retry; integrity violations never do.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LookupError::Timeout { .. } | LookupError::Unavailable { .. }
        )
    }
}

/// Exact-match lookup keys for tenders other than the primary id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SecondaryKey {
    BuyerAssignedId(String),
    /// Source id of any publication attached to the tender.
    PublicationSourceId(String),
}

pub trait TenderStore: Send + Sync {
    fn get_by_id(&self, id: &str) -> Result<Option<MasterTender>, LookupError>;

    fn get_by_secondary_key(&self, key: &SecondaryKey) -> Result<Vec<MasterTender>, LookupError>;

    /// Replace-on-save.
    fn save(&self, tender: &MasterTender) -> Result<(), LookupError>;
}

pub trait BodyStore: Send + Sync {
    /// Zero or one body; more than one is [`LookupError::Integrity`].
    fn get_by_group_id(&self, group_id: &str) -> Result<Option<MasterBody>, LookupError>;

    fn save(&self, body: &MasterBody) -> Result<(), LookupError>;
}

/// Administrator-maintained list of emails that must never be fused into a body.
pub trait Blacklist: Send + Sync {
    fn is_blacklisted(&self, email: &str) -> Result<bool, LookupError>;
}

pub trait ObservationSource: Send + Sync {
    fn tender_observations(
        &self,
        group_id: &str,
    ) -> Result<Vec<Observation<ObservedTender>>, LookupError>;

    fn body_observations(&self, group_id: &str)
    -> Result<Vec<Observation<ObservedBody>>, LookupError>;
}
