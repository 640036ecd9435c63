//! Canonical procurement model and policy primitives (no I/O).
//!
//! Everything the fusion, indicator and eligibility engines share lives here:
//! - the master tender / lot / bid / body records and the per-source observations they are fused from
//! - the flat parameter source and the interval grammar used by threshold rules
//! - fusion and eligibility policies
//! - the ports through which engines reach external stores

#![forbid(unsafe_code)]

pub mod dates;
pub mod model;
pub mod observation;
pub mod params;
pub mod policy;
pub mod ports;

pub use model::{
    Address, AwardCriterion, BodyIdentifier, BodyRef, Cpv, EstimatedDuration, Funding,
    MasterBid, MasterBody, MasterLot, MasterTender, Price, Publication, PublicationFormType,
    SelectionMethod, SupplyType,
};
pub use observation::{Observation, ObservedBody, ObservedTender};
pub use params::{ConfigSource, Interval, IntervalSet, MapConfig, ParamsError};
pub use policy::{DedupPair, DedupStrategy, EligibilityPolicy, FusionPolicy};
pub use ports::{
    Blacklist, BodyStore, LookupError, ObservationSource, SecondaryKey, TenderStore,
};
