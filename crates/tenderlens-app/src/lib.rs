//! Use case orchestration for tenderlens.
//!
//! This crate provides the application layer: the per-record worker that chains fusion, scoring
//! and classification, the in-memory adapters for every store port, and the batch `process`
//! use case the CLI drives. The CLI only handles argument parsing and file I/O.

#![forbid(unsafe_code)]

mod error;
mod explain;
mod populate;
mod process;
mod retry;
mod store;
mod worker;

pub use error::ProcessError;
pub use explain::{
    ExplainOutput, IndicatorListing, format_explanation, format_not_found, list_indicators,
    run_explain,
};
pub use populate::{depopulate, populate};
pub use process::{FailedMessage, ProcessInput, ProcessOutput, ProcessReport, run_process};
pub use retry::RetryPolicy;
pub use store::{Dataset, InMemoryStore, dump_dataset, load_dataset};
pub use worker::{MessageKind, Outcome, Stores, WorkMessage, Worker};
