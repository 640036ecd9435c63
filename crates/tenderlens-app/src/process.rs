//! The `process` use case: run a batch of work messages over an in-memory dataset.
//!
//! Bodies are processed before tenders so that indicator rules read freshly fused bodies.
//! Within a phase messages are handled in parallel, one [`Worker`] per pool task.

use crate::retry::RetryPolicy;
use crate::store::{Dataset, InMemoryStore};
use crate::worker::{MessageKind, Outcome, Stores, WorkMessage, Worker};
use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tenderlens_core::Blacklist;
use tenderlens_eligibility::Classification;
use tenderlens_settings::{
    Overrides, Settings, TenderlensConfigV1, parse_config_toml, resolve_config,
};
use time::Date;
use tracing::{error, info};

#[derive(Clone, Debug)]
pub struct ProcessInput {
    pub dataset: Dataset,
    /// TOML config; `None` runs with the profile defaults.
    pub config_text: Option<String>,
    pub overrides: Overrides,
    /// Messages to handle; `None` means every body, then every tender in the dataset.
    pub messages: Option<Vec<WorkMessage>>,
    /// Worker threads; `None` lets the pool pick.
    pub jobs: Option<usize>,
    pub today: Date,
    pub retry: RetryPolicy,
}

#[derive(Clone, Debug)]
pub struct ProcessOutput {
    pub dataset: Dataset,
    pub report: ProcessReport,
    pub settings: Settings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub processed: usize,
    pub bodies: usize,
    pub tenders: usize,
    pub eligible: usize,
    pub excluded: usize,
    /// Tenders whose eligibility had been decided by an earlier run.
    pub cached: usize,
    pub failed: Vec<FailedMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedMessage {
    pub kind: MessageKind,
    pub id: String,
    pub error: String,
    /// True when retries were exhausted on a transient failure.
    pub recoverable: bool,
}

impl ProcessReport {
    fn record(&mut self, message: &WorkMessage, result: Result<Outcome, crate::ProcessError>) {
        match result {
            Ok(Outcome::Body { .. }) => {
                self.processed += 1;
                self.bodies += 1;
            }
            Ok(Outcome::Tender { classification, .. }) => {
                self.processed += 1;
                self.tenders += 1;
                if matches!(classification, Classification::Cached { .. }) {
                    self.cached += 1;
                }
                if classification.eligible() {
                    self.eligible += 1;
                } else {
                    self.excluded += 1;
                }
            }
            Err(err) => {
                error!(kind = %message.kind, id = %message.id, error = %err, "message failed");
                self.failed.push(FailedMessage {
                    kind: message.kind,
                    id: message.id.clone(),
                    error: err.to_string(),
                    recoverable: err.is_recoverable(),
                });
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

pub fn run_process(input: ProcessInput) -> anyhow::Result<ProcessOutput> {
    let cfg = match input.config_text.as_deref() {
        Some(text) => parse_config_toml(text).context("parse config")?,
        None => TenderlensConfigV1::default(),
    };
    let settings = Arc::new(resolve_config(cfg, input.overrides).context("resolve config")?);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(input.jobs.unwrap_or(0))
        .build()
        .context("build worker pool")?;

    let store = Arc::new(InMemoryStore::from_dataset(input.dataset));
    let (bodies, tenders): (Vec<WorkMessage>, Vec<WorkMessage>) = match input.messages {
        Some(messages) => messages
            .into_iter()
            .partition(|m| m.kind == MessageKind::Body),
        None => (
            store.body_group_ids().into_iter().map(WorkMessage::body).collect(),
            store.tender_ids().into_iter().map(WorkMessage::tender).collect(),
        ),
    };
    info!(
        profile = %settings.profile,
        bodies = bodies.len(),
        tenders = tenders.len(),
        threads = pool.current_num_threads(),
        "processing batch"
    );

    let blacklist: Arc<dyn Blacklist> = store.clone();
    let stores = Stores {
        tenders: store.as_ref(),
        bodies: store.as_ref(),
        observations: store.as_ref(),
    };

    let mut report = ProcessReport::default();
    for phase in [bodies, tenders] {
        let results: Vec<_> = pool.install(|| {
            phase
                .par_iter()
                .map_init(
                    || {
                        Worker::new(Arc::clone(&settings), Arc::clone(&blacklist), input.today)
                            .with_retry(input.retry)
                    },
                    |worker, message| worker.handle(message, stores),
                )
                .collect()
        });
        for (message, result) in phase.iter().zip(results) {
            report.record(message, result);
        }
    }
    info!(
        processed = report.processed,
        failed = report.failed.len(),
        eligible = report.eligible,
        excluded = report.excluded,
        "batch finished"
    );

    Ok(ProcessOutput {
        dataset: store.to_dataset(),
        report,
        settings: Arc::unwrap_or_clone(settings),
    })
}
