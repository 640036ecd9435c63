//! One work message in, one saved record out.

use crate::error::ProcessError;
use crate::populate::{depopulate, populate};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tenderlens_core::{
    Blacklist, BodyStore, MasterBody, MasterTender, ObservationSource, ObservedBody,
    ObservedTender, TenderStore,
};
use tenderlens_eligibility::{Classification, EligibilityClassifier};
use tenderlens_fusion::{CachedBlacklist, FusionContext, FusionEngine, body_engine, tender_engine};
use tenderlens_indicators::{IndicatorContext, IndicatorSuite, ScoreSummary, score_tender};
use tenderlens_settings::Settings;
use time::Date;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Tender,
    Body,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageKind::Tender => "tender",
            MessageKind::Body => "body",
        })
    }
}

/// Inbound signal: process the record with this id (tender id, or body group id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkMessage {
    pub kind: MessageKind,
    pub id: String,
}

impl WorkMessage {
    pub fn tender(id: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Tender,
            id: id.into(),
        }
    }

    pub fn body(group_id: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Body,
            id: group_id.into(),
        }
    }
}

/// The stores a worker reads from and writes to.
#[derive(Clone, Copy)]
pub struct Stores<'a> {
    pub tenders: &'a dyn TenderStore,
    pub bodies: &'a dyn BodyStore,
    pub observations: &'a dyn ObservationSource,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Tender {
        id: String,
        summary: ScoreSummary,
        classification: Classification,
    },
    Body {
        group_id: String,
        email: Option<String>,
    },
}

/// Per-thread pipeline state: rule instances, fusion engines and the blacklist cache.
pub struct Worker {
    settings: Arc<Settings>,
    suite: IndicatorSuite,
    tender_engine: FusionEngine<ObservedTender, MasterTender>,
    body_engine: FusionEngine<ObservedBody, MasterBody>,
    blacklist: CachedBlacklist,
    today: Date,
    retry: RetryPolicy,
}

impl Worker {
    pub fn new(settings: Arc<Settings>, blacklist: Arc<dyn Blacklist>, today: Date) -> Self {
        let suite = IndicatorSuite::from_selection(&settings.selection);
        Self {
            settings,
            suite,
            tender_engine: tender_engine(),
            body_engine: body_engine(),
            blacklist: CachedBlacklist::new(blacklist),
            today,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Process one message, retrying recoverable failures. Nothing is saved unless every stage
    /// succeeds.
    pub fn handle(&self, message: &WorkMessage, stores: Stores<'_>) -> Result<Outcome, ProcessError> {
        self.retry.run(|attempt| {
            debug!(kind = %message.kind, id = %message.id, attempt, "handling message");
            match message.kind {
                MessageKind::Tender => self.process_tender(&message.id, stores),
                MessageKind::Body => self.process_body(&message.id, stores),
            }
        })
    }

    fn fusion_context(&self) -> FusionContext<'_> {
        FusionContext::new(self.today, &self.settings.fusion, &self.blacklist)
    }

    fn process_tender(&self, id: &str, stores: Stores<'_>) -> Result<Outcome, ProcessError> {
        let mut tender = stores
            .tenders
            .get_by_id(id)
            .map_err(ProcessError::lookup("load tender"))?
            .ok_or_else(|| ProcessError::MissingRecord {
                kind: MessageKind::Tender,
                id: id.to_string(),
            })?;

        let observations = stores
            .observations
            .tender_observations(&tender.group_id)
            .map_err(ProcessError::lookup("load tender observations"))?;
        self.tender_engine
            .fuse(observations, &mut tender, &self.fusion_context())?;

        populate(&mut tender, stores.bodies).map_err(ProcessError::lookup("populate bodies"))?;
        let summary = score_tender(
            &self.suite,
            &mut tender,
            &IndicatorContext::new(&self.settings.params),
        )?;
        let classification =
            EligibilityClassifier::new(&self.settings.eligibility, stores.tenders, stores.bodies)
                .classify(&mut tender)?;
        depopulate(&mut tender);

        stores
            .tenders
            .save(&tender)
            .map_err(ProcessError::lookup("save tender"))?;
        info!(
            tender_id = %tender.id,
            calculated = summary.calculated,
            eligible = classification.eligible(),
            "tender processed"
        );
        Ok(Outcome::Tender {
            id: tender.id,
            summary,
            classification,
        })
    }

    fn process_body(&self, group_id: &str, stores: Stores<'_>) -> Result<Outcome, ProcessError> {
        let mut body = stores
            .bodies
            .get_by_group_id(group_id)
            .map_err(ProcessError::lookup("load body"))?
            .ok_or_else(|| ProcessError::MissingRecord {
                kind: MessageKind::Body,
                id: group_id.to_string(),
            })?;

        let observations = stores
            .observations
            .body_observations(group_id)
            .map_err(ProcessError::lookup("load body observations"))?;
        self.body_engine
            .fuse(observations, &mut body, &self.fusion_context())?;

        stores
            .bodies
            .save(&body)
            .map_err(ProcessError::lookup("save body"))?;
        info!(group_id, email = body.email.as_deref().unwrap_or("-"), "body processed");
        Ok(Outcome::Body {
            group_id: body.group_id,
            email: body.email,
        })
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("profile", &self.settings.profile)
            .field("suite", &self.suite)
            .field("today", &self.today)
            .finish()
    }
}
