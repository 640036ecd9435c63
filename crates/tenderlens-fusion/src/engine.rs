use crate::context::FusionContext;
use crate::plugins::{duration, email, ids, latest};
use tenderlens_core::{LookupError, MasterBody, MasterTender, Observation, ObservedBody, ObservedTender};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FusionError {
    #[error("fusion plugin `{plugin}` failed a lookup")]
    Lookup {
        plugin: &'static str,
        #[source]
        source: LookupError,
    },
}

impl FusionError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            FusionError::Lookup { source, .. } => source.is_recoverable(),
        }
    }
}

/// Sets one field (or one related field group) of `R` from observations of type `O`.
///
/// Plugins must leave the record unchanged when nothing applies and must be idempotent for a
/// fixed observation set.
pub trait FusionPlugin<O, R>: Send + Sync {
    fn name(&self) -> &'static str;

    /// `observations` are ordered most recent first, undated last.
    fn fuse(
        &self,
        observations: &[Observation<O>],
        record: &mut R,
        ctx: &FusionContext<'_>,
    ) -> Result<(), FusionError>;
}

/// Stable sort, most recent first; observations without a date go last.
pub fn sort_most_recent_first<O>(observations: &mut [Observation<O>]) {
    observations.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
}

/// Ordered list of plugins applied to one record.
pub struct FusionEngine<O, R> {
    plugins: Vec<Box<dyn FusionPlugin<O, R>>>,
}

impl<O, R> Default for FusionEngine<O, R> {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }
}

impl<O, R> FusionEngine<O, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, plugin: impl FusionPlugin<O, R> + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Sorts the observations once, then runs every plugin in registration order.
    pub fn fuse(
        &self,
        mut observations: Vec<Observation<O>>,
        record: &mut R,
        ctx: &FusionContext<'_>,
    ) -> Result<(), FusionError> {
        sort_most_recent_first(&mut observations);
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), observations = observations.len(), "fusing");
            plugin.fuse(&observations, record, ctx)?;
        }
        Ok(())
    }
}

impl<O, R> std::fmt::Debug for FusionEngine<O, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionEngine")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

/// Body fusion: email, then name.
pub fn body_engine() -> FusionEngine<ObservedBody, MasterBody> {
    FusionEngine::new()
        .with(email::EmailPlugin)
        .with(latest::LatestValue::new(
            "name",
            |o: &ObservedBody| latest::non_blank(&o.name),
            |b: &mut MasterBody, v| b.name = Some(v),
        ))
}

/// Tender fusion: latest scalar values, duration cascade, then positional ids.
pub fn tender_engine() -> FusionEngine<ObservedTender, MasterTender> {
    FusionEngine::new()
        .with(latest::LatestValue::new(
            "title",
            |o: &ObservedTender| latest::non_blank(&o.title),
            |t: &mut MasterTender, v| t.title = Some(v),
        ))
        .with(latest::LatestValue::new(
            "buyer_assigned_id",
            |o: &ObservedTender| latest::non_blank(&o.buyer_assigned_id),
            |t: &mut MasterTender, v| t.buyer_assigned_id = Some(v),
        ))
        .with(latest::LatestValue::new(
            "country",
            |o: &ObservedTender| latest::non_blank(&o.country),
            |t: &mut MasterTender, v| t.country = Some(v),
        ))
        .with(latest::LatestValue::new(
            "bid_deadline",
            |o: &ObservedTender| o.bid_deadline,
            |t: &mut MasterTender, v| t.bid_deadline = Some(v),
        ))
        .with(latest::LatestValue::new(
            "supply_type",
            |o: &ObservedTender| o.supply_type,
            |t: &mut MasterTender, v| t.supply_type = Some(v),
        ))
        .with(latest::LatestValue::new(
            "selection_method",
            |o: &ObservedTender| o.selection_method,
            |t: &mut MasterTender, v| t.selection_method = Some(v),
        ))
        .with(latest::LatestValue::new(
            "estimated_price",
            |o: &ObservedTender| o.estimated_price.clone(),
            |t: &mut MasterTender, v| t.estimated_price = Some(v),
        ))
        .with(latest::LatestValue::new(
            "final_price",
            |o: &ObservedTender| o.final_price.clone(),
            |t: &mut MasterTender, v| t.final_price = Some(v),
        ))
        .with(duration::DurationInDaysPlugin)
        .with(ids::LotAndBidIdsPlugin)
}
