use tenderlens_core::{ConfigSource, MasterLot, MasterTender, ParamsError};
use tenderlens_types::IndicatorResult;
use thiserror::Error;

/// Everything a rule may consult besides the record itself.
#[derive(Clone, Copy)]
pub struct IndicatorContext<'a> {
    pub params: &'a dyn ConfigSource,
}

impl<'a> IndicatorContext<'a> {
    pub fn new(params: &'a dyn ConfigSource) -> Self {
        Self { params }
    }
}

impl std::fmt::Debug for IndicatorContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorContext").finish_non_exhaustive()
    }
}

/// Configuration faults surfaced while scoring. Data gaps are results, not errors.
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("indicator {indicator}: malformed interval at `{key}`")]
    MalformedInterval {
        indicator: &'static str,
        key: String,
        #[source]
        source: ParamsError,
    },
}

pub trait TenderIndicator: Send + Sync {
    fn indicator_type(&self) -> &'static str;

    fn evaluate(
        &self,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError>;
}

pub trait LotIndicator: Send + Sync {
    fn indicator_type(&self) -> &'static str;

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError>;
}
