use crate::worker::MessageKind;
use tenderlens_core::LookupError;
use tenderlens_eligibility::EligibilityError;
use tenderlens_fusion::FusionError;
use tenderlens_indicators::IndicatorError;
use thiserror::Error;

/// Failure of one work message.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{kind} {id} not found")]
    MissingRecord { kind: MessageKind, id: String },

    #[error("{stage} failed")]
    Lookup {
        stage: &'static str,
        #[source]
        source: LookupError,
    },

    #[error(transparent)]
    Fusion(#[from] FusionError),

    #[error(transparent)]
    Indicators(#[from] IndicatorError),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}

impl ProcessError {
    pub(crate) fn lookup(stage: &'static str) -> impl FnOnce(LookupError) -> Self {
        move |source| ProcessError::Lookup { stage, source }
    }

    /// Storage and network hiccups are worth retrying; everything else fails the message.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ProcessError::Lookup { source, .. } => source.is_recoverable(),
            ProcessError::Fusion(e) => e.is_recoverable(),
            ProcessError::Eligibility(e) => e.is_recoverable(),
            ProcessError::MissingRecord { .. } | ProcessError::Indicators(_) => false,
        }
    }
}
