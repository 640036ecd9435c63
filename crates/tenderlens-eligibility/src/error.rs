use tenderlens_core::LookupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EligibilityError {
    #[error("duplicate lookup for tender {tender_id} failed")]
    Lookup {
        tender_id: String,
        #[source]
        source: LookupError,
    },
}

impl EligibilityError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            EligibilityError::Lookup { source, .. } => source.is_recoverable(),
        }
    }
}
