use crate::plugin::{IndicatorContext, IndicatorError, TenderIndicator};
use crate::score::RatioScore;
use tenderlens_core::MasterTender;
use tenderlens_types::{IndicatorResult, ids};

#[derive(Debug, Clone, Copy)]
pub struct AddressOfImplementationMissing;

impl TenderIndicator for AddressOfImplementationMissing {
    fn indicator_type(&self) -> &'static str {
        ids::INDICATOR_ADDRESS_OF_IMPLEMENTATION_MISSING
    }

    fn evaluate(
        &self,
        tender: &MasterTender,
        _ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let mut score = RatioScore::new();
        if let Some(address) = &tender.address_of_implementation {
            score.test(address.nuts.as_ref().is_some_and(|n| !n.is_empty()));
        }
        Ok(IndicatorResult::calculated(score.ratio()))
    }
}
