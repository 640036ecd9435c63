//! "Requires a publication of type X" guard.
//!
//! A tender without any publication of the form type yields UNDEFINED before the wrapped rule
//! is consulted.

use crate::plugin::{IndicatorContext, IndicatorError, LotIndicator, TenderIndicator};
use tenderlens_core::{MasterLot, MasterTender, PublicationFormType};
use tenderlens_types::IndicatorResult;

#[derive(Debug, Clone)]
pub struct RequiresPublication<R> {
    form_type: PublicationFormType,
    inner: R,
}

impl<R> RequiresPublication<R> {
    pub fn new(form_type: PublicationFormType, inner: R) -> Self {
        Self { form_type, inner }
    }

    pub fn contract_notice(inner: R) -> Self {
        Self::new(PublicationFormType::ContractNotice, inner)
    }

    pub fn contract_award(inner: R) -> Self {
        Self::new(PublicationFormType::ContractAward, inner)
    }
}

impl<R: TenderIndicator> TenderIndicator for RequiresPublication<R> {
    fn indicator_type(&self) -> &'static str {
        self.inner.indicator_type()
    }

    fn evaluate(
        &self,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        if !tender.has_publication_of_type(self.form_type) {
            return Ok(IndicatorResult::undefined());
        }
        self.inner.evaluate(tender, ctx)
    }
}

impl<R: LotIndicator> LotIndicator for RequiresPublication<R> {
    fn indicator_type(&self) -> &'static str {
        self.inner.indicator_type()
    }

    fn evaluate(
        &self,
        lot: &MasterLot,
        tender: &MasterTender,
        ctx: &IndicatorContext<'_>,
    ) -> Result<IndicatorResult, IndicatorError> {
        if !tender.has_publication_of_type(self.form_type) {
            return Ok(IndicatorResult::undefined());
        }
        self.inner.evaluate(lot, tender, ctx)
    }
}
