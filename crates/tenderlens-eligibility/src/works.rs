//! Works vs. supplies/services.

use tenderlens_core::model::main_cpv;
use tenderlens_core::{MasterTender, SupplyType};

/// CPV division of construction work.
pub const WORKS_CPV_PREFIX: &str = "45";

/// An explicit supply type decides; otherwise a CPV flagged main on the tender or on any lot.
pub fn is_works(tender: &MasterTender) -> bool {
    if let Some(supply_type) = tender.supply_type {
        return supply_type == SupplyType::Works;
    }

    let is_works_code = |code: Option<&str>| code.is_some_and(|c| c.starts_with(WORKS_CPV_PREFIX));
    is_works_code(tender.main_cpv_code())
        || tender
            .lots
            .iter()
            .any(|lot| is_works_code(main_cpv(lot.cpvs.as_deref())))
}
