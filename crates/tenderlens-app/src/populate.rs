//! Resolve body references before scoring, and strip them again before saving.

use std::collections::HashMap;
use tenderlens_core::{BodyRef, BodyStore, LookupError, MasterBody, MasterTender};

fn body_refs_mut(tender: &mut MasterTender) -> impl Iterator<Item = &mut BodyRef> {
    let bidders = tender
        .lots
        .iter_mut()
        .flat_map(|lot| lot.bids.iter_mut())
        .flat_map(|bid| bid.bidders.iter_mut());
    tender.buyers.iter_mut().chain(bidders)
}

/// Fill every buyer and bidder reference from the body store. Each group id is looked up once.
pub fn populate(tender: &mut MasterTender, bodies: &dyn BodyStore) -> Result<(), LookupError> {
    let mut resolved: HashMap<String, Option<MasterBody>> = HashMap::new();
    for body_ref in body_refs_mut(tender) {
        let Some(group_id) = body_ref.group_id.as_deref() else {
            continue;
        };
        let body = match resolved.get(group_id) {
            Some(body) => body.clone(),
            None => {
                let body = bodies.get_by_group_id(group_id)?;
                resolved.insert(group_id.to_string(), body.clone());
                body
            }
        };
        body_ref.body = body;
    }
    Ok(())
}

/// Drop resolved bodies; references keep only their group ids.
pub fn depopulate(tender: &mut MasterTender) {
    for body_ref in body_refs_mut(tender) {
        body_ref.body = None;
    }
}
