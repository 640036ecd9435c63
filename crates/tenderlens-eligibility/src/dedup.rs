//! Cross-generation duplicate detection.
//!
//! Some national sources were replaced by a newer system that republished part of the older
//! records. An old-system tender also held from the new system is suppressed.

use crate::similarity::folded_similarity;
use tenderlens_core::{
    BodyStore, DedupPair, DedupStrategy, LookupError, MasterTender, PublicationFormType,
    SecondaryKey, TenderStore,
};
use tracing::debug;

/// Name of the body referenced by the first buyer that carries a group id; `""` when unknown.
pub fn first_buyer_name(
    tender: &MasterTender,
    bodies: &dyn BodyStore,
) -> Result<String, LookupError> {
    let Some(group_id) = tender.buyers.iter().find_map(|b| b.group_id.as_deref()) else {
        return Ok(String::new());
    };
    let body = bodies.get_by_group_id(group_id)?;
    Ok(body.and_then(|b| b.name).unwrap_or_default())
}

fn new_generation(candidates: Vec<MasterTender>, pair: &DedupPair) -> Vec<MasterTender> {
    candidates
        .into_iter()
        .filter(|t| t.created_by.as_deref() == Some(pair.new_source.as_str()))
        .collect()
}

/// True when `tender` (from `pair.old_source`) has a counterpart from `pair.new_source`.
pub(crate) fn has_newer_generation(
    pair: &DedupPair,
    tender: &MasterTender,
    tenders: &dyn TenderStore,
    bodies: &dyn BodyStore,
) -> Result<bool, LookupError> {
    match pair.strategy {
        DedupStrategy::BuyerAssignedIdAndSimilarity => {
            matched_by_id_and_similarity(pair, tender, tenders, bodies)
        }
        DedupStrategy::PublicationSourceId => matched_by_publication(pair, tender, tenders),
    }
}

fn matched_by_id_and_similarity(
    pair: &DedupPair,
    tender: &MasterTender,
    tenders: &dyn TenderStore,
    bodies: &dyn BodyStore,
) -> Result<bool, LookupError> {
    let (Some(buyer_assigned_id), Some(title)) = (&tender.buyer_assigned_id, &tender.title) else {
        return Ok(false);
    };
    if tender.buyers.is_empty() {
        return Ok(false);
    }

    let key = SecondaryKey::BuyerAssignedId(buyer_assigned_id.clone());
    let candidates = new_generation(tenders.get_by_secondary_key(&key)?, pair);
    if candidates.is_empty() {
        return Ok(false);
    }

    let buyer_name = first_buyer_name(tender, bodies)?;
    for candidate in &candidates {
        let title_similarity =
            folded_similarity(title, candidate.title.as_deref().unwrap_or_default());
        if title_similarity < pair.similarity_threshold {
            continue;
        }
        let buyer_similarity = folded_similarity(&buyer_name, &first_buyer_name(candidate, bodies)?);
        debug!(
            tender_id = %tender.id,
            candidate_id = %candidate.id,
            title_similarity,
            buyer_similarity,
            "comparing with newer generation"
        );
        if buyer_similarity >= pair.similarity_threshold {
            return Ok(true);
        }
    }
    Ok(false)
}

fn matched_by_publication(
    pair: &DedupPair,
    tender: &MasterTender,
    tenders: &dyn TenderStore,
) -> Result<bool, LookupError> {
    if !tender.has_publication_of_type(PublicationFormType::ContractAward) {
        return Ok(false);
    }
    let Some(buyer_assigned_id) = tender
        .publications
        .iter()
        .find_map(|p| p.buyer_assigned_id.as_deref())
    else {
        return Ok(false);
    };

    let key = SecondaryKey::PublicationSourceId(buyer_assigned_id.to_string());
    let candidates = new_generation(tenders.get_by_secondary_key(&key)?, pair);
    Ok(!candidates.is_empty())
}
