use std::sync::{Mutex, PoisonError};
use tenderlens_core::{
    BodyStore, DedupPair, EligibilityPolicy, LookupError, MasterBody, MasterTender, SecondaryKey,
    TenderStore,
};

/// Vector-backed stores; `offline` makes every lookup time out.
#[derive(Default)]
pub struct FakeStores {
    tenders: Mutex<Vec<MasterTender>>,
    bodies: Vec<MasterBody>,
    offline: bool,
}

impl FakeStores {
    pub fn with_tender(self, tender: MasterTender) -> Self {
        self.tenders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tender);
        self
    }

    pub fn with_body(mut self, body: MasterBody) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check(&self, store: &'static str) -> Result<(), LookupError> {
        if self.offline {
            return Err(LookupError::Timeout {
                store,
                detail: "offline".to_string(),
            });
        }
        Ok(())
    }
}

impl TenderStore for FakeStores {
    fn get_by_id(&self, id: &str) -> Result<Option<MasterTender>, LookupError> {
        self.check("tenders")?;
        let tenders = self.tenders.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(tenders.iter().find(|t| t.id == id).cloned())
    }

    fn get_by_secondary_key(&self, key: &SecondaryKey) -> Result<Vec<MasterTender>, LookupError> {
        self.check("tenders")?;
        let tenders = self.tenders.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(tenders
            .iter()
            .filter(|t| match key {
                SecondaryKey::BuyerAssignedId(id) => t.buyer_assigned_id.as_ref() == Some(id),
                SecondaryKey::PublicationSourceId(id) => t
                    .publications
                    .iter()
                    .any(|p| p.source_id.as_ref() == Some(id)),
            })
            .cloned()
            .collect())
    }

    fn save(&self, tender: &MasterTender) -> Result<(), LookupError> {
        self.check("tenders")?;
        let mut tenders = self.tenders.lock().unwrap_or_else(PoisonError::into_inner);
        tenders.retain(|t| t.id != tender.id);
        tenders.push(tender.clone());
        Ok(())
    }
}

impl BodyStore for FakeStores {
    fn get_by_group_id(&self, group_id: &str) -> Result<Option<MasterBody>, LookupError> {
        self.check("bodies")?;
        let mut found = self.bodies.iter().filter(|b| b.group_id == group_id);
        let first = found.next().cloned();
        if found.next().is_some() {
            return Err(LookupError::Integrity {
                store: "bodies",
                detail: format!("more than one body for group {group_id}"),
            });
        }
        Ok(first)
    }

    fn save(&self, _body: &MasterBody) -> Result<(), LookupError> {
        self.check("bodies")
    }
}

fn default_pair(country: &str) -> DedupPair {
    EligibilityPolicy::default_dedup_pairs()
        .into_iter()
        .find(|p| p.country == country)
        .expect("default pair exists")
}

pub fn es_pair() -> DedupPair {
    default_pair("ES")
}

pub fn ro_pair() -> DedupPair {
    default_pair("RO")
}
