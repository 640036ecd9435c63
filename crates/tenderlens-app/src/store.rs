//! In-memory adapters for every store port, loadable from a JSON dataset.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};
use tenderlens_core::{
    Blacklist, BodyStore, LookupError, MasterBody, MasterTender, Observation, ObservationSource,
    ObservedBody, ObservedTender, SecondaryKey, TenderStore,
};

const BODIES: &str = "bodies";

/// Everything a batch run reads and writes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub tenders: Vec<MasterTender>,
    pub bodies: Vec<MasterBody>,
    pub tender_observations: Vec<Observation<ObservedTender>>,
    pub body_observations: Vec<Observation<ObservedBody>>,
    /// Emails never to be fused into a body.
    pub blacklist: Vec<String>,
}

pub fn load_dataset(text: &str) -> anyhow::Result<Dataset> {
    serde_json::from_str(text).context("parse dataset JSON")
}

pub fn dump_dataset(dataset: &Dataset) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(dataset).context("serialize dataset")?;
    out.push('\n');
    Ok(out)
}

/// Thread-safe stores backed by a [`Dataset`].
///
/// Tenders are keyed by id (replace-on-save). Bodies are kept as a list so that duplicate group
/// ids in the input surface as integrity errors on lookup instead of being silently merged.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tenders: RwLock<BTreeMap<String, MasterTender>>,
    bodies: RwLock<Vec<MasterBody>>,
    tender_observations: Vec<Observation<ObservedTender>>,
    body_observations: Vec<Observation<ObservedBody>>,
    blacklist: BTreeSet<String>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl InMemoryStore {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            tenders: RwLock::new(
                dataset
                    .tenders
                    .into_iter()
                    .map(|t| (t.id.clone(), t))
                    .collect(),
            ),
            bodies: RwLock::new(dataset.bodies),
            tender_observations: dataset.tender_observations,
            body_observations: dataset.body_observations,
            blacklist: dataset.blacklist.iter().map(|e| normalize_email(e)).collect(),
        }
    }

    /// Snapshot of the current state; tenders in id order.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            tenders: self
                .tenders
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .values()
                .cloned()
                .collect(),
            bodies: self
                .bodies
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            tender_observations: self.tender_observations.clone(),
            body_observations: self.body_observations.clone(),
            blacklist: self.blacklist.iter().cloned().collect(),
        }
    }

    pub fn tender_ids(&self) -> Vec<String> {
        self.tenders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Distinct body group ids, in first-seen order.
    pub fn body_group_ids(&self) -> Vec<String> {
        let bodies = self.bodies.read().unwrap_or_else(PoisonError::into_inner);
        let mut seen = BTreeSet::new();
        bodies
            .iter()
            .filter(|b| seen.insert(b.group_id.clone()))
            .map(|b| b.group_id.clone())
            .collect()
    }
}

impl TenderStore for InMemoryStore {
    fn get_by_id(&self, id: &str) -> Result<Option<MasterTender>, LookupError> {
        let tenders = self.tenders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tenders.get(id).cloned())
    }

    fn get_by_secondary_key(&self, key: &SecondaryKey) -> Result<Vec<MasterTender>, LookupError> {
        let tenders = self.tenders.read().unwrap_or_else(PoisonError::into_inner);
        let matches = |t: &MasterTender| match key {
            SecondaryKey::BuyerAssignedId(id) => t.buyer_assigned_id.as_ref() == Some(id),
            SecondaryKey::PublicationSourceId(id) => t
                .publications
                .iter()
                .any(|p| p.source_id.as_ref() == Some(id)),
        };
        Ok(tenders.values().filter(|t| matches(t)).cloned().collect())
    }

    fn save(&self, tender: &MasterTender) -> Result<(), LookupError> {
        let mut tenders = self.tenders.write().unwrap_or_else(PoisonError::into_inner);
        tenders.insert(tender.id.clone(), tender.clone());
        Ok(())
    }
}

impl BodyStore for InMemoryStore {
    fn get_by_group_id(&self, group_id: &str) -> Result<Option<MasterBody>, LookupError> {
        let bodies = self.bodies.read().unwrap_or_else(PoisonError::into_inner);
        let mut found = bodies.iter().filter(|b| b.group_id == group_id);
        let first = found.next().cloned();
        let extra = found.count();
        if extra > 0 {
            return Err(LookupError::Integrity {
                store: BODIES,
                detail: format!("{} bodies share group id {group_id}", extra + 1),
            });
        }
        Ok(first)
    }

    fn save(&self, body: &MasterBody) -> Result<(), LookupError> {
        let mut bodies = self.bodies.write().unwrap_or_else(PoisonError::into_inner);
        match bodies.iter().position(|b| b.group_id == body.group_id) {
            Some(index) => {
                if bodies[index + 1..].iter().any(|b| b.group_id == body.group_id) {
                    return Err(LookupError::Integrity {
                        store: BODIES,
                        detail: format!("refusing to save over duplicated group id {}", body.group_id),
                    });
                }
                bodies[index] = body.clone();
            }
            None => bodies.push(body.clone()),
        }
        Ok(())
    }
}

impl Blacklist for InMemoryStore {
    fn is_blacklisted(&self, email: &str) -> Result<bool, LookupError> {
        Ok(self.blacklist.contains(&normalize_email(email)))
    }
}

impl ObservationSource for InMemoryStore {
    fn tender_observations(
        &self,
        group_id: &str,
    ) -> Result<Vec<Observation<ObservedTender>>, LookupError> {
        Ok(self
            .tender_observations
            .iter()
            .filter(|o| o.group_id == group_id)
            .cloned()
            .collect())
    }

    fn body_observations(
        &self,
        group_id: &str,
    ) -> Result<Vec<Observation<ObservedBody>>, LookupError> {
        Ok(self
            .body_observations
            .iter()
            .filter(|o| o.group_id == group_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderlens_test_util::{body, tender};

    #[test]
    fn dataset_sections_default_to_empty() {
        let dataset = load_dataset(r#"{ "tenders": [ { "id": "t1" } ] }"#).expect("load");
        assert_eq!(dataset.tenders.len(), 1);
        assert!(dataset.bodies.is_empty());
        assert!(dataset.blacklist.is_empty());
    }

    #[test]
    fn malformed_dataset_is_reported() {
        let err = load_dataset("{ \"tenders\": 3 }").expect_err("bad shape");
        assert!(format!("{err:#}").contains("parse dataset JSON"));
    }

    #[test]
    fn secondary_keys() {
        let mut a = tender("a", Some("ES"));
        a.buyer_assigned_id = Some("EXP-1".to_string());
        let mut b = tender("b", Some("RO"));
        let mut publication = tenderlens_test_util::contract_notice("2020-01-01");
        publication.source_id = Some("CN7".to_string());
        b.publications = vec![publication];
        let store = InMemoryStore::from_dataset(Dataset {
            tenders: vec![a, b],
            ..Dataset::default()
        });

        let by_id = store
            .get_by_secondary_key(&SecondaryKey::BuyerAssignedId("EXP-1".to_string()))
            .expect("lookup");
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "a");

        let by_publication = store
            .get_by_secondary_key(&SecondaryKey::PublicationSourceId("CN7".to_string()))
            .expect("lookup");
        assert_eq!(by_publication[0].id, "b");
    }

    #[test]
    fn duplicate_body_group_is_an_integrity_error() {
        let store = InMemoryStore::from_dataset(Dataset {
            bodies: vec![body("g1", Some("A"), None), body("g1", Some("B"), None)],
            ..Dataset::default()
        });
        let err = store.get_by_group_id("g1").expect_err("integrity");
        assert!(!err.is_recoverable());
        assert_eq!(store.body_group_ids(), vec!["g1".to_string()]);
    }

    #[test]
    fn blacklist_ignores_case_and_whitespace() {
        let store = InMemoryStore::from_dataset(Dataset {
            blacklist: vec!["Info@Portal.example".to_string()],
            ..Dataset::default()
        });
        assert!(store.is_blacklisted(" info@portal.example").expect("lookup"));
        assert!(!store.is_blacklisted("buyer@city.example").expect("lookup"));
    }

    #[test]
    fn save_replaces_and_snapshot_round_trips() {
        let store = InMemoryStore::from_dataset(Dataset {
            tenders: vec![tender("t1", None)],
            ..Dataset::default()
        });
        let mut updated = tender("t1", Some("CZ"));
        updated.title = Some("Oprava mostu".to_string());
        TenderStore::save(&store, &updated).expect("save");
        BodyStore::save(&store, &body("g1", Some("Obec"), Some("CZ"))).expect("save");

        let dataset = store.to_dataset();
        assert_eq!(dataset.tenders, vec![updated]);
        assert_eq!(dataset.bodies.len(), 1);

        let text = dump_dataset(&dataset).expect("dump");
        assert_eq!(load_dataset(&text).expect("reload"), dataset);
    }
}
