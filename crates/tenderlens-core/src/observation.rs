use crate::dates::{iso_date, iso_datetime};
use crate::model::{Price, SelectionMethod, SupplyType};
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

/// One source's snapshot of an entity, prior to fusion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation<T> {
    /// Source (worker) that produced the snapshot, e.g. `eu.ted`.
    pub source_id: String,
    /// Stable per-source object id.
    pub object_id: String,
    /// Group id of the canonical entity this observation belongs to.
    pub group_id: String,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Date>,
    pub fields: T,
}

impl<T> Observation<T> {
    pub fn new(
        source_id: impl Into<String>,
        object_id: impl Into<String>,
        group_id: impl Into<String>,
        publication_date: Option<Date>,
        fields: T,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            object_id: object_id.into(),
            group_id: group_id.into(),
            publication_date,
            fields,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservedBody {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservedTender {
    pub title: Option<String>,
    pub buyer_assigned_id: Option<String>,
    pub country: Option<String>,
    #[serde(with = "iso_datetime::option", skip_serializing_if = "Option::is_none")]
    pub bid_deadline: Option<PrimitiveDateTime>,
    pub supply_type: Option<SupplyType>,
    pub selection_method: Option<SelectionMethod>,
    pub estimated_price: Option<Price>,
    pub final_price: Option<Price>,
}
