//! Shared fixture builders for the tenderlens workspace.
//!
//! Builders return plain model values with only the fields a test cares about filled in;
//! adjust the rest with struct update syntax or direct field writes.

use serde_json::Value;
use tenderlens_core::{
    BodyIdentifier, BodyRef, MasterBid, MasterBody, MasterLot, MasterTender, Observation,
    ObservedBody, ObservedTender, Price, Publication, PublicationFormType,
};
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Parse `YYYY-MM-DD`. Panics on malformed input.
pub fn date(text: &str) -> Date {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|e| panic!("bad test date {text:?}: {e}"))
}

/// Parse `YYYY-MM-DDThh:mm:ss`. Panics on malformed input.
pub fn datetime(text: &str) -> PrimitiveDateTime {
    PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .unwrap_or_else(|e| panic!("bad test datetime {text:?}: {e}"))
}

pub fn publication(form_type: PublicationFormType, published: Option<&str>) -> Publication {
    Publication {
        source_id: None,
        form_type: Some(form_type),
        publication_date: published.map(date),
        is_included: Some(true),
        buyer_assigned_id: None,
    }
}

pub fn contract_notice(published: &str) -> Publication {
    publication(PublicationFormType::ContractNotice, Some(published))
}

pub fn contract_award(published: &str) -> Publication {
    publication(PublicationFormType::ContractAward, Some(published))
}

pub fn body(group_id: &str, name: Option<&str>, country: Option<&str>) -> MasterBody {
    MasterBody {
        group_id: group_id.to_string(),
        name: name.map(str::to_string),
        address: country.map(|c| tenderlens_core::Address {
            country: Some(c.to_string()),
            ..Default::default()
        }),
        ..MasterBody::default()
    }
}

pub fn with_registration_id(mut body: MasterBody, id: &str) -> MasterBody {
    body.body_ids.push(BodyIdentifier {
        id: Some(id.to_string()),
        scope: None,
    });
    body
}

/// Reference with the body already populated.
pub fn populated(body: MasterBody) -> BodyRef {
    BodyRef {
        group_id: Some(body.group_id.clone()),
        body: Some(body),
    }
}

pub fn bid(winning: bool, price: Option<f64>, bidders: Vec<BodyRef>) -> MasterBid {
    MasterBid {
        bid_id: None,
        bidders,
        price: price.map(Price::eur),
        is_winning: Some(winning),
        is_subcontracted: None,
    }
}

pub fn winning_bid(price: Option<f64>, bidders: Vec<BodyRef>) -> MasterBid {
    bid(true, price, bidders)
}

pub fn lot(bids: Vec<MasterBid>) -> MasterLot {
    MasterLot {
        bids,
        ..MasterLot::default()
    }
}

pub fn tender(id: &str, country: Option<&str>) -> MasterTender {
    MasterTender {
        id: id.to_string(),
        group_id: id.to_string(),
        country: country.map(str::to_string),
        ..MasterTender::default()
    }
}

pub fn body_observation(
    source: &str,
    object: &str,
    published: Option<&str>,
    email: Option<&str>,
) -> Observation<ObservedBody> {
    Observation::new(
        source,
        object,
        "body-group",
        published.map(date),
        ObservedBody {
            name: None,
            email: email.map(str::to_string),
        },
    )
}

pub fn tender_observation(
    source: &str,
    object: &str,
    published: Option<&str>,
    fields: ObservedTender,
) -> Observation<ObservedTender> {
    Observation::new(source, object, "tender-group", published.map(date), fields)
}

/// Strip the `indicators` arrays from a serialized tender so structural snapshots stay small.
pub fn without_indicators(mut value: Value) -> Value {
    strip_key(&mut value, "indicators");
    value
}

fn strip_key(value: &mut Value, key: &str) {
    match value {
        Value::Object(map) => {
            map.remove(key);
            for val in map.values_mut() {
                strip_key(val, key);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                strip_key(val, key);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn without_indicators_strips_nested_arrays() {
        let value = json!({
            "id": "t1",
            "indicators": [1],
            "lots": [ { "lot_id": "t1_1", "indicators": [2] } ]
        });
        assert_eq!(
            without_indicators(value),
            json!({ "id": "t1", "lots": [ { "lot_id": "t1_1" } ] })
        );
    }

    #[test]
    fn date_builders_parse_iso_text() {
        assert_eq!(date("2024-03-05").to_string(), "2024-03-05");
        assert_eq!(datetime("2024-03-15T12:00:00").date(), date("2024-03-15"));
    }
}
