use std::sync::Arc;

use rocket::local::blocking::Client;

use crate::build_rocket;
use crate::config::{CorsConfig, LatencyConfig};
use crate::tags::gateway::TagGateway;
use crate::tags::store::TagStore;
use crate::tags::{FieldType, ParamPayload, TagPayload, ValueType};

/// a valid tag payload with no params
#[cfg(test)]
pub fn tag_payload(name: &str) -> TagPayload {
    TagPayload {
        tag: name.to_string(),
        query: "SELECT * FROM users WHERE id = :id".to_string(),
        comment: "test tag".to_string(),
        ..TagPayload::default()
    }
}

/// a valid, new param payload (no id)
#[cfg(test)]
pub fn param_payload(db_column: &str) -> ParamPayload {
    ParamPayload {
        id: None,
        db_column: db_column.to_string(),
        display_name: format!("{db_column} display"),
        option_value: vec![],
        field_type: FieldType::Text,
        value_type: ValueType::String,
        api_param: false,
    }
}

/// a valid tag payload with a new param for each of the passed columns
#[cfg(test)]
pub fn tag_payload_with_params(name: &str, columns: &[&str]) -> TagPayload {
    TagPayload {
        params: columns.iter().map(|column| param_payload(column)).collect(),
        ..tag_payload(name)
    }
}

#[cfg(test)]
pub fn gateway() -> TagGateway {
    TagGateway::new(Arc::new(TagStore::new()), LatencyConfig::disabled())
}

/// a rocket client backed by a fresh, empty store with latency turned off
#[cfg(test)]
pub fn client() -> Client {
    Client::tracked(build_rocket(gateway(), CorsConfig::default())).unwrap()
}
