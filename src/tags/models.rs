use std::fmt;

use rocket::serde::{Deserialize, Serialize};
use serde::de::{self, Deserializer, SeqAccess, Visitor};

/// how a parameter is rendered when a user fills it in
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Select,
}

/// the type of value a parameter carries when it is sent to a downstream api
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Number,
}

/// a stored parameter. Always owned by exactly one [`Tag`], and `tag_id` always matches that tag's id
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Param {
    pub id: u32,
    pub tag_id: u32,
    pub db_column: String,
    pub display_name: String,
    pub option_value: Vec<String>,
    pub field_type: FieldType,
    pub value_type: ValueType,
    pub api_param: bool,
}

/// a stored tag, as returned from the gateway
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Tag {
    pub id: u32,
    pub tag: String,
    pub query: String,
    pub comment: String,
    pub dynamic_param_source: String,
    pub api_active: bool,
    pub api_endpoint: String,
    pub api_name: String,
    pub api_at_get_data: bool,
    pub api_message: String,
    pub query_active: bool,
    pub tag_active: bool,
    pub params: Vec<Param>,
}

/// a parameter as it comes in from a client.
///
/// `id` is only honored on update, where it marks an existing parameter being edited.
/// Any `tag_id` the client sends is dropped during deserialization
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ParamPayload {
    #[serde(default)]
    pub id: Option<u32>,
    pub db_column: String,
    pub display_name: String,
    #[serde(default, deserialize_with = "deserialize_option_values")]
    pub option_value: Vec<String>,
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub api_param: bool,
}

/// a full tag as it comes in from a client, for both create and update (whole-record replace)
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagPayload {
    pub tag: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub dynamic_param_source: String,
    #[serde(default)]
    pub api_active: bool,
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub api_at_get_data: bool,
    #[serde(default)]
    pub api_message: String,
    #[serde(default = "default_true")]
    pub query_active: bool,
    #[serde(default = "default_true")]
    pub tag_active: bool,
    #[serde(default)]
    pub params: Vec<ParamPayload>,
}

fn default_true() -> bool {
    true
}

/// splits the comma-separated form text for `option_value` into its values.
/// Each value is trimmed, empty values are dropped, and duplicates are kept
pub fn split_option_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect()
}

/// the inverse of [`split_option_values`], used to fill the form text back in
pub fn join_option_values(values: &[String]) -> String {
    values.join(", ")
}

/// accepts `option_value` as either the raw form text (`"a, b"`) or a list of strings
fn deserialize_option_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionValuesVisitor;

    impl<'de> Visitor<'de> for OptionValuesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a comma-separated string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(split_option_values(value))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<String>()? {
                let value = value.trim();
                if !value.is_empty() {
                    values.push(value.to_string());
                }
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(OptionValuesVisitor)
}

// ----------------------------------

impl Default for TagPayload {
    fn default() -> Self {
        Self {
            tag: String::new(),
            query: String::new(),
            comment: String::new(),
            dynamic_param_source: String::new(),
            api_active: false,
            api_endpoint: String::new(),
            api_name: String::new(),
            api_at_get_data: false,
            api_message: String::new(),
            query_active: true,
            tag_active: true,
            params: Vec::new(),
        }
    }
}

impl ParamPayload {
    /// the form text for this parameter's `option_value`
    pub fn option_value_text(&self) -> String {
        join_option_values(&self.option_value)
    }
}

impl Param {
    /// builds a stored parameter out of a payload, stamping in the ids chosen by the store
    pub fn from_payload(payload: ParamPayload, id: u32, tag_id: u32) -> Self {
        Self {
            id,
            tag_id,
            db_column: payload.db_column,
            display_name: payload.display_name,
            option_value: payload.option_value,
            field_type: payload.field_type,
            value_type: payload.value_type,
            api_param: payload.api_param,
        }
    }
}

impl Tag {
    /// builds a stored tag out of a payload. `params` must already have their ids assigned
    pub fn from_payload(payload: TagPayload, id: u32, params: Vec<Param>) -> Self {
        Self {
            id,
            tag: payload.tag,
            query: payload.query,
            comment: payload.comment,
            dynamic_param_source: payload.dynamic_param_source,
            api_active: payload.api_active,
            api_endpoint: payload.api_endpoint,
            api_name: payload.api_name,
            api_at_get_data: payload.api_at_get_data,
            api_message: payload.api_message,
            query_active: payload.query_active,
            tag_active: payload.tag_active,
            params,
        }
    }
}

/// lets a client load a stored param straight back into an edit form, keeping its id
impl From<&Param> for ParamPayload {
    fn from(value: &Param) -> Self {
        Self {
            id: Some(value.id),
            db_column: value.db_column.clone(),
            display_name: value.display_name.clone(),
            option_value: value.option_value.clone(),
            field_type: value.field_type,
            value_type: value.value_type,
            api_param: value.api_param,
        }
    }
}

impl From<&Tag> for TagPayload {
    fn from(value: &Tag) -> Self {
        Self {
            tag: value.tag.clone(),
            query: value.query.clone(),
            comment: value.comment.clone(),
            dynamic_param_source: value.dynamic_param_source.clone(),
            api_active: value.api_active,
            api_endpoint: value.api_endpoint.clone(),
            api_name: value.api_name.clone(),
            api_at_get_data: value.api_at_get_data,
            api_message: value.api_message.clone(),
            query_active: value.query_active,
            tag_active: value.tag_active,
            params: value.params.iter().map(ParamPayload::from).collect(),
        }
    }
}
