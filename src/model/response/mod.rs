use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

pub mod tag_responses;

/// represents a basic json message
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

/// the uniform `{success, id, message}` response for every write operation
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagResponse {
    pub success: bool,
    /// the id of the tag the operation was about, even when `success` is false
    pub id: u32,
    pub message: String,
}

// ----------------------------------

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

impl From<&str> for BasicMessage {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<String> for BasicMessage {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}

impl TagResponse {
    pub fn success(id: u32, message: impl Into<String>) -> Self {
        Self {
            success: true,
            id,
            message: message.into(),
        }
    }

    pub fn not_found(id: u32) -> Self {
        Self {
            success: false,
            id,
            message: format!("Tag with ID {id} not found"),
        }
    }
}
