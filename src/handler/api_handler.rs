use rocket::http::Status;
use rocket::serde::{json::Json, Serialize};
use rocket::Request;

use crate::model::response::BasicMessage;

#[derive(Serialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct HealthCheck {
    status: String,
    message: String,
}

impl HealthCheck {
    fn healthy() -> HealthCheck {
        HealthCheck {
            status: "healthy".to_string(),
            message: "API is running".to_string(),
        }
    }
}

#[get("/health")]
pub fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck::healthy())
}

/// answers browser preflight requests for any path. The cors fairing adds the actual headers
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}

/// a body that isn't valid json at all
#[catch(400)]
pub fn bad_request(req: &Request) -> (Status, Json<BasicMessage>) {
    malformed_request(req)
}

/// valid json that doesn't fit the expected shape, e.g. a tag without a `tag` field.
/// This is reported as 400 so it can't be confused with a 422 validation failure
#[catch(422)]
pub fn unprocessable_entity(req: &Request) -> (Status, Json<BasicMessage>) {
    malformed_request(req)
}

fn malformed_request(req: &Request) -> (Status, Json<BasicMessage>) {
    log::info!("Rejected malformed request to {}", req.uri());
    (
        Status::BadRequest,
        BasicMessage::new("Malformed request. The body could not be read as a tag payload."),
    )
}
