use rocket::serde::json::Json;
use rocket::State;

use crate::model::error::tag_errors::{
    CreateTagError, DeleteTagError, GetTagError, UpdateTagError,
};
use crate::model::response::tag_responses::{
    CreateTagResponse, DeleteTagResponse, GetTagResponse, GetTagsResponse, UpdateTagResponse,
};
use crate::model::response::{BasicMessage, TagResponse};
use crate::tags::gateway::TagGateway;
use crate::tags::TagPayload;

static CANCELLED_MESSAGE: &str = "The server is shutting down. Try again later.";

#[get("/")]
pub async fn list_tags(gateway: &State<TagGateway>) -> GetTagsResponse {
    let cancel = gateway.request_token();
    match gateway.list(&cancel).await {
        Ok(tags) => GetTagsResponse::Success(Json::from(tags)),
        Err(GetTagError::Cancelled) => {
            GetTagsResponse::Cancelled(BasicMessage::new(CANCELLED_MESSAGE))
        }
    }
}

#[get("/<id>")]
pub async fn get_tag(id: u32, gateway: &State<TagGateway>) -> GetTagResponse {
    let cancel = gateway.request_token();
    match gateway.get_by_id(id, &cancel).await {
        Ok(Some(tag)) => GetTagResponse::Success(Json::from(tag)),
        Ok(None) => GetTagResponse::TagNotFound(BasicMessage::new(
            "The tag with the passed id could not be found.",
        )),
        Err(GetTagError::Cancelled) => {
            GetTagResponse::Cancelled(BasicMessage::new(CANCELLED_MESSAGE))
        }
    }
}

#[post("/", data = "<tag>")]
pub async fn create_tag(tag: Json<TagPayload>, gateway: &State<TagGateway>) -> CreateTagResponse {
    let cancel = gateway.request_token();
    match gateway.create(tag.into_inner(), &cancel).await {
        Ok(response) => CreateTagResponse::Success(Json::from(response)),
        Err(CreateTagError::Validation(e)) => {
            CreateTagResponse::ValidationFailed(Json::from(BasicMessage::from(e.to_string())))
        }
        Err(CreateTagError::Cancelled) => {
            CreateTagResponse::Cancelled(BasicMessage::new(CANCELLED_MESSAGE))
        }
    }
}

#[put("/<id>", data = "<tag>")]
pub async fn update_tag(
    id: u32,
    tag: Json<TagPayload>,
    gateway: &State<TagGateway>,
) -> UpdateTagResponse {
    let cancel = gateway.request_token();
    match gateway.update(id, tag.into_inner(), &cancel).await {
        Ok(response) if response.success => UpdateTagResponse::Success(Json::from(response)),
        Ok(response) => UpdateTagResponse::TagNotFound(Json::from(response)),
        Err(UpdateTagError::Validation(e)) => {
            UpdateTagResponse::ValidationFailed(Json::from(BasicMessage::from(e.to_string())))
        }
        // already folded into an unsuccessful response by the gateway
        Err(UpdateTagError::TagNotFound) => {
            UpdateTagResponse::TagNotFound(Json::from(TagResponse::not_found(id)))
        }
        Err(UpdateTagError::Cancelled) => {
            UpdateTagResponse::Cancelled(BasicMessage::new(CANCELLED_MESSAGE))
        }
    }
}

#[delete("/<id>")]
pub async fn delete_tag(id: u32, gateway: &State<TagGateway>) -> DeleteTagResponse {
    let cancel = gateway.request_token();
    match gateway.delete(id, &cancel).await {
        Ok(response) if response.success => DeleteTagResponse::Success(Json::from(response)),
        Ok(response) => DeleteTagResponse::TagNotFound(Json::from(response)),
        Err(DeleteTagError::TagNotFound) => {
            DeleteTagResponse::TagNotFound(Json::from(TagResponse::not_found(id)))
        }
        Err(DeleteTagError::Cancelled) => {
            DeleteTagResponse::Cancelled(BasicMessage::new(CANCELLED_MESSAGE))
        }
    }
}
