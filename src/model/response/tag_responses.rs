use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, TagResponse};
use crate::tags::Tag;

#[derive(Responder)]
pub enum GetTagsResponse {
    #[response(status = 200)]
    Success(Json<Vec<Tag>>),
    #[response(status = 503, content_type = "json")]
    Cancelled(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum GetTagResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<Tag>),
    #[response(status = 503, content_type = "json")]
    Cancelled(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum CreateTagResponse {
    #[response(status = 422, content_type = "json")]
    ValidationFailed(Json<BasicMessage>),
    #[response(status = 503, content_type = "json")]
    Cancelled(Json<BasicMessage>),
    #[response(status = 201, content_type = "json")]
    Success(Json<TagResponse>),
}

#[derive(Responder)]
pub enum UpdateTagResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<TagResponse>),
    #[response(status = 422, content_type = "json")]
    ValidationFailed(Json<BasicMessage>),
    #[response(status = 503, content_type = "json")]
    Cancelled(Json<BasicMessage>),
    #[response(status = 200, content_type = "json")]
    Success(Json<TagResponse>),
}

#[derive(Responder)]
pub enum DeleteTagResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<TagResponse>),
    #[response(status = 503, content_type = "json")]
    Cancelled(Json<BasicMessage>),
    #[response(status = 200, content_type = "json")]
    Success(Json<TagResponse>),
}
