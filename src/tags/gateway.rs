use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rocket::tokio;
use tokio_util::sync::CancellationToken;

use crate::config::LatencyConfig;
use crate::model::error::tag_errors::{
    CreateTagError, DeleteTagError, GetTagError, UpdateTagError,
};
use crate::model::response::TagResponse;
use crate::tags::models::{Tag, TagPayload};
use crate::tags::store::TagStore;

/// the only thing callers outside of this module talk to.
///
/// Every operation waits out the configured simulated latency, then runs against the store.
/// "not found" on a write comes back as an unsuccessful [`TagResponse`], while validation failures
/// and cancellation come back as `Err`
pub struct TagGateway {
    store: Arc<TagStore>,
    latency: LatencyConfig,
    shutdown: CancellationToken,
}

impl TagGateway {
    pub fn new(store: Arc<TagStore>, latency: LatencyConfig) -> Self {
        Self {
            store,
            latency,
            shutdown: CancellationToken::new(),
        }
    }

    /// a token that is cancelled along with [`TagGateway::shutdown`]. Hand one of these to each
    /// operation that doesn't have a more specific token of its own
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// cancels every token handed out by [`TagGateway::request_token`]
    pub fn shutdown(&self) {
        log::info!("Shutting down tag gateway");
        self.shutdown.cancel();
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Tag>, GetTagError> {
        self.simulate_latency(cancel)
            .await
            .map_err(|Cancelled| GetTagError::Cancelled)?;
        Ok(self.store.list())
    }

    /// `Ok(None)` means there's no tag with that id, which isn't an error
    pub async fn get_by_id(
        &self,
        id: u32,
        cancel: &CancellationToken,
    ) -> Result<Option<Tag>, GetTagError> {
        self.simulate_latency(cancel)
            .await
            .map_err(|Cancelled| GetTagError::Cancelled)?;
        Ok(self.store.get_by_id(id))
    }

    pub async fn create(
        &self,
        payload: TagPayload,
        cancel: &CancellationToken,
    ) -> Result<TagResponse, CreateTagError> {
        self.simulate_latency(cancel)
            .await
            .map_err(|Cancelled| CreateTagError::Cancelled)?;
        let id = self.store.create(payload)?;
        Ok(TagResponse::success(
            id,
            format!("Tag created successfully with ID: {id}"),
        ))
    }

    /// The only `Err`s are [`UpdateTagError::Validation`] and [`UpdateTagError::Cancelled`];
    /// an unknown id is an unsuccessful response
    pub async fn update(
        &self,
        id: u32,
        payload: TagPayload,
        cancel: &CancellationToken,
    ) -> Result<TagResponse, UpdateTagError> {
        self.simulate_latency(cancel)
            .await
            .map_err(|Cancelled| UpdateTagError::Cancelled)?;
        match self.store.update(id, payload) {
            Ok(()) => Ok(TagResponse::success(id, "Tag updated successfully")),
            Err(UpdateTagError::TagNotFound) => Ok(TagResponse::not_found(id)),
            Err(e) => Err(e),
        }
    }

    /// the only `Err` is [`DeleteTagError::Cancelled`]; an unknown id is an unsuccessful response
    pub async fn delete(
        &self,
        id: u32,
        cancel: &CancellationToken,
    ) -> Result<TagResponse, DeleteTagError> {
        self.simulate_latency(cancel)
            .await
            .map_err(|Cancelled| DeleteTagError::Cancelled)?;
        match self.store.delete(id) {
            Ok(()) => Ok(TagResponse::success(id, "Tag deleted successfully")),
            Err(DeleteTagError::TagNotFound) => Ok(TagResponse::not_found(id)),
            Err(e) => Err(e),
        }
    }

    /// sleeps for a random duration within the configured bounds, or until `cancel` fires.
    /// The token is checked once more afterwards so a cancelled operation never reaches the store
    async fn simulate_latency(&self, cancel: &CancellationToken) -> Result<(), Cancelled> {
        if let Some(delay) = self.pick_delay() {
            tokio::select! {
                _ = cancel.cancelled() => {},
                _ = tokio::time::sleep(delay) => {},
            }
        }
        if cancel.is_cancelled() {
            log::warn!("Tag operation was cancelled before it reached the store");
            return Err(Cancelled);
        }
        Ok(())
    }

    fn pick_delay(&self) -> Option<Duration> {
        let (min, max) = self.latency.bounds()?;
        Some(rand::thread_rng().gen_range(min..=max))
    }
}

/// internal marker for an operation that was cancelled while waiting
struct Cancelled;
