use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use crate::model::error::tag_errors::{
    CreateTagError, DeleteTagError, UpdateTagError, ValidationError,
};
use crate::tags::ids::IdAllocator;
use crate::tags::models::{Param, Tag, TagPayload};
use crate::tags::validation;
use crate::util::lock_or_recover;

/// the authoritative collection of tags, each embedding its params.
///
/// Tags are keyed by id. Ids are allocated while the map is locked, so key order is the same as
/// insertion order. Every mutation (including the id allocation and param reconciliation it needs)
/// runs under that one lock, so readers never see a half-applied write
#[derive(Debug, Default)]
pub struct TagStore {
    tags: Mutex<BTreeMap<u32, Tag>>,
    ids: IdAllocator,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// validates and stores a new tag, returning its id. Every param gets a fresh id,
    /// regardless of any id sent in the payload
    pub fn create(&self, mut payload: TagPayload) -> Result<u32, CreateTagError> {
        if let Err(e) = validation::validate_tag(&payload) {
            log::info!("Rejected new tag {:?}: {e}", payload.tag);
            return Err(CreateTagError::Validation(e));
        }
        let mut tags = lock_or_recover(&self.tags, "tag store");
        let tag_id = self.ids.next_tag_id();
        let params: Vec<Param> = std::mem::take(&mut payload.params)
            .into_iter()
            .map(|param| Param::from_payload(param, self.ids.next_param_id(), tag_id))
            .collect();
        let tag = Tag::from_payload(payload, tag_id, params);
        log::info!(
            "Created tag {tag_id} ({:?}) with {} params",
            tag.tag,
            tag.params.len()
        );
        tags.insert(tag_id, tag);
        Ok(tag_id)
    }

    /// a copy of every tag, in the order they were created
    pub fn list(&self) -> Vec<Tag> {
        let tags = lock_or_recover(&self.tags, "tag store");
        log::debug!("Listing {} tags", tags.len());
        tags.values().cloned().collect()
    }

    /// a copy of the tag with the passed id, or `None` if there is no such tag
    pub fn get_by_id(&self, id: u32) -> Option<Tag> {
        let tags = lock_or_recover(&self.tags, "tag store");
        let tag = tags.get(&id).cloned();
        log::debug!("Get tag {id}, found: {}", tag.is_some());
        tag
    }

    /// replaces the whole tag with the passed id.
    ///
    /// The new param list replaces the old one entirely:
    /// - a param with an `id` keeps it, and must already belong to this tag. Each id may only be listed once
    /// - a param without an `id` (or with id `0`) is treated as new, and gets a freshly allocated one
    /// - a param that was on the tag but is missing from the payload is dropped
    ///
    /// Nothing is allocated or written unless the whole payload is accepted
    pub fn update(&self, id: u32, mut payload: TagPayload) -> Result<(), UpdateTagError> {
        let mut tags = lock_or_recover(&self.tags, "tag store");
        let Some(existing) = tags.get(&id) else {
            log::warn!("Could not update tag with id {id}, because it does not exist!");
            return Err(UpdateTagError::TagNotFound);
        };
        // ids start at 1, so 0 never names a real param
        for param in payload.params.iter_mut() {
            param.id = param.id.filter(|param_id| *param_id != 0);
        }
        let owned_param_ids: HashSet<u32> = existing.params.iter().map(|p| p.id).collect();
        if let Err(e) = validation::validate_tag(&payload)
            .and_then(|()| check_param_ids(id, &owned_param_ids, &payload))
        {
            log::info!("Rejected update for tag {id}: {e}");
            return Err(UpdateTagError::Validation(e));
        }
        let params: Vec<Param> = std::mem::take(&mut payload.params)
            .into_iter()
            .map(|param| {
                let param_id = param.id.unwrap_or_else(|| self.ids.next_param_id());
                Param::from_payload(param, param_id, id)
            })
            .collect();
        let tag = Tag::from_payload(payload, id, params);
        log::info!(
            "Updated tag {id} ({:?}), now has {} params",
            tag.tag,
            tag.params.len()
        );
        tags.insert(id, tag);
        Ok(())
    }

    /// removes the tag with the passed id, along with all of its params
    pub fn delete(&self, id: u32) -> Result<(), DeleteTagError> {
        let mut tags = lock_or_recover(&self.tags, "tag store");
        match tags.remove(&id) {
            Some(tag) => {
                log::info!(
                    "Deleted tag {id}, {} remaining. Dropped {} params",
                    tags.len(),
                    tag.params.len()
                );
                Ok(())
            }
            None => {
                log::warn!("Could not delete tag with id {id}, because it does not exist!");
                Err(DeleteTagError::TagNotFound)
            }
        }
    }
}

/// a param id sent on update must be one the tag currently owns, and may only be kept by one
/// param. Otherwise two params could end up sharing an id
fn check_param_ids(
    tag_id: u32,
    owned_param_ids: &HashSet<u32>,
    payload: &TagPayload,
) -> Result<(), ValidationError> {
    let mut seen_ids: HashSet<u32> = HashSet::new();
    for (index, param) in payload.params.iter().enumerate() {
        let Some(param_id) = param.id else {
            continue;
        };
        if !owned_param_ids.contains(&param_id) {
            return Err(ValidationError::new(
                format!("params[{index}].id"),
                format!("Parameter id {param_id} does not belong to tag {tag_id}"),
            ));
        }
        if !seen_ids.insert(param_id) {
            return Err(ValidationError::new(
                format!("params[{index}].id"),
                format!("Parameter id {param_id} is listed more than once"),
            ));
        }
    }
    Ok(())
}
