use std::sync::atomic::{AtomicU32, Ordering};

/// hands out tag and parameter ids from two independent counters.
///
/// Both counters start at 1 and only ever go up. An id is consumed the moment it is handed out,
/// so ids are never reused, even after the tag that held them is deleted
#[derive(Debug)]
pub struct IdAllocator {
    next_tag_id: AtomicU32,
    next_param_id: AtomicU32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next_tag_id: AtomicU32::new(1),
            next_param_id: AtomicU32::new(1),
        }
    }

    pub fn next_tag_id(&self) -> u32 {
        self.next_tag_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn next_param_id(&self) -> u32 {
        self.next_param_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
