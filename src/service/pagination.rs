//! Infinite-scroll accumulation: successive pages are merged into one list
//! and an item already shown is never shown again.

use crate::models::{LibraryPhoto, LibraryVideo, MarsPhoto};
use std::collections::HashSet;
use std::hash::Hash;

/// Something with a stable identity across pages.
pub trait Identified {
    type Id: Eq + Hash;

    fn identity(&self) -> Self::Id;
}

impl Identified for MarsPhoto {
    type Id = u64;

    fn identity(&self) -> u64 {
        self.id
    }
}

impl Identified for LibraryPhoto {
    type Id = String;

    fn identity(&self) -> String {
        self.nasa_id.clone()
    }
}

impl Identified for LibraryVideo {
    type Id = String;

    fn identity(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug)]
pub struct PageAccumulator<T: Identified> {
    per_page: u32,
    pages_loaded: u32,
    last_page_full: bool,
    items: Vec<T>,
    seen: HashSet<T::Id>,
}

impl<T: Identified> PageAccumulator<T> {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
            pages_loaded: 0,
            last_page_full: true,
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Appends a page, skipping ids already held. Returns how many items were new.
    ///
    /// A page shorter than `per_page` marks the end of the results.
    pub fn push_page(&mut self, page: Vec<T>) -> usize {
        self.pages_loaded += 1;
        self.last_page_full = page.len() as u32 >= self.per_page;

        let before = self.items.len();
        for item in page {
            if self.seen.insert(item.identity()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    pub fn has_next_page(&self) -> bool {
        self.last_page_full
    }

    /// Page number to request next, 1-based, or `None` once the end is reached.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then_some(self.pages_loaded + 1)
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
