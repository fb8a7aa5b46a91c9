//! # Pagination State
//!
//! Mirrors the pagination metadata of the last successful list response.
//! The only local write is the optimistic page jump in [`PaginationStore::go_to_page`].

use crate::models::PaginatedResponse;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationState {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// Partial update of [`PaginationState`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_items: Option<u64>,
    pub total_pages: Option<u32>,
    pub has_next: Option<bool>,
    pub has_previous: Option<bool>,
}

impl<T> From<&PaginatedResponse<T>> for PaginationPatch {
    fn from(response: &PaginatedResponse<T>) -> Self {
        Self {
            current_page: Some(response.page),
            page_size: Some(response.size),
            total_items: Some(response.total),
            total_pages: Some(response.pages),
            has_next: Some(response.has_next),
            has_previous: Some(response.has_previous),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationStore {
    state: PaginationState,
    default_page_size: u32,
}

impl PaginationStore {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: PaginationState::with_page_size(page_size),
            default_page_size: page_size.max(1),
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.state.page_size
    }

    /// Absorb server metadata. Zero pages or sizes from a misbehaving
    /// server are ignored so the state keeps its invariants.
    pub fn update(&mut self, patch: PaginationPatch) {
        if let Some(page) = patch.current_page.filter(|p| *p >= 1) {
            self.state.current_page = page;
        }
        if let Some(size) = patch.page_size.filter(|s| *s >= 1) {
            self.state.page_size = size;
        }
        if let Some(total) = patch.total_items {
            self.state.total_items = total;
        }
        if let Some(pages) = patch.total_pages {
            self.state.total_pages = pages;
        }
        if let Some(has_next) = patch.has_next {
            self.state.has_next = has_next;
        }
        if let Some(has_previous) = patch.has_previous {
            self.state.has_previous = has_previous;
        }
    }

    /// Optimistic jump for immediate feedback; the next load response is
    /// authoritative. Page 0 is treated as page 1.
    pub fn go_to_page(&mut self, page: u32) {
        self.state.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.state = PaginationState::with_page_size(self.default_page_size);
    }
}

impl Default for PaginationStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
