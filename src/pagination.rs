//! Server-side pagination primitives shared by every list endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for one page of a server-paginated resource.
///
/// Both fields are at least 1; the constructors clamp anything lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Create a page request, clamping both values to a minimum of 1
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
        }
    }

    /// The first page with the given size
    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// One-based page number
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Records per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Same size, different page
    pub fn with_page(self, page_number: u32) -> Self {
        Self::new(page_number, self.page_size)
    }

    /// The following page
    pub fn next(self) -> Self {
        self.with_page(self.page_number + 1)
    }

    /// The preceding page; stays on page 1 when already there
    pub fn previous(self) -> Self {
        self.with_page(self.page_number.saturating_sub(1))
    }

    /// Query parameters in the backend's naming
    pub(crate) fn query(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("pageNumber".to_string(), self.page_number.to_string());
        params.insert("pageSize".to_string(), self.page_size.to_string());
        params
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of results as returned by the backend.
///
/// The backend also sends the derived fields (`total_pages` and the two
/// booleans), but they are not trusted: [`PageEnvelope::normalize`] recomputes
/// them from `total_records`, `page_size` and `page_number`, so an envelope
/// with the fields missing or inconsistent still renders a correct pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Rows of the current page, in server order
    pub items: Vec<T>,
    /// One-based page number this envelope answers
    pub page_number: u32,
    /// Requested page size
    pub page_size: u32,
    /// Total records across all pages
    pub total_records: u64,
    /// `ceil(total_records / page_size)`
    #[serde(default)]
    pub total_pages: u32,
    /// `page_number > 1`
    #[serde(default)]
    pub has_previous_page: bool,
    /// `page_number < total_pages`
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> PageEnvelope<T> {
    /// Recompute the derived pagination fields in place
    pub fn normalize(&mut self) {
        self.total_pages = if self.page_size == 0 {
            0
        } else {
            let size = u64::from(self.page_size);
            ((self.total_records + size - 1) / size) as u32
        };
        self.has_previous_page = self.page_number > 1;
        self.has_next_page = self.page_number < self.total_pages;
    }

    /// Consuming form of [`normalize`](Self::normalize)
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Number of rows on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carries no rows
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
