//! API response types
//!
//! The two pagination envelope shapes produced by Laravel-style list
//! endpoints, their normalized form, and the page-window helper used by
//! pagination controls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pagination metadata retained from a page response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-based)
    pub current_page: u32,
    /// Last available page number
    pub last_page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items across all pages
    pub total: u64,
    /// 1-based index of the first item on this page (absent when the page is empty)
    #[serde(default)]
    pub from: Option<u64>,
    /// 1-based index of the last item on this page (absent when the page is empty)
    #[serde(default)]
    pub to: Option<u64>,
}

impl Pagination {
    /// Whether a page precedes the current one.
    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page follows the current one.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Page numbers to display around the current page.
    pub fn page_numbers(&self, max_visible: u32) -> Vec<u32> {
        page_numbers(self.current_page, self.last_page, max_visible)
    }
}

/// Compute the window of page numbers shown in pagination controls.
///
/// Returns the full `1..=last_page` range when it fits in `max_visible`,
/// otherwise a window of exactly `max_visible` pages centered on
/// `current_page` and clamped to `[1, last_page]`; a window clamped at the
/// tail slides left to keep its full width. A `current_page` outside
/// `[1, last_page]` is not validated here; callers clamp before calling.
pub fn page_numbers(current_page: u32, last_page: u32, max_visible: u32) -> Vec<u32> {
    if last_page <= max_visible {
        return (1..=last_page).collect();
    }
    let half = max_visible / 2;
    let start = current_page.saturating_sub(half).max(1);
    let end = start.saturating_add(max_visible - 1).min(last_page);
    let start = if end - start + 1 < max_visible {
        end.saturating_sub(max_visible - 1).max(1)
    } else {
        start
    };
    (start..=end).collect()
}

/// Direct Laravel pagination envelope (pagination fields at the top level)
///
/// Unknown Laravel fields (`links`, `path`, `first_page_url`, ...) are
/// ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct LaravelPage<T> {
    /// Current page number (1-based)
    pub current_page: u32,
    /// Rows of this page
    pub data: Vec<T>,
    /// Last available page number
    pub last_page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items across all pages
    pub total: u64,
    /// 1-based index of the first item on this page
    #[serde(default)]
    pub from: Option<u64>,
    /// 1-based index of the last item on this page
    #[serde(default)]
    pub to: Option<u64>,
    /// Absolute URL of the next page, when one exists
    #[serde(default)]
    pub next_page_url: Option<String>,
    /// Absolute URL of the previous page, when one exists
    #[serde(default)]
    pub prev_page_url: Option<String>,
}

/// Wrapped envelope: `{status, message?, data, pagination}`
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct WrappedPage<T> {
    /// `"success"` or an error status
    pub status: String,
    /// Human-readable message, set on errors
    #[serde(default)]
    pub message: Option<String>,
    /// Rows of this page
    #[serde(default)]
    pub data: Vec<T>,
    /// Pagination metadata
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A pagination response body in either supported shape
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageEnvelope<T> {
    /// `{status, data, pagination}` wrapper
    Wrapped(WrappedPage<T>),
    /// Pagination fields at the top level
    Direct(LaravelPage<T>),
}

/// Failure to normalize an envelope into a [`Page`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Wrapped envelope reported a non-success status
    #[error("{0}")]
    Api(String),
    /// Wrapped envelope was successful but carried no pagination block
    #[error("missing pagination metadata in response")]
    MissingPagination,
}

/// Normalized page: the rows plus the pagination metadata kept by the client
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Rows, opaque to the client
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl<T> PageEnvelope<T> {
    /// Normalize either envelope shape into a [`Page`].
    pub fn into_page(self) -> Result<Page<T>, EnvelopeError> {
        match self {
            PageEnvelope::Direct(page) => Ok(Page {
                pagination: Pagination {
                    current_page: page.current_page,
                    last_page: page.last_page,
                    per_page: page.per_page,
                    total: page.total,
                    from: page.from,
                    to: page.to,
                },
                items: page.data,
            }),
            PageEnvelope::Wrapped(wrapped) => {
                if wrapped.status != "success" {
                    return Err(EnvelopeError::Api(
                        wrapped
                            .message
                            .unwrap_or_else(|| "Failed to fetch data".to_string()),
                    ));
                }
                let pagination = wrapped.pagination.ok_or(EnvelopeError::MissingPagination)?;
                Ok(Page {
                    items: wrapped.data,
                    pagination,
                })
            }
        }
    }
}
