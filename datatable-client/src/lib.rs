//! Data-table client for Laravel-style paginated APIs
//!
//! Binds tabular UI state to a paginated REST endpoint: translates page,
//! page size, sort, search, and filter state into query parameters,
//! fetches and normalizes the pagination envelope, and keeps the state
//! consistent under overlapping requests (last-request-wins).

pub mod config;
pub mod error;
pub mod fetch;
pub mod table;

pub use config::TableConfig;
pub use error::{ClientError, ClientResult};
pub use fetch::{HttpFetcher, PageFetcher};
pub use table::{DataTable, Sort, TableState};

// Re-export shared types for convenience
pub use shared::{Page, Pagination, SortDirection, TableQuery, page_from_url, page_numbers};
