//! Table configuration

use std::collections::BTreeMap;

use serde_json::Value;

/// Configuration for binding a table to a paginated API endpoint
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Endpoint URL serving the pagination envelope
    /// (e.g., "http://localhost:8080/api/users")
    pub api_url: String,

    /// Page size used until `set_per_page` is called
    pub initial_per_page: u32,

    /// Filter parameters applied from the first request on
    pub initial_filters: BTreeMap<String, Value>,

    /// Whether to fetch the first page immediately on construction
    pub auto_load: bool,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl TableConfig {
    /// Create a new configuration for the given endpoint.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            initial_per_page: 15,
            initial_filters: BTreeMap::new(),
            auto_load: true,
            timeout: 30,
        }
    }

    /// Set the initial page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.initial_per_page = per_page;
        self
    }

    /// Replace the initial filter parameters.
    pub fn with_filters(mut self, filters: BTreeMap<String, Value>) -> Self {
        self.initial_filters = filters;
        self
    }

    /// Add a single initial filter parameter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_filters.insert(key.into(), value.into());
        self
    }

    /// Disable the automatic initial fetch.
    pub fn manual_load(mut self) -> Self {
        self.auto_load = false;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
