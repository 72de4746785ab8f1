//! Request types for the shared crate
//!
//! Query parameters sent to a paginated list endpoint and their canonical
//! query-string form.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction for a sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Wire representation (`"asc"` / `"desc"`).
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for one table page request
///
/// Serializes to `page=&per_page=&<filters...>&search=&sort_by=&sort_direction=`.
/// Entries whose value is null or an empty string are dropped entirely;
/// `sort_direction` is emitted only alongside `sort_by`. Filters live in a
/// `BTreeMap` so serialization order is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    /// Page number (1-based)
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Free-text search keyword
    pub search: Option<String>,

    /// Sort column key
    pub sort_by: Option<String>,

    /// Sort direction, meaningful only when `sort_by` is set
    pub sort_direction: SortDirection,

    /// Arbitrary filter parameters, passed through verbatim
    pub filters: BTreeMap<String, Value>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 15,
            search: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
            filters: BTreeMap::new(),
        }
    }
}

impl TableQuery {
    /// Flatten into ordered key/value pairs, dropping null and empty values.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        for (key, value) in &self.filters {
            if let Some(text) = scalar_text(value) {
                pairs.push((key.clone(), text));
            }
        }
        if let Some(search) = self.search.as_deref()
            && !search.is_empty()
        {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref()
            && !sort_by.is_empty()
        {
            pairs.push(("sort_by".to_string(), sort_by.to_string()));
            pairs.push((
                "sort_direction".to_string(),
                self.sort_direction.as_str().to_string(),
            ));
        }
        pairs
    }

    /// Canonical URL-encoded query string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_pairs() {
            serializer.append_pair(&key, &value);
        }
        serializer.finish()
    }
}

/// Display form of a filter value, `None` when the entry must be dropped.
///
/// Filter values are expected to be scalars; a non-scalar serializes as
/// compact JSON rather than failing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Extract the `page` query parameter from a pagination URL.
///
/// Laravel envelopes carry absolute `next_page_url`/`prev_page_url` links;
/// returns `None` when the URL does not parse or carries no numeric `page`.
pub fn page_from_url(url: &str) -> Option<u32> {
    let parsed = url::Url::parse(url).ok()?;
    let page = parsed
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())?;
    page.parse().ok()
}
