//! # Filter State
//!
//! Holds the criteria of one screen: free-text search, field equality filters, a date range,
//! an optional sort and the pagination cursor (`page`, `limit`).
//!
//! ## The page reset rule
//!
//! [`FilterState::apply`] merges a [`FilterPatch`] into the current state. If the patch
//! carries a page, it is used verbatim; otherwise `page` is forced back to 1. Narrowing a
//! search while viewing page 5 must bring the user back to page 1 instead of showing an
//! empty page 5.
//!
//! ```rust,ignore
//! let mut filters = FilterState::new(10);
//! filters.apply(FilterPatch::new().page(5));
//! filters.apply(FilterPatch::new().search("courroie"));
//! assert_eq!(filters.page(), 1);
//! ```

use crate::error::ResourceError;
use crate::value::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Filter key holding the free-text search.
pub const SEARCH: &str = "search";
/// Filter key holding the inclusive lower date bound (`YYYY-MM-DD`).
pub const DATE_START: &str = "date_start";
/// Filter key holding the inclusive upper date bound (`YYYY-MM-DD`).
pub const DATE_END: &str = "date_end";
/// Select inputs send this literal for "no filter".
pub const ALL: &str = "all";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sort order applied to the filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub key: String,
    pub descending: bool,
}

/// Current filter criteria of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<String, Value>,
    sort: Option<Sort>,
    page: u32,
    limit: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FilterState {
    /// Documented defaults: page 1, the given limit, no optional keys.
    pub fn new(limit: u32) -> Self {
        Self {
            values: BTreeMap::new(),
            sort: None,
            page: 1,
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// The trimmed search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.values
            .get(SEARCH)
            .and_then(Value::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Equality filters, excluding search, date bounds and wildcard values.
    pub fn field_filters(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), SEARCH | DATE_START | DATE_END))
            .filter(|(_, value)| !is_wildcard(value))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Parses the date bounds. Unparsable bounds are a validation error.
    pub fn date_bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ResourceError> {
        Ok((self.parse_date(DATE_START)?, self.parse_date(DATE_END)?))
    }

    fn parse_date(&self, key: &str) -> Result<Option<NaiveDate>, ResourceError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) if is_wildcard(value) => Ok(None),
            Some(Value::Text(text)) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                .map(Some)
                .map_err(|_| ResourceError::invalid_field(key, format!("invalid date '{text}'"))),
            Some(Value::Number(n)) => Err(ResourceError::invalid_field(
                key,
                format!("invalid date '{n}'"),
            )),
        }
    }

    /// Merges `patch`. A patch without a page sends the state back to page 1.
    ///
    /// Returns `true` when the resulting state differs from the previous one.
    pub fn apply(&mut self, patch: FilterPatch) -> bool {
        let before = self.clone();
        for (key, value) in patch.values {
            match value {
                Some(value) => {
                    self.values.insert(key, value);
                }
                None => {
                    self.values.remove(&key);
                }
            }
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
        if let Some(limit) = patch.limit {
            self.limit = limit.max(1);
        }
        self.page = patch.page.map_or(1, |page| page.max(1));
        *self != before
    }

    /// Restores `defaults`, clearing every optional key.
    pub fn reset(&mut self, defaults: &FilterState) -> bool {
        let changed = self != defaults;
        *self = defaults.clone();
        changed
    }

    /// Query parameters sent to list endpoints, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .values
            .iter()
            .filter(|(key, value)| is_active(key, value))
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        if let Some(sort) = &self.sort {
            pairs.push(("sort_by".to_string(), sort.key.clone()));
            let order = if sort.descending { "desc" } else { "asc" };
            pairs.push(("order".to_string(), order.to_string()));
        }
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs
    }

    /// Identifies the cached list result for `resource` under these filters.
    pub fn query_key(&self, resource: &'static str) -> QueryKey {
        let filters = self
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        QueryKey { resource, filters }
    }
}

/// Free text has no sentinel: only an empty search is dropped, `"all"` is searched for.
fn is_active(key: &str, value: &Value) -> bool {
    match (key, value) {
        (SEARCH, Value::Text(text)) => !text.trim().is_empty(),
        _ => !is_wildcard(value),
    }
}

/// `true` for values that match everything: empty text or the `"all"` sentinel.
pub fn is_wildcard(value: &Value) -> bool {
    match value {
        Value::Text(text) => {
            let text = text.trim();
            text.is_empty() || text.eq_ignore_ascii_case(ALL)
        }
        Value::Number(_) => false,
    }
}

/// Partial update merged into a [`FilterState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    values: BTreeMap<String, Option<Value>>,
    sort: Option<Option<Sort>>,
    page: Option<u32>,
    limit: Option<u32>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), Some(value.into()));
        self
    }

    /// Clears `key` back to "undefined".
    pub fn clear(mut self, key: impl Into<String>) -> Self {
        self.values.insert(key.into(), None);
        self
    }

    /// Sets the search text; a blank text clears it.
    pub fn search(self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            self.clear(SEARCH)
        } else {
            self.set(SEARCH, text)
        }
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        for (key, date) in [(DATE_START, start), (DATE_END, end)] {
            let value = date.map(|d| Value::Text(d.format(DATE_FORMAT).to_string()));
            self.values.insert(key.to_string(), value);
        }
        self
    }

    pub fn sort_by(mut self, key: impl Into<String>, descending: bool) -> Self {
        self.sort = Some(Some(Sort {
            key: key.into(),
            descending,
        }));
        self
    }

    pub fn clear_sort(mut self) -> Self {
        self.sort = Some(None);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Resource type plus serialized filter state: one cached list result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub filters: String,
}

impl Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.resource, self.filters)
    }
}
