//! # Derived View
//!
//! A pure function of `(raw page, filter state)` producing what a screen renders: the visible
//! items, pagination metadata and summary statistics.
//!
//! ## Pagination modes
//!
//! - [`PaginationMode::Server`]: the backend already filtered and paginated. The visible items
//!   are the page's data and the metadata comes straight from the envelope.
//! - [`PaginationMode::Client`]: the backend returned the whole (small, fixed) collection.
//!   Search, field filters, the date range and the sort are applied here, then the *filtered*
//!   set is sliced. `total_pages` is computed from the filtered count, and an out-of-range
//!   page is clamped to `max(1, total_pages)`.
//!
//! Statistics are always computed over the full filtered set, never the current slice, so
//! summary cards stay stable while paging.

use crate::entity::Resource;
use crate::filters::{FilterState, DATE_END, DATE_START};
use crate::page::{total_pages, Page};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Where filtering and pagination happen for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    #[default]
    Client,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Metadata for `total` items at `limit` per page; `page` is clamped into range.
    pub fn compute(total: usize, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let pages = total_pages(total, limit);
        Self {
            total,
            page: page.clamp(1, pages.max(1)),
            limit,
            total_pages: pages,
        }
    }

    pub fn empty(limit: u32) -> Self {
        Self::compute(0, 1, limit)
    }
}

/// Named counts over the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl Stats {
    pub fn collect<'a, T: Resource>(items: impl IntoIterator<Item = &'a T>) -> Self {
        let mut stats = Self::default();
        for item in items {
            stats.total += 1;
            if let Some(category) = item.category() {
                *stats.by_category.entry(category).or_default() += 1;
            }
        }
        stats
    }

    /// Count for one category, zero when absent.
    pub fn count(&self, category: &str) -> usize {
        self.by_category.get(category).copied().unwrap_or(0)
    }
}

/// Everything a table screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
    pub stats: Stats,
}

impl<T> View<T> {
    pub fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationMeta::empty(limit),
            stats: Stats::default(),
        }
    }
}

/// `true` when `item` passes search, every field filter and the date range.
///
/// Unparsable date bounds are ignored here; backends that care reject them.
pub fn matches<T: Resource>(item: &T, filters: &FilterState) -> bool {
    if let Some(needle) = filters.search() {
        let needle = needle.to_lowercase();
        let hit = item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    let fields_match = filters
        .field_filters()
        .all(|(key, expected)| item.field(key).as_ref() == Some(expected));
    if !fields_match {
        return false;
    }

    let start = lenient_date(filters, DATE_START);
    let end = lenient_date(filters, DATE_END);
    if start.is_none() && end.is_none() {
        return true;
    }
    match item.date() {
        Some(date) => start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e),
        None => false,
    }
}

fn lenient_date(filters: &FilterState, key: &str) -> Option<NaiveDate> {
    filters
        .get(key)
        .and_then(|value| value.as_text())
        .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
}

/// Filters `items` and applies the sort. The sort is stable; items lacking the sort field
/// go last in either direction.
pub fn filter_sorted<T: Resource>(items: &[T], filters: &FilterState) -> Vec<T> {
    let mut selected: Vec<T> = items
        .iter()
        .filter(|item| matches(*item, filters))
        .cloned()
        .collect();
    if let Some(sort) = filters.sort() {
        selected.sort_by(|a, b| match (a.field(&sort.key), b.field(&sort.key)) {
            (Some(x), Some(y)) if sort.descending => y.cmp(&x),
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
    selected
}

/// Computes the view for `page` under `filters`.
pub fn derive<T: Resource>(page: &Page<T>, filters: &FilterState, mode: PaginationMode) -> View<T> {
    match mode {
        PaginationMode::Server => View {
            items: page.data.clone(),
            pagination: PaginationMeta {
                total: page.total,
                page: page.page.clamp(1, page.total_pages.max(1)),
                limit: page.limit.max(1),
                total_pages: page.total_pages,
            },
            stats: Stats::collect(&page.data),
        },
        PaginationMode::Client => {
            let filtered = filter_sorted(&page.data, filters);
            let stats = Stats::collect(&filtered);
            let pagination = PaginationMeta::compute(filtered.len(), filters.page(), filters.limit());
            let start = (pagination.page as usize - 1) * pagination.limit as usize;
            let items = filtered
                .into_iter()
                .skip(start)
                .take(pagination.limit as usize)
                .collect();
            View {
                items,
                pagination,
                stats,
            }
        }
    }
}
