//! # Pages and the Envelope Adapter
//!
//! Backends answer list requests in one of two shapes: a bare JSON array, or an envelope
//! `{ data, total, page, limit, totalPages }`. [`ListResponse`] accepts both and
//! [`ListResponse::into_page`] normalizes either into a [`Page`], so nothing above the client
//! boundary ever branches on the response shape.
//!
//! A [`Page`] always satisfies `data.len() <= limit`, `page >= 1` and
//! `total_pages == ceil(total / limit)`; counters missing from an envelope are recomputed.

use serde::{Deserialize, Serialize};

/// One page of a list result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Wraps a raw array into a synthetic single-page envelope.
    pub fn single(data: Vec<T>) -> Self {
        let total = data.len();
        let limit = limit_for(total);
        Self {
            data,
            total,
            page: 1,
            limit,
            total_pages: total_pages(total, limit),
        }
    }

    pub fn empty(limit: u32) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: 1,
            limit: limit.max(1),
            total_pages: 0,
        }
    }

    /// Slices `items` into the requested page. Out-of-range pages are clamped to the last one.
    pub fn paginate(items: Vec<T>, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let total = items.len();
        let pages = total_pages(total, limit);
        let page = page.clamp(1, pages.max(1));
        let start = (page as usize - 1) * limit as usize;
        let data = items.into_iter().skip(start).take(limit as usize).collect();
        Self {
            data,
            total,
            page,
            limit,
            total_pages: pages,
        }
    }
}

/// `ceil(total / limit)`; zero when there is nothing to show.
pub fn total_pages(total: usize, limit: u32) -> u32 {
    let limit = limit.max(1) as usize;
    u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
}

fn limit_for(len: usize) -> u32 {
    u32::try_from(len.max(1)).unwrap_or(u32::MAX)
}

/// Envelope fields as sent by paginated endpoints. Every counter is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
}

/// Body of a list response, in either shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Envelope(Envelope<T>),
    Raw(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Normalizes into a [`Page`]. The envelope's `totalPages` is ignored and recomputed.
    pub fn into_page(self) -> Page<T> {
        match self {
            Self::Raw(data) => Page::single(data),
            Self::Envelope(envelope) => {
                let len = envelope.data.len();
                let total = envelope.total.unwrap_or(len).max(len);
                let limit = envelope.limit.unwrap_or_else(|| limit_for(len));
                let limit = limit.max(limit_for(len));
                Page {
                    data: envelope.data,
                    total,
                    page: envelope.page.unwrap_or(1).max(1),
                    limit,
                    total_pages: total_pages(total, limit),
                }
            }
        }
    }
}

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self::Envelope(Envelope {
            data: page.data,
            total: Some(page.total),
            page: Some(page.page),
            limit: Some(page.limit),
            total_pages: Some(page.total_pages),
        })
    }
}
