//! Page-number pagination: pager state, link building, and count metadata.
//!
//! The data-fetch layer supplies a [`PagerState`] per request; this module
//! only reads it. Links are the current request URL with the page-number
//! parameter swapped out and every other parameter passed through:
//!
//! ```rust
//! use lamina_query::pagination::{PagerState, build_links};
//!
//! let pager = PagerState::new(3, 20, 95);
//! let links = build_links("http://api.test/accounts?include=owner", &pager, "page[number]").unwrap();
//!
//! assert!(links.next.is_some());
//! assert!(links.prev.is_some());
//! assert!(links.last.contains("include=owner"));
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use lamina_schema::PageConfig;

use crate::error::{QueryError, QueryResult};

/// Pager state for one fetched page of primary resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    /// Current page, 1-based.
    pub current_page: u64,
    /// Records per page.
    pub page_size: u64,
    /// Total records across all pages.
    pub total_count: u64,
}

impl PagerState {
    /// Create pager state. A zero `page_size` is lifted to 1.
    pub fn new(current_page: u64, page_size: u64, total_count: u64) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
            total_count,
        }
    }

    /// Total number of pages; zero records means zero pages.
    pub fn total_pages(&self) -> u64 {
        if self.total_count == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }

    /// Check if a page follows the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Check if a page precedes the current one.
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// The pagination links block of a compound document.
///
/// `first` and `last` are always present; `next` and `prev` serialize as
/// explicit `null` when out of range rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Link to page 1.
    pub first: String,
    /// Link to the final page (page 1 when there are no records).
    pub last: String,
    /// Link to the following page, or `null`.
    pub next: Option<String>,
    /// Link to the preceding page, or `null`.
    pub prev: Option<String>,
}

/// The pagination meta block of a compound document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total record count.
    pub count: u64,
}

/// The page number and size a client asked for, after server-side clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page, 1-based.
    pub number: u64,
    /// Requested page size, clamped to the configured ceiling.
    pub size: u64,
}

impl PageRequest {
    /// Parse page parameters from the request's query multimap.
    ///
    /// Missing or malformed values fall back to page 1 and the configured
    /// default size; an oversized page size is clamped to the ceiling, not
    /// rejected.
    pub fn from_params<'a>(
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
        config: &PageConfig,
    ) -> Self {
        let mut number = 1;
        let mut size = config.default_size;

        for (key, value) in params {
            if key == config.page_param {
                if let Ok(parsed) = value.parse::<u64>() {
                    number = parsed.max(1);
                }
            } else if key == config.size_param {
                if let Ok(parsed) = value.parse::<u64>() {
                    size = parsed.clamp(1, config.max_size);
                }
            }
        }

        Self { number, size }
    }

    /// Pager state for this request once the total count is known.
    pub fn pager(&self, total_count: u64) -> PagerState {
        PagerState::new(self.number, self.size, total_count)
    }
}

/// Return `url` with the value of one query parameter replaced (or
/// appended when absent). Every other parameter passes through unchanged.
///
/// The rewritten query is form-encoded, so bracketed keys come back as
/// `page%5Bnumber%5D`; that spelling is equivalent and accepted by
/// [`PageRequest::from_params`] callers that decode queries.
pub fn replace_query_param(url: &str, key: &str, value: &str) -> QueryResult<String> {
    let mut parsed = Url::parse(url).map_err(|e| QueryError::invalid_link_url(url).with_source(e))?;

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut replaced = false;
    {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        for (k, v) in &pairs {
            if k == key {
                query.append_pair(k, value);
                replaced = true;
            } else {
                query.append_pair(k, v);
            }
        }
        if !replaced {
            query.append_pair(key, value);
        }
    }

    Ok(parsed.into())
}

/// Build the four pagination links for the current request.
///
/// `last` points at page 1 when there are no records — never page 0.
pub fn build_links(current_url: &str, pager: &PagerState, page_param: &str) -> QueryResult<PageLinks> {
    let last_page = pager.total_pages().max(1);

    let first = replace_query_param(current_url, page_param, "1")?;
    let last = replace_query_param(current_url, page_param, &last_page.to_string())?;

    let next = if pager.has_next() {
        Some(replace_query_param(
            current_url,
            page_param,
            &(pager.current_page + 1).to_string(),
        )?)
    } else {
        None
    };

    let prev = if pager.has_prev() {
        Some(replace_query_param(
            current_url,
            page_param,
            &(pager.current_page - 1).to_string(),
        )?)
    } else {
        None
    };

    Ok(PageLinks {
        first,
        last,
        next,
        prev,
    })
}

/// Build the count metadata block.
pub fn build_meta(pager: &PagerState) -> PageMeta {
    PageMeta {
        count: pager.total_count,
    }
}
