//! Paging for product listings.
//!
//! [`PageQuery`] is what clients send, [`PageRequest`] is its normalized form
//! handed to repositories, and a [`Page`] is what comes back. [`MappedPage`]
//! pairs a page with a per-item transform and serializes the transformed items
//! one by one, so the shaped collection is never built up front.

use axum::{
    Json,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 50;

pub const TOTAL_COUNT_HEADER: &str = "x-pagination-total-count";
pub const PAGE_COUNT_HEADER: &str = "x-pagination-page-count";
pub const CURRENT_PAGE_HEADER: &str = "x-pagination-current-page";
pub const PER_PAGE_HEADER: &str = "x-pagination-per-page";

/// Attribute a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Price,
}

/// Listing order, written as `price` or `-price` in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub descending: bool,
}

impl Default for Sort {
    /// Newest products first.
    fn default() -> Self {
        Self {
            field: SortField::Id,
            descending: true,
        }
    }
}

impl FromStr for Sort {
    type Err = strum::ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (descending, field) = match raw.strip_prefix('-') {
            Some(field) => (true, field),
            None => (false, raw),
        };
        Ok(Self {
            field: field.parse()?,
            descending,
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Paging query parameters accepted by list endpoints
///
/// Numbers are read leniently: values that are not integers count as absent,
/// and out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1. Pages past the end show the last page.
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,
    /// Items per page, clamped to 1..=50 (default 20)
    #[serde(
        default,
        rename = "per-page",
        alias = "per_page",
        deserialize_with = "lenient_number"
    )]
    pub per_page: Option<i64>,
    /// `id`, `name` or `price`; prefix with `-` for descending (default `-id`)
    pub sort: Option<String>,
}

impl PageQuery {
    /// Normalizes raw parameters. Unknown sort keys fall back to the default order.
    pub fn into_request(self) -> PageRequest {
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => Sort::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(sort = %raw, "Ignoring unknown sort key");
                Sort::default()
            }),
        };

        PageRequest::new(
            clamp_to_u32(self.page.unwrap_or(1)),
            clamp_to_u32(self.per_page.unwrap_or(i64::from(DEFAULT_PAGE_SIZE))),
        )
        .with_sort(sort)
    }
}

/// Negative values become 0 (then raised to the minimum by [`PageRequest::new`]).
fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Reads a query number without ever failing the request.
///
/// Digit strings too long for `i64` saturate; anything else is treated as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(parse_saturating))
}

fn parse_saturating(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!(value = %raw, "Ignoring non-numeric paging parameter");
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Normalized paging request: `page >= 1`, `per_page` within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
    sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
            sort: Sort::default(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata of one served page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_count: u64,
    /// 1-based, always within `1..=max(page_count, 1)`
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Resolves a request against the size of the full result set.
    pub fn resolve(total_count: u64, request: &PageRequest) -> Self {
        let mut pagination = Self {
            total_count,
            page: request.page(),
            per_page: request.per_page(),
        };
        pagination.page = pagination.page.min(pagination.page_count().max(1));
        pagination
    }

    pub fn page_count(&self) -> u32 {
        let per_page = u64::from(self.per_page.max(1));
        let pages = self.total_count.div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Number of items preceding this page.
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.page_count()).then(|| self.page + 1)
    }

    /// `X-Pagination-*` headers plus an RFC 8288 `Link` header.
    ///
    /// `base_url` is the absolute URL of the listing without a query string.
    pub fn headers(&self, base_url: &str, sort: Sort) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            HeaderValue::from(self.total_count),
        );
        headers.insert(
            HeaderName::from_static(PAGE_COUNT_HEADER),
            HeaderValue::from(self.page_count()),
        );
        headers.insert(
            HeaderName::from_static(CURRENT_PAGE_HEADER),
            HeaderValue::from(self.page),
        );
        headers.insert(
            HeaderName::from_static(PER_PAGE_HEADER),
            HeaderValue::from(self.per_page),
        );

        match HeaderValue::from_str(&self.link_header(base_url, sort)) {
            Ok(link) => {
                headers.insert(axum::http::header::LINK, link);
            }
            Err(e) => tracing::warn!(base_url, "Skipping Link header: {}", e),
        }

        headers
    }

    /// Navigation links in the order self, first, prev, next, last.
    ///
    /// `first` and `last` are only present when there is at least one page.
    pub fn link_header(&self, base_url: &str, sort: Sort) -> String {
        let mut links = vec![(self.page, "self")];
        if self.page_count() > 0 {
            links.push((1, "first"));
            if let Some(prev) = self.prev_page() {
                links.push((prev, "prev"));
            }
            if let Some(next) = self.next_page() {
                links.push((next, "next"));
            }
            links.push((self.page_count(), "last"));
        }

        links
            .into_iter()
            .map(|(page, rel)| format!("<{}>; rel={}", self.page_url(base_url, page, sort), rel))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn page_url(&self, base_url: &str, page: u32, sort: Sort) -> String {
        let mut url = format!("{}?page={}&per-page={}", base_url, page, self.per_page);
        if sort != Sort::default() {
            url.push_str(&format!("&sort={}", sort));
        }
        url
    }
}

/// One page of a larger result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Cuts the requested window out of an already ordered result set.
    pub fn from_ordered(ordered: Vec<T>, request: &PageRequest) -> Self {
        let pagination = Pagination::resolve(ordered.len() as u64, request);
        let items = ordered
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page as usize)
            .collect();
        Self { items, pagination }
    }
}

/// A page whose items are reshaped on the fly.
///
/// Pagination metadata passes through untouched; only item shapes change.
/// Iteration can be repeated because the source page stays in memory.
pub struct MappedPage<T, F> {
    source: Page<T>,
    transform: F,
}

impl<T, F> MappedPage<T, F> {
    pub fn new(source: Page<T>, transform: F) -> Self {
        Self { source, transform }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.source.pagination
    }

    pub fn len(&self) -> usize {
        self.source.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.items.is_empty()
    }

    /// Lazily transformed items.
    pub fn iter<U>(&self) -> impl Iterator<Item = U> + '_
    where
        F: Fn(&T) -> U,
    {
        self.source.items.iter().map(&self.transform)
    }
}

impl<T, U, F> Serialize for MappedPage<T, F>
where
    F: Fn(&T) -> U,
    U: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// List response: a JSON array body plus pagination headers.
pub struct PaginatedResponse<T, F> {
    items: MappedPage<T, F>,
    base_url: String,
    sort: Sort,
}

impl<T, F> PaginatedResponse<T, F> {
    pub fn new(items: MappedPage<T, F>, base_url: String, sort: Sort) -> Self {
        Self {
            items,
            base_url,
            sort,
        }
    }
}

impl<T, U, F> IntoResponse for PaginatedResponse<T, F>
where
    F: Fn(&T) -> U,
    U: Serialize,
{
    fn into_response(self) -> Response {
        let headers = self.items.pagination().headers(&self.base_url, self.sort);
        (headers, Json(self.items)).into_response()
    }
}
