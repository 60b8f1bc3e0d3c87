//! Pagination parameters and list metadata

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 5;
pub const DEFAULT_OFFSET: i64 = 0;

/// LIMIT/OFFSET window applied to list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Build a page from raw query values. Absent or unparsable values fall
    /// back to the defaults instead of failing the request.
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            limit: parse_or(limit, DEFAULT_LIMIT, |v| v >= 0),
            offset: parse_or(offset, DEFAULT_OFFSET, |v| v >= 0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_OFFSET)
    }
}

fn parse_or(raw: Option<&str>, default: i64, accept: impl Fn(i64) -> bool) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| accept(*v))
        .unwrap_or(default)
}

/// Interpret a boolean-ish query flag (`true`, `1`, `yes`)
pub fn query_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes")
    )
}

/// `meta` object attached to every list response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListMeta {
    pub limit: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl ListMeta {
    pub fn new(page: Page, total: Option<i64>) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            total,
        }
    }
}
