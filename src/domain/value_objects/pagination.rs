use serde::{Deserialize, Deserializer, Serialize};

pub const ITEMS_PER_PAGE: i64 = 6;
pub const IMAGES_LIMIT: i64 = 1000;
pub const LATEST_INVOICES_LIMIT: i64 = 5;

/// Search text and 1-based page number as they arrive from the listing URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPage {
    Number(i64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Empty or non-numeric page values fall back to the first page instead of rejecting the request.
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let page = match Option::<RawPage>::deserialize(deserializer)? {
        Some(RawPage::Number(page)) => Some(page),
        Some(RawPage::Text(raw)) => raw.trim().parse::<i64>().ok(),
        Some(RawPage::Other(_)) | None => None,
    };
    Ok(page)
}

impl ListFilter {
    pub fn new(query: impl Into<String>, page: i64) -> Self {
        Self {
            query: query.into(),
            page: Some(page),
        }
    }

    /// Pages below 1 (or missing) are treated as the first page.
    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        page_offset(self.current_page())
    }

    pub fn limit(&self) -> i64 {
        ITEMS_PER_PAGE
    }

    /// `ILIKE` pattern; always bound as a parameter, never spliced into SQL.
    pub fn search_pattern(&self) -> String {
        search_pattern(&self.query)
    }
}

pub fn search_pattern(query: &str) -> String {
    format!("%{}%", query)
}

pub fn total_pages(total_rows: i64) -> i64 {
    if total_rows <= 0 {
        return 0;
    }
    (total_rows + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

/// Saturates for pages far past the end; such pages are simply empty.
fn page_offset(page: i64) -> i64 {
    page.max(1).saturating_sub(1).saturating_mul(ITEMS_PER_PAGE)
}

/// Rows expected on `page` when `total_rows` rows match.
pub fn rows_on_page(total_rows: i64, page: i64) -> i64 {
    total_rows
        .saturating_sub(page_offset(page))
        .clamp(0, ITEMS_PER_PAGE)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: i64,
    pub total_pages: i64,
}
