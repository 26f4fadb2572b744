//! Pagination extractor
//!
//! Extracts offset pagination parameters from query strings. Values that do
//! not parse fall back to the defaults instead of rejecting the request.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use bunpo_core::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw paging query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQueryParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
    /// Optional user reference filter
    #[serde(default)]
    pub reference: Option<String>,
}

/// Parsed paging parameters
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub page: PageRequest,
    /// Reference filter, blank values dropped
    pub reference: Option<String>,
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

impl From<PageQueryParams> for PageQuery {
    fn from(params: PageQueryParams) -> Self {
        let page = parse_or(params.page.as_deref(), DEFAULT_PAGE);
        let page_size = parse_or(params.page_size.as_deref(), DEFAULT_PAGE_SIZE);

        Self {
            page: PageRequest::new(page, page_size),
            reference: params
                .reference
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(PageQuery::from(params))
    }
}
