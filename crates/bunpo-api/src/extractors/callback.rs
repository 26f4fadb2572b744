//! OAuth callback query extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use bunpo_service::CallbackRequest;

use crate::response::ApiError;

/// `code` and `state` from the provider redirect
///
/// A query string that does not deserialize is rejected with the JSON
/// envelope rather than axum's plain-text body.
#[derive(Debug, Clone)]
pub struct CallbackQuery(pub CallbackRequest);

#[async_trait]
impl<S> FromRequestParts<S> for CallbackQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(request) = Query::<CallbackRequest>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(CallbackQuery(request))
    }
}
