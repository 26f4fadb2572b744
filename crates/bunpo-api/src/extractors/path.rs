//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::response::ApiError;

/// Opaque user reference taken from the `:reference` path segment
///
/// Decoding is left to the service layer so that every malformed
/// reference produces the same error.
#[derive(Debug, Clone)]
pub struct ReferencePath(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ReferencePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(reference) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("invalid user reference"))?;

        Ok(ReferencePath(reference))
    }
}
