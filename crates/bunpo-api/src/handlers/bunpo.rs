//! Bunpo handlers

use bunpo_service::{BunpoResponse, BunpoService};

use crate::response::ApiSuccess;

/// GET /bunpo/test
pub async fn test() -> ApiSuccess<BunpoResponse> {
    ApiSuccess::ok("endpoint success", BunpoService::new().test())
}
