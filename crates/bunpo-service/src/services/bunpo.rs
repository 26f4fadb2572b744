//! Placeholder bunpo feature

use crate::dto::BunpoResponse;

/// Bunpo service
#[derive(Debug, Default)]
pub struct BunpoService;

impl BunpoService {
    pub fn new() -> Self {
        Self
    }

    pub fn test(&self) -> BunpoResponse {
        BunpoResponse {
            message: "endpoint success".to_string(),
        }
    }
}
