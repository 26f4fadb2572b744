//! OAuth2 identity providers

mod google;

pub use google::GoogleIdentityProvider;
