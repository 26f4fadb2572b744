//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paging, the OAuth
//! callback and references.

mod auth;
mod callback;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use callback::CallbackQuery;
pub use pagination::PageQuery;
pub use path::ReferencePath;
pub use validated::OptionalValidatedJson;
