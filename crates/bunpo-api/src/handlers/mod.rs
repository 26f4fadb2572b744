//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod bunpo;
pub mod health;
pub mod logs;
pub mod users;
