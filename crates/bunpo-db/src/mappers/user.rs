//! User entity <-> model mapper

use bunpo_core::entities::{NewUser, User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            email: model.email,
            name: model.name,
            provider: model.provider,
            provider_id: model.provider_id,
            picture_url: model.picture_url.filter(|url| !url.is_empty()),
            created_at: model.created_at,
            last_login_at: model.last_login_at,
        }
    }
}

/// Values for inserting a new user row
pub struct UserInsert<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub provider: &'a str,
    pub provider_id: &'a str,
    pub picture_url: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a NewUser) -> Self {
        Self {
            email: &user.email,
            name: &user.name,
            provider: &user.provider,
            provider_id: &user.provider_id,
            picture_url: user.picture_url.as_deref().filter(|url| !url.is_empty()),
        }
    }
}
