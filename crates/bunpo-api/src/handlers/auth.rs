//! Authentication handlers
//!
//! Google OAuth2 login round trip and logout.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bunpo_service::{
    generate_state, AuthService, LoginResponse, LogoutRequest, LogoutResponse, ServiceError,
};
use tracing::warn;

use crate::extractors::{AuthUser, CallbackQuery, OptionalValidatedJson};
use crate::response::{ApiError, ApiResult, ApiSuccess};
use crate::state::AppState;

/// Cookie carrying the OAuth state between login and callback
pub const STATE_COOKIE: &str = "oauthstate";

const STATE_COOKIE_TTL: time::Duration = time::Duration::minutes(10);

fn state_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(STATE_COOKIE_TTL)
        .build()
}

fn cleared_state_cookie() -> Cookie<'static> {
    Cookie::build(STATE_COOKIE).path("/").build()
}

/// Start the Google login
///
/// GET /auth/google/login
pub async fn google_login(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let oauth_state = generate_state();
    let url = AuthService::new(state.service_context()).login_url(&oauth_state);

    let jar = jar.add(state_cookie(oauth_state, state.config().auth.secure_cookies));
    (jar, Redirect::temporary(&url))
}

/// Handle the Google redirect back
///
/// GET /auth/google/callback
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    query: Result<CallbackQuery, ApiError>,
) -> Response {
    let cookie_state = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(cleared_state_cookie());

    let CallbackQuery(request) = match query {
        Ok(query) => query,
        Err(e) => return (jar, e).into_response(),
    };

    let service = AuthService::new(state.service_context());
    let result = match service.verify_callback(&request, cookie_state.as_deref()) {
        Ok(code) => service.complete_login(code).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(login) => (jar, login_success(&state, login)).into_response(),
        Err(e) if e.is_unauthorized() => (jar, login_refused(&state, e)).into_response(),
        Err(e) => (jar, ApiError::from(e)).into_response(),
    }
}

fn login_success(state: &AppState, login: LoginResponse) -> Response {
    let Some(target) = state.config().auth.success_redirect_url.as_ref() else {
        return ApiSuccess::ok("login successful", login).into_response();
    };

    let mut url = target.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("token", &login.token)
            .append_pair("email", &login.user.email)
            .append_pair("name", &login.user.name);
        if let Some(picture) = login.user.picture_url.as_deref() {
            query.append_pair("picture", picture);
        }
    }

    Redirect::temporary(url.as_str()).into_response()
}

fn login_refused(state: &AppState, err: ServiceError) -> Response {
    warn!("Login refused");

    let Some(target) = state.config().auth.failure_redirect_url.as_ref() else {
        return ApiError::from(err).into_response();
    };

    let mut url = target.clone();
    url.query_pairs_mut().append_pair("error", "unauthorize");
    Redirect::temporary(url.as_str()).into_response()
}

/// Record a logout
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    OptionalValidatedJson(body): OptionalValidatedJson<LogoutRequest>,
) -> ApiResult<ApiSuccess<LogoutResponse>> {
    let request = body.unwrap_or_default();
    let response = AuthService::new(state.service_context())
        .logout(auth_user.user_id, &request)
        .await?;
    Ok(ApiSuccess::ok("logout recorded", response))
}
