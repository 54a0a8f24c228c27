use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::EntityTrait;

use crate::entity::admin_user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{self, Purpose};

/// Name of the HttpOnly cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated admin, from the session cookie or an `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AppError::TokenMissing)?;

        let claims = jwt::verify(&token, Purpose::Session, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        // Tokens outlive deleted accounts and password changes.
        let user = admin_user::Entity::find_by_id(claims.uid)
            .one(&state.db)
            .await?
            .filter(|user| user.token_version == claims.ver)
            .ok_or(AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }
}

/// Admin session required by an HTML page; anonymous visitors are sent to the login page.
pub struct AdminPage(pub AuthUser);

impl FromRequestParts<AppState> for AdminPage {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(AdminPage(user)),
            Err(AppError::TokenMissing | AppError::TokenInvalid) => {
                Err(Redirect::to("/admin/login").into_response())
            }
            Err(e) => Err(crate::web::PageError::from(e).into_response()),
        }
    }
}

/// Optional admin session, for pages that only change slightly for admins.
pub struct MaybeAdmin(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAdmin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeAdmin(Some(user))),
            Err(AppError::TokenMissing | AppError::TokenInvalid) => Ok(MaybeAdmin(None)),
            Err(e) => {
                tracing::warn!("Session lookup failed: {:?}", e);
                Ok(MaybeAdmin(None))
            }
        }
    }
}

/// Session cookie for a freshly signed token.
pub fn session_cookie(token: String, ttl_hours: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours))
        .build()
}

/// Cookie that clears the session on the client.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
