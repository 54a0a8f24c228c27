//! Admin sign-in, sign-out and password management.

use anyhow::anyhow;
use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tera::Context;
use tracing::instrument;

use super::{Flash, PageError, error_text, page_context, render, render_with_status};
use crate::entity::admin_user;
use crate::error::AppError;
use crate::extractors::auth::{AdminPage, MaybeAdmin, removal_cookie, session_cookie};
use crate::mailer::Message;
use crate::models::auth::{
    ForgotPasswordForm, LoginForm, NewPasswordForm, PASSWORD_RESET_DONE, PASSWORD_UPDATED,
    RESET_EMAIL_SENT, RecoverySessionForm,
};
use crate::state::AppState;
use crate::utils::hash::{hash_password, verify_password};
use crate::utils::jwt::{self, Purpose};
use crate::utils::recovery::{NO_SESSION, RecoveryOutcome, parse_fragment, recovery_link};

async fn login_context(state: &AppState, email: &str) -> Result<Context, PageError> {
    let mut context = page_context(state, false).await?;
    context.insert("email", email);
    Ok(context)
}

fn issue_session(state: &AppState, user: &admin_user::Model) -> Result<String, AppError> {
    let ttl = state.config.auth.session_ttl_hours;
    jwt::sign(
        user.id,
        &user.email,
        user.token_version,
        Purpose::Session,
        Duration::hours(ttl),
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign session token: {e}")))
}

/// Store a new password and retire every token signed before it.
async fn set_password(
    state: &AppState,
    user_id: i32,
    password: &str,
) -> Result<admin_user::Model, PageError> {
    let hash = hash_password(password)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;
    admin_user::Entity::update_many()
        .col_expr(admin_user::Column::Password, Expr::value(hash))
        .col_expr(
            admin_user::Column::TokenVersion,
            Expr::col(admin_user::Column::TokenVersion).add(1),
        )
        .col_expr(admin_user::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(admin_user::Column::Id.eq(user_id))
        .exec(&state.db)
        .await?;

    let user = admin_user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin account not found".into()))?;
    Ok(user)
}

/// Spend a recovery token. Only the first exchange for a given token version
/// succeeds.
async fn consume_recovery(db: &DatabaseConnection, claims: &jwt::Claims) -> Result<bool, DbErr> {
    let result = admin_user::Entity::update_many()
        .col_expr(
            admin_user::Column::TokenVersion,
            Expr::col(admin_user::Column::TokenVersion).add(1),
        )
        .filter(admin_user::Column::Id.eq(claims.uid))
        .filter(admin_user::Column::TokenVersion.eq(claims.ver))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn login_page(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Response, PageError> {
    if admin.is_some() {
        return Ok(Redirect::to("/admin").into_response());
    }
    let context = login_context(&state, "").await?;
    Ok(render("admin/login.html", &context)?.into_response())
}

#[instrument(skip(state, jar, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let email = form.email.trim().to_lowercase();

    let user = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;

    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?,
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!("Rejected admin login");
            let mut context = login_context(&state, &email).await?;
            context.insert("flash", &Flash::error(error_text(AppError::InvalidCredentials)));
            return render_with_status(StatusCode::UNAUTHORIZED, "admin/login.html", &context);
        }
    };

    let token = issue_session(&state, &user)?;
    tracing::info!(user_id = user.id, "Admin signed in");

    let jar = jar.add(session_cookie(token, state.config.auth.session_ttl_hours));
    Ok((jar, Redirect::to("/admin")).into_response())
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Redirect::to("/admin/login"))
}

/// Mail a recovery link. The page reads the same whether or not the account exists.
#[instrument(skip(state, form))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Result<Response, PageError> {
    let email = form.email.trim().to_lowercase();
    let mut context = login_context(&state, &email).await?;

    if email.is_empty() {
        context.insert("flash", &Flash::error("Email is required"));
        return render_with_status(StatusCode::BAD_REQUEST, "admin/login.html", &context);
    }

    let user = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;

    if let Some(user) = user {
        let token = jwt::sign(
            user.id,
            &user.email,
            user.token_version,
            Purpose::Recovery,
            Duration::minutes(state.config.auth.recovery_ttl_minutes),
            &state.config.auth.jwt_secret,
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign recovery token: {e}")))?;
        let link = recovery_link(&state.config.server.public_url, &token);

        let message = Message {
            to: user.email.clone(),
            subject: "Reset your password".into(),
            body: format!("Use the link below to choose a new password:\n\n{link}\n"),
        };
        if let Err(e) = state.mailer.send(message).await {
            tracing::error!(user_id = user.id, "Failed to send recovery email: {:#}", e);
            context.insert(
                "flash",
                &Flash::error("Error sending password reset email. Please try again later."),
            );
            return render_with_status(StatusCode::INTERNAL_SERVER_ERROR, "admin/login.html", &context);
        }
        tracing::info!(user_id = user.id, "Recovery email sent");
    } else {
        tracing::debug!("Recovery requested for unknown email");
    }

    context.insert("flash", &Flash::success(RESET_EMAIL_SENT));
    render_with_status(StatusCode::OK, "admin/login.html", &context)
}

async fn reset_context(
    state: &AppState,
    has_session: bool,
    session_message: Option<String>,
) -> Result<Context, PageError> {
    let mut context = page_context(state, false).await?;
    context.insert("has_session", &has_session);
    if let Some(message) = session_message {
        context.insert("session_message", &message);
    }
    Ok(context)
}

/// Landing page of a recovery link. The link's fragment never reaches the
/// server; the page script posts it to [`recovery_session`].
pub async fn reset_password_page(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
) -> Result<Html<String>, PageError> {
    let has_session = admin.is_some();
    let message = (!has_session).then(|| NO_SESSION.to_string());
    let context = reset_context(&state, has_session, message).await?;
    render("admin/reset_password.html", &context)
}

/// Exchange the recovery token from a link fragment for a session cookie.
#[instrument(skip(state, jar, form))]
pub async fn recovery_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RecoverySessionForm>,
) -> Result<Response, PageError> {
    let fragment = parse_fragment(&form.fragment).filter(|f| f.is_recovery());

    let mut user = None;
    let exchange = match fragment {
        None => None,
        Some(fragment) => Some(
            match jwt::verify(
                &fragment.access_token,
                Purpose::Recovery,
                &state.config.auth.jwt_secret,
            ) {
                Ok(claims) => {
                    let exists = admin_user::Entity::find_by_id(claims.uid)
                        .one(&state.db)
                        .await?
                        .is_some();
                    if !exists {
                        Ok(false)
                    } else if !consume_recovery(&state.db, &claims).await? {
                        Err(anyhow!("Recovery link has already been used"))
                    } else {
                        user = admin_user::Entity::find_by_id(claims.uid)
                            .one(&state.db)
                            .await?;
                        Ok(user.is_some())
                    }
                }
                Err(e) => Err(e),
            },
        ),
    };

    let outcome = RecoveryOutcome::classify(exchange);
    if let (RecoveryOutcome::Established, Some(user)) = (&outcome, &user) {
        let token = issue_session(&state, user)?;
        tracing::info!(user_id = user.id, "Recovery session established");
        let jar = jar.add(session_cookie(token, state.config.auth.session_ttl_hours));
        return Ok((jar, Redirect::to("/admin/reset-password")).into_response());
    }

    tracing::warn!(?outcome, "Recovery session rejected");
    let context = reset_context(&state, false, outcome.message()).await?;
    render_with_status(StatusCode::BAD_REQUEST, "admin/reset_password.html", &context)
}

/// Set a new password from a recovery session, then sign the admin out.
#[instrument(skip(state, jar, admin, form))]
pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    MaybeAdmin(admin): MaybeAdmin,
    Form(form): Form<NewPasswordForm>,
) -> Result<Response, PageError> {
    let Some(admin) = admin else {
        let context = reset_context(&state, false, Some(NO_SESSION.to_string())).await?;
        return render_with_status(StatusCode::UNAUTHORIZED, "admin/reset_password.html", &context);
    };

    let password = match form.validate() {
        Ok(password) => password,
        Err(e) => {
            let mut context = reset_context(&state, true, None).await?;
            context.insert("flash", &Flash::error(error_text(e)));
            return render_with_status(StatusCode::BAD_REQUEST, "admin/reset_password.html", &context);
        }
    };

    set_password(&state, admin.user_id, password).await?;
    tracing::info!(user_id = admin.user_id, "Password reset");

    let mut context = reset_context(&state, false, None).await?;
    context.insert("flash", &Flash::success(PASSWORD_RESET_DONE));
    context.insert("redirect_to_login", &true);
    let page = render("admin/reset_password.html", &context)?;
    Ok((jar.remove(removal_cookie()), page).into_response())
}

pub async fn change_password_page(
    State(state): State<AppState>,
    AdminPage(_admin): AdminPage,
) -> Result<Html<String>, PageError> {
    let context = page_context(&state, true).await?;
    render("admin/change_password.html", &context)
}

/// Other sessions end with the change; this one is re-signed.
#[instrument(skip(state, jar, admin, form), fields(user_id = admin.user_id))]
pub async fn change_password(
    State(state): State<AppState>,
    jar: CookieJar,
    AdminPage(admin): AdminPage,
    Form(form): Form<NewPasswordForm>,
) -> Result<Response, PageError> {
    let mut context = page_context(&state, true).await?;

    let password = match form.validate() {
        Ok(password) => password,
        Err(e) => {
            context.insert("flash", &Flash::error(error_text(e)));
            return render_with_status(StatusCode::BAD_REQUEST, "admin/change_password.html", &context);
        }
    };

    let user = set_password(&state, admin.user_id, password).await?;
    let token = issue_session(&state, &user)?;
    tracing::info!("Password changed");

    context.insert("flash", &Flash::success(PASSWORD_UPDATED));
    let page = render("admin/change_password.html", &context)?;
    let jar = jar.add(session_cookie(token, state.config.auth.session_ttl_hours));
    Ok((jar, page).into_response())
}
