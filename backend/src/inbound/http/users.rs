//! Account handlers: registration, login, and logout.
//!
//! ```text
//! POST /register  name=Alice&email=alice@example.com&password=...
//! POST /login     email=alice@example.com&password=...
//! GET  /logout
//! ```
//!
//! Mutating routes are form-encoded POSTs that answer `303 See Other`; the
//! outcome travels as a flash message consumed by the next rendered view.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::RegisterRequest;
use crate::domain::{EmailAddress, ErrorCode, LoginCredentials};

use super::ApiResult;
use super::respond::{flash_and_redirect, see_other};
use super::session::{Flash, SessionContext};
use super::state::HttpState;

/// Registration form body for `POST /register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterForm {
    /// Display name, free text.
    pub name: Option<String>,
    /// Login email; must be unique.
    pub email: Option<String>,
    /// Raw password.
    pub password: Option<String>,
}

/// Login form body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    /// Registered email.
    pub email: Option<String>,
    /// Account password.
    pub password: Option<String>,
}

/// View-model for the register and login pages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthView {
    /// Pending status message, if a redirect left one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Render the registration view.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration view", body = AuthView)),
    tags = ["accounts"],
    operation_id = "registerForm",
    security([])
)]
#[get("/register")]
pub async fn register_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let flash = session.take_flash()?;
    Ok(HttpResponse::Ok().json(AuthView { flash }))
}

/// Create an account and establish the session.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect: to `/` on success, back to `/register` on failure"),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    let email = match EmailAddress::new(form.email.unwrap_or_default()) {
        Ok(email) => email,
        Err(error) => {
            return flash_and_redirect(&session, Flash::danger(error.to_string()), "/register");
        }
    };
    let password = form.password.unwrap_or_default();
    if password.is_empty() {
        return flash_and_redirect(
            &session,
            Flash::danger("password must not be empty"),
            "/register",
        );
    }

    let request = RegisterRequest {
        name: form.name.unwrap_or_default(),
        email,
        password: Zeroizing::new(password),
    };
    match state.accounts.register(request).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            info!(user_id = %user.id(), "account registered");
            flash_and_redirect(&session, Flash::success("welcome, you are now signed in"), "/")
        }
        Err(error) if error.code() == ErrorCode::Conflict => {
            flash_and_redirect(&session, Flash::danger(error.message()), "/register")
        }
        Err(error) => Err(error),
    }
}

/// Render the login view; an authenticated user is sent home instead.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login view", body = AuthView),
        (status = 303, description = "Already authenticated; redirect to `/`")
    ),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(see_other("/"));
    }
    let flash = session.take_flash()?;
    Ok(HttpResponse::Ok().json(AuthView { flash }))
}

/// Authenticate and establish the session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect: to `/` on success, back to `/login` on failure"),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    // Malformed input gets the same generic answer as a wrong password, so
    // the login route never reveals which part was at fault.
    let Ok(credentials) = LoginCredentials::try_from_parts(
        form.email.as_deref().unwrap_or_default(),
        form.password.as_deref().unwrap_or_default(),
    ) else {
        return flash_and_redirect(&session, Flash::danger("invalid email or password"), "/login");
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(user_id)?;
            info!(%user_id, "login succeeded");
            flash_and_redirect(&session, Flash::success("you are signed in"), "/")
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            flash_and_redirect(&session, Flash::danger(error.message()), "/login")
        }
        Err(error) => Err(error),
    }
}

/// Drop the authenticated session.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Redirect to `/login`"),
        (status = 401, description = "Not signed in", body = crate::domain::Error)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.logout();
    flash_and_redirect(&session, Flash::success("you are signed out"), "/login")
}
