//! Authentication route handlers.
//!
//! Handles login, registration, and logout. Credential checking is fully
//! delegated to the gateway; this layer only records the returned identity
//! in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use tavolo_core::access::Destination;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{Guarded, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
///
/// The guard bounces authenticated users to their landing page.
pub async fn login_page(
    Guarded(user): Guarded,
    Query(query): Query<MessageQuery>,
) -> LoginTemplate {
    LoginTemplate {
        user,
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return redirect_with_error("/auth/login", "Email and password are required.");
    }

    match state.gateway().login(&form.email, &form.password).await {
        Ok(identity) => establish_session(&session, identity.into()).await,
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            redirect_with_error("/auth/login", &e.user_message())
        }
    }
}

/// Display the registration page.
pub async fn register_page(
    Guarded(user): Guarded,
    Query(query): Query<MessageQuery>,
) -> RegisterTemplate {
    RegisterTemplate {
        user,
        error: query.error,
    }
}

/// Handle registration form submission.
///
/// A successful registration signs the user straight in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty() {
        return redirect_with_error("/auth/register", "All fields are required.");
    }

    match state
        .gateway()
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(identity) => establish_session(&session, identity.into()).await,
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            redirect_with_error("/auth/register", &e.user_message())
        }
    }
}

/// Handle logout.
///
/// Clears the identity from the session; the cart survives sign-out.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();

    Redirect::to("/").into_response()
}

/// Record the identity in the session and land the user per role.
async fn establish_session(session: &Session, user: CurrentUser) -> Response {
    if let Err(e) = set_current_user(session, &user).await {
        tracing::error!("Failed to set session: {e}");
        return redirect_with_error(
            "/auth/login",
            "Could not start your session. Please try again.",
        );
    }

    set_sentry_user(&user.id, Some(&user.email));

    let landing = if user.is_admin() {
        Destination::AdminDashboard.path()
    } else {
        Destination::Home.path()
    };
    Redirect::to(landing).into_response()
}

fn redirect_with_error(path: &str, message: &str) -> Response {
    let encoded = urlencoding::encode(message);
    Redirect::to(&format!("{path}?error={encoded}")).into_response()
}
