//! Authentication extractors.
//!
//! These consume the navigation guard at the routing boundary: every page
//! handler declares the extractor matching its needs and never checks roles
//! itself. The guard is a pure function of (identity, requested path) and is
//! re-evaluated on every request.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use tavolo_core::access::{self, Access, Destination, RouteArea, Viewer};

use crate::models::{CurrentUser, session_keys};

/// Map a request path onto the guard's logical areas.
fn area_for_path(path: &str) -> RouteArea {
    if path.starts_with("/admin") {
        RouteArea::Admin
    } else if path.starts_with("/orders") {
        RouteArea::OrderHistory
    } else if path.starts_with("/checkout") {
        RouteArea::Checkout
    } else if path.starts_with("/auth") {
        RouteArea::Auth
    } else if path.starts_with("/cart") {
        RouteArea::CartView
    } else {
        RouteArea::Public
    }
}

/// Read the current user from the session.
///
/// A missing session, an absent key, and an unparseable stored identity all
/// degrade to anonymous; corruption is swallowed, never surfaced.
async fn current_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Redirect rejection produced by the guard.
pub struct GuardRedirect(&'static str);

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// Extractor that evaluates the navigation guard for this request's path.
///
/// On `Render` it yields the (optional) identity for the nav bar; a
/// redirect decision becomes the rejection. Attached to every page handler,
/// so the policy runs on each navigation, including bouncing logged-in
/// users off the login and register pages.
///
/// # Example
///
/// ```rust,ignore
/// async fn page(Guarded(user): Guarded) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct Guarded(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for Guarded
where
    S: Send + Sync,
{
    type Rejection = GuardRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await;
        let viewer = user.as_ref().map_or(Viewer::Anonymous, CurrentUser::viewer);

        match access::route_access(viewer, area_for_path(parts.uri.path())) {
            Access::Render => Ok(Self(user)),
            Access::Redirect(destination) => Err(GuardRedirect(destination.path())),
        }
    }
}

/// Extractor that requires an authenticated identity (customer or admin).
///
/// Used by checkout and order history; an anonymous visitor is redirected
/// to the login page.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = GuardRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Guarded(user) = Guarded::from_request_parts(parts, state).await?;
        user.map(Self)
            .ok_or(GuardRedirect(Destination::Login.path()))
    }
}

/// Extractor that requires the admin role.
///
/// The path-based guard already sends non-admins to login for `/admin`
/// paths; the role re-check keeps the type honest if this extractor is ever
/// attached outside that area.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GuardRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(Self(user))
        } else {
            Err(GuardRedirect(Destination::Login.path()))
        }
    }
}

/// Helper to set the current user in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// The cart is deliberately left alone; signing out does not empty it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
