//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /menu                   - Menu with category filter
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page (public view)
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Adjust quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Submit the cart as an order
//!
//! # Orders
//! GET  /orders                 - Customer order history
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Admin (requires admin role)
//! GET  /admin                      - Dashboard overview
//! GET  /admin/products             - Product list + forms
//! POST /admin/products             - Create product
//! POST /admin/products/{id}        - Update product
//! POST /admin/products/{id}/delete - Delete product
//! GET  /admin/categories           - Category list + form
//! POST /admin/categories           - Create category
//! GET  /admin/orders               - All orders
//! POST /admin/orders/{id}/status   - Update an order's status
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod menu;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route(
            "/products",
            get(admin::products).post(admin::create_product),
        )
        .route("/products/{id}", post(admin::update_product))
        .route("/products/{id}/delete", post(admin::delete_product))
        .route(
            "/categories",
            get(admin::categories).post(admin::create_category),
        )
        .route("/orders", get(admin::orders))
        .route("/orders/{id}/status", post(admin::update_order_status))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/menu", get(menu::index))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/orders", get(orders::index))
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}

/// Compose the full application: routes, session layer, static files.
///
/// Used by `main` and by the integration tests.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The gateway is deliberately not
/// probed here; its availability is a per-action concern.
async fn health() -> &'static str {
    "ok"
}
