//! Cart and checkout route handlers.
//!
//! Cart mutations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session and is only ever mutated
//! here; mutations are synchronous run-to-completion within a request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use tavolo_core::{Cart, NewOrder};

use crate::filters;
use crate::middleware::{Guarded, RequireAuth};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the visitor's cart from the session.
///
/// A missing or unparseable stored cart is an empty cart.
async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the visitor's cart in the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: String,
}

/// Quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub id: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub user: Option<CurrentUser>,
    pub cart: Cart,
    pub error: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: Cart,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page. Viewing is public; only submission needs login.
#[instrument(skip(session, user))]
pub async fn show(
    Guarded(user): Guarded,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> CartShowTemplate {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        user,
        cart,
        error: query.error,
    }
}

/// Add one unit of a catalog item to the cart (HTMX).
///
/// The unit price is captured from the catalog at add time; re-adding the
/// same item only increments its quantity. Returns the count badge with an
/// HTMX trigger so other cart fragments refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddForm>,
) -> Response {
    let product = match state.gateway().products().await {
        Ok(products) => products
            .into_iter()
            .find(|p| p.id == form.product_id && p.active_status),
        Err(e) => {
            tracing::error!("Failed to fetch catalog for add-to-cart: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"error\">Could not add to cart</span>"),
            )
                .into_response();
        }
    };

    let Some(product) = product else {
        return (
            StatusCode::NOT_FOUND,
            Html("<span class=\"error\">Unknown menu item</span>"),
        )
            .into_response();
    };

    let mut cart = load_cart(&session).await;
    cart.add(&product);

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response()
}

/// Adjust a line item's quantity (HTMX).
///
/// Quantity is clamped to a minimum of 1; removal is a separate action.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(&form.id, form.delta);

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Remove a line item from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.remove(&form.id);

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}

/// Submit the cart as an order.
///
/// Atomic from the cart's perspective: the session cart is cleared only
/// after the gateway confirms the order, and is left untouched on any
/// failure. Exactly one gateway call; no retry. Anonymous visitors are
/// redirected to login by the extractor before the gateway is contacted.
#[instrument(skip(state, session, user))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Response {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        // Nothing to submit; the cart page explains itself.
        return Redirect::to("/cart").into_response();
    }

    let order = match NewOrder::from_cart(user.id.clone(), &cart) {
        Ok(order) => order,
        Err(e) => {
            tracing::error!("Failed to snapshot cart: {e}");
            return redirect_with_error("Could not prepare your order. Please try again.");
        }
    };

    match state.gateway().create_order(&order).await {
        Ok(order_id) => {
            cart.clear();
            if let Err(e) = save_cart(&session, &cart).await {
                tracing::error!("Failed to clear cart after order {order_id}: {e}");
            }
            tracing::info!(order_id = %order_id, customer_id = %user.id, "Order placed");
            Redirect::to("/orders?success=placed").into_response()
        }
        Err(e) => {
            tracing::warn!("Order submission failed: {e}");
            redirect_with_error(&e.user_message())
        }
    }
}

fn redirect_with_error(message: &str) -> Response {
    let encoded = urlencoding::encode(message);
    Redirect::to(&format!("/cart?error={encoded}")).into_response()
}
