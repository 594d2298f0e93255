//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use tavolo_core::{Order, Product};

use crate::filters;
use crate::middleware::Guarded;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Number of featured items on the home page.
const SPECIALS_COUNT: usize = 3;

/// Number of recent orders shown to a returning customer.
const RECENT_ORDERS_COUNT: usize = 2;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub specials: Vec<Product>,
    pub recent_orders: Vec<Order>,
}

/// Home page handler.
///
/// Gateway failures degrade to empty sections; the page itself always
/// renders.
#[instrument(skip(state, user))]
pub async fn home(State(state): State<AppState>, Guarded(user): Guarded) -> HomeTemplate {
    let specials = match state.gateway().products().await {
        Ok(products) => products
            .into_iter()
            .filter(|p| p.active_status)
            .take(SPECIALS_COUNT)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch featured products: {e}");
            Vec::new()
        }
    };

    let recent_orders = match &user {
        Some(u) if !u.is_admin() => match state.gateway().orders(Some(&u.id)).await {
            Ok(mut orders) => {
                orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                orders.truncate(RECENT_ORDERS_COUNT);
                orders
            }
            Err(e) => {
                tracing::warn!("Failed to fetch recent orders: {e}");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    HomeTemplate {
        user,
        specials,
        recent_orders,
    }
}
