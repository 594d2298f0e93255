//! Menu route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use tavolo_core::{Category, Product};

use crate::error::Result;
use crate::filters;
use crate::middleware::Guarded;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub user: Option<CurrentUser>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub active_category: Option<String>,
}

/// Menu page handler.
///
/// Inactive catalog items stay editable in the admin area but are never
/// listed here.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    Guarded(user): Guarded,
    Query(query): Query<MenuQuery>,
) -> Result<MenuTemplate> {
    let (products, categories) =
        tokio::try_join!(state.gateway().products(), state.gateway().categories())?;

    let products = products
        .into_iter()
        .filter(|p| p.active_status)
        .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
        .collect();

    Ok(MenuTemplate {
        user,
        products,
        categories,
        active_category: query.category,
    })
}
