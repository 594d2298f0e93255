//! Admin area route handlers.
//!
//! Everything here sits behind the admin guard. Catalog and order data is
//! always re-fetched from the gateway after a mutation; nothing is edited
//! locally.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use tavolo_core::{Category, NewProduct, Order, OrderStatus, Product};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form and Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Product create/update form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    /// Parsed into a decimal at the input boundary.
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Checkbox: present when checked.
    pub active: Option<String>,
}

/// Category create form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

/// Order status form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard overview template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user: Option<CurrentUser>,
    pub product_count: usize,
    pub category_count: usize,
    pub order_count: usize,
    pub pending_count: usize,
}

/// Product management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate {
    pub user: Option<CurrentUser>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Category management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/categories.html")]
pub struct CategoriesTemplate {
    pub user: Option<CurrentUser>,
    pub categories: Vec<Category>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Order management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct OrdersTemplate {
    pub user: Option<CurrentUser>,
    pub orders: Vec<Order>,
    pub statuses: [OrderStatus; 4],
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Dashboard overview handler.
#[instrument(skip(state, admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<DashboardTemplate> {
    let (products, categories, orders) = tokio::try_join!(
        state.gateway().products(),
        state.gateway().categories(),
        state.gateway().orders(None)
    )?;

    let pending_count = orders
        .iter()
        .filter(|o| o.order_status == OrderStatus::Pending)
        .count();

    Ok(DashboardTemplate {
        user: Some(admin),
        product_count: products.len(),
        category_count: categories.len(),
        order_count: orders.len(),
        pending_count,
    })
}

/// Product list handler. Shows inactive items too, unlike the public menu.
#[instrument(skip(state, admin))]
pub async fn products(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> Result<ProductsTemplate> {
    let (products, categories) =
        tokio::try_join!(state.gateway().products(), state.gateway().categories())?;

    Ok(ProductsTemplate {
        user: Some(admin),
        products,
        categories,
        error: query.error,
        success: query.success,
    })
}

/// Parse and validate the shared product form fields.
///
/// Validation failures stop here; invalid input never reaches the gateway.
fn parse_product_form(form: &ProductForm) -> std::result::Result<NewProduct, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Name is required.".to_string());
    }
    if form.category.trim().is_empty() {
        return Err("Category is required.".to_string());
    }

    let price: Decimal = form
        .price
        .trim()
        .parse()
        .map_err(|_| "Price must be a number.".to_string())?;
    if price.is_sign_negative() {
        return Err("Price cannot be negative.".to_string());
    }

    Ok(NewProduct {
        name: name.to_string(),
        category: form.category.trim().to_string(),
        price,
        description: form.description.trim().to_string(),
        image_url: form.image_url.trim().to_string(),
        active_status: form.active.is_some(),
    })
}

/// Create product handler.
#[instrument(skip(state, _admin, form))]
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Response {
    let product = match parse_product_form(&form) {
        Ok(product) => product,
        Err(message) => return redirect_with_error("/admin/products", &message),
    };

    match state.gateway().create_product(&product).await {
        Ok(()) => Redirect::to("/admin/products?success=created").into_response(),
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            redirect_with_error("/admin/products", &e.user_message())
        }
    }
}

/// Update product handler.
#[instrument(skip(state, _admin, form))]
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let parsed = match parse_product_form(&form) {
        Ok(product) => product,
        Err(message) => return redirect_with_error("/admin/products", &message),
    };

    let product = Product {
        id,
        name: parsed.name,
        category: parsed.category,
        price: parsed.price,
        description: parsed.description,
        image_url: parsed.image_url,
        active_status: parsed.active_status,
    };

    match state.gateway().update_product(&product).await {
        Ok(()) => Redirect::to("/admin/products?success=updated").into_response(),
        Err(e) => {
            tracing::error!("Failed to update product {}: {e}", product.id);
            redirect_with_error("/admin/products", &e.user_message())
        }
    }
}

/// Delete product handler.
#[instrument(skip(state, _admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    match state.gateway().delete_product(&id).await {
        Ok(()) => Redirect::to("/admin/products?success=deleted").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete product {id}: {e}");
            redirect_with_error("/admin/products", &e.user_message())
        }
    }
}

/// Category list handler.
#[instrument(skip(state, admin))]
pub async fn categories(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> Result<CategoriesTemplate> {
    let categories = state.gateway().categories().await?;

    Ok(CategoriesTemplate {
        user: Some(admin),
        categories,
        error: query.error,
        success: query.success,
    })
}

/// Create category handler.
#[instrument(skip(state, _admin))]
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CategoryForm>,
) -> Response {
    let name = form.name.trim();
    if name.is_empty() {
        return redirect_with_error("/admin/categories", "Name is required.");
    }

    match state.gateway().create_category(name).await {
        Ok(()) => Redirect::to("/admin/categories?success=created").into_response(),
        Err(e) => {
            tracing::error!("Failed to create category: {e}");
            redirect_with_error("/admin/categories", &e.user_message())
        }
    }
}

/// All-orders handler, newest first.
#[instrument(skip(state, admin))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> Result<OrdersTemplate> {
    let mut orders = state.gateway().orders(None).await?;
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(OrdersTemplate {
        user: Some(admin),
        orders,
        statuses: OrderStatus::ALL,
        error: query.error,
        success: query.success,
    })
}

/// Update order status handler.
#[instrument(skip(state, _admin))]
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let Ok(status) = form.status.parse::<OrderStatus>() else {
        return redirect_with_error("/admin/orders", "Unknown order status.");
    };

    match state.gateway().update_order_status(&id, status).await {
        Ok(()) => Redirect::to("/admin/orders?success=updated").into_response(),
        Err(e) => {
            tracing::error!("Failed to update order {id}: {e}");
            redirect_with_error("/admin/orders", &e.user_message())
        }
    }
}

fn redirect_with_error(path: &str, message: &str) -> Response {
    let encoded = urlencoding::encode(message);
    Redirect::to(&format!("{path}?error={encoded}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, category: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            category: category.to_string(),
            price: price.to_string(),
            description: String::new(),
            image_url: String::new(),
            active: Some("on".to_string()),
        }
    }

    #[test]
    fn parses_a_valid_form() {
        let parsed = parse_product_form(&form("Momo", "Starters", "450.50")).expect("valid form");
        assert_eq!(parsed.name, "Momo");
        assert_eq!(parsed.price.to_string(), "450.50");
        assert!(parsed.active_status);
    }

    #[test]
    fn rejects_blank_name_and_category() {
        assert!(parse_product_form(&form("  ", "Starters", "450")).is_err());
        assert!(parse_product_form(&form("Momo", "", "450")).is_err());
    }

    #[test]
    fn rejects_unparseable_and_negative_prices() {
        assert!(parse_product_form(&form("Momo", "Starters", "lots")).is_err());
        assert!(parse_product_form(&form("Momo", "Starters", "-5")).is_err());
    }

    #[test]
    fn unchecked_box_means_inactive() {
        let mut f = form("Momo", "Starters", "450");
        f.active = None;
        let parsed = parse_product_form(&f).expect("valid form");
        assert!(!parsed.active_status);
    }
}
