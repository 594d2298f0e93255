//! Gateway client for the spreadsheet-backed script endpoint.
//!
//! Every operation is a POST to a single endpoint whose JSON body carries an
//! `action` name plus that action's payload, answered by a tagged envelope
//! `{success, data?, message?}`. The envelope is decoded into a `Result` so
//! callers are forced to handle both branches.
//!
//! Catalog reads are cached with `moka` (5-minute TTL); catalog mutations
//! invalidate the affected entry. Orders are never cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use tavolo_web::gateway::GatewayClient;
//!
//! let gateway = GatewayClient::new(&config);
//!
//! let products = gateway.products().await?;
//! let user = gateway.login("asha@example.net", "secret").await?;
//! let order_id = gateway.create_order(&new_order).await?;
//! ```

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use tavolo_core::{Category, NewOrder, NewProduct, Order, OrderStatus, Product, User};

use crate::config::AppConfig;
use cache::{CacheKey, CacheValue};

/// How long catalog reads stay cached.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the script host.
    #[error("Gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The gateway reported failure; carries the server-provided message.
    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    /// The gateway reported success without the expected data.
    #[error("Gateway response has no data")]
    MissingData,
}

impl GatewayError {
    /// The message to show the user for this failure.
    ///
    /// A rejection carries the gateway's own message; every other failure
    /// collapses to a generic transport message so internals never leak
    /// into the page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            _ => "Could not reach the restaurant service. Please try again.".to_string(),
        }
    }
}

/// Tagged result envelope returned by every gateway action.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Request body: the action name plus the action's payload fields.
#[derive(Debug, Serialize)]
struct ActionRequest<'a, P: Serialize> {
    action: &'a str,
    #[serde(flatten)]
    payload: P,
}

// =============================================================================
// Action payloads and response data shapes
// =============================================================================

#[derive(Debug, Serialize)]
struct NoPayload {}

#[derive(Debug, Serialize)]
struct IdPayload<'a> {
    id: &'a str,
}

#[derive(Debug, Serialize)]
struct ProductPayload<'a, T: Serialize> {
    product: &'a T,
}

#[derive(Debug, Serialize)]
struct NamePayload<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderPayload<'a> {
    order: &'a NewOrder,
}

#[derive(Debug, Serialize)]
struct OrdersQuery<'a> {
    #[serde(rename = "customerId", skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct StatusPayload<'a> {
    #[serde(rename = "orderId")]
    order_id: &'a str,
    status: OrderStatus,
}

/// Envelope data for authentication actions.
#[derive(Debug, Deserialize)]
struct AuthData {
    user: User,
}

/// Envelope data for order creation.
#[derive(Debug, Deserialize)]
struct CreatedOrder {
    #[serde(rename = "orderId")]
    order_id: String,
}

// =============================================================================
// GatewayClient
// =============================================================================

/// Client for the script gateway.
///
/// Cheap to clone; catalog reads share one in-memory cache.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    client: reqwest::Client,
    endpoint: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl GatewayClient {
    /// Create a new gateway client.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let cache = Cache::builder().max_capacity(8).time_to_live(CACHE_TTL).build();

        Self {
            inner: Arc::new(GatewayClientInner {
                client: reqwest::Client::new(),
                endpoint: config.gateway_endpoint().to_string(),
                cache,
            }),
        }
    }

    /// Execute one action and return its raw envelope.
    async fn execute<T, P>(&self, action: &str, payload: P) -> Result<Envelope<T>, GatewayError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let body = serde_json::to_string(&ActionRequest { action, payload })?;

        // The script host reads the raw POST body as JSON regardless of
        // content type; text/plain sidesteps its CORS preflight limitation.
        // It also 302s to a content domain, which reqwest follows.
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Gateway returned non-success status"
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(envelope) => Ok(envelope),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse gateway response"
                );
                Err(GatewayError::Parse(e))
            }
        }
    }

    /// Execute one action and decode the envelope's data.
    async fn call<T, P>(&self, action: &str, payload: P) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let envelope = self.execute::<T, P>(action, payload).await?;
        if !envelope.success {
            return Err(rejected(envelope.message));
        }
        envelope.data.ok_or(GatewayError::MissingData)
    }

    /// Execute a mutation whose data payload is irrelevant.
    async fn ack<P>(&self, action: &str, payload: P) -> Result<(), GatewayError>
    where
        P: Serialize,
    {
        let envelope = self.execute::<serde_json::Value, P>(action, payload).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(rejected(envelope.message))
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch all catalog items, including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, GatewayError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products.as_ref().clone());
        }

        let products: Vec<Product> = self.call("getProducts", NoPayload {}).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;
        Ok(products)
    }

    /// Create a catalog item; the gateway assigns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), GatewayError> {
        self.ack("addProduct", ProductPayload { product }).await?;
        self.inner.cache.invalidate(&CacheKey::Products).await;
        Ok(())
    }

    /// Update a catalog item in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn update_product(&self, product: &Product) -> Result<(), GatewayError> {
        self.ack("updateProduct", ProductPayload { product }).await?;
        self.inner.cache.invalidate(&CacheKey::Products).await;
        Ok(())
    }

    /// Delete a catalog item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), GatewayError> {
        self.ack("deleteProduct", IdPayload { id }).await?;
        self.inner.cache.invalidate(&CacheKey::Products).await;
        Ok(())
    }

    /// Fetch all menu categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, GatewayError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories.as_ref().clone());
        }

        let categories: Vec<Category> = self.call("getCategories", NoPayload {}).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(Arc::new(categories.clone())),
            )
            .await;
        Ok(categories)
    }

    /// Create a menu category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<(), GatewayError> {
        self.ack("addCategory", NamePayload { name }).await?;
        self.inner.cache.invalidate(&CacheKey::Categories).await;
        Ok(())
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate an existing account.
    ///
    /// Credentials go straight to the gateway; only the returned identity is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, GatewayError> {
        let data: AuthData = self.call("login", LoginPayload { email, password }).await?;
        Ok(data.user)
    }

    /// Register a new account and return its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects the
    /// registration (e.g. the email is already taken).
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, GatewayError> {
        let data: AuthData = self
            .call(
                "register",
                RegisterPayload {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        Ok(data.user)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create an order and return the server-assigned order id.
    ///
    /// A success reply means the order is durably recorded; callers may only
    /// clear the cart after this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it. The
    /// caller must leave its state untouched in that case.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<String, GatewayError> {
        let created: CreatedOrder = self.call("createOrder", OrderPayload { order }).await?;
        Ok(created.order_id)
    }

    /// Fetch orders, optionally filtered to one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self))]
    pub async fn orders(&self, customer_id: Option<&str>) -> Result<Vec<Order>, GatewayError> {
        self.call("getOrders", OrdersQuery { customer_id }).await
    }

    /// Update an order's status (admin operation).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects it.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), GatewayError> {
        self.ack("updateOrderStatus", StatusPayload { order_id, status })
            .await
    }
}

fn rejected(message: Option<String>) -> GatewayError {
    GatewayError::Rejected(message.unwrap_or_else(|| "The request was rejected.".to_string()))
}
