//! Integration tests for `GatewayClient` using wiremock HTTP mocks.

use secrecy::SecretString;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tavolo_core::{Cart, NewOrder, OrderStatus, Product};
use tavolo_web::config::AppConfig;
use tavolo_web::gateway::{GatewayClient, GatewayError};

fn test_client(endpoint: &str) -> GatewayClient {
    let config = AppConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        gateway_url: SecretString::from(endpoint),
        sentry_dsn: None,
    };
    GatewayClient::new(&config)
}

fn product_row(id: &str, name: &str, price: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "category": "Mains",
        "price": price,
        "description": "",
        "imageURL": "",
        "activeStatus": true
    })
}

#[tokio::test]
async fn products_parse_and_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"action": "getProducts"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [product_row("P-1", "Momo Platter", 450), product_row("P-2", "Thali", 780)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let first = client.products().await.expect("should parse products");
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].name, "Momo Platter");

    // Second read is served from the cache; the mock allows one call only.
    let second = client.products().await.expect("cached read");
    assert_eq!(second, first);
}

#[tokio::test]
async fn catalog_mutation_invalidates_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"action": "getProducts"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [product_row("P-1", "Momo Platter", 450)]
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({"action": "deleteProduct", "id": "P-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    client.products().await.expect("first read");
    client.delete_product("P-1").await.expect("delete");
    // The mutation dropped the cached entry; this read hits upstream again.
    client.products().await.expect("re-read after invalidation");
}

#[tokio::test]
async fn rejection_surfaces_the_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "stock unavailable"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut cart = Cart::new();
    cart.add(&Product {
        id: "A".to_string(),
        name: "Momo".to_string(),
        category: "Starters".to_string(),
        price: 500.into(),
        description: String::new(),
        image_url: String::new(),
        active_status: true,
    });
    let order = NewOrder::from_cart("U-1", &cart).expect("snapshot");

    let err = client.create_order(&order).await.expect_err("should fail");
    assert!(matches!(err, GatewayError::Rejected(_)));
    assert_eq!(err.user_message(), "stock unavailable");
}

#[tokio::test]
async fn success_without_data_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.products().await.expect_err("should fail");
    assert!(matches!(err, GatewayError::MissingData));
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("script exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.products().await.expect_err("should fail");
    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("script exploded"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sign in</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.products().await.expect_err("should fail");
    assert!(matches!(err, GatewayError::Parse(_)));
}

#[tokio::test]
async fn login_unwraps_the_user_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "login",
            "email": "asha@example.net"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "user": {
                    "id": "U-3",
                    "name": "Asha",
                    "email": "asha@example.net",
                    "role": "customer"
                }
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = client
        .login("asha@example.net", "secret")
        .await
        .expect("should log in");
    assert_eq!(user.id, "U-3");
    assert!(!user.role.is_admin());
}

#[tokio::test]
async fn create_order_returns_the_assigned_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "createOrder",
            "order": {"customerId": "U-1", "orderStatus": "Pending"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"orderId": "1042"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut cart = Cart::new();
    cart.add(&Product {
        id: "A".to_string(),
        name: "Momo".to_string(),
        category: "Starters".to_string(),
        price: 500.into(),
        description: String::new(),
        image_url: String::new(),
        active_status: true,
    });
    let order = NewOrder::from_cart("U-1", &cart).expect("snapshot");

    let order_id = client.create_order(&order).await.expect("should create");
    assert_eq!(order_id, "1042");
}

#[tokio::test]
async fn update_order_status_sends_the_wire_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "updateOrderStatus",
            "orderId": "1042",
            "status": "Delivered"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .update_order_status("1042", OrderStatus::Delivered)
        .await
        .expect("should update");
}
