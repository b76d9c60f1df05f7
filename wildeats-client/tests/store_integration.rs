// wildeats-client/tests/store_integration.rs
//
// End-to-end store behavior against a real loopback HTTP server, plus the
// offline paths against a deliberately unreachable address.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::ErrorBody;
use shared::models::{
    LoginRequest, Order, OrderDraft, OrderItem, OrderItemDraft, OrderStatus, OrderStatusUpdate,
    Role, User,
};
use std::sync::{Arc, Mutex};
use wildeats_client::{ClientConfig, LookupMode, StoreError, WildEatsClient};

// ========== Mock WildEats server ==========

#[derive(Clone, Default)]
struct ServerState {
    orders: Arc<Mutex<Vec<Order>>>,
    next_id: Arc<Mutex<i64>>,
}

impl ServerState {
    fn new() -> Self {
        Self {
            orders: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(101)),
        }
    }

    fn with_orders(orders: Vec<Order>) -> Self {
        let state = Self::new();
        *state.orders.lock().unwrap() = orders;
        state
    }
}

async fn list_orders(State(state): State<ServerState>) -> Json<Vec<Order>> {
    Json(state.orders.lock().unwrap().clone())
}

async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorBody>)> {
    state
        .orders
        .lock()
        .unwrap()
        .iter()
        .find(|o| o.id == id)
        .cloned()
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new(format!("Order {id} not found"))),
        ))
}

async fn create_order(
    State(state): State<ServerState>,
    Json(draft): Json<OrderDraft>,
) -> Json<Order> {
    let id = {
        let mut next = state.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    };
    let items: Vec<OrderItem> = draft.items.into_iter().map(|i| i.into_item()).collect();
    let mut order = Order {
        id,
        customer_id: draft.customer_id,
        customer_name: None,
        shop_id: draft.shop_id,
        items,
        total_price: draft.total_price,
        status: OrderStatus::Pending,
        notes: draft.notes,
        created_at: Utc::now(),
    };
    order.recompute_total();
    state.orders.lock().unwrap().push(order.clone());
    Json(order)
}

async fn replace_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut record): Json<Order>,
) -> Json<Order> {
    record.id = id;
    let mut orders = state.orders.lock().unwrap();
    match orders.iter_mut().find(|o| o.id == id) {
        Some(slot) => *slot = record.clone(),
        None => orders.push(record.clone()),
    }
    Json(record)
}

async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(update): Json<OrderStatusUpdate>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorBody>)> {
    let mut orders = state.orders.lock().unwrap();
    let order = orders.iter_mut().find(|o| o.id == id).ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(format!("Order {id} not found"))),
    ))?;
    order.status = update.status;
    Ok(Json(order.clone()))
}

async fn delete_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    state.orders.lock().unwrap().retain(|o| o.id != id);
    Json(serde_json::json!({ "message": "Order deleted successfully" }))
}

async fn login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, (StatusCode, Json<ErrorBody>)> {
    if request.email == "customer@gmail.com" && request.password == "secret" {
        Ok(Json(User {
            id: 2,
            name: "Customer User".to_string(),
            email: request.email,
            role: Role::Customer,
        }))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody::new("Invalid email or password")),
        ))
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/{id}",
            get(get_order).put(replace_order).delete(delete_order),
        )
        .route("/api/orders/{id}/status", patch(update_status))
        .route("/api/auth/login", post(login))
        .with_state(state)
}

async fn spawn_server(state: ServerState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

/// A loopback address with nothing listening on it
async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> WildEatsClient {
    WildEatsClient::new(ClientConfig::new(base_url).with_timeout(5)).unwrap()
}

fn burger_draft() -> OrderDraft {
    OrderDraft {
        customer_id: Some(7),
        shop_id: Some(1),
        items: vec![OrderItemDraft {
            food_id: 1,
            name: "Burger".to_string(),
            quantity: 2,
            price: Decimal::new(500, 2),
        }],
        total_price: Decimal::new(1000, 2),
        notes: None,
    }
}

// ========== Offline behavior ==========

#[tokio::test]
async fn offline_fetch_orders_returns_sample_set_every_time() {
    let client = client_for(&unreachable_base_url().await);
    let mut notices = client.subscribe_notices();

    let first = client.orders.fetch_orders().await.unwrap();
    assert_eq!(first.len(), 3);
    let mut ids: Vec<i64> = first.iter().map(|o| o.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);

    let second = client.orders.fetch_orders().await.unwrap();
    assert_eq!(first, second);
    assert!(client.is_degraded());

    let notice = notices.recv().await.unwrap();
    assert!(notice.message.contains("offline"));
}

#[tokio::test]
async fn offline_create_and_round_trip() {
    let client = client_for(&unreachable_base_url().await);

    // Browsing the menu first seeds the offline stock.
    client.food.fetch_food_items().await.unwrap();

    let order = client.orders.create_order(burger_draft()).await.unwrap();
    assert!(order.id < 0, "offline ids are minted in the negative namespace");
    assert_eq!(order.status, OrderStatus::Preparing);
    assert_eq!(order.total_price, Decimal::new(1000, 2));

    let fetched = client.orders.fetch_order_by_id(order.id).await.unwrap();
    assert_eq!(fetched.items, order.items);
    assert_eq!(fetched.total_price, order.total_price);
    assert_eq!(fetched.customer_id, Some(7));

    // The referenced stock was decremented (Chicken Burger starts at 50).
    let food = client.food.fetch_food_item_by_id(1).await.unwrap();
    assert_eq!(food.quantity, 48);
}

#[tokio::test]
async fn offline_cancel_restores_stock() {
    let client = client_for(&unreachable_base_url().await);
    client.food.fetch_food_items().await.unwrap();

    let order = client.orders.create_order(burger_draft()).await.unwrap();
    assert_eq!(client.food.fetch_food_item_by_id(1).await.unwrap().quantity, 48);

    let cancelled = client
        .orders
        .update_order_status(order.id, OrderStatus::Cancelled, Role::Seller)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(client.food.fetch_food_item_by_id(1).await.unwrap().quantity, 50);
}

#[tokio::test]
async fn offline_status_workflow_is_enforced() {
    let client = client_for(&unreachable_base_url().await);
    let order = client.orders.create_order(burger_draft()).await.unwrap();
    assert_eq!(order.status, OrderStatus::Preparing);

    // A customer cannot complete an order that is still being prepared.
    let err = client
        .orders
        .update_order_status(order.id, OrderStatus::Completed, Role::Customer)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    // Rejection mutated nothing.
    let unchanged = client.orders.fetch_order_by_id(order.id).await.unwrap();
    assert_eq!(unchanged.status, OrderStatus::Preparing);

    let ready = client
        .orders
        .update_order_status(order.id, OrderStatus::Ready, Role::Seller)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);

    let completed = client
        .orders
        .update_order_status(order.id, OrderStatus::Completed, Role::Customer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);

    // Terminal: nothing moves out of COMPLETED.
    let err = client
        .orders
        .update_order_status(order.id, OrderStatus::Pending, Role::Seller)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn offline_status_update_for_unknown_id_is_a_noop() {
    let client = client_for(&unreachable_base_url().await);
    client.orders.fetch_orders().await.unwrap();

    let result = client
        .orders
        .update_order_status(777, OrderStatus::Cancelled, Role::Seller)
        .await
        .unwrap();
    assert!(result.is_none());

    // No order was created along the way.
    let orders = client.orders.fetch_orders().await.unwrap();
    assert!(orders.iter().all(|o| o.id != 777));
}

#[tokio::test]
async fn offline_delete_reports_success() {
    let client = client_for(&unreachable_base_url().await);
    client.orders.fetch_orders().await.unwrap();

    assert!(client.orders.delete_order(2).await.unwrap());

    let orders = client.orders.fetch_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.id != 2));
}

#[tokio::test]
async fn offline_update_recomputes_total_from_items() {
    let client = client_for(&unreachable_base_url().await);
    let orders = client.orders.fetch_orders().await.unwrap();

    let mut record = orders[0].clone();
    record.items.truncate(1);
    // Deliberately stale total: the local edit path must not trust it.
    record.total_price = Decimal::new(99999, 2);

    let updated = client.orders.update_order(record.id, record.clone()).await.unwrap();
    assert_eq!(updated.total_price, record.items[0].subtotal);
}

#[tokio::test]
async fn lenient_lookup_synthesizes_a_placeholder() {
    let client = client_for(&unreachable_base_url().await);

    let order = client.orders.fetch_order_by_id(999).await.unwrap();
    assert_eq!(order.id, 999);
    assert_eq!(order.status, OrderStatus::Preparing);
    assert_eq!(order.total_price, Decimal::ZERO);
    assert_eq!(order.customer_name.as_deref(), Some("Guest Customer"));
}

#[tokio::test]
async fn strict_lookup_reports_the_miss() {
    let base_url = unreachable_base_url().await;
    let client = WildEatsClient::new(
        ClientConfig::new(&base_url)
            .with_timeout(5)
            .with_lookup(LookupMode::Strict),
    )
    .unwrap();

    let err = client.orders.fetch_order_by_id(999).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 999, .. }));
}

#[tokio::test]
async fn offline_auth_accepts_demo_accounts_and_derives_roles() {
    let client = client_for(&unreachable_base_url().await);

    let owner = client.auth.login("shop.owner@gmail.com", "password").await.unwrap();
    assert_eq!(owner.role, Role::Seller);

    let err = client.auth.login("shop.owner@gmail.com", "wrong").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let user = client
        .auth
        .register("New Seller", "shop.new@x.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(user.role, Role::Seller);
    assert!(user.id < 0);

    let err = client
        .auth
        .register("Dup", "shop.new@x.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn offline_user_directory_serves_demo_accounts() {
    let client = client_for(&unreachable_base_url().await);

    let users = client.users.fetch_users().await.unwrap();
    assert_eq!(users.len(), 2);

    let owner = client.users.fetch_user_by_id(1).await.unwrap();
    assert_eq!(owner.email, "shop.owner@gmail.com");

    let err = client.users.fetch_user_by_id(99).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    assert!(client.users.delete_user(2).await.unwrap());
    assert_eq!(client.users.fetch_users().await.unwrap().len(), 1);
}

// ========== Remote behavior ==========

#[tokio::test]
async fn online_scenario_full_workflow() {
    let base_url = spawn_server(ServerState::new()).await;
    let client = client_for(&base_url);

    let order = client.orders.create_order(burger_draft()).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.id > 0);
    assert!(!client.is_degraded());

    let prepared = client
        .orders
        .update_order_status(order.id, OrderStatus::Preparing, Role::Seller)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(prepared.status, OrderStatus::Preparing);

    // Customer tries to jump straight to COMPLETED: rejected locally,
    // before the request ever leaves the client.
    let err = client
        .orders
        .update_order_status(order.id, OrderStatus::Completed, Role::Customer)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    let ready = client
        .orders
        .update_order_status(order.id, OrderStatus::Ready, Role::Seller)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ready.status, OrderStatus::Ready);

    let completed = client
        .orders
        .update_order_status(order.id, OrderStatus::Completed, Role::Customer)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
}

#[tokio::test]
async fn online_status_update_for_unknown_id_is_a_noop() {
    let base_url = spawn_server(ServerState::new()).await;
    let client = client_for(&base_url);

    let result = client
        .orders
        .update_order_status(777, OrderStatus::Cancelled, Role::Seller)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn online_fetch_is_idempotent() {
    let mut seeded = Vec::new();
    for (i, mut order) in wildeats_client::sample::sample_orders().into_iter().enumerate() {
        order.id = 200 + i as i64;
        seeded.push(order);
    }
    let base_url = spawn_server(ServerState::with_orders(seeded.clone())).await;
    let client = client_for(&base_url);

    let first = client.orders.fetch_orders().await.unwrap();
    let second = client.orders.fetch_orders().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), seeded.len());
}

#[tokio::test]
async fn online_create_then_fetch_round_trips() {
    let base_url = spawn_server(ServerState::new()).await;
    let client = client_for(&base_url);

    let draft = burger_draft();
    let created = client.orders.create_order(draft).await.unwrap();
    let fetched = client.orders.fetch_order_by_id(created.id).await.unwrap();

    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].subtotal, Decimal::new(1000, 2));
    assert_eq!(fetched.total_price, Decimal::new(1000, 2));
    assert_eq!(fetched.customer_id, Some(7));
}

#[tokio::test]
async fn server_validation_message_surfaces_verbatim() {
    let base_url = spawn_server(ServerState::new()).await;
    let client = client_for(&base_url);

    let err = client.auth.login("customer@gmail.com", "nope").await.unwrap_err();
    match err {
        StoreError::Validation(message) => assert_eq!(message, "Invalid email or password"),
        other => panic!("expected validation error, got {other:?}"),
    }
    // A structured rejection is not an outage.
    assert!(!client.is_degraded());
}

#[tokio::test]
async fn remote_404_yields_placeholder_in_lenient_mode() {
    let base_url = spawn_server(ServerState::new()).await;
    let client = client_for(&base_url);

    let order = client.orders.fetch_order_by_id(424242).await.unwrap();
    assert_eq!(order.customer_name.as_deref(), Some("Guest Customer"));
    assert!(!client.is_degraded());
}

#[tokio::test]
async fn degraded_clears_after_service_recovers() {
    // Reserve a port, then leave it closed for the first fetch.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    client.orders.fetch_orders().await.unwrap();
    assert!(client.is_degraded());

    // The service comes back on the same address.
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let state = ServerState::with_orders(Vec::new());
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    let orders = client.orders.fetch_orders().await.unwrap();
    assert!(orders.is_empty());
    assert!(!client.is_degraded());
}
