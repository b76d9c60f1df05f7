//! Order store
//!
//! Holds the working set of orders, delegates status changes to the
//! workflow check, and keeps a consistent view available when the remote
//! service is unreachable.
//!
//! # Stale responses
//!
//! In-flight requests are never cancelled, so a slow earlier response can
//! arrive after a faster later one for the same order. Every operation
//! draws a sequence number up front and results are applied to the working
//! set only if no higher-sequenced result for that order id has landed
//! already: later-issued requests win, deterministically.

use crate::cache::FallbackCache;
use crate::config::LookupMode;
use crate::error::{HttpError, StoreError, StoreResult};
use crate::http::HttpClient;
use crate::notice::{NoticeLevel, StatusHub};
use crate::sample;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{Order, OrderDraft, OrderItem, OrderStatus, OrderStatusUpdate, Role};
use shared::workflow;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

const ORDERS_PATH: &str = "api/orders";

/// Order working set with remote-first, fallback-second semantics
pub struct OrderStore {
    http: HttpClient,
    cache: FallbackCache,
    hub: Arc<StatusHub>,
    lookup: LookupMode,
    orders: RwLock<Vec<Order>>,
    /// Last applied request sequence per order id
    applied: Mutex<HashMap<i64, u64>>,
    op_seq: AtomicU64,
}

impl OrderStore {
    pub fn new(
        http: HttpClient,
        cache: FallbackCache,
        hub: Arc<StatusHub>,
        lookup: LookupMode,
    ) -> Self {
        Self {
            http,
            cache,
            hub,
            lookup,
            orders: RwLock::new(Vec::new()),
            applied: Mutex::new(HashMap::new()),
            op_seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the in-memory working set
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    // ========== Fetch ==========

    /// Fetch all orders, replacing the working set.
    ///
    /// Never fails on an unreachable service: the fallback cache (seeded
    /// with the built-in sample set when empty) stands in and the client
    /// goes degraded.
    pub async fn fetch_orders(&self) -> StoreResult<Vec<Order>> {
        let seq = self.next_seq();
        match self.http.get::<Vec<Order>>(ORDERS_PATH).await {
            Ok(list) => {
                self.hub.clear_degraded();
                self.cache.put_orders(&list)?;
                self.replace_all(seq, list.clone()).await;
                Ok(list)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                let list = self.fallback_orders()?;
                self.replace_all(seq, list.clone()).await;
                Ok(list)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch the orders placed by one customer
    pub async fn fetch_my_orders(&self, user_id: i64) -> StoreResult<Vec<Order>> {
        self.fetch_filtered(format!("{ORDERS_PATH}/my-orders?userId={user_id}"), |o| {
            o.customer_id == Some(user_id)
        })
        .await
    }

    /// Fetch the orders of one shop (seller view)
    pub async fn fetch_orders_by_shop(&self, shop_id: i64) -> StoreResult<Vec<Order>> {
        self.fetch_filtered(format!("{ORDERS_PATH}/shop/{shop_id}"), |o| {
            o.shop_id == Some(shop_id)
        })
        .await
    }

    /// Fetch the orders of one shop in one status (seller board column)
    pub async fn fetch_orders_by_shop_and_status(
        &self,
        shop_id: i64,
        status: OrderStatus,
    ) -> StoreResult<Vec<Order>> {
        self.fetch_filtered(
            format!("{ORDERS_PATH}/shop/{shop_id}/status/{status}"),
            |o| o.shop_id == Some(shop_id) && o.status == status,
        )
        .await
    }

    /// Fetch a single order.
    ///
    /// When the order is absent from both the remote service and the cache,
    /// lenient mode hands back a placeholder so the detail view always has
    /// something to render; strict mode reports the miss.
    pub async fn fetch_order_by_id(&self, id: i64) -> StoreResult<Order> {
        let seq = self.next_seq();
        match self.http.get::<Order>(&format!("{ORDERS_PATH}/{id}")).await {
            Ok(order) => {
                self.hub.clear_degraded();
                self.cache.put_order(&order)?;
                self.apply(seq, order.clone()).await;
                Ok(order)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.lookup_local_or_placeholder(id).await
            }
            Err(HttpError::Api { status: 404, .. }) => {
                // The remote answered: it has no such order. Same local
                // lookup path, without degrading.
                self.lookup_local_or_placeholder(id).await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn lookup_local_or_placeholder(&self, id: i64) -> StoreResult<Order> {
        if let Some(order) = self.find_local(id).await? {
            return Ok(order);
        }
        match self.lookup {
            LookupMode::Lenient => {
                self.hub.notify(
                    NoticeLevel::Info,
                    format!("Order {id} not found offline. Showing a placeholder."),
                );
                Ok(sample::placeholder_order(id))
            }
            LookupMode::Strict => Err(StoreError::NotFound { entity: "order", id }),
        }
    }

    // ========== Mutations ==========

    /// Create an order from a cart draft.
    ///
    /// The draft is forwarded as-is; payload validation is the remote
    /// service's concern. Offline, the order is minted locally with a
    /// negative id and `PREPARING` status, and referenced stock quantities
    /// are decremented in the cache.
    pub async fn create_order(&self, draft: OrderDraft) -> StoreResult<Order> {
        let seq = self.next_seq();
        match self.http.post::<Order, _>(ORDERS_PATH, &draft).await {
            Ok(order) => {
                self.hub.clear_degraded();
                self.cache.put_order(&order)?;
                self.apply(seq, order.clone()).await;
                self.hub
                    .notify(NoticeLevel::Success, "Order created successfully!");
                Ok(order)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                let order = self.create_order_offline(seq, draft).await?;
                self.hub
                    .notify(NoticeLevel::Success, "Order created with offline data.");
                Ok(order)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_order_offline(&self, seq: u64, draft: OrderDraft) -> StoreResult<Order> {
        // Seed the sample set first so the new order joins a consistent
        // offline list instead of appearing alone.
        let _ = self.fallback_orders()?;

        let id = self.cache.next_order_id()?;
        let items: Vec<OrderItem> = draft.items.into_iter().map(|i| i.into_item()).collect();
        let mut order = Order {
            id,
            customer_id: draft.customer_id,
            customer_name: None,
            shop_id: draft.shop_id,
            items,
            total_price: Decimal::ZERO,
            status: OrderStatus::Preparing,
            notes: draft.notes,
            created_at: Utc::now(),
        };
        order.recompute_total();

        for item in &order.items {
            if let Some(food_id) = item.food_id
                && let Some(mut food) = self.cache.get_food_item(food_id)?
            {
                food.quantity = food.quantity.saturating_sub(item.quantity);
                self.cache.put_food_item(&food)?;
            }
        }

        self.cache.put_order(&order)?;
        self.apply(seq, order.clone()).await;
        Ok(order)
    }

    /// Full-record replace-by-id. Last write wins, there is no version
    /// token.
    pub async fn update_order(&self, id: i64, mut record: Order) -> StoreResult<Order> {
        record.id = id;
        let seq = self.next_seq();
        match self
            .http
            .put::<Order, _>(&format!("{ORDERS_PATH}/{id}"), &record)
            .await
        {
            Ok(order) => {
                self.hub.clear_degraded();
                self.cache.put_order(&order)?;
                self.apply(seq, order.clone()).await;
                self.hub
                    .notify(NoticeLevel::Success, "Order updated successfully!");
                Ok(order)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                // Local edit: the total follows the items.
                record.recompute_total();
                self.cache.put_order(&record)?;
                self.apply(seq, record.clone()).await;
                self.hub
                    .notify(NoticeLevel::Success, "Order updated with offline data.");
                Ok(record)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Move an order along the status workflow.
    ///
    /// The transition is checked against the workflow table before any
    /// network call; an illegal edge or actor is rejected without touching
    /// any stored order. Offline, an unknown id yields `Ok(None)` rather
    /// than minting an order, and cancelling restores the stock that the
    /// offline creation decremented.
    pub async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
        actor: Role,
    ) -> StoreResult<Option<Order>> {
        let known = self.find_local(id).await?;
        if let Some(current) = &known {
            workflow::check_transition(current.status, status, actor)?;
        }

        let seq = self.next_seq();
        match self
            .http
            .patch::<Order, _>(
                &format!("{ORDERS_PATH}/{id}/status"),
                &OrderStatusUpdate { status },
            )
            .await
        {
            Ok(order) => {
                self.hub.clear_degraded();
                self.cache.put_order(&order)?;
                self.apply(seq, order.clone()).await;
                self.hub.notify(
                    NoticeLevel::Success,
                    format!("Order status updated to {status}"),
                );
                Ok(Some(order))
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                let Some(mut order) = known else {
                    return Ok(None);
                };
                if status == OrderStatus::Cancelled && order.status != OrderStatus::Cancelled {
                    self.restore_stock(&order)?;
                }
                order.status = status;
                self.cache.put_order(&order)?;
                self.apply(seq, order.clone()).await;
                self.hub.notify(
                    NoticeLevel::Success,
                    format!("Order status updated to {status} (offline)"),
                );
                Ok(Some(order))
            }
            // Absent ids are a no-op, not an error, on this operation.
            Err(HttpError::Api { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete an order. The local removal happens whether or not the remote
    /// call went through (fire-and-forget), so this reports `true` unless a
    /// structured error came back.
    pub async fn delete_order(&self, id: i64) -> StoreResult<bool> {
        let seq = self.next_seq();
        match self.http.delete(&format!("{ORDERS_PATH}/{id}")).await {
            Ok(()) => self.hub.clear_degraded(),
            Err(HttpError::Unavailable(reason)) => self.hub.enter_degraded(&reason),
            Err(err) => return Err(err.into()),
        }

        self.cache.remove_order(id)?;
        self.remove_local(seq, id).await;
        self.hub
            .notify(NoticeLevel::Success, "Order deleted successfully!");
        Ok(true)
    }

    // ========== Internals ==========

    fn next_seq(&self) -> u64 {
        self.op_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a single-order result to the working set. Returns false when
    /// the result lost to a higher-sequenced application for the same id.
    async fn apply(&self, seq: u64, order: Order) -> bool {
        let mut applied = self.applied.lock().await;
        let last = applied.get(&order.id).copied().unwrap_or(0);
        if seq < last {
            tracing::debug!(order_id = order.id, seq, last, "discarding stale response");
            return false;
        }
        applied.insert(order.id, seq);

        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => *slot = order,
            None => orders.push(order),
        }
        true
    }

    /// Replace the whole working set, keeping any entity that a
    /// higher-sequenced single-order application already updated.
    async fn replace_all(&self, seq: u64, mut list: Vec<Order>) {
        let mut applied = self.applied.lock().await;
        let mut orders = self.orders.write().await;
        for incoming in list.iter_mut() {
            let last = applied.get(&incoming.id).copied().unwrap_or(0);
            if last > seq {
                if let Some(current) = orders.iter().find(|o| o.id == incoming.id) {
                    *incoming = current.clone();
                }
            } else {
                applied.insert(incoming.id, seq);
            }
        }
        *orders = list;
    }

    async fn remove_local(&self, seq: u64, id: i64) {
        // Keep the sequence entry so a stale in-flight response cannot
        // resurrect the deleted order.
        self.applied.lock().await.insert(id, seq);
        self.orders.write().await.retain(|o| o.id != id);
    }

    async fn find_local(&self, id: i64) -> StoreResult<Option<Order>> {
        if let Some(order) = self.orders.read().await.iter().find(|o| o.id == id) {
            return Ok(Some(order.clone()));
        }
        Ok(self.cache.get_order(id)?)
    }

    fn fallback_orders(&self) -> StoreResult<Vec<Order>> {
        let cached = self.cache.list_orders()?;
        if !cached.is_empty() {
            return Ok(cached);
        }
        let samples = sample::sample_orders();
        self.cache.put_orders(&samples)?;
        Ok(samples)
    }

    async fn fetch_filtered<F>(&self, path: String, filter: F) -> StoreResult<Vec<Order>>
    where
        F: Fn(&Order) -> bool,
    {
        let seq = self.next_seq();
        match self.http.get::<Vec<Order>>(&path).await {
            Ok(list) => {
                self.hub.clear_degraded();
                self.cache.put_orders(&list)?;
                for order in &list {
                    self.apply(seq, order.clone()).await;
                }
                Ok(list)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                Ok(self
                    .fallback_orders()?
                    .into_iter()
                    .filter(|o| filter(o))
                    .collect())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn restore_stock(&self, order: &Order) -> StoreResult<()> {
        for item in &order.items {
            if let Some(food_id) = item.food_id
                && let Some(mut food) = self.cache.get_food_item(food_id)?
            {
                food.quantity += item.quantity;
                self.cache.put_food_item(&food)?;
            }
        }
        Ok(())
    }
}
