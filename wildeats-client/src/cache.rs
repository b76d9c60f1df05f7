//! redb-based fallback cache
//!
//! A durable local mirror of the remote entities, keyed by id and scoped
//! per entity type:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `orders` | `i64` | JSON-serialized `Order` |
//! | `food_items` | `i64` | JSON-serialized `FoodItem` |
//! | `users` | `i64` | JSON-serialized `User` |
//! | `shops` | `i64` | JSON-serialized `Shop` |
//!
//! The mirror is best effort: no TTL, no eviction, no migration
//! versioning. Commits are durable as soon as they return, so the offline
//! working set survives process restarts.
//!
//! # Id namespaces
//!
//! Remote-assigned ids are positive. Ids minted here for entities created
//! while the remote service is unreachable are negative, descending from
//! -1, so the two id spaces can never collide if both sources are ever
//! merged.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{FoodItem, Order, Shop, User};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const ORDERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("orders");
const FOOD_ITEMS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("food_items");
const USERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("users");
const SHOPS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("shops");

type EntityTable = TableDefinition<'static, i64, &'static [u8]>;

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Durable entity mirror backed by redb
#[derive(Clone)]
pub struct FallbackCache {
    db: Arc<Database>,
}

impl FallbackCache {
    /// Open or create the cache at the given path
    pub fn open(path: impl AsRef<Path>) -> CacheResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory cache. The mirror is lost on drop; used for tests
    /// and for clients that opt out of on-disk persistence.
    pub fn open_in_memory() -> CacheResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> CacheResult<Self> {
        // Create all tables up front so later read transactions never see a
        // missing table.
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(FOOD_ITEMS_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(SHOPS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Generic operations ==========

    fn put_value<T: Serialize>(&self, table: EntityTable, id: i64, value: &T) -> CacheResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut t = txn.open_table(table)?;
            let bytes = serde_json::to_vec(value)?;
            t.insert(id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn put_values<T, I>(&self, table: EntityTable, entries: I) -> CacheResult<()>
    where
        T: Serialize,
        I: IntoIterator<Item = (i64, T)>,
    {
        let txn = self.db.begin_write()?;
        {
            let mut t = txn.open_table(table)?;
            for (id, value) in entries {
                let bytes = serde_json::to_vec(&value)?;
                t.insert(id, bytes.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    fn get_value<T: DeserializeOwned>(&self, table: EntityTable, id: i64) -> CacheResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(table)?;
        match t.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn list_values<T: DeserializeOwned>(&self, table: EntityTable) -> CacheResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(table)?;

        let mut values = Vec::new();
        for result in t.iter()? {
            let (_key, value) = result?;
            values.push(serde_json::from_slice(value.value())?);
        }
        Ok(values)
    }

    fn remove_value(&self, table: EntityTable, id: i64) -> CacheResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut t = txn.open_table(table)?;
            t.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }

    /// Mint the next id in the local namespace: negative, descending from
    /// -1 regardless of how many remote (positive) ids are mirrored.
    fn next_local_id(&self, table: EntityTable) -> CacheResult<i64> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(table)?;

        let mut min_id: i64 = 0;
        for result in t.iter()? {
            let (key, _value) = result?;
            min_id = min_id.min(key.value());
        }
        Ok(min_id - 1)
    }

    // ========== Orders ==========

    pub fn put_order(&self, order: &Order) -> CacheResult<()> {
        self.put_value(ORDERS_TABLE, order.id, order)
    }

    /// Mirror a freshly fetched order list in a single transaction
    pub fn put_orders(&self, orders: &[Order]) -> CacheResult<()> {
        self.put_values(ORDERS_TABLE, orders.iter().map(|o| (o.id, o)))
    }

    pub fn get_order(&self, id: i64) -> CacheResult<Option<Order>> {
        self.get_value(ORDERS_TABLE, id)
    }

    pub fn list_orders(&self) -> CacheResult<Vec<Order>> {
        self.list_values(ORDERS_TABLE)
    }

    pub fn remove_order(&self, id: i64) -> CacheResult<bool> {
        self.remove_value(ORDERS_TABLE, id)
    }

    pub fn next_order_id(&self) -> CacheResult<i64> {
        self.next_local_id(ORDERS_TABLE)
    }

    // ========== Food items ==========

    pub fn put_food_item(&self, item: &FoodItem) -> CacheResult<()> {
        self.put_value(FOOD_ITEMS_TABLE, item.id, item)
    }

    pub fn put_food_items(&self, items: &[FoodItem]) -> CacheResult<()> {
        self.put_values(FOOD_ITEMS_TABLE, items.iter().map(|i| (i.id, i)))
    }

    pub fn get_food_item(&self, id: i64) -> CacheResult<Option<FoodItem>> {
        self.get_value(FOOD_ITEMS_TABLE, id)
    }

    pub fn list_food_items(&self) -> CacheResult<Vec<FoodItem>> {
        self.list_values(FOOD_ITEMS_TABLE)
    }

    pub fn remove_food_item(&self, id: i64) -> CacheResult<bool> {
        self.remove_value(FOOD_ITEMS_TABLE, id)
    }

    pub fn next_food_item_id(&self) -> CacheResult<i64> {
        self.next_local_id(FOOD_ITEMS_TABLE)
    }

    // ========== Users ==========

    pub fn put_user(&self, user: &User) -> CacheResult<()> {
        self.put_value(USERS_TABLE, user.id, user)
    }

    pub fn put_users(&self, users: &[User]) -> CacheResult<()> {
        self.put_values(USERS_TABLE, users.iter().map(|u| (u.id, u)))
    }

    pub fn get_user(&self, id: i64) -> CacheResult<Option<User>> {
        self.get_value(USERS_TABLE, id)
    }

    pub fn list_users(&self) -> CacheResult<Vec<User>> {
        self.list_values(USERS_TABLE)
    }

    pub fn remove_user(&self, id: i64) -> CacheResult<bool> {
        self.remove_value(USERS_TABLE, id)
    }

    pub fn next_user_id(&self) -> CacheResult<i64> {
        self.next_local_id(USERS_TABLE)
    }

    /// Look up a cached user by email (linear scan, the user set is tiny)
    pub fn find_user_by_email(&self, email: &str) -> CacheResult<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|u| u.email == email))
    }

    // ========== Shops ==========

    pub fn put_shop(&self, shop: &Shop) -> CacheResult<()> {
        self.put_value(SHOPS_TABLE, shop.id, shop)
    }

    pub fn put_shops(&self, shops: &[Shop]) -> CacheResult<()> {
        self.put_values(SHOPS_TABLE, shops.iter().map(|s| (s.id, s)))
    }

    pub fn get_shop(&self, id: i64) -> CacheResult<Option<Shop>> {
        self.get_value(SHOPS_TABLE, id)
    }

    pub fn list_shops(&self) -> CacheResult<Vec<Shop>> {
        self.list_values(SHOPS_TABLE)
    }

    pub fn remove_shop(&self, id: i64) -> CacheResult<bool> {
        self.remove_value(SHOPS_TABLE, id)
    }
}
