//! In-memory order store.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::debug;

use super::types::{IdStrategy, Order};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    orders: BTreeMap<u64, Order>,
    /// Highest id ever issued. Only consulted by [`IdStrategy::Monotonic`].
    last_issued: u64,
}

/// Process-lifetime mapping from order id to order.
///
/// Every operation takes the single lock for its whole duration, so the
/// existence check and the mutation that follows it cannot interleave with
/// another request.
#[derive(Debug, Default)]
pub struct OrderStore {
    inner: RwLock<Inner>,
    id_strategy: IdStrategy,
}

impl OrderStore {
    /// Create an empty store using the given id strategy.
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            id_strategy,
        }
    }

    /// Id strategy in effect.
    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    /// Look up a single order.
    pub async fn get(&self, id: u64) -> Result<Order, StoreError> {
        self.inner
            .read()
            .await
            .orders
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Snapshot of every order, keyed by id.
    pub async fn list(&self) -> BTreeMap<u64, Order> {
        self.inner.read().await.orders.clone()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.inner.read().await.orders.len()
    }

    /// Whether the store holds no orders.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.orders.is_empty()
    }

    /// Insert a new order in its initial status and return its id.
    pub async fn create(&self, category: impl Into<String>) -> (u64, Order) {
        let mut inner = self.inner.write().await;

        let id = match self.id_strategy {
            IdStrategy::CountPlusOne => inner.orders.len() as u64 + 1,
            IdStrategy::Monotonic => inner.last_issued + 1,
        };
        inner.last_issued = inner.last_issued.max(id);

        let order = Order::new(category);
        if let Some(replaced) = inner.orders.insert(id, order.clone()) {
            debug!("Order {} replaced by new order: {:?}", id, replaced);
        }

        (id, order)
    }

    /// Replace the status of an existing order.
    pub async fn update_status(
        &self,
        id: u64,
        status: impl Into<String>,
    ) -> Result<Order, StoreError> {
        let mut inner = self.inner.write().await;
        let order = inner.orders.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        order.status = status.into();
        Ok(order.clone())
    }

    /// Whether an order is stored under `id`.
    pub async fn contains(&self, id: u64) -> bool {
        self.inner.read().await.orders.contains_key(&id)
    }

    /// Remove an order, returning the orders that remain.
    pub async fn delete(&self, id: u64) -> Result<BTreeMap<u64, Order>, StoreError> {
        let mut inner = self.inner.write().await;
        inner.orders.remove(&id).ok_or(StoreError::NotFound(id))?;
        Ok(inner.orders.clone())
    }
}
