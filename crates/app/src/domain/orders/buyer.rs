//! Buyer order history.

use std::{cmp::Reverse, sync::Arc};

use tracing::info;

use crate::{
    domain::orders::{
        OrdersGateway,
        models::{Order, OrderId},
    },
    errors::StoreError,
};

/// Read-only view of the caller's own orders, plus cancellation.
#[derive(Clone)]
pub struct BuyerOrders {
    gateway: Arc<dyn OrdersGateway>,
}

impl BuyerOrders {
    #[must_use]
    pub fn new(gateway: Arc<dyn OrdersGateway>) -> Self {
        Self { gateway }
    }

    /// The caller's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the list cannot be read.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.gateway.list_own().await?;

        orders.sort_by_key(|order| Reverse(order.created_at));

        Ok(orders)
    }

    /// # Errors
    ///
    /// Returns the gateway error when the order cannot be read.
    pub async fn get(&self, order: OrderId) -> Result<Order, StoreError> {
        self.gateway.get_order(order).await
    }

    /// Cancel an order. Whether the current status still allows it is
    /// decided by the server; see [`OrderStatus::is_cancellable`] for the
    /// rule it applies.
    ///
    /// [`OrderStatus::is_cancellable`]: crate::domain::orders::OrderStatus::is_cancellable
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the server refuses.
    pub async fn cancel(&self, order: OrderId) -> Result<Order, StoreError> {
        let cancelled = self.gateway.cancel_order(order).await?;

        info!(order_id = %order, "cancelled order");

        Ok(cancelled)
    }
}

impl std::fmt::Debug for BuyerOrders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuyerOrders").finish_non_exhaustive()
    }
}
