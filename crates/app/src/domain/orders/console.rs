//! Admin order console.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    domain::orders::{
        OrderStatus, OrdersGateway, StatusFilter,
        models::{Order, OrderId},
    },
    errors::StoreError,
};

/// Aggregate figures over every cached order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub by_status: FxHashMap<OrderStatus, usize>,
    /// Sum of order totals, cancelled orders excluded.
    pub revenue: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }
}

/// Administrator view over all orders.
///
/// The cached list is always the unfiltered server answer; the filter is
/// applied on read. Statuses shown are only ever those the server returned.
pub struct AdminOrderConsole {
    gateway: Arc<dyn OrdersGateway>,
    orders: Vec<Order>,
    filter: StatusFilter,
}

impl AdminOrderConsole {
    #[must_use]
    pub fn new(gateway: Arc<dyn OrdersGateway>) -> Self {
        Self {
            gateway,
            orders: Vec::new(),
            filter: StatusFilter::All,
        }
    }

    #[must_use]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Every cached order, ignoring the filter.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Cached orders matching the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| self.filter.matches(order.status))
            .collect()
    }

    /// Last status the server reported for an order.
    #[must_use]
    pub fn displayed_status(&self, order: OrderId) -> Option<OrderStatus> {
        self.orders
            .iter()
            .find(|cached| cached.id == order)
            .map(|cached| cached.status)
    }

    /// Re-read every order from the server.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the cache is kept in that case.
    pub async fn refresh(&mut self) -> Result<Vec<&Order>, StoreError> {
        self.orders = self.gateway.list_all().await?;

        Ok(self.visible())
    }

    /// Request a status transition, then re-read the order list whether or
    /// not the server accepted it.
    ///
    /// Illegal targets are not filtered here; the server decides.
    ///
    /// # Errors
    ///
    /// Returns the transition error when the server rejects it. A failed
    /// re-read after an accepted transition is logged, not returned.
    pub async fn change_status(
        &mut self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let result = self.gateway.update_status(order, status).await;

        match &result {
            Ok(updated) => {
                info!(order_id = %order, status = %updated.status, "changed order status");

                if let Some(cached) = self.orders.iter_mut().find(|cached| cached.id == order) {
                    *cached = updated.clone();
                }
            }
            Err(error) => {
                warn!(order_id = %order, %status, "order status change rejected: {error}");
            }
        }

        if let Err(error) = self.refresh().await {
            warn!("failed to reload orders after status change: {error}");
        }

        result
    }

    /// Counts per status and revenue over the cached orders.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        let mut summary = OrderSummary {
            total_orders: self.orders.len(),
            ..OrderSummary::default()
        };

        for order in &self.orders {
            *summary.by_status.entry(order.status).or_default() += 1;

            if order.status != OrderStatus::Cancelled {
                summary.revenue += order.total_amount;
            }
        }

        summary
    }
}

impl fmt::Debug for AdminOrderConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminOrderConsole")
            .field("orders", &self.orders.len())
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
