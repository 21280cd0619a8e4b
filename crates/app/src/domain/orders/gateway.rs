//! Orders gateway.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;

use crate::{
    api::{ApiClient, decode},
    domain::orders::{
        OrderStatus,
        models::{NewOrder, Order, OrderId},
    },
    errors::StoreError,
};

#[derive(Debug, Clone)]
pub struct HttpOrdersGateway {
    client: ApiClient,
}

impl HttpOrdersGateway {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Order>, StoreError> {
        let request = self.client.authorized(Method::GET, path).await?;

        decode(self.client.send(request).await?, "an array of orders")
    }
}

#[async_trait]
impl OrdersGateway for HttpOrdersGateway {
    async fn create_order(
        &self,
        shipping_address: String,
        notes: Option<String>,
    ) -> Result<Order, StoreError> {
        let request = self.client.authorized(Method::POST, "/orders").await?;

        let body = self
            .client
            .send(request.json(&NewOrder {
                shipping_address,
                notes,
            }))
            .await?;

        decode(body, "the created order")
    }

    async fn list_own(&self) -> Result<Vec<Order>, StoreError> {
        self.fetch_list("/orders").await
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        self.fetch_list("/orders/all").await
    }

    async fn get_order(&self, order: OrderId) -> Result<Order, StoreError> {
        let request = self
            .client
            .authorized(Method::GET, &format!("/orders/{order}"))
            .await?;

        decode(self.client.send(request).await?, "an order")
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let request = self
            .client
            .authorized(Method::PUT, &format!("/orders/{order}/status"))
            .await?;

        let body = self
            .client
            .send(request.query(&[("status", status.as_str())]))
            .await?;

        decode(body, "the updated order")
    }

    async fn cancel_order(&self, order: OrderId) -> Result<Order, StoreError> {
        let request = self
            .client
            .authorized(Method::PUT, &format!("/orders/{order}/cancel"))
            .await?;

        decode(self.client.send(request).await?, "the cancelled order")
    }
}

/// Server-side order operations. Transition legality is decided by the
/// server; a rejected transition is an error, never a silent no-op.
#[automock]
#[async_trait]
pub trait OrdersGateway: Send + Sync {
    /// Create an order from the caller's server cart.
    async fn create_order(
        &self,
        shipping_address: String,
        notes: Option<String>,
    ) -> Result<Order, StoreError>;

    /// Orders placed by the caller.
    async fn list_own(&self) -> Result<Vec<Order>, StoreError>;

    /// Every order. Requires the admin role.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    async fn get_order(&self, order: OrderId) -> Result<Order, StoreError>;

    /// Request a status transition. Requires the admin role.
    async fn update_status(&self, order: OrderId, status: OrderStatus)
    -> Result<Order, StoreError>;

    /// Cancel one of the caller's own orders.
    async fn cancel_order(&self, order: OrderId) -> Result<Order, StoreError>;
}
