//! Cart mutation gateway.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;

use crate::{
    api::{ApiClient, decode},
    domain::carts::models::{Cart, NewCartItem, ProductId},
    errors::{Field, StoreError},
};

#[derive(Debug, Clone)]
pub struct HttpCartGateway {
    client: ApiClient,
}

impl HttpCartGateway {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn fetch_cart(&self) -> Result<Cart, StoreError> {
        let request = self.client.authorized(Method::GET, "/cart").await?;

        match self.client.send(request).await? {
            None => Ok(Cart::empty()),
            body => decode(body, "a cart object"),
        }
    }

    async fn add_item(&self, product: ProductId, quantity: u32) -> Result<(), StoreError> {
        let request = self.client.authorized(Method::POST, "/cart/items").await?;

        if quantity == 0 {
            return Err(StoreError::invalid(
                Field::Quantity,
                "quantity must be at least 1",
            ));
        }

        self.client
            .send(request.json(&NewCartItem {
                product_id: product,
                quantity,
            }))
            .await?;

        Ok(())
    }

    async fn update_item(&self, product: ProductId, quantity: u32) -> Result<(), StoreError> {
        let request = self
            .client
            .authorized(Method::PUT, &format!("/cart/items/{product}"))
            .await?;

        if quantity == 0 {
            return Err(StoreError::invalid(
                Field::Quantity,
                "quantity must be at least 1",
            ));
        }

        self.client
            .send(request.query(&[("quantity", quantity)]))
            .await?;

        Ok(())
    }

    async fn remove_item(&self, product: ProductId) -> Result<(), StoreError> {
        let request = self
            .client
            .authorized(Method::DELETE, &format!("/cart/items/{product}"))
            .await?;

        self.client.send(request).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let request = self.client.authorized(Method::DELETE, "/cart").await?;

        self.client.send(request).await?;

        Ok(())
    }
}

/// Server-side cart operations.
///
/// Mutations report success only; callers re-read the cart with
/// [`CartGateway::fetch_cart`] instead of trusting mutation bodies.
#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Retrieve the caller's cart. An empty body is the empty cart.
    async fn fetch_cart(&self) -> Result<Cart, StoreError>;

    /// Add `quantity` units of a product, creating the line if needed.
    async fn add_item(&self, product: ProductId, quantity: u32) -> Result<(), StoreError>;

    /// Set the quantity of an existing line. `quantity` must be positive.
    async fn update_item(&self, product: ProductId, quantity: u32) -> Result<(), StoreError>;

    /// Remove a line.
    async fn remove_item(&self, product: ProductId) -> Result<(), StoreError>;

    /// Remove every line.
    async fn clear(&self) -> Result<(), StoreError>;
}
