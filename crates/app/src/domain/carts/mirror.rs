//! Cart mirror.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    domain::carts::{
        CartGateway,
        models::{Cart, CartItem, ProductId},
    },
    errors::{Field, StoreError},
};

/// Local copy of the caller's server cart.
///
/// Every mutation goes through the gateway and, on success, is followed by a
/// full [`CartMirror::load`]. A failed mutation leaves the mirror as it was.
pub struct CartMirror {
    gateway: Arc<dyn CartGateway>,
    cart: Cart,
}

impl CartMirror {
    #[must_use]
    pub fn new(gateway: Arc<dyn CartGateway>) -> Self {
        Self {
            gateway,
            cart: Cart::empty(),
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Replace the mirror with the server cart, or the empty cart when it
    /// cannot be read.
    pub async fn load(&mut self) -> &Cart {
        match self.refresh().await {
            Ok(_) => {}
            Err(StoreError::AuthenticationRequired) => {
                debug!("no session, cart mirror is empty");
            }
            Err(error) => {
                warn!("failed to load cart, showing empty cart: {error}");
            }
        }

        &self.cart
    }

    /// Replace the mirror with the server cart, propagating read failures.
    ///
    /// The mirror is emptied when the read fails.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the cart cannot be fetched.
    pub async fn refresh(&mut self) -> Result<&Cart, StoreError> {
        match self.gateway.fetch_cart().await {
            Ok(cart) => {
                self.cart = cart;

                Ok(&self.cart)
            }
            Err(error) => {
                self.cart = Cart::empty();

                Err(error)
            }
        }
    }

    /// Add units of a product.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the mirror is unchanged in that case.
    pub async fn add(&mut self, product: ProductId, quantity: u32) -> Result<&Cart, StoreError> {
        self.gateway.add_item(product, quantity).await?;

        info!(product_id = %product, quantity, "added cart item");

        Ok(self.load().await)
    }

    /// Remove a product line.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the mirror is unchanged in that case.
    pub async fn remove(&mut self, product: ProductId) -> Result<&Cart, StoreError> {
        self.gateway.remove_item(product).await?;

        info!(product_id = %product, "removed cart item");

        Ok(self.load().await)
    }

    /// Set the quantity of a line. Zero or negative quantities remove it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the mirror is unchanged in that case.
    pub async fn update_quantity(
        &mut self,
        product: ProductId,
        quantity: i64,
    ) -> Result<&Cart, StoreError> {
        if quantity <= 0 {
            return self.remove(product).await;
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_| StoreError::invalid(Field::Quantity, "quantity is too large"))?;

        self.gateway.update_item(product, quantity).await?;

        info!(product_id = %product, quantity, "updated cart item");

        Ok(self.load().await)
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the mirror is unchanged in that case.
    pub async fn increment(&mut self, product: ProductId) -> Result<&Cart, StoreError> {
        match self.cart.item(product).map(|item| item.quantity) {
            Some(quantity) => {
                self.update_quantity(product, i64::from(quantity) + 1)
                    .await
            }
            None => self.add(product, 1).await,
        }
    }

    /// Take one unit of a product away. A line holding a single unit is
    /// removed instead of being updated to zero.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the mirror is unchanged in that case.
    pub async fn decrement(&mut self, product: ProductId) -> Result<&Cart, StoreError> {
        match self.cart.item(product).map(|item| item.quantity) {
            Some(quantity) if quantity > 1 => {
                self.update_quantity(product, i64::from(quantity) - 1)
                    .await
            }
            _ => self.remove(product).await,
        }
    }

    /// Empty the server cart.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the mirror is unchanged in that case.
    pub async fn clear(&mut self) -> Result<&Cart, StoreError> {
        self.gateway.clear().await?;

        info!("cleared cart");

        Ok(self.load().await)
    }

    /// Drop local state after the server emptied the cart on its own.
    pub(crate) fn reset(&mut self) {
        self.cart = Cart::empty();
    }
}

impl fmt::Debug for CartMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartMirror")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}
