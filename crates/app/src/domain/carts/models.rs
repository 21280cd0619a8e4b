//! Cart Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Catalogue product, referenced by identifier only.
#[derive(Debug)]
pub struct Product;

/// Product ID
pub type ProductId = TypedId<Product>;

/// CartItem Model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,

    #[serde(default)]
    pub product_name: String,

    #[serde(rename = "productPrice")]
    pub unit_price: Decimal,

    pub quantity: u32,

    /// Server-computed `unit_price * quantity`.
    #[serde(rename = "subTotal", default)]
    pub line_subtotal: Option<Decimal>,
}

impl CartItem {
    /// Line subtotal for display.
    ///
    /// Uses the server value when present and falls back to
    /// `unit_price * quantity` otherwise. The fallback is display-only.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.line_subtotal
            .unwrap_or_else(|| self.unit_price * Decimal::from(self.quantity))
    }
}

/// Cart Model
///
/// Mirrors the server response; aggregates are optional because legacy and
/// empty responses omit them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub total_amount: Option<Decimal>,

    #[serde(default)]
    pub total_items: Option<u32>,
}

impl Cart {
    /// The cart every unauthenticated or unreadable session sees.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn item(&self, product: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product)
    }

    /// Total quantity, preferring the server aggregate.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.total_items
            .unwrap_or_else(|| self.items.iter().map(|item| item.quantity).sum())
    }

    /// Total amount, preferring the server aggregate.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total_amount
            .unwrap_or_else(|| self.items.iter().map(CartItem::subtotal).sum())
    }
}

/// Add-to-cart request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_server_cart_shape() -> TestResult {
        let cart: Cart = serde_json::from_value(json!({
            "items": [{
                "id": 10,
                "productId": 1,
                "productName": "Phone",
                "productPrice": 100.5,
                "quantity": 2,
                "subTotal": 201,
                "addedAt": "2024-01-05 10:00:00"
            }],
            "totalAmount": 201,
            "totalItems": 2
        }))?;

        let item = cart.item(ProductId::new(1)).ok_or("item missing")?;

        assert_eq!(item.product_name, "Phone");
        assert_eq!(item.unit_price, Decimal::new(1005, 1));
        assert_eq!(item.subtotal(), Decimal::from(201));
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), Decimal::from(201));

        Ok(())
    }

    #[test]
    fn aggregates_prefer_server_values() -> TestResult {
        let cart: Cart = serde_json::from_value(json!({
            "items": [{"productId": 1, "productPrice": 10, "quantity": 1, "subTotal": 10}],
            "totalAmount": 12,
            "totalItems": 3
        }))?;

        assert_eq!(cart.total(), Decimal::from(12));
        assert_eq!(cart.count(), 3);

        Ok(())
    }

    #[test]
    fn aggregates_fall_back_to_local_summation() -> TestResult {
        let cart: Cart = serde_json::from_value(json!({
            "items": [
                {"productId": 1, "productPrice": 100, "quantity": 2},
                {"productId": 2, "productPrice": 5, "quantity": 1, "subTotal": 5}
            ]
        }))?;

        assert_eq!(cart.total(), Decimal::from(205));
        assert_eq!(cart.count(), 3);

        Ok(())
    }

    #[test]
    fn empty_object_is_the_empty_cart() -> TestResult {
        let cart: Cart = serde_json::from_str("{}")?;

        assert_eq!(cart, Cart::empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.count(), 0);

        Ok(())
    }

    #[test]
    fn new_item_serializes_camel_case() -> TestResult {
        let body = serde_json::to_value(NewCartItem {
            product_id: ProductId::new(7),
            quantity: 1,
        })?;

        assert_eq!(body, json!({"productId": 7, "quantity": 1}));

        Ok(())
    }
}
