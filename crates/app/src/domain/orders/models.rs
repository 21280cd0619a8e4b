//! Order Models

use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{carts::models::ProductId, orders::OrderStatus},
    ids::TypedId,
    session::UserId,
};

/// Order ID
pub type OrderId = TypedId<Order>;

/// Order Model
///
/// `items` and `total_amount` are fixed at creation; only `status` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,

    #[serde(rename = "userId")]
    pub owner_id: UserId,

    #[serde(rename = "username", default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub items: Vec<OrderItem>,

    pub total_amount: Decimal,

    #[serde(default)]
    pub shipping_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub status: OrderStatus,

    #[serde(with = "created_at")]
    pub created_at: DateTime,
}

/// OrderItem Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,

    #[serde(default)]
    pub product_name: String,

    #[serde(rename = "productPrice")]
    pub unit_price: Decimal,

    pub quantity: u32,

    #[serde(rename = "subTotal", default)]
    pub line_subtotal: Option<Decimal>,
}

impl OrderItem {
    /// Line subtotal, falling back to `unit_price * quantity` for display.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.line_subtotal
            .unwrap_or_else(|| self.unit_price * Decimal::from(self.quantity))
    }
}

/// Order creation request body. Line items are derived by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewOrder {
    pub shipping_address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `createdAt` is sent as `yyyy-MM-dd HH:mm:ss`; ISO 8601 is accepted too.
mod created_at {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.strftime(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;

        DateTime::strptime(FORMAT, &raw)
            .or_else(|_| raw.parse::<DateTime>())
            .map_err(|error| D::Error::custom(format!("invalid createdAt {raw:?}: {error}")))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn order_json(created_at: &str) -> serde_json::Value {
        json!({
            "id": 12,
            "userId": 2,
            "username": "user",
            "totalAmount": 300,
            "status": "PENDING",
            "createdAt": created_at,
            "shippingAddress": "Minsk, Lenina, house 1",
            "notes": null,
            "items": [{
                "id": 1,
                "productId": 5,
                "productName": "Lamp",
                "productPrice": 150,
                "quantity": 2,
                "subTotal": 300
            }]
        })
    }

    #[test]
    fn decodes_server_order_shape() -> TestResult {
        let order: Order = serde_json::from_value(order_json("2024-01-05 10:30:00"))?;

        assert_eq!(order.id, OrderId::new(12));
        assert_eq!(order.owner_id, UserId::new(2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.notes, None);
        assert_eq!(order.created_at, date(2024, 1, 5).at(10, 30, 0, 0));
        assert_eq!(order.items[0].subtotal(), Decimal::from(300));

        Ok(())
    }

    #[test]
    fn accepts_iso_timestamps() -> TestResult {
        let order: Order = serde_json::from_value(order_json("2024-01-05T10:30:00"))?;

        assert_eq!(order.created_at, date(2024, 1, 5).at(10, 30, 0, 0));

        Ok(())
    }

    #[test]
    fn rejects_unknown_status() {
        let mut value = order_json("2024-01-05 10:30:00");
        value["status"] = json!("LOST");

        assert!(serde_json::from_value::<Order>(value).is_err());
    }

    #[test]
    fn created_at_serializes_in_server_format() -> TestResult {
        let order: Order = serde_json::from_value(order_json("2024-01-05T10:30:00"))?;
        let value = serde_json::to_value(&order)?;

        assert_eq!(value["createdAt"], json!("2024-01-05 10:30:00"));

        Ok(())
    }

    #[test]
    fn new_order_omits_missing_notes() -> TestResult {
        let body = serde_json::to_value(NewOrder {
            shipping_address: "Minsk, Lenina, house 1".to_string(),
            notes: None,
        })?;

        assert_eq!(body, json!({"shippingAddress": "Minsk, Lenina, house 1"}));

        Ok(())
    }
}
