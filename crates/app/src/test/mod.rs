//! Test Helpers

use jiff::civil::date;
use rust_decimal::Decimal;
use testresult::TestResult;
use wiremock::MockServer;

use crate::{
    api::{ApiClient, ClientConfig},
    domain::{
        carts::models::{Cart, CartItem, ProductId},
        orders::{
            OrderStatus,
            models::{Order, OrderId, OrderItem},
        },
    },
    session::{BearerToken, Credentials, Identity, Role, Session, UserId},
};

pub(crate) const TEST_TOKEN: &str = "test-token";

pub(crate) async fn session_with_role(role: Role) -> TestResult<Session> {
    let session = Session::anonymous();

    session
        .persist(Credentials {
            token: BearerToken::new(TEST_TOKEN).ok_or("blank token")?,
            identity: Identity {
                id: UserId::new(2),
                username: "user".to_string(),
                role,
            },
        })
        .await?;

    Ok(session)
}

pub(crate) async fn authenticated_session() -> TestResult<Session> {
    session_with_role(Role::User).await
}

pub(crate) fn client_for(server: &MockServer, session: Session) -> TestResult<ApiClient> {
    Ok(ApiClient::new(
        ClientConfig {
            base_url: format!("{}/api", server.uri()),
            ..ClientConfig::default()
        },
        session,
    )?)
}

pub(crate) fn cart_item(product: i64, unit_price: i64, quantity: u32) -> CartItem {
    let unit_price = Decimal::from(unit_price);

    CartItem {
        product_id: ProductId::new(product),
        product_name: format!("Product {product}"),
        unit_price,
        quantity,
        line_subtotal: Some(unit_price * Decimal::from(quantity)),
    }
}

/// Cart with server-style aggregates computed from `items`.
pub(crate) fn cart(items: Vec<CartItem>) -> Cart {
    let total_amount = items.iter().map(CartItem::subtotal).sum();
    let total_items = items.iter().map(|item| item.quantity).sum();

    Cart {
        items,
        total_amount: Some(total_amount),
        total_items: Some(total_items),
    }
}

pub(crate) fn order(id: i64, status: OrderStatus, total: i64) -> Order {
    let total_amount = Decimal::from(total);

    Order {
        id: OrderId::new(id),
        owner_id: UserId::new(2),
        owner_name: Some("user".to_string()),
        items: vec![OrderItem {
            product_id: ProductId::new(1),
            product_name: "Product 1".to_string(),
            unit_price: total_amount,
            quantity: 1,
            line_subtotal: Some(total_amount),
        }],
        total_amount,
        shipping_address: "Minsk, Lenina, house 1".to_string(),
        notes: None,
        status,
        created_at: date(2024, 1, 5).at(10, 0, 0, 0),
    }
}
