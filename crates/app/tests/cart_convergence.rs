//! Cart mirror convergence against a stateful fake server.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use rust_decimal::Decimal;
use serde_json::{Value, json};
use storefront_app::{
    api::ClientConfig,
    context::AppContext,
    domain::carts::models::ProductId,
    errors::StoreError,
    session::{BearerToken, Credentials, Identity, MemorySessionStore, Role, SessionStore, UserId},
};
use testresult::TestResult;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate, matchers::path_regex};

/// Server-side cart keyed by product, each line holding `(unit_price, quantity)`.
#[derive(Clone, Default)]
struct CartServer {
    lines: Arc<Mutex<BTreeMap<i64, (i64, u32)>>>,
}

impl CartServer {
    fn price_of(product: i64) -> i64 {
        product * 10
    }

    fn snapshot(&self) -> Value {
        let lines = self.lines.lock().map(|lines| lines.clone()).unwrap_or_default();

        let items: Vec<Value> = lines
            .iter()
            .map(|(product, (price, quantity))| {
                json!({
                    "productId": product,
                    "productName": format!("Product {product}"),
                    "productPrice": price,
                    "quantity": quantity,
                    "subTotal": price * i64::from(*quantity)
                })
            })
            .collect();

        json!({
            "items": items,
            "totalAmount": lines.values().map(|(price, quantity)| price * i64::from(*quantity)).sum::<i64>(),
            "totalItems": lines.values().map(|(_, quantity)| quantity).sum::<u32>()
        })
    }

    fn product_from(path: &str) -> Option<i64> {
        path.rsplit('/').next()?.parse().ok()
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"message": "Item not in cart"}))
}

impl Respond for CartServer {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path();
        let Ok(mut lines) = self.lines.lock() else {
            return ResponseTemplate::new(500);
        };

        match (request.method.as_str(), path) {
            ("GET", "/api/cart") => {
                drop(lines);

                ResponseTemplate::new(200).set_body_json(self.snapshot())
            }
            ("DELETE", "/api/cart") => {
                lines.clear();

                ResponseTemplate::new(204)
            }
            ("POST", "/api/cart/items") => {
                let Ok(body) = request.body_json::<Value>() else {
                    return ResponseTemplate::new(400);
                };
                let product = body["productId"].as_i64().unwrap_or_default();
                let quantity = body["quantity"].as_u64().unwrap_or_default() as u32;

                lines
                    .entry(product)
                    .or_insert((Self::price_of(product), 0))
                    .1 += quantity;

                ResponseTemplate::new(200).set_body_json(json!({"productId": product}))
            }
            ("PUT", _) => {
                let quantity = request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "quantity")
                    .and_then(|(_, value)| value.parse::<u32>().ok());

                match (Self::product_from(path).and_then(|id| lines.get_mut(&id)), quantity) {
                    (Some(line), Some(quantity)) => {
                        line.1 = quantity;

                        ResponseTemplate::new(204)
                    }
                    _ => not_found(),
                }
            }
            ("DELETE", _) => match Self::product_from(path).and_then(|id| lines.remove(&id)) {
                Some(_) => ResponseTemplate::new(204),
                None => not_found(),
            },
            _ => ResponseTemplate::new(405),
        }
    }
}

async fn context_for(server: &MockServer) -> TestResult<AppContext> {
    let store = Arc::new(MemorySessionStore::new());

    store
        .persist(&Credentials {
            token: BearerToken::new("convergence").ok_or("blank token")?,
            identity: Identity {
                id: UserId::new(1),
                username: "buyer".to_string(),
                role: Role::User,
            },
        })
        .await?;

    Ok(AppContext::from_config(
        ClientConfig {
            base_url: format!("{}/api", server.uri()),
            ..ClientConfig::default()
        },
        store,
    )
    .await?)
}

async fn start(fake: &CartServer) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(path_regex("^/api/cart"))
        .respond_with(fake.clone())
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn mirror_converges_after_each_successful_mutation() -> TestResult {
    let fake = CartServer::default();
    let server = start(&fake).await;
    let context = context_for(&server).await?;
    let mut mirror = context.cart_mirror();

    mirror.load().await;

    mirror.add(ProductId::new(1), 2).await?;
    mirror.add(ProductId::new(2), 1).await?;
    mirror.add(ProductId::new(1), 1).await?;
    mirror.update_quantity(ProductId::new(2), 4).await?;
    mirror.increment(ProductId::new(3)).await?;
    mirror.decrement(ProductId::new(1)).await?;
    mirror.remove(ProductId::new(3)).await?;

    let expected: storefront_app::domain::carts::models::Cart =
        serde_json::from_value(fake.snapshot())?;

    assert_eq!(mirror.cart(), &expected);
    assert_eq!(mirror.count(), 6);
    assert_eq!(mirror.total(), Decimal::from(20 + 80));

    for item in mirror.items() {
        assert_eq!(
            item.subtotal(),
            item.unit_price * Decimal::from(item.quantity)
        );
    }

    Ok(())
}

#[tokio::test]
async fn decrementing_last_unit_removes_line() -> TestResult {
    let fake = CartServer::default();
    let server = start(&fake).await;
    let context = context_for(&server).await?;
    let mut mirror = context.cart_mirror();

    mirror.add(ProductId::new(5), 1).await?;
    mirror.decrement(ProductId::new(5)).await?;

    assert!(mirror.is_empty());
    assert_eq!(mirror.total(), Decimal::ZERO);

    Ok(())
}

#[tokio::test]
async fn failed_mutation_keeps_last_fetched_cart() -> TestResult {
    let fake = CartServer::default();
    let server = start(&fake).await;
    let context = context_for(&server).await?;
    let mut mirror = context.cart_mirror();

    mirror.add(ProductId::new(1), 1).await?;

    let before = mirror.cart().clone();
    let result = mirror.remove(ProductId::new(9)).await;

    assert!(
        matches!(result, Err(StoreError::RemoteOperationFailed { .. })),
        "expected RemoteOperationFailed, got {result:?}"
    );
    assert_eq!(mirror.cart(), &before);

    Ok(())
}
