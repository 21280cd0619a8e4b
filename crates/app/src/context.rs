//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiClient, ClientConfig},
    domain::{
        carts::{CartGateway, CartMirror, HttpCartGateway},
        orders::{
            AdminOrderConsole, BuyerOrders, CheckoutOrchestrator, HttpOrdersGateway,
            OrdersGateway,
        },
    },
    session::{Session, SessionError, SessionStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build http client")]
    Http(#[source] reqwest::Error),

    #[error("failed to restore session")]
    Session(#[source] SessionError),
}

/// Wired-up gateways sharing one session.
#[derive(Clone)]
pub struct AppContext {
    pub session: Session,
    pub carts: Arc<dyn CartGateway>,
    pub orders: Arc<dyn OrdersGateway>,
}

impl AppContext {
    /// Build application context and restore any stored session.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built or the session
    /// store cannot be read.
    pub async fn from_config(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, AppInitError> {
        let session = Session::new(store);

        session.load().await.map_err(AppInitError::Session)?;

        let client = ApiClient::new(config, session.clone()).map_err(AppInitError::Http)?;

        Ok(Self {
            session,
            carts: Arc::new(HttpCartGateway::new(client.clone())),
            orders: Arc::new(HttpOrdersGateway::new(client)),
        })
    }

    #[must_use]
    pub fn cart_mirror(&self) -> CartMirror {
        CartMirror::new(Arc::clone(&self.carts))
    }

    #[must_use]
    pub fn checkout(&self) -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(Arc::clone(&self.orders), self.session.clone())
    }

    #[must_use]
    pub fn buyer_orders(&self) -> BuyerOrders {
        BuyerOrders::new(Arc::clone(&self.orders))
    }

    #[must_use]
    pub fn admin_console(&self) -> AdminOrderConsole {
        AdminOrderConsole::new(Arc::clone(&self.orders))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use crate::{
        session::{BearerToken, Credentials, Identity, MemorySessionStore, Role, UserId},
        test::TEST_TOKEN,
    };

    use super::*;

    #[tokio::test]
    async fn restores_stored_session_for_gateways() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/cart"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"productId": 1, "productPrice": 10, "quantity": 3, "subTotal": 30}],
                "totalAmount": 30,
                "totalItems": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new());

        store
            .persist(&Credentials {
                token: BearerToken::new(TEST_TOKEN).ok_or("blank token")?,
                identity: Identity {
                    id: UserId::new(2),
                    username: "user".to_string(),
                    role: Role::User,
                },
            })
            .await?;

        let context = AppContext::from_config(
            ClientConfig {
                base_url: format!("{}/api", server.uri()),
                ..ClientConfig::default()
            },
            store,
        )
        .await?;

        let mut mirror = context.cart_mirror();

        assert_eq!(mirror.load().await.total(), Decimal::from(30));
        assert!(context.session.is_authenticated().await);

        Ok(())
    }
}
