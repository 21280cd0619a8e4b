//! Checkout orchestration.

use std::{fmt, sync::Arc};

use tracing::{info, warn};

use crate::{
    domain::{
        carts::CartMirror,
        orders::{OrdersGateway, models::Order},
    },
    errors::{Field, FieldErrors, StoreError},
    session::Session,
};

/// Shipping details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    pub city: String,
    pub street: String,
    pub house: String,
    pub apartment: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
}

impl ShippingForm {
    /// Check that city, street and house are filled in.
    ///
    /// # Errors
    ///
    /// Returns one entry per blank required field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        for (field, value, message) in [
            (Field::City, &self.city, "city is required"),
            (Field::Street, &self.street, "street is required"),
            (Field::House, &self.house, "house number is required"),
        ] {
            if value.trim().is_empty() {
                errors.push(field, message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Single-line address sent to the server, e.g.
    /// `"Minsk, Lenina, house 10, apt. 25, 220030"`.
    #[must_use]
    pub fn address(&self) -> String {
        let mut address = format!(
            "{}, {}, house {}",
            self.city.trim(),
            self.street.trim(),
            self.house.trim()
        );

        if let Some(apartment) = present(self.apartment.as_deref()) {
            address.push_str(", apt. ");
            address.push_str(apartment);
        }

        if let Some(postal_code) = present(self.postal_code.as_deref()) {
            address.push_str(", ");
            address.push_str(postal_code);
        }

        address
    }

    /// Trimmed notes, or `None` when blank.
    #[must_use]
    pub fn notes(&self) -> Option<String> {
        present(self.notes.as_deref()).map(str::to_string)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Where the last checkout attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded(Order),
    Failed(String),
}

/// Drives a cart through order creation.
pub struct CheckoutOrchestrator {
    orders: Arc<dyn OrdersGateway>,
    session: Session,
    phase: CheckoutPhase,
    validated: Option<ShippingForm>,
}

impl CheckoutOrchestrator {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersGateway>, session: Session) -> Self {
        Self {
            orders,
            session,
            phase: CheckoutPhase::Idle,
            validated: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Return to [`CheckoutPhase::Idle`] and forget previously validated
    /// input.
    pub fn reset(&mut self) {
        self.phase = CheckoutPhase::Idle;
        self.validated = None;
    }

    /// Create an order from the caller's server cart.
    ///
    /// Preconditions are checked in order: an authenticated session, a valid
    /// form (skipped when the same form already passed), then a non-empty
    /// cart read fresh from the server. A failed precondition leaves the
    /// phase unchanged and sends no order request. On success the mirror is
    /// emptied; on failure it is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthenticationRequired`] without a session,
    /// [`StoreError::ValidationFailed`] for blank fields or an empty cart, or
    /// the gateway error when the cart read or order creation fails.
    pub async fn submit(
        &mut self,
        mirror: &mut CartMirror,
        form: &ShippingForm,
    ) -> Result<Order, StoreError> {
        if !self.session.is_authenticated().await {
            return Err(StoreError::AuthenticationRequired);
        }

        if self.validated.as_ref() != Some(form) {
            form.validate().map_err(StoreError::ValidationFailed)?;

            self.validated = Some(form.clone());
        }

        if mirror.refresh().await?.is_empty() {
            return Err(StoreError::invalid(Field::Cart, "cart is empty"));
        }

        self.phase = CheckoutPhase::Submitting;

        match self.orders.create_order(form.address(), form.notes()).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total_amount, "placed order");

                mirror.reset();
                self.validated = None;
                self.phase = CheckoutPhase::Succeeded(order.clone());

                Ok(order)
            }
            Err(error) => {
                warn!("checkout failed: {error}");

                self.phase = CheckoutPhase::Failed(error.to_string());

                Err(error)
            }
        }
    }
}

impl fmt::Debug for CheckoutOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutOrchestrator")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
