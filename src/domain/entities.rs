use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billing address snapshot attached to an order. Both fields are optional;
/// checkout is allowed to proceed without them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingAddress {
    /// Three-letter ISO country code
    pub country_code: Option<String>,

    /// Customer email
    pub email: Option<String>,
}

/// Shop order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID (also the gateway REFERENCE)
    pub id: i64,

    /// Order total in the customer currency
    pub order_total: Decimal,

    /// Currency code the customer checked out with
    pub customer_currency_code: String,

    /// Billing address, if the customer supplied one
    pub billing_address: Option<BillingAddress>,

    /// Order status
    pub status: OrderStatus,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Billing country code, if present
    pub fn billing_country(&self) -> Option<&str> {
        self.billing_address
            .as_ref()
            .and_then(|a| a.country_code.as_deref())
    }

    /// Billing email, if present
    pub fn billing_email(&self) -> Option<&str> {
        self.billing_address.as_ref().and_then(|a| a.email.as_deref())
    }

    /// Cancel the order after a gateway rejection. Completed orders cannot
    /// be cancelled by the payment flow.
    pub fn mark_as_cancelled(&mut self) -> DomainResult<()> {
        if self.status == OrderStatus::Complete {
            return Err(DomainError::InvalidState {
                expected: "pending or processing".to_string(),
                actual: self.status.to_string(),
            });
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Currency record resolved from the customer currency code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub currency_code: String,
    pub name: String,
}
