use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting payment
    Pending,
    /// Payment handed off to the gateway
    Processing,
    /// Paid and fulfilled
    Complete,
    /// Cancelled (gateway rejected the initiation, or the shop cancelled it)
    Cancelled,
}

impl OrderStatus {
    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "complete" => Ok(OrderStatus::Complete),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::ValidationError(format!(
                "Invalid order status: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Complete => write!(f, "complete"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}
