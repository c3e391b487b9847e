use crate::domain::entities::{BillingAddress, Order};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::OrderStatus;
use crate::ports::order_repository_port::OrderRepositoryPort;
use async_trait::async_trait;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use tracing::{debug, error};

/// MySQL order repository
#[derive(Clone)]
pub struct MySqlOrderRepository {
    pool: Arc<Pool<MySql>>,
}

impl MySqlOrderRepository {
    pub fn new(pool: Arc<Pool<MySql>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepositoryPort for MySqlOrderRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Order>> {
        let query = r#"
            SELECT id, order_total, customer_currency_code,
                   billing_country_code, billing_email, status,
                   created_at, updated_at
            FROM orders
            WHERE id = ?
        "#;

        let result = sqlx::query_as::<_, OrderRow>(query)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        result.map(OrderRow::into_order).transpose()
    }

    async fn update_status(&self, order: &Order) -> DomainResult<()> {
        let query = r#"
            UPDATE orders
            SET status = ?, updated_at = ?
            WHERE id = ?
        "#;

        let rows_affected = sqlx::query(query)
            .bind(order.status.to_string())
            .bind(order.updated_at)
            .bind(order.id)
            .execute(self.pool.as_ref())
            .await?
            .rows_affected();

        if rows_affected == 0 {
            error!("No order found to update: {}", order.id);
            return Err(DomainError::OrderNotFound(order.id.to_string()));
        }

        debug!("Order status updated: {} -> {}", order.id, order.status);
        Ok(())
    }
}

/// Database row shape
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_total: rust_decimal::Decimal,
    customer_currency_code: String,
    billing_country_code: Option<String>,
    billing_email: Option<String>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRow {
    fn into_order(self) -> DomainResult<Order> {
        let billing_address =
            if self.billing_country_code.is_some() || self.billing_email.is_some() {
                Some(BillingAddress {
                    country_code: self.billing_country_code,
                    email: self.billing_email,
                })
            } else {
                None
            };

        Ok(Order {
            id: self.id,
            order_total: self.order_total,
            customer_currency_code: self.customer_currency_code,
            billing_address,
            status: OrderStatus::parse(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
