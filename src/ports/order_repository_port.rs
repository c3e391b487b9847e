use crate::domain::errors::DomainResult;
use crate::domain::Order;
use async_trait::async_trait;

/// Order repository port. The payment flow issues one read and at most one
/// status write per invocation.
#[async_trait]
pub trait OrderRepositoryPort: Send + Sync {
    /// Find an order by its identifier
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Order>>;

    /// Persist the order's current status
    async fn update_status(&self, order: &Order) -> DomainResult<()>;
}
