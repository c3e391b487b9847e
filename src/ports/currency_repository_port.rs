use crate::domain::errors::DomainResult;
use crate::domain::Currency;
use async_trait::async_trait;

/// Currency lookup port
#[async_trait]
pub trait CurrencyRepositoryPort: Send + Sync {
    /// Find a currency record by its code
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Currency>>;
}
