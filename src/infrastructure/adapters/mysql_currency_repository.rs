use crate::domain::entities::Currency;
use crate::domain::errors::DomainResult;
use crate::ports::currency_repository_port::CurrencyRepositoryPort;
use async_trait::async_trait;
use sqlx::{MySql, Pool};
use std::sync::Arc;

/// MySQL currency repository
#[derive(Clone)]
pub struct MySqlCurrencyRepository {
    pool: Arc<Pool<MySql>>,
}

impl MySqlCurrencyRepository {
    pub fn new(pool: Arc<Pool<MySql>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyRepositoryPort for MySqlCurrencyRepository {
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Currency>> {
        let query = r#"
            SELECT id, currency_code, name
            FROM currencies
            WHERE currency_code = ?
        "#;

        let result = sqlx::query_as::<_, CurrencyRow>(query)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(result.map(|row| Currency {
            id: row.id,
            currency_code: row.currency_code,
            name: row.name,
        }))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CurrencyRow {
    id: i64,
    currency_code: String,
    name: String,
}
