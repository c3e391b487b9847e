use thiserror::Error;

/// Domain-level error type
#[derive(Error, Debug)]
pub enum DomainError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Invalid order state transition
    #[error("Invalid order status: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Amount invalid
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Customer currency has no matching currency record
    #[error("Currency not supported: {0}")]
    CurrencyNotSupported(String),

    /// Transport failure talking to PayGate
    #[error("PayGate unreachable: {0}")]
    GatewayUnreachable(String),

    /// Gateway replied, but with neither a known error token nor the keys
    /// needed for the process redirect
    #[error("Indeterminate PayGate response: {0}")]
    IndeterminateResponse(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
