use crate::domain::Credentials;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// PayGate ID every merchant shares in sandbox mode
pub const SANDBOX_PAYGATE_ID: &str = "10011072130";

/// Encryption key matching the sandbox PayGate ID
pub const SANDBOX_ENCRYPTION_KEY: &str = "secret";

/// PayGate PayWeb3 configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayGateConfig {
    /// Merchant PayGate ID
    pub paygate_id: String,

    /// Shared secret the checksum is keyed with
    pub encryption_key: String,

    /// Post against the shared sandbox credentials instead of the merchant's
    pub use_sandbox: bool,

    /// Gateway base URL
    pub base_url: String,

    /// Public base URL of the shop (return handler and order-details pages)
    pub store_url: String,

    /// Timeout for the initiate call, in seconds
    pub timeout_secs: u64,
}

impl PayGateConfig {
    pub fn from_env() -> Arc<Self> {
        Arc::new(Self {
            paygate_id: std::env::var("PAYGATE_ID").expect("PAYGATE_ID must be set"),
            encryption_key: std::env::var("PAYGATE_ENCRYPTION_KEY")
                .expect("PAYGATE_ENCRYPTION_KEY must be set"),
            use_sandbox: std::env::var("PAYGATE_USE_SANDBOX")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            base_url: std::env::var("PAYGATE_BASE_URL")
                .unwrap_or_else(|_| "https://secure.paygate.co.za".to_string()),
            store_url: std::env::var("STORE_URL").expect("STORE_URL must be set"),
            timeout_secs: std::env::var("PAYGATE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Credentials the requests are signed with; sandbox mode substitutes
    /// the published test pair.
    pub fn credentials(&self) -> Credentials {
        if self.use_sandbox {
            Credentials {
                paygate_id: SANDBOX_PAYGATE_ID.to_string(),
                encryption_key: SANDBOX_ENCRYPTION_KEY.to_string(),
            }
        } else {
            Credentials {
                paygate_id: self.paygate_id.clone(),
                encryption_key: self.encryption_key.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(use_sandbox: bool) -> PayGateConfig {
        PayGateConfig {
            paygate_id: "12345678901".to_string(),
            encryption_key: "merchant-key".to_string(),
            use_sandbox,
            base_url: "https://secure.paygate.co.za".to_string(),
            store_url: "https://shop.example.com/".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_live_credentials_come_from_settings() {
        let credentials = config(false).credentials();
        assert_eq!(credentials.paygate_id, "12345678901");
        assert_eq!(credentials.encryption_key, "merchant-key");
    }

    #[test]
    fn test_sandbox_substitutes_test_credentials() {
        let credentials = config(true).credentials();
        assert_eq!(credentials.paygate_id, SANDBOX_PAYGATE_ID);
        assert_eq!(credentials.encryption_key, SANDBOX_ENCRYPTION_KEY);
    }
}
