use crate::domain::errors::DomainResult;
use crate::domain::InitiateRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The browser-level POST that completes a transaction: target URL plus the
/// two pre-authenticated values echoed by the initiate call. The checksum is
/// forwarded as received; re-validating it here is the gateway's job, not
/// ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub url: String,
    pub pay_request_id: String,
    pub checksum: String,
}

/// PayGate gateway port
#[async_trait]
pub trait PayGatePort: Send + Sync + Clone {
    /// Post the signed field set to the initiate endpoint and return the raw
    /// response body. One attempt, no retries; transport failures surface as
    /// an explicit error.
    async fn initiate(&self, request: &InitiateRequest) -> DomainResult<String>;

    /// Describe the process redirect for a successfully initiated request
    fn process_request(&self, pay_request_id: &str, checksum: &str) -> ProcessRequest;
}
