use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::InitiateRequest;
use crate::infrastructure::config::paygate_config::PayGateConfig;
use crate::ports::paygate_port::{PayGatePort, ProcessRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// PayGate PayWeb3 adapter
#[derive(Clone)]
pub struct PayGateAdapter {
    config: Arc<PayGateConfig>,
    client: Client,
}

impl PayGateAdapter {
    pub fn new(config: Arc<PayGateConfig>) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn initiate_url(&self) -> String {
        format!("{}/payweb3/initiate.trans", self.config.base_url)
    }

    fn process_url(&self) -> String {
        format!("{}/payweb3/process.trans", self.config.base_url)
    }
}

#[async_trait]
impl PayGatePort for PayGateAdapter {
    /// Single form-encoded POST of the signed field set. No retries; a
    /// transport failure or non-success status is reported instead of being
    /// treated as an empty reply.
    async fn initiate(&self, request: &InitiateRequest) -> DomainResult<String> {
        let url = self.initiate_url();
        debug!("Posting initiate request to {}", url);

        let response = self
            .client
            .post(&url)
            .form(&request.form_fields())
            .send()
            .await
            .map_err(|e| {
                error!("Initiate transport failure: {}", e);
                DomainError::GatewayUnreachable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Initiate returned {}: {}", status, error_text);
            return Err(DomainError::GatewayUnreachable(format!(
                "initiate returned {}: {}",
                status, error_text
            )));
        }

        let text = response.text().await?;
        debug!("Initiate response text: {}", text);
        Ok(text)
    }

    fn process_request(&self, pay_request_id: &str, checksum: &str) -> ProcessRequest {
        ProcessRequest {
            url: self.process_url(),
            pay_request_id: pay_request_id.to_string(),
            checksum: checksum.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_derive_from_base_url() {
        let config = Arc::new(PayGateConfig {
            paygate_id: "10011072130".to_string(),
            encryption_key: "secret".to_string(),
            use_sandbox: false,
            base_url: "https://secure.paygate.co.za".to_string(),
            store_url: "https://shop.example.com/".to_string(),
            timeout_secs: 30,
        });
        let adapter = PayGateAdapter::new(config).unwrap();

        assert_eq!(
            adapter.initiate_url(),
            "https://secure.paygate.co.za/payweb3/initiate.trans"
        );

        let process = adapter.process_request("123", "abc");
        assert_eq!(
            process,
            ProcessRequest {
                url: "https://secure.paygate.co.za/payweb3/process.trans".to_string(),
                pay_request_id: "123".to_string(),
                checksum: "abc".to_string(),
            }
        );
    }
}
