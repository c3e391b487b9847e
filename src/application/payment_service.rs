use crate::application::redirect::RedirectPage;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::response::{classify, InitiateOutcome};
use crate::domain::{Credentials, InitiateRequest};
use crate::ports::{CurrencyRepositoryPort, OrderRepositoryPort, PayGatePort};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Payment service: drives the initiate / classify / redirect sequence for
/// one checkout attempt.
pub struct PaymentService<G: PayGatePort, O: OrderRepositoryPort, C: CurrencyRepositoryPort> {
    gateway: Arc<G>,
    orders: Arc<O>,
    currencies: Arc<C>,
    credentials: Credentials,
    store_url: String,
}

impl<G: PayGatePort, O: OrderRepositoryPort, C: CurrencyRepositoryPort> PaymentService<G, O, C> {
    pub fn new(
        gateway: Arc<G>,
        orders: Arc<O>,
        currencies: Arc<C>,
        credentials: Credentials,
        store_url: String,
    ) -> Self {
        Self {
            gateway,
            orders,
            currencies,
            credentials,
            store_url,
        }
    }

    /// Run the post-process payment flow for an order and return the
    /// terminal redirect.
    ///
    /// 1. Build the signed initiation request from the order snapshot.
    /// 2. POST it to the gateway's initiate endpoint.
    /// 3. On a known gateway error: cancel the order and redirect to the
    ///    order-details page.
    /// 4. On a usable reply: redirect the browser into the gateway's process
    ///    endpoint with the echoed PAY_REQUEST_ID and CHECKSUM.
    /// 5. Anything else (transport failure included) surfaces as an error;
    ///    the order is left untouched.
    pub async fn post_process_payment(&self, order_id: i64) -> DomainResult<RedirectPage> {
        info!("Post-processing payment for order: {}", order_id);

        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))?;

        let currency = self
            .currencies
            .find_by_code(&order.customer_currency_code)
            .await?
            .ok_or_else(|| {
                DomainError::CurrencyNotSupported(order.customer_currency_code.clone())
            })?;

        let request = InitiateRequest::build(
            &order,
            &currency,
            &self.credentials,
            &self.store_url,
            Local::now(),
        )?;

        debug!(
            "Initiating transaction for order {} with values {}",
            order.id,
            request.concatenated_values()
        );
        let raw_response = self.gateway.initiate(&request).await?;

        match classify(&raw_response) {
            InitiateOutcome::KnownError(gateway_error) => {
                warn!(
                    "PayGate rejected initiation for order {}: {}",
                    order.id,
                    gateway_error.message()
                );

                order.mark_as_cancelled()?;
                self.orders.update_status(&order).await?;

                Ok(RedirectPage::order_details(&self.store_url, order.id))
            }
            InitiateOutcome::Redirectable {
                pay_request_id,
                checksum,
            } => {
                debug!("Attempting remote post for order {}", order.id);
                Ok(RedirectPage::gateway_post(
                    self.gateway.process_request(&pay_request_id, &checksum),
                ))
            }
            InitiateOutcome::Indeterminate => {
                error!(
                    "Indeterminate PayGate response for order {}: {:?}",
                    order.id, raw_response
                );
                Err(DomainError::IndeterminateResponse(raw_response))
            }
        }
    }

    /// Resolve the redirect for the gateway's return callback: back to the
    /// order-details page of the referenced order.
    pub async fn return_redirect(&self, order_id: i64) -> DomainResult<RedirectPage> {
        info!("Handling PayGate return for order: {}", order_id);

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))?;

        Ok(RedirectPage::order_details(&self.store_url, order.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BillingAddress, Currency, Order};
    use crate::domain::value_objects::OrderStatus;
    use crate::ports::ProcessRequest;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone)]
    struct StubGateway {
        response: Result<String, String>,
    }

    impl StubGateway {
        fn replying(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
            }
        }

        fn unreachable() -> Self {
            Self {
                response: Err("connection refused".to_string()),
            }
        }
    }

    #[async_trait]
    impl PayGatePort for StubGateway {
        async fn initiate(&self, _request: &InitiateRequest) -> DomainResult<String> {
            self.response
                .clone()
                .map_err(DomainError::GatewayUnreachable)
        }

        fn process_request(&self, pay_request_id: &str, checksum: &str) -> ProcessRequest {
            ProcessRequest {
                url: "https://secure.paygate.co.za/payweb3/process.trans".to_string(),
                pay_request_id: pay_request_id.to_string(),
                checksum: checksum.to_string(),
            }
        }
    }

    struct InMemoryOrders {
        orders: Mutex<HashMap<i64, Order>>,
    }

    impl InMemoryOrders {
        fn with(order: Order) -> Self {
            Self {
                orders: Mutex::new(HashMap::from([(order.id, order)])),
            }
        }

        fn empty() -> Self {
            Self {
                orders: Mutex::new(HashMap::new()),
            }
        }

        fn status_of(&self, id: i64) -> OrderStatus {
            self.orders.lock().unwrap()[&id].status
        }
    }

    #[async_trait]
    impl OrderRepositoryPort for InMemoryOrders {
        async fn find_by_id(&self, id: i64) -> DomainResult<Option<Order>> {
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }

        async fn update_status(&self, order: &Order) -> DomainResult<()> {
            self.orders
                .lock()
                .unwrap()
                .insert(order.id, order.clone())
                .map(|_| ())
                .ok_or_else(|| DomainError::OrderNotFound(order.id.to_string()))
        }
    }

    struct FixedCurrencies;

    #[async_trait]
    impl CurrencyRepositoryPort for FixedCurrencies {
        async fn find_by_code(&self, code: &str) -> DomainResult<Option<Currency>> {
            Ok((code == "ZAR").then(|| Currency {
                id: 1,
                currency_code: "ZAR".to_string(),
                name: "South African Rand".to_string(),
            }))
        }
    }

    fn pending_order(id: i64, currency_code: &str) -> Order {
        let now = chrono::Utc::now();
        Order {
            id,
            order_total: "100.00".parse().unwrap(),
            customer_currency_code: currency_code.to_string(),
            billing_address: Some(BillingAddress {
                country_code: Some("ZAF".to_string()),
                email: Some("customer@example.com".to_string()),
            }),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(
        gateway: StubGateway,
        orders: Arc<InMemoryOrders>,
    ) -> PaymentService<StubGateway, InMemoryOrders, FixedCurrencies> {
        PaymentService::new(
            Arc::new(gateway),
            orders,
            Arc::new(FixedCurrencies),
            Credentials {
                paygate_id: "10011072130".to_string(),
                encryption_key: "secret".to_string(),
            },
            "https://shop.example.com/".to_string(),
        )
    }

    #[tokio::test]
    async fn test_known_error_cancels_order_and_redirects_to_order_details() {
        let orders = Arc::new(InMemoryOrders::with(pending_order(1001, "ZAR")));
        let service = service(StubGateway::replying("ERROR=DATA_CHK"), orders.clone());

        let page = service.post_process_payment(1001).await.unwrap();

        assert_eq!(
            page,
            RedirectPage::OrderDetails {
                url: "https://shop.example.com/orderdetails/1001".to_string()
            }
        );
        assert_eq!(orders.status_of(1001), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_redirectable_response_posts_exactly_the_echoed_values() {
        let orders = Arc::new(InMemoryOrders::with(pending_order(1001, "ZAR")));
        let service = service(
            StubGateway::replying("PAY_REQUEST_ID=123&CHECKSUM=abc"),
            orders.clone(),
        );

        let page = service.post_process_payment(1001).await.unwrap();

        assert_eq!(
            page,
            RedirectPage::GatewayPost(ProcessRequest {
                url: "https://secure.paygate.co.za/payweb3/process.trans".to_string(),
                pay_request_id: "123".to_string(),
                checksum: "abc".to_string(),
            })
        );
        // success path never touches the order
        assert_eq!(orders.status_of(1001), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_indeterminate_response_errors_without_cancelling() {
        let orders = Arc::new(InMemoryOrders::with(pending_order(1001, "ZAR")));
        let service = service(StubGateway::replying("service unavailable"), orders.clone());

        let result = service.post_process_payment(1001).await;

        assert!(matches!(
            result,
            Err(DomainError::IndeterminateResponse(_))
        ));
        assert_eq!(orders.status_of(1001), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_transport_failure_errors_without_cancelling() {
        let orders = Arc::new(InMemoryOrders::with(pending_order(1001, "ZAR")));
        let service = service(StubGateway::unreachable(), orders.clone());

        let result = service.post_process_payment(1001).await;

        assert!(matches!(result, Err(DomainError::GatewayUnreachable(_))));
        assert_eq!(orders.status_of(1001), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let service = service(
            StubGateway::replying("PAY_REQUEST_ID=123&CHECKSUM=abc"),
            Arc::new(InMemoryOrders::empty()),
        );

        let result = service.post_process_payment(9999).await;

        assert!(matches!(result, Err(DomainError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_currency_is_rejected_before_initiate() {
        let orders = Arc::new(InMemoryOrders::with(pending_order(1001, "XXX")));
        let service = service(
            StubGateway::replying("PAY_REQUEST_ID=123&CHECKSUM=abc"),
            orders.clone(),
        );

        let result = service.post_process_payment(1001).await;

        assert!(matches!(result, Err(DomainError::CurrencyNotSupported(_))));
        assert_eq!(orders.status_of(1001), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_return_redirect_points_at_order_details() {
        let orders = Arc::new(InMemoryOrders::with(pending_order(1001, "ZAR")));
        let service = service(StubGateway::replying(""), orders);

        let page = service.return_redirect(1001).await.unwrap();

        assert_eq!(
            page,
            RedirectPage::OrderDetails {
                url: "https://shop.example.com/orderdetails/1001".to_string()
            }
        );
    }
}
