use crate::application::{ErrorResponse, PaymentService};
use crate::domain::errors::DomainError;
use crate::ports::{CurrencyRepositoryPort, OrderRepositoryPort, PayGatePort};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Application state
pub struct AppState<G: PayGatePort, O: OrderRepositoryPort, C: CurrencyRepositoryPort> {
    pub payment_service: Arc<PaymentService<G, O, C>>,
}

impl<G: PayGatePort, O: OrderRepositoryPort, C: CurrencyRepositoryPort> Clone
    for AppState<G, O, C>
{
    fn clone(&self) -> Self {
        Self {
            payment_service: self.payment_service.clone(),
        }
    }
}

/// Query contract of the gateway's return callback
#[derive(Debug, Deserialize)]
pub struct ReturnQuery {
    pub pgnopcommerce: i64,
}

/// Run the post-process payment flow for an order. The response body is the
/// terminal redirect page: either the gateway's process form or the
/// order-details failure page.
pub async fn post_process_payment<
    G: PayGatePort,
    O: OrderRepositoryPort,
    C: CurrencyRepositoryPort,
>(
    State(state): State<AppState<G, O, C>>,
    Path(order_id): Path<i64>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received payment request for order: {}", order_id);

    state
        .payment_service
        .post_process_payment(order_id)
        .await
        .map(|page| Html(page.into_html()))
        .map_err(|e| {
            error!("Payment error for order {}: {}", order_id, e);
            (error_status(&e), Json(error_body(e)))
        })
}

/// Return callback the gateway sends the browser back to after payment;
/// routes the customer to the order-details page of the referenced order.
pub async fn paygate_return<G: PayGatePort, O: OrderRepositoryPort, C: CurrencyRepositoryPort>(
    State(state): State<AppState<G, O, C>>,
    Query(query): Query<ReturnQuery>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received PayGate return for order: {}", query.pgnopcommerce);

    state
        .payment_service
        .return_redirect(query.pgnopcommerce)
        .await
        .map(|page| Html(page.into_html()))
        .map_err(|e| {
            error!("Return handling error for order {}: {}", query.pgnopcommerce, e);
            (error_status(&e), Json(error_body(e)))
        })
}

/// Health check
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::ValidationError(_)
        | DomainError::InvalidAmount(_)
        | DomainError::CurrencyNotSupported(_) => StatusCode::BAD_REQUEST,
        DomainError::GatewayUnreachable(_) | DomainError::IndeterminateResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(error: DomainError) -> ErrorResponse {
    let code = match error {
        DomainError::GatewayUnreachable(_) | DomainError::IndeterminateResponse(_) => {
            "PAYMENT_NOT_INITIATED"
        }
        _ => "PAYMENT_ERROR",
    };
    ErrorResponse::new(code.to_string(), error.to_string())
}
