use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn create_router<
    G: crate::ports::PayGatePort + 'static,
    O: crate::ports::OrderRepositoryPort + 'static,
    C: crate::ports::CurrencyRepositoryPort + 'static,
>(
    state: AppState<G, O, C>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/orders/:order_id/paygate", post(post_process_payment))
        .route(
            "/Plugins/PaymentPayGate/PayGateReturnHandler",
            get(paygate_return),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
