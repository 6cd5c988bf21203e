use axum::{
    middleware,
    routing::{any, delete, get, put, MethodRouter},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

use crate::domain::a001_bank_slip::service::BankSlipService;
use crate::handlers;
use crate::system::middleware::request_logger::request_logger;

/// Unsupported methods on a known path get the JSON 405 body
fn json_405(route: MethodRouter) -> MethodRouter {
    route.fallback(handlers::error::method_not_allowed)
}

/// All application routes
pub fn configure_routes(service: Arc<BankSlipService>) -> Router {
    Router::new()
        .route("/health", json_405(get(|| async { "ok" })))
        // ========================================
        // A001 Bank slips
        // ========================================
        .route(
            "/rest/bankslips",
            json_405(
                get(handlers::a001_bank_slip::list_all).post(handlers::a001_bank_slip::create),
            ),
        )
        .route(
            "/rest/bankslips/",
            json_405(
                get(handlers::a001_bank_slip::list_all).post(handlers::a001_bank_slip::create),
            ),
        )
        .route(
            "/rest/bankslips/:id",
            json_405(get(handlers::a001_bank_slip::get_by_id)),
        )
        .route(
            "/rest/bankslips/:id/pay",
            json_405(put(handlers::a001_bank_slip::pay)),
        )
        .route(
            "/rest/bankslips/:id/cancel",
            json_405(delete(handlers::a001_bank_slip::cancel)),
        )
        // ========================================
        // Errors
        // ========================================
        .route("/error", any(handlers::error::error_page))
        .fallback(handlers::error::not_found)
        .layer(Extension(service))
        .layer(CatchPanicLayer::custom(handlers::error::panic_response))
        .layer(middleware::from_fn(request_logger))
}
