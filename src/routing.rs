//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, ErrorBody,
    category::get_categories_endpoint,
    endpoints,
    logging::logging_middleware,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_transaction_endpoint,
        edit_transaction_endpoint, get_transaction_endpoint,
        list_transactions_by_category_endpoint, list_transactions_by_date_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Any origin may call the API, and every request and response is logged.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint::<S>).post(create_transaction_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTIONS_BY_CATEGORY,
            get(list_transactions_by_category_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTIONS_BY_DATE,
            get(list_transactions_by_date_endpoint::<S>),
        )
        .route(endpoints::CATEGORIES, get(get_categories_endpoint::<S>))
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<S>)
                .put(edit_transaction_endpoint::<S>)
                .delete(delete_transaction_endpoint::<S>),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".to_owned(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode, header::ORIGIN};
    use serde_json::json;

    use crate::{
        ErrorBody,
        endpoints::{self, format_endpoint},
        transaction::{Transaction, test_utils::must_create_test_server},
    };

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (server, _) = must_create_test_server();

        let response = server.get("/coffee").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<ErrorBody>().error, "not found");
    }

    #[tokio::test]
    async fn static_routes_are_not_mistaken_for_ids() {
        let (server, _) = must_create_test_server();

        server
            .get(endpoints::TRANSACTIONS_BY_CATEGORY)
            .add_query_param("category", "Food")
            .await
            .assert_status_ok();
        server
            .get(endpoints::TRANSACTIONS_BY_DATE)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn allows_cross_origin_requests() {
        let (server, _) = must_create_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_header(ORIGIN, HeaderValue::from_static("http://localhost:8080"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("access-control-allow-origin"),
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test]
    async fn transaction_lifecycle() {
        let (server, _) = must_create_test_server();

        let created = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "Expense",
                "amount": "12.00",
                "category": "Food",
                "date": "2025-05-01",
            }))
            .await
            .json::<Transaction>();
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        server
            .put(&path)
            .json(&json!({ "amount": "15.00" }))
            .await
            .assert_status_ok();
        let updated = server.get(&path).await.json::<Transaction>();
        assert_eq!(updated.amount.to_string(), "15.00");
        assert_eq!(updated.category, created.category);

        server.delete(&path).await.assert_status_ok();
        server.get(&path).await.assert_status_not_found();
        assert_eq!(
            server
                .get(endpoints::TRANSACTIONS)
                .await
                .json::<Vec<Transaction>>(),
            vec![]
        );
    }
}
