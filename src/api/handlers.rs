//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use super::AppState;
use super::types::{BillRequest, BillResponse, ErrorResponse, TariffSummary, TariffsResponse};
use crate::bill::{BillError, calculate_bill_with};
use crate::tariff::TariffKey;

/// Returns the registered tariff keys and table version.
///
/// `GET /tariffs` → 200 + `TariffsResponse` JSON
pub async fn get_tariffs(State(state): State<Arc<AppState>>) -> Json<TariffsResponse> {
    Json(TariffsResponse {
        version: state.registry.version().to_string(),
        tariffs: state
            .registry
            .schedules()
            .map(TariffSummary::from)
            .collect(),
    })
}

/// Calculates a bill.
///
/// `POST /bill` → 200 + `BillResponse` JSON
/// invalid input → 422 + `ErrorResponse`
/// unregistered tariff → 404 + `ErrorResponse`
pub async fn post_bill(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BillRequest>,
) -> Result<Json<BillResponse>, (StatusCode, Json<ErrorResponse>)> {
    let key = TariffKey::parse(&req.utility, &req.network, &req.category).map_err(error_response)?;
    let bill = calculate_bill_with(&state.registry, &req.to_input(key)).map_err(error_response)?;
    info!(tariff = %key, grand_total = bill.grand_total, "calculated bill");
    Ok(Json(BillResponse::from(&bill)))
}

fn error_response(err: BillError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        BillError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BillError::UnknownTariff { .. } => StatusCode::NOT_FOUND,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::tariff::TariffRegistry;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            registry: TariffRegistry::builtin(),
        })
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/bill")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn tariffs_returns_200() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/tariffs")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["version"], "FY2025-26");
        assert_eq!(json["tariffs"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn bill_returns_200() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post(r#"{"utility":"adani","metered_units":250}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["billed_units"], 250.0);
        assert!(json["grand_total"].as_f64().unwrap() > 0.0);
        assert_eq!(json["tariff"]["utility"], "adani");
    }

    #[tokio::test]
    async fn solar_above_billed_returns_422() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post(
                r#"{"utility":"tata","metered_units":250,"solar_units":300}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("solar_units"));
    }

    #[tokio::test]
    async fn unknown_utility_returns_404() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post(r#"{"utility":"Unknown","metered_units":100}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unregistered_combination_returns_404() {
        let app = router(make_test_state());

        let resp = app
            .oneshot(post(
                r#"{"utility":"adani","network":"welcome","metered_units":100}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
