//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use mumbai_bill::api::{AppState, router};

fn reference_state() -> Arc<AppState> {
    Arc::new(AppState {
        registry: common::reference_registry(),
    })
}

async fn post_json(state: Arc<AppState>, body: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/bill")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn residential_reference_bill() {
    let (status, json) = post_json(
        reference_state(),
        r#"{"utility":"tata","metered_units":250,"sanctioned_load_kw":5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tariff_version"], "reference");
    assert_eq!(json["energy_total"], 980.0);
    assert_eq!(json["wheeling_total"], 690.0);
    assert_eq!(json["fixed_total"], 135.0);
    assert_eq!(json["duty_base"], 1805.0);
    assert_eq!(json["duty"], 288.8);
    assert_eq!(json["tose"], 89.85);
    assert_eq!(json["grand_total"], 2183.65);
    assert_eq!(json["average_rate"], 8.73);
    assert_eq!(json["slabs"][1]["units_kwh"], 150.0);
}

#[tokio::test]
async fn commercial_penalty_bill() {
    let (status, json) = post_json(
        reference_state(),
        r#"{"utility":"tata","category":"commercial","metered_units":3000,
            "sanctioned_load_kw":50,"recorded_max_demand_kw":60}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["demand_penalty"], 7050.0);
    assert_eq!(json["fixed_total"], 28200.0);
}

#[tokio::test]
async fn negative_units_returns_422() {
    let (status, json) = post_json(
        reference_state(),
        r#"{"utility":"tata","metered_units":-10}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("metered_units"));
}

#[tokio::test]
async fn unknown_tariff_returns_404() {
    let (status, json) = post_json(
        reference_state(),
        r#"{"utility":"adani","metered_units":100}"#,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("no tariff schedule"));
}

#[tokio::test]
async fn tariffs_lists_reference_keys() {
    let req = Request::builder()
        .uri("/tariffs")
        .body(Body::empty())
        .unwrap();
    let resp = router(reference_state()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let tariffs = json["tariffs"].as_array().unwrap();
    assert_eq!(tariffs.len(), 3);
    assert!(tariffs.iter().all(|t| t["utility"] == "tata_power"));
}
