//! Handlers exercised directly through their axum extractors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::TcpListener;

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, State},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tempfile::{tempdir, TempDir};

use raincoat_core::{FieldValue, NewOrder, RaincoatError};
use raincoat_dashboard::app_state::AppState;
use raincoat_dashboard::config::{DashboardConfig, TransferConfig};
use raincoat_dashboard::obs::EXPOSITION_CONTENT_TYPE;
use raincoat_dashboard::{ops, router, web};

fn closed_port() -> u16 {
    let l = TcpListener::bind("127.0.0.1:0").unwrap();
    l.local_addr().unwrap().port()
}

fn app(dir: &TempDir) -> AppState {
    let mut cfg = DashboardConfig::default();
    cfg.store.path = dir.path().join("orders.db");
    cfg.transfer = TransferConfig {
        host: "127.0.0.1".into(),
        port: closed_port(),
        trust_unknown_host_keys: true,
        ..TransferConfig::default()
    };
    AppState::new(cfg).unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Run a raw request body through the `Json` extractor and `create_order`,
/// as the `/order` route does. Extractor rejections come back as a status.
async fn post_order_raw(state: &AppState, body: &str) -> Result<serde_json::Value, StatusCode> {
    let req = Request::builder()
        .method("POST")
        .uri("/order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let Json(order) = Json::<NewOrder>::from_request(req, &())
        .await
        .map_err(|rejection| rejection.into_response().status())?;
    let Json(reply) = web::orders::create_order(State(state.clone()), Json(order))
        .await
        .unwrap();
    Ok(reply)
}

#[tokio::test]
async fn startup_seeds_store() {
    let dir = tempdir().unwrap();
    let state = app(&dir);
    assert_eq!(state.store().count_orders().unwrap(), 20);
}

#[tokio::test]
async fn dashboard_updates_inventory_and_renders() {
    let dir = tempdir().unwrap();
    let state = app(&dir);

    let html = web::dashboard::dashboard(State(state.clone())).await.unwrap().0;
    let snap = state.metrics().snapshot();

    assert!((50..=200).contains(&snap.inventory_current));
    assert_eq!(snap.sales_total == 0, snap.orders_total == 0);
    assert!(html.contains("Raincoat Business Dashboard"));
    assert!(html.contains("\"orders\":20"));
    assert!(html.contains(&format!("\"inventory\":{}", snap.inventory_current)));
}

#[tokio::test]
async fn post_order_inserts_and_reports_success() {
    let dir = tempdir().unwrap();
    let state = app(&dir);
    let before = state.store().sum_revenue().unwrap();

    let req = NewOrder {
        customer: "Jane Doe".into(),
        quantity: 2.into(),
        price: 49.99.into(),
    };
    let Json(body) = web::orders::create_order(State(state.clone()), Json(req))
        .await
        .unwrap();

    assert_eq!(body, json!({ "success": true }));
    assert_eq!(state.store().count_orders().unwrap(), 21);
    let delta = state.store().sum_revenue().unwrap() - before;
    assert!((delta - 99.98).abs() < 1e-6);
}

#[tokio::test]
async fn raw_order_bodies_are_stored_as_sent() {
    let dir = tempdir().unwrap();
    let state = app(&dir);

    let cases = [
        (
            r#"{"customer":"","quantity":-3,"price":-12.5}"#,
            (FieldValue::from(""), FieldValue::Integer(-3), FieldValue::Real(-12.5)),
        ),
        (
            r#"{"customer":"Ann","quantity":2.5,"price":null}"#,
            (FieldValue::from("Ann"), FieldValue::Real(2.5), FieldValue::Null),
        ),
        (
            r#"{"customer":null,"quantity":null,"price":19.99}"#,
            (FieldValue::Null, FieldValue::Null, FieldValue::Real(19.99)),
        ),
        (
            r#"{"customer":"Bo","quantity":"two","price":"cheap"}"#,
            (FieldValue::from("Bo"), FieldValue::from("two"), FieldValue::from("cheap")),
        ),
    ];

    for (n, (body, (customer, quantity, price))) in cases.into_iter().enumerate() {
        let reply = post_order_raw(&state, body).await.unwrap();
        assert_eq!(reply, json!({ "success": true }), "{body}");

        let row = state.store().recent_orders(1).unwrap().remove(0);
        assert_eq!(row.id, 21 + n as i64);
        assert_eq!((row.customer, row.quantity, row.price), (customer, quantity, price));
    }
    assert_eq!(state.store().count_orders().unwrap(), 24);
}

#[tokio::test]
async fn malformed_order_json_is_rejected() {
    let dir = tempdir().unwrap();
    let state = app(&dir);

    let status = post_order_raw(&state, r#"{"customer":"Ann","quantity":"#)
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = post_order_raw(&state, r#"{"customer":"Ann","quantity":1}"#)
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(state.store().count_orders().unwrap(), 20);
}

#[tokio::test]
async fn transfer_to_unreachable_host_reports_false() {
    let dir = tempdir().unwrap();
    let state = app(&dir);
    let before = std::fs::read(state.store().path()).unwrap();

    let Json(body) = web::transfer::push_store(State(state.clone())).await;

    assert_eq!(body, json!({ "success": false }));
    assert_eq!(std::fs::read(state.store().path()).unwrap(), before);
}

#[tokio::test]
async fn metrics_endpoint_uses_exposition_content_type() {
    let dir = tempdir().unwrap();
    let state = app(&dir);
    web::dashboard::dashboard(State(state.clone())).await.unwrap();

    let resp = ops::metrics(State(state.clone())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        EXPOSITION_CONTENT_TYPE
    );

    let text = body_string(resp).await;
    let inv = state.metrics().snapshot().inventory_current;
    assert!(text.contains(&format!("raincoat_inventory_current {inv}")));
    assert!(text.contains("raincoat_http_requests_total{route=\"/\"} 1"));
}

#[tokio::test]
async fn store_failure_maps_to_generic_error() {
    let resp = web::ApiError(RaincoatError::Store("disk I/O error".into())).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["error"], "STORE");
}

#[tokio::test]
async fn dashboard_surfaces_store_errors() {
    let dir = tempdir().unwrap();
    let state = app(&dir);
    std::fs::remove_file(state.store().path()).unwrap();
    std::fs::create_dir(state.store().path()).unwrap();

    let err = web::dashboard::dashboard(State(state)).await.expect_err("must fail");
    assert_eq!(err.0.client_code().as_str(), "STORE");
}

#[tokio::test]
async fn router_builds() {
    let dir = tempdir().unwrap();
    let _router = router::build_router(app(&dir));
}
