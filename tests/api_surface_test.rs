//! HTTP surface tests: routes wired through the full router with
//! in-memory catalogs behind the services.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Request, StatusCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use rebar_pricing_api::{
    app_router,
    catalogs::{
        memory::{InMemoryItemCatalog, InMemoryTierCatalog},
        ItemRecord, TierRecord,
    },
    config::{AppConfig, PricingConfig},
    models::{DocumentKind, SalesDocument, SalesLine},
    notifications::TracingNotifier,
    services::{BasicTotals, TierService, WeightPricingService},
    AppState,
};

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        log_level: "info".into(),
        log_json: false,
        pricing: PricingConfig::default(),
    }
}

fn build_app(items: InMemoryItemCatalog, tiers: InMemoryTierCatalog) -> Router {
    let pricing_service = WeightPricingService::new(
        Arc::new(items),
        Arc::new(tiers.clone()),
        Arc::new(TracingNotifier),
        Arc::new(BasicTotals),
    );
    let tier_service = TierService::new(Arc::new(tiers));
    app_router(AppState {
        config: test_config(),
        tier_service,
        pricing_service,
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn decimal_field(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = build_app(InMemoryItemCatalog::new(), InMemoryTierCatalog::new());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "rebar-pricing-api");
}

#[tokio::test]
async fn tier_listing_returns_all_bands_in_order() {
    let tiers = InMemoryTierCatalog::new();
    tiers
        .set_tiers(vec![
            TierRecord {
                from_metric_ton: dec!(5),
                to_metric_ton: dec!(10),
                discount_per_kg: dec!(0.20),
                active: true,
            },
            TierRecord {
                from_metric_ton: dec!(0),
                to_metric_ton: dec!(4.999),
                discount_per_kg: dec!(0.10),
                active: false,
            },
        ])
        .await;
    let app = build_app(InMemoryItemCatalog::new(), tiers);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/discount-tiers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Ascending by lower bound, inactive band included.
    assert_eq!(decimal_field(&data[0]["from_metric_ton"]), dec!(0));
    assert_eq!(data[0]["active"], false);
    assert_eq!(decimal_field(&data[1]["discount_per_kg"]), dec!(0.20));
}

#[tokio::test]
async fn pricing_preview_returns_repriced_document() {
    let items = InMemoryItemCatalog::new();
    items
        .upsert_item(ItemRecord {
            item_code: "REBAR-12".into(),
            item_name: Some("Rebar 12mm".into()),
            description: None,
            item_group: "Re-Bar".into(),
            weight_per_unit: Some(dec!(1.0)),
            weight_uom: Some("kg".into()),
        })
        .await;
    let tiers = InMemoryTierCatalog::new();
    tiers
        .set_tiers(vec![TierRecord {
            from_metric_ton: dec!(5),
            to_metric_ton: dec!(10),
            discount_per_kg: dec!(0.20),
            active: true,
        }])
        .await;
    let app = build_app(items, tiers);

    let doc = SalesDocument::new(
        DocumentKind::SalesOrder,
        "SAL-ORD-0100",
        vec![
            SalesLine::new("REBAR-12", dec!(5000), dec!(5.00)).with_price_list_rate(dec!(5.00)),
            SalesLine::new("REBAR-12", dec!(3000), dec!(5.00)).with_price_list_rate(dec!(5.00)),
        ],
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/pricing/preview")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&doc).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(decimal_field(&data["total_weight_mt"]), dec!(8.0));
    assert_eq!(decimal_field(&data["discount_per_kg"]), dec!(0.20));
    assert_eq!(decimal_field(&data["custom_total_discount"]), dec!(1600.00));
    assert_eq!(decimal_field(&data["items"][0]["rate"]), dec!(4.80));
}

#[tokio::test]
async fn pricing_preview_rejects_negative_quantity() {
    let app = build_app(InMemoryItemCatalog::new(), InMemoryTierCatalog::new());

    let doc = SalesDocument::new(
        DocumentKind::Quotation,
        "QTN-0101",
        vec![SalesLine::new("REBAR-12", dec!(-5), dec!(5.00))],
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/pricing/preview")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&doc).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
}
