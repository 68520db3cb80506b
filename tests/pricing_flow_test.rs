//! End-to-end tests for the weight-discount pass and the kg/PCS price
//! sync, wired over the in-memory catalogs.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use rebar_pricing_api::{
    catalogs::{
        memory::{InMemoryItemCatalog, InMemoryPriceStore, InMemoryTierCatalog},
        ItemRecord, PriceRecord, TierRecord,
    },
    config::PricingConfig,
    hooks::DocumentHooks,
    models::{DocumentKind, SalesDocument, SalesLine},
    notifications::RecordingNotifier,
    services::{BasicTotals, PriceSyncService, TierService, WeightPricingService},
};

struct TestEnv {
    items: InMemoryItemCatalog,
    tiers: InMemoryTierCatalog,
    prices: InMemoryPriceStore,
    notifier: RecordingNotifier,
    hooks: DocumentHooks,
}

fn build_env() -> TestEnv {
    let items = InMemoryItemCatalog::new();
    let tiers = InMemoryTierCatalog::new();
    let prices = InMemoryPriceStore::new();
    let notifier = RecordingNotifier::new();

    let pricing = WeightPricingService::new(
        Arc::new(items.clone()),
        Arc::new(tiers.clone()),
        Arc::new(notifier.clone()),
        Arc::new(BasicTotals),
    );
    let price_sync = PriceSyncService::new(
        Arc::new(items.clone()),
        Arc::new(prices.clone()),
        Arc::new(notifier.clone()),
        PricingConfig::default(),
    );
    let hooks = DocumentHooks::new(pricing, price_sync);

    TestEnv {
        items,
        tiers,
        prices,
        notifier,
        hooks,
    }
}

fn item(code: &str, group: &str, weight: Option<Decimal>, uom: Option<&str>) -> ItemRecord {
    ItemRecord {
        item_code: code.to_string(),
        item_name: Some(format!("{code} name")),
        description: None,
        item_group: group.to_string(),
        weight_per_unit: weight,
        weight_uom: uom.map(String::from),
    }
}

fn tier(from: Decimal, to: Decimal, discount: Decimal, active: bool) -> TierRecord {
    TierRecord {
        from_metric_ton: from,
        to_metric_ton: to,
        discount_per_kg: discount,
        active,
    }
}

fn kg_price(code: &str, price_list: &str, rate: Decimal) -> PriceRecord {
    PriceRecord {
        id: Uuid::new_v4(),
        item_code: code.to_string(),
        price_list: price_list.to_string(),
        uom: "KG".to_string(),
        price_list_rate: rate,
        currency: "ETB".to_string(),
        selling: true,
    }
}

#[tokio::test]
async fn reprices_sales_order_from_weight_tier() {
    let env = build_env();
    env.items
        .upsert_item(item("REBAR-12", "Re-Bar", Some(dec!(1.0)), Some("kg")))
        .await;
    env.tiers
        .set_tiers(vec![tier(dec!(5), dec!(10), dec!(0.20), true)])
        .await;

    let doc = SalesDocument::new(
        DocumentKind::SalesOrder,
        "SAL-ORD-0001",
        vec![
            SalesLine::new("REBAR-12", dec!(5000), dec!(5.00)).with_price_list_rate(dec!(5.00)),
            SalesLine::new("REBAR-12", dec!(3000), dec!(5.00)).with_price_list_rate(dec!(5.00)),
        ],
    );

    let repriced = env.hooks.before_sales_document_save(&doc).await.unwrap();

    assert_eq!(repriced.total_net_weight, dec!(8000));
    assert_eq!(repriced.total_weight_mt, dec!(8.0));
    assert_eq!(repriced.discount_per_kg, dec!(0.20));

    for line in &repriced.items {
        assert_eq!(line.original_rate_per_kg, Some(dec!(5.00)));
        assert_eq!(line.new_rate_per_kg, Some(dec!(4.80)));
        assert_eq!(line.rate, dec!(4.80));
        assert_eq!(line.discount_amount, Decimal::ZERO);
        assert_eq!(line.discount_percentage, Decimal::ZERO);
    }
    assert_eq!(repriced.items[0].amount, dec!(24000.00));
    assert_eq!(repriced.items[1].amount, dec!(14400.00));
    // (5000 + 3000) x 0.20 per kg
    assert_eq!(repriced.custom_total_discount, dec!(1600.00));
    assert_eq!(repriced.net_total, dec!(38400.00));
    // The submitted document is untouched.
    assert_eq!(doc.items[0].rate, dec!(5.00));
}

#[tokio::test]
async fn metric_ton_weights_are_normalized_to_kg() {
    let env = build_env();
    env.items
        .upsert_item(item("COIL-8", "Re-Bar", Some(dec!(0.002)), Some("MT")))
        .await;
    env.tiers.set_tiers(vec![]).await;

    let doc = SalesDocument::new(
        DocumentKind::Quotation,
        "QTN-0002",
        vec![SalesLine::new("COIL-8", dec!(500), dec!(12.00))],
    );
    let repriced = env.hooks.before_sales_document_save(&doc).await.unwrap();

    // 0.002 mt/unit = 2 kg/unit, 500 units = 1000 kg
    assert_eq!(repriced.total_net_weight, dec!(1000));
    assert_eq!(repriced.total_weight_mt, dec!(1.000));
}

#[tokio::test]
async fn unsupported_uom_line_is_left_untouched_and_warned() {
    let env = build_env();
    env.items
        .upsert_item(item("REBAR-12", "Re-Bar", Some(dec!(1.0)), Some("kg")))
        .await;
    env.items
        .upsert_item(item("MESH-X", "Mesh", Some(dec!(4.0)), Some("lb")))
        .await;
    env.tiers
        .set_tiers(vec![tier(dec!(0), dec!(100), dec!(0.20), true)])
        .await;

    let doc = SalesDocument::new(
        DocumentKind::SalesOrder,
        "SAL-ORD-0003",
        vec![
            SalesLine::new("REBAR-12", dec!(1000), dec!(5.00)),
            SalesLine::new("MESH-X", dec!(10), dec!(75.00)),
        ],
    );
    let repriced = env.hooks.before_sales_document_save(&doc).await.unwrap();

    // Only the rebar line contributes weight or gets touched.
    assert_eq!(repriced.total_net_weight, dec!(1000));
    let mesh = &repriced.items[1];
    assert_eq!(mesh.rate, dec!(75.00));
    assert_eq!(mesh.amount, dec!(750.00));
    assert_eq!(mesh.original_rate_per_kg, None);

    let warnings = env.notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Unsupported UOM for MESH-X"));
}

#[tokio::test]
async fn missing_item_and_missing_weight_contribute_nothing() {
    let env = build_env();
    env.items
        .upsert_item(item("NO-WEIGHT", "Re-Bar", None, Some("kg")))
        .await;
    env.tiers
        .set_tiers(vec![tier(dec!(0), dec!(100), dec!(0.20), true)])
        .await;

    let doc = SalesDocument::new(
        DocumentKind::Quotation,
        "QTN-0004",
        vec![
            SalesLine::new("NO-WEIGHT", dec!(10), dec!(3.00)),
            SalesLine::new("GHOST", dec!(10), dec!(9.00)),
        ],
    );
    let repriced = env.hooks.before_sales_document_save(&doc).await.unwrap();

    assert_eq!(repriced.total_net_weight, Decimal::ZERO);
    assert_eq!(repriced.custom_total_discount, Decimal::ZERO);
    assert_eq!(repriced.items[0].rate, dec!(3.00));
    assert_eq!(repriced.items[1].rate, dec!(9.00));
}

#[tokio::test]
async fn inactive_tiers_are_ignored_by_selection_but_listed() {
    let env = build_env();
    env.tiers
        .set_tiers(vec![
            tier(dec!(0), dec!(100), dec!(0.50), false),
            tier(dec!(50), dec!(200), dec!(0.10), true),
        ])
        .await;
    env.items
        .upsert_item(item("REBAR-12", "Re-Bar", Some(dec!(1.0)), Some("kg")))
        .await;

    let doc = SalesDocument::new(
        DocumentKind::SalesOrder,
        "SAL-ORD-0005",
        vec![SalesLine::new("REBAR-12", dec!(1000), dec!(5.00))],
    );
    let repriced = env.hooks.before_sales_document_save(&doc).await.unwrap();

    // 1 mt only matches the inactive band, so no discount applies.
    assert_eq!(repriced.discount_per_kg, Decimal::ZERO);
    assert_eq!(repriced.items[0].rate, dec!(5.00));

    // The display listing still shows both bands.
    let tier_service = TierService::new(Arc::new(env.tiers.clone()));
    let listed = tier_service.list_tiers().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(!listed[0].active);
    assert_eq!(listed[0].from_metric_ton, dec!(0));
}

#[tokio::test]
async fn kg_price_save_creates_piece_price() {
    let env = build_env();
    env.items
        .upsert_item(item("REBAR-16", "Re-Bar", Some(dec!(0.89)), Some("kg")))
        .await;

    let price = kg_price("REBAR-16", "Standard Selling", dec!(50.00));
    env.hooks.on_item_price_saved(&price).await.unwrap();

    let stored = env.prices.snapshot().await;
    assert_eq!(stored.len(), 1);
    let pcs = &stored[0];
    assert_eq!(pcs.uom, "PCS");
    assert_eq!(pcs.price_list, "Standard Selling");
    assert_eq!(pcs.currency, "ETB");
    assert_eq!(pcs.price_list_rate, dec!(44.5000));
}

#[tokio::test]
async fn kg_price_save_updates_existing_piece_price() {
    let env = build_env();
    env.items
        .upsert_item(item("REBAR-16", "Re-Bar", Some(dec!(0.89)), Some("kg")))
        .await;
    env.prices
        .seed(PriceRecord {
            id: Uuid::new_v4(),
            item_code: "REBAR-16".to_string(),
            price_list: "Standard Selling".to_string(),
            uom: "PCS".to_string(),
            price_list_rate: dec!(40.00),
            currency: "ETB".to_string(),
            selling: true,
        })
        .await;

    let price = kg_price("REBAR-16", "Standard Selling", dec!(50.00));
    env.hooks.on_item_price_saved(&price).await.unwrap();

    let stored = env.prices.snapshot().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].price_list_rate, dec!(44.5000));
}

#[tokio::test]
async fn price_sync_skips_non_rebar_and_non_kg_prices() {
    let env = build_env();
    env.items
        .upsert_item(item("MESH-X", "Mesh", Some(dec!(4.0)), Some("kg")))
        .await;
    env.items
        .upsert_item(item("REBAR-16", "Re-Bar", Some(dec!(0.89)), Some("kg")))
        .await;

    env.hooks
        .on_item_price_saved(&kg_price("MESH-X", "Standard Selling", dec!(30.00)))
        .await
        .unwrap();

    let mut pcs_priced = kg_price("REBAR-16", "Standard Selling", dec!(44.50));
    pcs_priced.uom = "PCS".to_string();
    env.hooks.on_item_price_saved(&pcs_priced).await.unwrap();

    let mut buying = kg_price("REBAR-16", "Standard Buying", dec!(48.00));
    buying.selling = false;
    env.hooks.on_item_price_saved(&buying).await.unwrap();

    assert!(env.prices.snapshot().await.is_empty());
}

#[tokio::test]
async fn price_sync_warns_when_weight_unset() {
    let env = build_env();
    env.items
        .upsert_item(item("REBAR-20", "Re-Bar", None, Some("kg")))
        .await;

    let price = kg_price("REBAR-20", "Standard Selling", dec!(50.00));
    env.hooks.on_item_price_saved(&price).await.unwrap();

    assert!(env.prices.snapshot().await.is_empty());
    let warnings = env.notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Weight per Unit not set for REBAR-20"));
}

#[tokio::test]
async fn item_save_resyncs_all_kg_prices() {
    let env = build_env();
    let rebar = item("REBAR-16", "Re-Bar", Some(dec!(0.95)), Some("kg"));
    env.items.upsert_item(rebar.clone()).await;
    env.prices
        .seed(kg_price("REBAR-16", "Standard Selling", dec!(50.00)))
        .await;
    env.prices
        .seed(kg_price("REBAR-16", "Wholesale", dec!(47.00)))
        .await;

    env.hooks.on_item_saved(&rebar).await.unwrap();

    let stored = env.prices.snapshot().await;
    let pcs: Vec<_> = stored.iter().filter(|p| p.uom == "PCS").collect();
    assert_eq!(pcs.len(), 2);
    let standard = pcs
        .iter()
        .find(|p| p.price_list == "Standard Selling")
        .unwrap();
    assert_eq!(standard.price_list_rate, dec!(47.5000));
    let wholesale = pcs.iter().find(|p| p.price_list == "Wholesale").unwrap();
    assert_eq!(wholesale.price_list_rate, dec!(44.6500));
}
