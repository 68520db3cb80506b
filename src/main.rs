use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use rebar_pricing_api as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    let db = Arc::new(
        api::db::establish_connection(&cfg)
            .await
            .context("failed to connect to database")?,
    );

    let item_catalog: Arc<dyn api::catalogs::ItemCatalog> =
        Arc::new(api::catalogs::SeaOrmItemCatalog::new(db.clone()));
    let tier_catalog: Arc<dyn api::catalogs::TierCatalog> =
        Arc::new(api::catalogs::SeaOrmTierCatalog::new(db.clone()));
    let notifier: Arc<dyn api::notifications::Notifier> =
        Arc::new(api::notifications::TracingNotifier);
    let totals: Arc<dyn api::services::TotalsEngine> = Arc::new(api::services::BasicTotals);

    let pricing_service = api::services::WeightPricingService::new(
        item_catalog,
        tier_catalog.clone(),
        notifier,
        totals,
    );
    let tier_service = api::services::TierService::new(tier_catalog);

    let state = api::AppState {
        config: cfg.clone(),
        tier_service,
        pricing_service,
    };
    let app = api::app_router(state);

    let addr = cfg.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
