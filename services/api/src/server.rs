use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;
use vendcat::catalog::CatalogService;
use vendcat::config::AppConfig;
use vendcat::error::AppError;
use vendcat::telemetry;

use crate::cli::ServeArgs;
use crate::demo::demo_products;
use crate::infra::{
    default_catalog_config, load_products, AppState, InMemoryCurationStore,
    LoggingSubmissionTransport,
};
use crate::routes::with_catalog_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let products_file = args.products.take().or(config.catalog.products_file.clone());
    let products = match &products_file {
        Some(path) => load_products(path)?,
        None => {
            info!("no product file configured, serving the built-in demo catalog");
            demo_products()
        }
    };

    let store = Arc::new(InMemoryCurationStore::default());
    let transport = Arc::new(LoggingSubmissionTransport);
    let service = Arc::new(CatalogService::new(
        products,
        store,
        transport,
        default_catalog_config(),
    )?);

    info!(
        products = service.product_count(),
        "vending catalog loaded"
    );

    let app = with_catalog_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vending catalog service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
