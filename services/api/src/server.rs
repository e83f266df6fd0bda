use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Duration;
use tracing::info;

use intake_processor::config::AppConfig;
use intake_processor::error::AppError;
use intake_processor::intake::{
    change_feed, ChangeNotifier, IntakeRouterState, IntakeService, ProcessTypeCache,
};
use intake_processor::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{seed_process_types, AppState, InMemoryRecordStore, LoggingDeliverySink};
use crate::routes::with_intake_routes;

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

    let store = Arc::new(InMemoryRecordStore::with_process_types(
        seed_process_types(),
    ));
    let cache = Arc::new(ProcessTypeCache::with_ttl(
        Arc::clone(&store),
        Duration::minutes(config.cache.ttl_minutes),
    ));
    let service = Arc::new(IntakeService::with_cache(store, cache));

    let notifier = ChangeNotifier::new(Arc::new(LoggingDeliverySink));
    let (feed, pump) = change_feed(notifier);
    tokio::spawn(pump.run());

    let app = with_intake_routes(IntakeRouterState { service, feed })
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "intake processor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
