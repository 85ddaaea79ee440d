use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryQuoteRepository, LoggingNotifier};
use crate::routes::with_estimate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use squeegee::config::AppConfig;
use squeegee::error::AppError;
use squeegee::telemetry;
use squeegee::workflows::estimate::EstimateService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    if !config.notifications.is_configured() {
        warn!("NOTIFY_EMAIL or SMTP_HOST missing; owner notifications will only be logged");
    }

    let repository = Arc::new(InMemoryQuoteRepository::default());
    let notifier = Arc::new(LoggingNotifier::new(config.notifications.clone()));
    let pricing = config.pricing.pricing_config();
    let estimate_service = Arc::new(EstimateService::new(repository, notifier, pricing));

    let app = with_estimate_routes(estimate_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        pricing_profile = config.pricing.profile.label(),
        "squeegee estimate service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
