use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryListingRepository, InMemoryReviewRepository,
    RecordingNotificationSender,
};
use crate::routes::operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use broker_directory::config::AppConfig;
use broker_directory::error::AppError;
use broker_directory::telemetry;
use broker_directory::workflows::directory::applications::{
    application_router, ApplicationIntakeService,
};
use broker_directory::workflows::directory::listings::listing_router;
use broker_directory::workflows::directory::reviews::{review_router, ReviewModerationService};
use tracing::info;

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

    let listings = Arc::new(InMemoryListingRepository::default());
    let reviews = Arc::new(InMemoryReviewRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let notifier = Arc::new(RecordingNotificationSender::default());

    let moderation = Arc::new(ReviewModerationService::new(
        listings.clone(),
        reviews,
        notifier.clone(),
        config.directory.rating_step,
    ));
    let intake = Arc::new(ApplicationIntakeService::new(
        listings.clone(),
        applications,
        notifier,
    ));

    let app = operational_routes()
        .merge(listing_router(listings))
        .merge(review_router(moderation))
        .merge(application_router(intake))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "broker directory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
