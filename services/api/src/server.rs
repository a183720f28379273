use crate::cli::ServeArgs;
use crate::infra::{eager_pool, lazy_pool, shutdown_signal, AppState};
use crate::routes::with_applicant_routes;
use awesome_applicants::applicants::PgApplicantRepository;
use awesome_applicants::config::AppConfig;
use awesome_applicants::error::AppError;
use awesome_applicants::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let pool = lazy_pool(&config.database);
    let repository = Arc::new(PgApplicantRepository::new(pool.clone()));

    let app = with_applicant_routes(repository)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = ?config.database,
        "applicant service ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    readiness_flag.store(false, Ordering::Release);
    pool.close().await;
    info!("applicant service stopped");
    Ok(())
}

pub(crate) async fn check() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let pool = eager_pool(&config.database).await?;
    let repository = PgApplicantRepository::new(pool);
    let total = repository.count().await?;
    repository.pool().close().await;

    println!(
        "Database {}:{} reachable; {} applicant(s) stored",
        config.database.host, config.database.port, total
    );
    Ok(())
}
