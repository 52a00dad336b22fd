use crate::cli::ServeArgs;
use crate::infra::{AppState, Frontend, InMemoryBackend};
use crate::routes::with_frontend_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use career_nirvana::backend::{CareerBackend, HttpBackend};
use career_nirvana::config::{AppConfig, BackendConfig};
use career_nirvana::discovery::{CatalogImporter, StoryCatalog};
use career_nirvana::error::AppError;
use career_nirvana::signup::SignupSessions;
use career_nirvana::telemetry;
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
    if let Some(base_url) = args.backend.api_base_url.take() {
        config.backend = BackendConfig::new(base_url, config.backend.timeout.as_secs())?;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = match args.catalog.take() {
        Some(path) => {
            let catalog = CatalogImporter::from_path(&path)?;
            info!(path = %path.display(), stories = catalog.len(), "story catalog imported");
            catalog
        }
        None => StoryCatalog::standard(),
    };

    if args.backend.mock_backend {
        info!("serving with the in-memory backend");
        serve(config, catalog, InMemoryBackend::default()).await
    } else {
        let backend = HttpBackend::new(&config.backend)?;
        info!(base_url = backend.base_url(), "serving against the career backend");
        serve(config, catalog, backend).await
    }
}

async fn serve<B>(config: AppConfig, catalog: StoryCatalog, backend: B) -> Result<(), AppError>
where
    B: CareerBackend + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let backend = Arc::new(backend);
    let frontend = Arc::new(Frontend::new(
        backend.clone(),
        catalog,
        config.server.assets_dir.clone(),
    ));
    let sessions = Arc::new(SignupSessions::new(backend));

    let app = with_frontend_routes(frontend, sessions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "career nirvana frontend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
