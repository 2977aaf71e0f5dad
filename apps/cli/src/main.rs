mod args;
mod config;
mod dirs;

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use app_api::AppContext;
use http_api::HttpState;
use toll_app::{AppConfig, AppState, SharedStore, close_sqlite_store, open_sqlite_store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let loaded = config::load_or_create(args.config_path.as_deref()).map_err(io::Error::other)?;
    init_tracing(&loaded.config.log_filter);
    if loaded.created {
        tracing::info!(
            path = %loaded.file.display(),
            port = loaded.config.port,
            "created default config"
        );
    }
    let config = loaded.config;

    let db_path = match args.db_path.or_else(|| config.db_path()) {
        Some(path) => path,
        None => dirs::default_db_path().map_err(io::Error::other)?,
    };
    if let Some(dir) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let store = open_sqlite_store(&db_path).map_err(|err| {
        tracing::error!(error = %err, "store unavailable");
        io::Error::other(err.to_string())
    })?;
    tracing::info!(path = %db_path.display(), "store ready");

    let app_config = AppConfig {
        join_strategy: config.join_strategy,
        store_timeout: Duration::from_secs(config.store_timeout_secs),
    };
    tracing::info!(join_strategy = %app_config.join_strategy, "report services configured");
    let shared: SharedStore = store.clone();
    let app_state = AppState::new(app_config, shared);
    let state = HttpState::new(AppContext::new(app_state));
    let router = http_api::router(state);

    let bind: IpAddr = config
        .bind
        .parse()
        .map_err(|_| io::Error::other(format!("invalid bind address: {}", config.bind)))?;
    let port = args.port.unwrap_or(config.port);
    let (listener, actual_port, used_fallback) = bind_port(bind, port).await?;
    if used_fallback {
        tracing::warn!(port, actual_port, "configured port unavailable; using fallback");
    }

    tracing::info!("toll reports listening on http://{bind}:{actual_port}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if close_sqlite_store(store)? {
        tracing::info!("store closed");
    } else {
        tracing::warn!("store left open for in-flight requests to finish");
    }
    Ok(())
}

fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn bind_port(
    ip: IpAddr,
    port: u16,
) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::new(ip, 0)).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    match tokio::net::TcpListener::bind(SocketAddr::new(ip, port)).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener = tokio::net::TcpListener::bind(SocketAddr::new(ip, 0)).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
