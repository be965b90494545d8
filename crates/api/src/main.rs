use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_api::config::{ServerConfig, SHUTDOWN_GRACE, STARTUP_DEADLINE};
use todo_api::router::build_app_router;
use todo_api::state::AppState;
use todo_core::Core;
use todo_db::TodoRepo;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(LevelFilter::INFO);
            tracing::error!(error = %err, "startup");
            return ExitCode::FAILURE;
        }
    };

    // --- Tracing ---
    init_tracing(config.log_level);

    match run(config).await {
        Ok(()) => {
            tracing::info!("shutdown complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "startup");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(level: LevelFilter) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(version = %config.version, "starting service");

    // --- Database ---
    tracing::info!(status = "initializing database", "startup");
    let pool = todo_db::create_pool(&config.database_url).context("opening database")?;

    tracing::info!(status = "running database migrations", "startup");
    tokio::time::timeout(STARTUP_DEADLINE, async {
        todo_db::wait_for_db(&pool).await.context("ping")?;
        todo_db::run_migrations(&pool).await.context("migrate")?;
        anyhow::Ok(())
    })
    .await
    .context("database not ready before the startup deadline")??;

    // --- App state ---
    tracing::info!(status = "initializing api server", "startup");
    let core = Core::new(Arc::new(TodoRepo::new(pool.clone())));
    let addr = config.bind_addr();
    let app = build_app_router(AppState::new(core, config));

    // --- Start server ---
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(status = "api server started", address = %listener.local_addr()?, "startup");

    let shutdown = CancellationToken::new();
    let mut server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
        }
    });

    tokio::select! {
        result = &mut server => {
            result.context("api server task")?.context("api error")?;
        }
        signal = shutdown_signal() => {
            tracing::info!(status = "shutdown started", signal, "shutdown");
            shutdown.cancel();

            match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
                Ok(result) => {
                    result.context("api server task")?.context("api error")?;
                }
                Err(_) => {
                    server.abort();
                    pool.close().await;
                    anyhow::bail!("could not stop api server gracefully");
                }
            }
        }
    }

    // --- Post-shutdown cleanup ---
    pool.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}

/// Wait for a termination signal and return its name.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
