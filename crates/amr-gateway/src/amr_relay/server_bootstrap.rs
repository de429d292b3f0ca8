//! AMR relay server bootstrap and router wiring.

use std::future::Future;

use super::*;

/// Run the AMR relay server until Ctrl-C or SIGTERM is received.
pub async fn run_amr_relay_server(config: AmrRelayServerConfig) -> Result<()> {
    let bind_addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid --bind '{}': expected host:port", config.bind))?;
    let state = Arc::new(AmrRelayState::from_config(&config)?);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind amr relay on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve amr relay listen address")?;

    tracing::info!(
        addr = %local_addr,
        galaxy_url = state.galaxy_url.as_str(),
        api_key = config.galaxy.masked_api_key().as_str(),
        max_upload_bytes = state.workflow.max_upload_bytes(),
        "amr relay listening"
    );

    let app = build_amr_relay_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = first_shutdown_signal(interrupt_signal(), terminate_signal()).await;
            tracing::info!(signal = signal.as_str(), "amr relay shutting down");
        })
        .await
        .context("amr relay server exited unexpectedly")?;
    tracing::info!("amr relay stopped");
    Ok(())
}

pub fn build_amr_relay_router(state: Arc<AmrRelayState>) -> Router {
    let body_limit = state
        .workflow
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    Router::new()
        .route(HEALTH_ENDPOINT, get(handle_health))
        .route(TEST_GALAXY_ENDPOINT, get(handle_test_galaxy))
        .route(UPLOAD_ENDPOINT, post(handle_upload))
        .route(RUN_AMRFINDER_ENDPOINT, post(handle_run_amrfinder))
        .route(JOB_STATUS_ENDPOINT, get(handle_job_status))
        .route(DATASET_ENDPOINT, get(handle_dataset_result))
        .route(HISTORIES_ENDPOINT, get(handle_list_histories))
        .route(TOOLS_SEARCH_ENDPOINT, get(handle_search_tools))
        .route(TOOL_DETAIL_ENDPOINT, get(handle_tool_detail))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        }
    }
}

pub(super) async fn first_shutdown_signal(
    interrupt: impl Future<Output = ()>,
    terminate: impl Future<Output = ()>,
) -> ShutdownSignal {
    tokio::select! {
        _ = interrupt => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
    }
}

async fn interrupt_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            terminate.recv().await;
        }
        Err(error) => {
            tracing::warn!(error = %error, "failed to listen for sigterm");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await;
}
