#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod dispatcher;
mod service;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rmcp::ServiceExt;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use voicegen_config::{Config, Transport};
use voicegen_storage::S3AudioStore;
use voicegen_tts::MinimaxSynthesizer;

pub use auth::{AuthDecision, AuthScope, DenyReason, authorize, require_auth};
pub use dispatcher::{DispatchError, Dispatcher, GenerateVoiceParams};
pub use service::VoiceGenService;

const SSE_KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Build the production service and serve the configured transport
/// until shutdown
///
/// # Errors
///
/// Returns an error if the listen address is invalid, the listener
/// cannot bind, or the transport fails while serving
pub async fn serve(config: Config, shutdown: CancellationToken) -> anyhow::Result<()> {
    let config = Arc::new(config);

    let synthesizer = Arc::new(MinimaxSynthesizer::new(&config.api, &config.audio));
    let store = Arc::new(S3AudioStore::new(&config.storage, &config.audio.format));
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&config),
        synthesizer,
        store,
    ));
    let service = VoiceGenService::new(dispatcher);

    match config.server.transport {
        Transport::Stdio => serve_stdio(service, shutdown).await,
        Transport::Http => serve_http(service, &config, shutdown).await,
        Transport::Sse => serve_sse(service, &config, shutdown).await,
    }
}

/// Serve over the local process pipe
async fn serve_stdio(service: VoiceGenService, shutdown: CancellationToken) -> anyhow::Result<()> {
    tracing::info!("MCP server listening on stdio");

    let running = service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {e:?}");
    })?;

    tokio::select! {
        result = running.waiting() => {
            result?;
            tracing::info!("stdio transport closed");
        }
        () = shutdown.cancelled() => {
            tracing::info!("shutdown requested");
        }
    }

    Ok(())
}

/// Serve the streamable HTTP transport at `/mcp`
async fn serve_http(
    service: VoiceGenService,
    config: &Arc<Config>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = config.server.listen_address()?;

    let mcp_service = StreamableHttpService::new(
        move || Ok(service.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            sse_keep_alive: Some(SSE_KEEP_ALIVE),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service("/mcp", mcp_service);
    let router = apply_http_layers(router, config);

    tracing::info!("MCP endpoint: http://{addr}/mcp");

    serve_router(router, addr, shutdown).await
}

/// Serve the SSE transport at `/sse` with the message endpoint at `/message`
async fn serve_sse(
    service: VoiceGenService,
    config: &Arc<Config>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = config.server.listen_address()?;

    let (sse_server, router) = SseServer::new(SseServerConfig {
        bind: addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: shutdown.child_token(),
        sse_keep_alive: Some(SSE_KEEP_ALIVE),
    });

    let running = sse_server.with_service(move || service.clone());

    let router = apply_http_layers(router, config);

    tracing::info!("SSE endpoint: http://{addr}/sse");

    let result = serve_router(router, addr, shutdown).await;
    running.cancel();
    result
}

/// Tracing plus the router-wide credential check
///
/// Tool-scope enforcement lives in the dispatcher; the router-wide
/// layer takes over when tool-level enforcement is switched off.
fn apply_http_layers(router: axum::Router, config: &Arc<Config>) -> axum::Router {
    let mut router = router.layer(TraceLayer::new_for_http());

    if config.auth.enabled && !config.auth.require_auth_for_tools {
        let auth_config = config.auth.clone();
        router = router.layer(axum::middleware::from_fn(move |request, next| {
            let auth_config = auth_config.clone();
            async move { auth::require_auth(auth_config, request, next).await }
        }));
    }

    router
}

async fn serve_router(
    router: axum::Router,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("graceful shutdown initiated");
        })
        .await?;

    Ok(())
}
