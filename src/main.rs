// src/main.rs

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use rootstock_agent::{
    agent::{
        providers::{GoogleProvider, OpenAiProvider},
        Orchestrator,
    },
    api,
    blockchain::EvmExecutor,
    config::Config,
    mcp,
    tools::ToolDispatcher,
    AppState,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> Result<()> {
    let cors = match state.config.cors_allowed_origin.as_deref() {
        None => CorsLayer::permissive(),
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .context("CORS_ALLOWED_ORIGIN is not a valid header value")?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let addr = state.config.socket_addr();
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("🚀 HTTP Server listening on {}", addr);
    axum::serve(listener, app).await.context("HTTP server error")
}

fn build_state(config: Config) -> Result<AppState> {
    let executor = EvmExecutor::new(config.chain_config()?);
    match executor.signer_address() {
        Some(address) => info!("Signing with {:?} via {}", address, config.rpc_url),
        None => info!("No WALLET_PRIVATE_KEY set; write calls will fail"),
    }

    let dispatcher = Arc::new(ToolDispatcher::new(
        Arc::new(executor),
        config.swap_contract,
        &config.chain_name,
    ));
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(GoogleProvider::new(&config.google)),
        Arc::new(OpenAiProvider::new(&config.openai)),
        dispatcher.clone(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        dispatcher,
        orchestrator,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for MCP
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rootstock_agent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(|e| {
        error!("❌ Failed to load configuration: {:#}", e);
        e
    })?;
    let mcp_mode = config.mcp_mode || env::args().any(|arg| arg == "--mcp");
    let state = build_state(config)?;

    if mcp_mode {
        info!("🚀 Starting MCP server on stdin/stdout...");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        mcp::stdio::serve(stdin, tokio::io::stdout(), &state.dispatcher)
            .await
            .context("MCP stdio transport failed")
    } else {
        run_http_server(state).await
    }
}
