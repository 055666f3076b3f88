use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth};
use service::{auth::FirebaseTokenVerifier, chatbot::ChatbotClient};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    // DB connection with pool options from config
    let db = models::db::connect_with_config(&cfg.database).await?;

    let verifier = Arc::new(FirebaseTokenVerifier::new(&cfg.firebase));
    if cfg.firebase.emulator_host.is_some() {
        warn!("firebase auth emulator configured; tokens are not signature-checked");
    }
    let chatbot = Arc::new(ChatbotClient::new(&cfg.chatbot));

    let state = auth::ServerState { db, verifier, chatbot };

    // Build router
    let app: Router = routes::build_router(build_cors(), state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, project = %cfg.firebase.project_id, "starting educonnect api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
