mod pages;

use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use kitchen_units::UnitRegistry;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use trivet_core::RecipeBook;

/// Application state shared across all handlers.
pub struct AppState {
    pub book: RecipeBook,
    /// Host used in the URLs that QR codes point at.
    pub host_base: String,
}

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry();

    let book_dir = env::var("TRIVET_BOOK_DIR").context("TRIVET_BOOK_DIR must be set")?;
    let bind_addr = env::var("TRIVET_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let host_base = env::var("TRIVET_HOST_BASE").unwrap_or_else(|_| bind_addr.clone());

    let units = UnitRegistry::new();
    let book = RecipeBook::load_dir(Path::new(&book_dir), &units)
        .with_context(|| format!("could not load recipe book from {book_dir}"))?;

    let state = Arc::new(AppState { book, host_base });

    let app = Router::new()
        .route("/", get(pages::index))
        .route("/recipe/{name}", get(pages::view_recipe))
        .route("/qr/{file}", get(pages::recipe_qr))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("could not bind {bind_addr}"))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
