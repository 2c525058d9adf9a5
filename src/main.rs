use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

mod api;
mod error;
mod format;
mod models;
mod parser;
mod schema;
mod specs;

const DEFAULT_LOG_DIR: &str = "./logs";
const PORT: u16 = 8080;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Resolve log directory
    let log_dir = resolve_log_dir();
    tracing::info!(dir = %log_dir.display(), "serving combat log exports");

    // 2. Shared mutable log_dir (future settings endpoint can change it at runtime)
    let shared_log_dir = Arc::new(Mutex::new(log_dir));

    // 3. Run the HTTP server until ctrl-c
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(async {
        let app = api::create_router(shared_log_dir);
        let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT)).await {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("failed to bind port {}: {}", PORT, e);
                return;
            }
        };

        // Open the browser once the server is up
        tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_millis(600)).await;
            let _ = open::that(format!("http://localhost:{}", PORT));
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
            })
            .await
            .ok();
    });
}

fn resolve_log_dir() -> PathBuf {
    // Check CLI argument first (skip dialog)
    if let Some(arg) = std::env::args().nth(1) {
        let p = PathBuf::from(&arg);
        if p.exists() {
            return p;
        }
    }

    // Use default path if it exists
    let default = PathBuf::from(DEFAULT_LOG_DIR);
    if default.exists() {
        return default;
    }

    // Default not found, show folder picker
    match rfd::FileDialog::new()
        .set_title("Select Combat Log Export Directory")
        .pick_folder()
    {
        Some(path) => path,
        None => std::process::exit(0),
    }
}
