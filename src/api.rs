use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::error::DocumentError;
use crate::models::*;
use crate::parser;

struct AppState {
    log_dir: Arc<std::sync::Mutex<PathBuf>>,
    cache: Mutex<HashMap<String, (u64, LogAggregate)>>,
}

pub fn create_router(log_dir: Arc<std::sync::Mutex<PathBuf>>) -> Router {
    let state = Arc::new(AppState {
        log_dir,
        cache: Mutex::new(HashMap::new()),
    });

    Router::new()
        .route("/api/logs", get(list_logs))
        .route("/api/logs/{filename}/aggregate", get(log_aggregate))
        .route("/api/logs/{filename}/encounter/{index}", get(encounter_detail))
        .fallback_service(ServeDir::new("public"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn list_logs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LogFileInfo>>, (StatusCode, String)> {
    let dir = state.log_dir.lock().unwrap().clone();

    let mut logs: Vec<LogFileInfo> = Vec::new();
    let mut dirs_to_scan = vec![dir];

    while let Some(scan_dir) = dirs_to_scan.pop() {
        let entries = match std::fs::read_dir(&scan_dir) {
            Ok(e) => e,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                dirs_to_scan.push(path);
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                    let metadata = std::fs::metadata(&path).ok();
                    let size_bytes = metadata.as_ref().map(|m| m.len()).unwrap_or(0);

                    logs.push(LogFileInfo {
                        filename: filename.to_string(),
                        size_bytes,
                        size_display: format_size(size_bytes),
                        date_str: modified_date(metadata.as_ref()),
                    });
                }
            }
        }
    }

    // Newest first
    logs.sort_by(|a, b| b.date_str.cmp(&a.date_str));
    logs.dedup_by(|a, b| a.filename == b.filename);

    Ok(Json(logs))
}

async fn log_aggregate(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<axum::response::Response, (StatusCode, String)> {
    use axum::response::IntoResponse;

    // Sanitize filename
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err((StatusCode::BAD_REQUEST, "Invalid filename".to_string()));
    }

    // Search recursively for the file
    let log_dir = state.log_dir.lock().unwrap().clone();
    let path = find_file_recursive(&log_dir, &filename)
        .ok_or((StatusCode::NOT_FOUND, "Log file not found".to_string()))?;

    let current_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    // If the file size is unchanged, return the cached aggregate instantly
    {
        let cache = state.cache.lock().await;
        if let Some((cached_size, cached)) = cache.get(&filename) {
            if *cached_size == current_size {
                tracing::info!(%filename, size_bytes = current_size, "aggregate cache hit");
                let headers = [
                    ("X-Cache-Status", "HIT".to_string()),
                    ("X-Parse-Time", "0".to_string()),
                ];
                return Ok((headers, Json(cached.clone())).into_response());
            }
            tracing::info!(%filename, "aggregate cache stale, reparsing");
        }
    }

    let fname = filename.clone();
    let (aggregate, parse_time) = tokio::task::spawn_blocking(move || {
        let start = std::time::Instant::now();
        parser::parse_log_file(&path).map(|a| (a, start.elapsed().as_secs_f64()))
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Task failed: {}", e)))?
    .map_err(|e| (error_status(&e), e.to_string()))?;

    tracing::info!(filename = %fname, elapsed_secs = parse_time, "parsed log");

    {
        let mut cache = state.cache.lock().await;
        cache.insert(fname, (current_size, aggregate.clone()));
    }

    let headers = [
        ("X-Cache-Status", "PARSED".to_string()),
        ("X-Parse-Time", format!("{:.2}", parse_time)),
    ];
    Ok((headers, Json(aggregate)).into_response())
}

async fn encounter_detail(
    State(state): State<Arc<AppState>>,
    Path((filename, index)): Path<(String, usize)>,
) -> Result<Json<Encounter>, (StatusCode, String)> {
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err((StatusCode::BAD_REQUEST, "Invalid filename".to_string()));
    }

    let log_dir = state.log_dir.lock().unwrap().clone();
    let path = find_file_recursive(&log_dir, &filename)
        .ok_or((StatusCode::NOT_FOUND, "Log file not found".to_string()))?;

    let current_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    {
        let cache = state.cache.lock().await;
        if let Some((cached_size, cached)) = cache.get(&filename) {
            if *cached_size == current_size {
                return cached
                    .encounters
                    .get(index)
                    .cloned()
                    .map(Json)
                    .ok_or((StatusCode::NOT_FOUND, "Encounter not found".to_string()));
            }
        }
    }

    let fname = filename.clone();
    let aggregate = tokio::task::spawn_blocking(move || parser::parse_log_file(&path))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Task failed: {}", e)))?
        .map_err(|e| (error_status(&e), e.to_string()))?;

    let result = aggregate
        .encounters
        .get(index)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Encounter not found".to_string()));

    {
        let mut cache = state.cache.lock().await;
        cache.insert(fname, (current_size, aggregate));
    }

    result
}

fn error_status(err: &DocumentError) -> StatusCode {
    match err {
        DocumentError::ReadFile { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DocumentError::Malformed(_) | DocumentError::UnsupportedSchema(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.1} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn modified_date(metadata: Option<&std::fs::Metadata>) -> String {
    metadata
        .and_then(|m| m.modified().ok())
        .map(|t| chrono::DateTime::<chrono::Local>::from(t).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Recursively search for a file by name in a directory tree
fn find_file_recursive(dir: &std::path::Path, target: &str) -> Option<PathBuf> {
    let mut dirs = vec![dir.to_path_buf()];
    while let Some(d) = dirs.pop() {
        if let Ok(entries) = std::fs::read_dir(&d) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    dirs.push(path);
                } else if path.file_name().and_then(|n| n.to_str()) == Some(target) {
                    return Some(path);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_pick_a_sensible_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1_048_576), "5.0 MB");
    }
}
