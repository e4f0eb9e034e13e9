//! Development Server for the IR remote web pages
//!
//! Serves the page directory with correct MIME types and answers the
//! pages' WebSocket traffic on `/ws` with a simulated device.

mod config;
mod device;
mod ws;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::{get, get_service},
    Router,
};
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::device::Device;
use crate::ws::{ws_handler, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env();
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let app = app(&config, AppState::new(Device::demo()));

    println!("╔═══════════════════════════════════════════════════╗");
    println!("║          IR Remote Web Development Server         ║");
    println!("╠═══════════════════════════════════════════════════╣");
    println!("║  URL: http://localhost:{:<27}║", config.port);
    println!("║  Serving: {:<40}║", config.web_dir.display());
    println!("║  Press Ctrl+C to stop                             ║");
    println!("╚═══════════════════════════════════════════════════╝");
    println!();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server error: {}", e);
        std::process::exit(1);
    }
}

fn app(config: &ServerConfig, state: AppState) -> Router {
    let serve_dir = ServeDir::new(&config.web_dir)
        .append_index_html_on_directories(true);

    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state)
        .fallback_service(get_service(serve_dir).handle_error(|_| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }))
        .layer(axum::middleware::from_fn(add_headers))
}

/// Fix MIME types and disable caching of page assets
async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response<Body> {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let ok = response.status().is_success();
    let headers = response.headers_mut();

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    let content_type = if path.ends_with(".js") || path.ends_with(".mjs") {
        Some("application/javascript; charset=utf-8")
    } else if path.ends_with(".wasm") {
        Some("application/wasm")
    } else if path.ends_with(".css") {
        Some("text/css; charset=utf-8")
    } else if path.ends_with(".html") {
        Some("text/html; charset=utf-8")
    } else {
        None
    };
    if let Some(content_type) = content_type {
        if ok {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
    }

    response
}
