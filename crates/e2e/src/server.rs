//! Stub content server - serves deterministic pages on an ephemeral port

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use tabshelf_common::StubAsset;

use crate::config::StubServerConfig;
use crate::error::{E2eError, E2eResult};

/// How long `shutdown` waits for in-flight connections to drain
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Handle to a running stub content server.
///
/// Owned by exactly one test; dropping it releases the socket.
pub struct StubServer {
    base_url: String,
    port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Bind an ephemeral port, start serving, and wait until healthy
    pub async fn start(config: &StubServerConfig) -> E2eResult<Self> {
        let listener = TcpListener::bind((config.host.as_str(), 0))
            .await
            .map_err(|e| {
                E2eError::StubServer(format!("Failed to bind {}:0: {}", config.host, e))
            })?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        info!("Starting stub content server on {}", base_url);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, router())
                .with_graceful_shutdown(shutdown)
                .await
            {
                warn!("Stub content server stopped with error: {}", e);
            }
        });

        let mut server = StubServer {
            base_url,
            port: addr.port(),
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        };

        if let Err(e) = server.wait_for_healthy(config.startup_timeout()).await {
            server.shutdown().await;
            return Err(e);
        }

        info!("Stub content server is healthy at {}", server.base_url);
        Ok(server)
    }

    /// Wait for the server to respond to health checks
    async fn wait_for_healthy(&self, timeout_duration: Duration) -> E2eResult<()> {
        let health_url = self.url("health");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&health_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    return Ok(());
                }
                Ok(resp) => {
                    warn!("Health check returned {}", resp.status());
                }
                Err(e) => {
                    if !e.is_connect() {
                        warn!("Health check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(50)).await;
        }

        Err(E2eError::ServerHealthCheck(attempts))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Absolute URL for a path relative to the server root
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Deterministic asset `index` as served by this instance
    pub fn asset(&self, index: u32) -> StubAsset {
        StubAsset::generic(&self.base_url, index)
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Stop accepting connections and release the socket. Idempotent.
    pub async fn shutdown(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        info!("Stopping stub content server on port {}", self.port);

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        let abort = task.abort_handle();
        match tokio::time::timeout(SHUTDOWN_GRACE, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.is_cancelled() => {}
            Ok(Err(e)) => warn!("Stub content server task failed: {}", e),
            Err(_) => {
                warn!("Stub content server did not drain within {:?}; aborting", SHUTDOWN_GRACE);
                abort.abort();
            }
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/pages/:file", get(page_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn page_handler(Path(file): Path<String>) -> Response {
    match StubAsset::parse_generic_file(&file) {
        Some(index) => {
            debug!("Serving generic page {}", index);
            (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                render_generic_page(index),
            )
                .into_response()
        }
        None => not_found_handler().await.into_response(),
    }
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

/// HTML body of generic page `index`
pub fn render_generic_page(index: u32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<p id="testContent">{content}</p>
</body>
</html>
"#,
        title = StubAsset::generic_title(index),
        content = StubAsset::generic_content(index),
    )
}
