use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::oneshot;
use warp::Filter;

use crate::errors::{DevpulseError, DevpulseResult};
use crate::services::session_hub::SessionHub;

/// The gateway's listening surface: a WebSocket upgrade at the root path
/// plus a JSON health probe. One long-running server process per port.
pub struct GatewayServer {
    hub: Arc<SessionHub>,
    port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
    started_at: Instant,
}

impl GatewayServer {
    pub fn new(hub: Arc<SessionHub>, port: u16) -> Self {
        Self {
            hub,
            port,
            shutdown_tx: None,
            started_at: Instant::now(),
        }
    }

    /// Bind and start serving in the background. Returns the bound address
    /// (useful when the configured port is 0).
    pub async fn start(&mut self) -> DevpulseResult<SocketAddr> {
        let hub = Arc::clone(&self.hub);
        let hub_filter = warp::any().map(move || Arc::clone(&hub));

        let ws_route = warp::path::end()
            .and(warp::ws())
            .and(hub_filter.clone())
            .map(|ws: warp::ws::Ws, hub: Arc<SessionHub>| {
                ws.on_upgrade(move |socket| hub.handle_client(socket))
            });

        let started_at = self.started_at;
        let health_route = warp::path("health")
            .and(warp::get())
            .and(hub_filter)
            .map(move |hub: Arc<SessionHub>| {
                warp::reply::json(&serde_json::json!({
                    "status": "ok",
                    "uptime_secs": started_at.elapsed().as_secs(),
                    "connections": hub.open_connection_count(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                }))
            });

        let routes = ws_route.or(health_route);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let addr: SocketAddr = ([127, 0, 0, 1], self.port).into();
        let (bound_addr, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            })
            .map_err(|e| DevpulseError::system_error("server bind", &e.to_string()))?;

        tokio::spawn(server);

        log::info!("🌐 Gateway listening on {}", bound_addr);
        Ok(bound_addr)
    }

    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            log::info!("🛑 Gateway server stopped");
        }
    }
}
