use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::enums::client_message::ClientMessage;
use crate::enums::connection_state::ConnectionState;
use crate::enums::server_message::ServerMessage;
use crate::services::analysis_cache::AnalysisCache;
use crate::services::analysis_pipeline::AnalysisPipeline;
use crate::services::request_coalescer::RequestCoalescer;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::dashboard_snapshot::DashboardSnapshot;

struct ClientConnection {
    state: ConnectionState,
    sender: UnboundedSender<ServerMessage>,
}

/// Owns every piece of shared mutable state: the connection registry, the
/// analysis cache, and the current dashboard snapshot. All of it is touched
/// only from the request-handling paths below.
pub struct SessionHub {
    connections: DashMap<Uuid, ClientConnection>,
    cache: Mutex<AnalysisCache>,
    dashboard: RwLock<DashboardSnapshot>,
    pipeline: AnalysisPipeline,
    coalescer: RequestCoalescer,
    heartbeat_interval: Duration,
}

impl SessionHub {
    pub fn new(
        pipeline: AnalysisPipeline,
        cache: AnalysisCache,
        heartbeat_interval: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            connections: DashMap::new(),
            cache: Mutex::new(cache),
            dashboard: RwLock::new(DashboardSnapshot::initial()),
            pipeline,
            coalescer: RequestCoalescer::new(),
            heartbeat_interval,
        })
    }

    pub fn open_connection_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|c| c.state == ConnectionState::Open)
            .count()
    }

    pub fn dashboard_snapshot(&self) -> DashboardSnapshot {
        match self.dashboard.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Drive one client connection: `Connecting -> Open -> Closed`.
    ///
    /// Each inbound request is processed on its own task holding the hub,
    /// so an analysis already dispatched keeps running, and still updates
    /// the shared cache and dashboard, after this connection goes away.
    pub async fn handle_client(self: Arc<Self>, socket: WebSocket) {
        let (mut ws_tx, mut ws_rx) = socket.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
        let connection_id = Uuid::new_v4();

        self.connections.insert(
            connection_id,
            ClientConnection {
                state: ConnectionState::Connecting,
                sender: tx,
            },
        );

        // outbound pump: envelope queue → socket
        let _writer: JoinHandle<()> = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let text = match serde_json::to_string(&message) {
                    Ok(text) => text,
                    Err(_) => continue,
                };
                if ws_tx.send(Message::text(text)).await.is_err() {
                    break;
                }
            }
            let _ = ws_tx.close().await;
        });

        self.set_state(connection_id, ConnectionState::Open);
        log::info!("🔌 Client connected: {}", connection_id);

        while let Some(incoming) = ws_rx.next().await {
            let message = match incoming {
                Ok(message) => message,
                Err(error) => {
                    log::warn!("⚠️ Socket error on {}: {}", connection_id, error);
                    break;
                }
            };

            if message.is_close() {
                break;
            }
            let text = match message.to_str() {
                Ok(text) => text,
                Err(_) => continue, // ping/pong/binary frames
            };

            match serde_json::from_str::<ClientMessage>(text) {
                Ok(ClientMessage::CodeAnalysis { data }) => {
                    log::info!("🔍 Analysis request ({}) from {}", data.language, connection_id);
                    let request = AnalysisRequest::new(&data.code, &data.language);
                    let hub = Arc::clone(&self);
                    tokio::spawn(async move {
                        hub.process_request(connection_id, request).await;
                    });
                }
                Ok(ClientMessage::Heartbeat) => {}
                Err(error) => {
                    log::warn!("⚠️ Malformed envelope from {}: {}", connection_id, error);
                    self.send_to(connection_id, ServerMessage::error("Error processing message"));
                }
            }
        }

        self.set_state(connection_id, ConnectionState::Closed);
        self.connections.remove(&connection_id);
        log::info!("👋 Client disconnected: {}", connection_id);
    }

    /// The request sequence: cache → provider chain → cache put → reply →
    /// dashboard recompute → broadcast.
    async fn process_request(self: Arc<Self>, connection_id: Uuid, request: AnalysisRequest) {
        if let Some(result) = self.lock_cache().get(&request) {
            log::info!("📦 Cache hit for {} snippet", request.language);
            self.finish_request(connection_id, result);
            return;
        }

        // Coalesce concurrent identical requests: the second holder wakes
        // up once the first finished and finds the entry it populated.
        let _guard = self.coalescer.acquire(&request).await;
        if let Some(result) = self.lock_cache().get(&request) {
            log::info!("📦 Joined in-flight analysis for {} snippet", request.language);
            self.finish_request(connection_id, result);
            return;
        }

        match self
            .pipeline
            .analyze(&request.source_text, &request.language)
            .await
        {
            Ok(result) => {
                self.lock_cache().put(request, result.clone());
                self.finish_request(connection_id, result);
            }
            Err(error) => {
                // terminal for this request only: no cache update, no
                // dashboard recompute, no broadcast
                log::error!("❌ Analysis failed for {}: {}", connection_id, error.user_message());
                self.send_to(connection_id, ServerMessage::error(&error.user_message()));
            }
        }
    }

    fn finish_request(&self, connection_id: Uuid, result: AnalysisResult) {
        let total_issues = result.total_issues();
        self.send_to(connection_id, ServerMessage::analysis_result(result));

        let snapshot = DashboardSnapshot::compute(total_issues);
        match self.dashboard.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
        self.broadcast(ServerMessage::DashboardUpdate { data: snapshot });
    }

    fn send_to(&self, connection_id: Uuid, message: ServerMessage) {
        if let Some(connection) = self.connections.get(&connection_id) {
            if connection.state == ConnectionState::Open {
                // a closed receiver just means the connection is tearing down
                let _ = connection.sender.send(message);
            }
        }
    }

    pub fn broadcast(&self, message: ServerMessage) {
        for connection in self.connections.iter() {
            if connection.state == ConnectionState::Open {
                let _ = connection.sender.send(message.clone());
            }
        }
    }

    /// Periodic liveness ping to every open connection. Carries no payload
    /// beyond the type marker and never triggers analysis.
    pub fn spawn_heartbeat(self: &Arc<Self>) -> JoinHandle<()> {
        let hub = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(hub.heartbeat_interval);
            ticker.tick().await; // the first tick completes immediately
            loop {
                ticker.tick().await;
                hub.broadcast(ServerMessage::Heartbeat);
            }
        })
    }

    fn set_state(&self, connection_id: Uuid, state: ConnectionState) {
        if let Some(mut connection) = self.connections.get_mut(&connection_id) {
            connection.state = state;
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, AnalysisCache> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
