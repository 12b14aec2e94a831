use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::config::constants::{DEFAULT_HEARTBEAT_INTERVAL_SECS, DEFAULT_RECONNECT_DELAY_SECS};
use crate::enums::client_message::{ClientMessage, CodeAnalysisPayload};
use crate::enums::server_message::ServerMessage;
use crate::errors::{DevpulseError, DevpulseResult};

/// Reconnecting gateway client for editor integrations and tests.
///
/// Each connection owns its reader, writer, and heartbeat tasks; dropping
/// the session aborts all three together, so repeated reconnect attempts
/// can never stack duplicate listeners or duplicate heartbeat timers.
pub struct GatewayClient {
    url: String,
    reconnect_delay: Duration,
    heartbeat_interval: Duration,
}

pub struct ClientSession {
    outgoing: UnboundedSender<ClientMessage>,
    incoming: UnboundedReceiver<ServerMessage>,
    tasks: Vec<JoinHandle<()>>,
}

impl ClientSession {
    pub fn request_analysis(&self, code: &str, language: &str) -> DevpulseResult<()> {
        self.outgoing
            .send(ClientMessage::CodeAnalysis {
                data: CodeAnalysisPayload {
                    code: code.to_string(),
                    language: language.to_string(),
                },
            })
            .map_err(|_| DevpulseError::transport_error("connection closed"))
    }

    pub async fn next_message(&mut self) -> Option<ServerMessage> {
        self.incoming.recv().await
    }

    pub fn is_alive(&self) -> bool {
        !self.outgoing.is_closed()
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl GatewayClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            reconnect_delay: Duration::from_secs(DEFAULT_RECONNECT_DELAY_SECS),
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_INTERVAL_SECS),
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// One connection attempt.
    pub async fn connect(&self) -> DevpulseResult<ClientSession> {
        let (socket, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| DevpulseError::transport_error(&e.to_string()))?;
        let (mut ws_tx, mut ws_rx) = socket.split();

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<ServerMessage>();

        let writer = tokio::spawn(async move {
            while let Some(message) = out_rx.recv().await {
                let text = match serde_json::to_string(&message) {
                    Ok(text) => text,
                    Err(_) => continue,
                };
                if ws_tx.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(Ok(message)) = ws_rx.next().await {
                if let Message::Text(text) = message {
                    match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(parsed) => {
                            if in_tx.send(parsed).is_err() {
                                break;
                            }
                        }
                        Err(error) => {
                            log::warn!("⚠️ Unrecognized server envelope: {}", error);
                        }
                    }
                }
            }
        });

        let heartbeat_tx = out_tx.clone();
        let interval = self.heartbeat_interval;
        let heartbeat = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // the first tick completes immediately
            loop {
                ticker.tick().await;
                if heartbeat_tx.send(ClientMessage::Heartbeat).is_err() {
                    break;
                }
            }
        });

        log::info!("🔌 Connected to {}", self.url);

        Ok(ClientSession {
            outgoing: out_tx,
            incoming: in_rx,
            tasks: vec![writer, reader, heartbeat],
        })
    }

    /// Retry with a fixed delay until a connection succeeds. Any prior
    /// session must be dropped by the caller first, which tears down its
    /// listener and heartbeat tasks before the new ones start.
    pub async fn connect_with_retry(&self) -> ClientSession {
        loop {
            match self.connect().await {
                Ok(session) => return session,
                Err(error) => {
                    log::warn!(
                        "🔁 Connection failed: {} - retrying in {}s",
                        error.user_message(),
                        self.reconnect_delay.as_secs()
                    );
                    tokio::time::sleep(self.reconnect_delay).await;
                }
            }
        }
    }
}
