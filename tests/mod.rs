use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use devpulse_gateway::client::gateway_client::GatewayClient;
use devpulse_gateway::errors::{DevpulseError, DevpulseResult};
use devpulse_gateway::server::gateway_server::GatewayServer;
use devpulse_gateway::services::analysis_cache::AnalysisCache;
use devpulse_gateway::services::analysis_pipeline::AnalysisPipeline;
use devpulse_gateway::services::session_hub::SessionHub;
use devpulse_gateway::structs::analysis_result::AnalysisResult;
use devpulse_gateway::structs::issue::Issue;
use devpulse_gateway::traits::analysis_source::AnalysisSource;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Analysis source stub with a call counter and an optional artificial
/// latency, standing in for the remote provider or the local fallback.
struct StubSource {
    name: &'static str,
    issues: usize,
    delay: Duration,
    error: Option<fn() -> DevpulseError>,
    calls: Arc<AtomicUsize>,
}

impl StubSource {
    fn fixed(issues: usize) -> (Self, Arc<AtomicUsize>) {
        Self::with_delay(issues, Duration::ZERO)
    }

    fn with_delay(issues: usize, delay: Duration) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: "stub",
                issues,
                delay,
                error: None,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn failing(name: &'static str, error: fn() -> DevpulseError) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name,
                issues: 0,
                delay: Duration::ZERO,
                error: Some(error),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl AnalysisSource for StubSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn analyze(&self, _: &str, _: &str) -> DevpulseResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(error) = self.error {
            return Err(error());
        }

        let mut result = AnalysisResult::default();
        for i in 0..self.issues {
            result
                .security
                .push(Issue::new(&format!("issue {}", i), "explanation", "suggestion"));
        }
        Ok(result)
    }
}

async fn start_gateway(
    sources: Vec<Box<dyn AnalysisSource>>,
    heartbeat: Duration,
) -> (SocketAddr, GatewayServer, Arc<SessionHub>) {
    let hub = SessionHub::new(
        AnalysisPipeline::new(sources),
        AnalysisCache::new(100, Duration::from_secs(900)),
        heartbeat,
    );
    let mut server = GatewayServer::new(Arc::clone(&hub), 0);
    let addr = server.start().await.unwrap();
    (addr, server, hub)
}

const QUIET_HEARTBEAT: Duration = Duration::from_secs(3600);

async fn connect(addr: SocketAddr) -> Socket {
    let (socket, _) = connect_async(format!("ws://{}", addr)).await.unwrap();
    socket
}

async fn send_analysis(socket: &mut Socket, code: &str, language: &str) {
    let envelope = json!({"type": "codeAnalysis", "data": {"code": code, "language": language}});
    socket
        .send(Message::Text(envelope.to_string()))
        .await
        .unwrap();
}

async fn next_envelope(socket: &mut Socket) -> Value {
    let deadline = Duration::from_secs(5);
    loop {
        let message = tokio::time::timeout(deadline, socket.next())
            .await
            .expect("timed out waiting for an envelope")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = message {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn next_envelope_of(socket: &mut Socket, envelope_type: &str) -> Value {
    loop {
        let envelope = next_envelope(socket).await;
        if envelope["type"] == envelope_type {
            return envelope;
        }
    }
}

#[tokio::test]
async fn analysis_reply_then_dashboard_fans_out_to_all_clients() {
    let (source, _) = StubSource::fixed(7);
    let (addr, _server, _hub) = start_gateway(vec![Box::new(source)], QUIET_HEARTBEAT).await;

    let mut requester = connect(addr).await;
    let mut observer = connect(addr).await;
    // let both registrations land before work starts
    tokio::time::sleep(Duration::from_millis(50)).await;

    send_analysis(&mut requester, "x = 1", "python").await;

    let reply = next_envelope(&mut requester).await;
    assert_eq!(reply["type"], "analysisResult");
    assert_eq!(reply["data"]["ai"]["security"].as_array().unwrap().len(), 7);
    // every category key is present regardless of path
    for key in [
        "syntaxErrors",
        "improvements",
        "security",
        "bestPractices",
        "performance",
        "codeSmells",
    ] {
        assert!(reply["data"]["ai"].get(key).is_some(), "missing {}", key);
    }

    let update = next_envelope(&mut requester).await;
    assert_eq!(update["type"], "dashboardUpdate");
    assert_eq!(update["data"]["codeQuality"], 86);
    assert_eq!(update["data"]["projectStatus"], "Needs Improvement");
    let productivity = update["data"]["productivity"].as_u64().unwrap();
    assert!((80..=99).contains(&productivity));

    // the observer sees the broadcast but no analysis reply
    let observed = next_envelope(&mut observer).await;
    assert_eq!(observed["type"], "dashboardUpdate");
}

#[tokio::test]
async fn concurrent_identical_requests_coalesce_onto_one_provider_call() {
    // Chosen policy: the coalescing variant. Two concurrent requests for
    // the identical (language, sourceText) key make exactly one provider
    // call; the second is served from the entry the first populated.
    let (source, calls) = StubSource::with_delay(2, Duration::from_millis(300));
    let (addr, _server, _hub) = start_gateway(vec![Box::new(source)], QUIET_HEARTBEAT).await;

    let mut first = connect(addr).await;
    let mut second = connect(addr).await;

    send_analysis(&mut first, "def f():\n    pass", "python").await;
    send_analysis(&mut second, "def f():\n    pass", "python").await;

    let first_reply = next_envelope_of(&mut first, "analysisResult").await;
    let second_reply = next_envelope_of(&mut second, "analysisResult").await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // byte-for-byte identical result either way
    assert_eq!(
        serde_json::to_string(&first_reply["data"]["ai"]).unwrap(),
        serde_json::to_string(&second_reply["data"]["ai"]).unwrap()
    );
}

#[tokio::test]
async fn repeated_request_within_ttl_is_a_cache_hit() {
    let (source, calls) = StubSource::fixed(1);
    let (addr, _server, _hub) = start_gateway(vec![Box::new(source)], QUIET_HEARTBEAT).await;

    let mut client = connect(addr).await;

    send_analysis(&mut client, "x = 1", "python").await;
    let first = next_envelope_of(&mut client, "analysisResult").await;

    send_analysis(&mut client, "x = 1", "python").await;
    let second = next_envelope_of(&mut client, "analysisResult").await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        serde_json::to_string(&first["data"]["ai"]).unwrap(),
        serde_json::to_string(&second["data"]["ai"]).unwrap()
    );
}

#[tokio::test]
async fn provider_failure_falls_back_to_local_source() {
    let (primary, primary_calls) =
        StubSource::failing("anthropic", || DevpulseError::provider_error("anthropic", "down"));
    let (fallback, fallback_calls) = StubSource::fixed(3);
    let (addr, _server, _hub) =
        start_gateway(vec![Box::new(primary), Box::new(fallback)], QUIET_HEARTBEAT).await;

    let mut client = connect(addr).await;
    send_analysis(&mut client, "def f():\n    pass", "python").await;

    let reply = next_envelope_of(&mut client, "analysisResult").await;
    assert_eq!(reply["data"]["ai"]["security"].as_array().unwrap().len(), 3);
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fallback_failure_errors_the_requester_only() {
    let (primary, _) =
        StubSource::failing("anthropic", || DevpulseError::provider_error("anthropic", "down"));
    let (fallback, _) = StubSource::failing("local-fallback", || {
        DevpulseError::unsupported_language("ruby", &["python", "javascript"])
    });
    let (addr, _server, _hub) =
        start_gateway(vec![Box::new(primary), Box::new(fallback)], QUIET_HEARTBEAT).await;

    let mut requester = connect(addr).await;
    let mut observer = connect(addr).await;

    send_analysis(&mut requester, "puts 1", "ruby").await;

    let reply = next_envelope(&mut requester).await;
    assert_eq!(reply["type"], "error");
    assert!(reply["message"].as_str().unwrap().contains("Unsupported language"));

    // no broadcast for a failed request
    let observed = tokio::time::timeout(Duration::from_millis(300), observer.next()).await;
    assert!(observed.is_err(), "observer should not receive anything");
}

#[tokio::test]
async fn malformed_envelope_keeps_the_connection_open() {
    let (source, _) = StubSource::fixed(0);
    let (addr, _server, _hub) = start_gateway(vec![Box::new(source)], QUIET_HEARTBEAT).await;

    let mut client = connect(addr).await;

    client
        .send(Message::Text("this is not json".to_string()))
        .await
        .unwrap();
    let reply = next_envelope(&mut client).await;
    assert_eq!(reply["type"], "error");

    // unknown envelope types are also soft errors
    client
        .send(Message::Text(r#"{"type":"fileSync","data":{}}"#.to_string()))
        .await
        .unwrap();
    let reply = next_envelope(&mut client).await;
    assert_eq!(reply["type"], "error");

    // the connection still accepts valid work
    send_analysis(&mut client, "x = 1", "python").await;
    let reply = next_envelope_of(&mut client, "analysisResult").await;
    assert_eq!(reply["type"], "analysisResult");
}

#[tokio::test]
async fn disconnect_mid_request_still_completes_and_broadcasts() {
    let (source, calls) = StubSource::with_delay(1, Duration::from_millis(300));
    let (addr, _server, hub) = start_gateway(vec![Box::new(source)], QUIET_HEARTBEAT).await;

    let mut leaver = connect(addr).await;
    let mut observer = connect(addr).await;

    send_analysis(&mut leaver, "x = 1", "python").await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    leaver.close(None).await.unwrap();
    drop(leaver);

    // the in-flight analysis completes and its broadcast reaches the
    // surviving connection
    let observed = next_envelope_of(&mut observer, "dashboardUpdate").await;
    assert!(observed["data"]["codeQuality"].is_number());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(hub.open_connection_count(), 1);

    // the shared cache was updated by the abandoned request
    send_analysis(&mut observer, "x = 1", "python").await;
    next_envelope_of(&mut observer, "analysisResult").await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn heartbeat_reaches_open_connections() {
    let (source, _) = StubSource::fixed(0);
    let (addr, _server, hub) =
        start_gateway(vec![Box::new(source)], Duration::from_millis(100)).await;
    let _heartbeat = hub.spawn_heartbeat();

    let mut client = connect(addr).await;
    let envelope = next_envelope_of(&mut client, "heartbeat").await;
    assert_eq!(envelope, json!({"type": "heartbeat"}));
}

#[tokio::test]
async fn gateway_client_reconnects_without_duplicate_listeners() {
    let (source, calls) = StubSource::fixed(2);
    let (addr, _server, _hub) = start_gateway(vec![Box::new(source)], QUIET_HEARTBEAT).await;

    let client = GatewayClient::new(&format!("ws://{}", addr))
        .with_reconnect_delay(Duration::from_millis(100));

    let mut session = client.connect_with_retry().await;
    session.request_analysis("x = 1", "python").unwrap();
    let message = tokio::time::timeout(Duration::from_secs(5), session.next_message())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        message,
        devpulse_gateway::enums::server_message::ServerMessage::AnalysisResult { .. }
    ));

    // dropping the session aborts its reader and heartbeat tasks; the new
    // session must deliver exactly one reply per request
    drop(session);
    let mut session = client.connect_with_retry().await;
    session.request_analysis("y = 2", "python").unwrap();

    let mut replies = 0;
    loop {
        match tokio::time::timeout(Duration::from_millis(700), session.next_message()).await {
            Ok(Some(devpulse_gateway::enums::server_message::ServerMessage::AnalysisResult {
                ..
            })) => replies += 1,
            Ok(Some(_)) => {}
            _ => break,
        }
    }
    assert_eq!(replies, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(session.is_alive());
}
