//! Integration tests for the HTTP node client
//!
//! A small axum app stands in for the node, bound to an ephemeral port, so
//! requests go over real HTTP.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chainview::app::Dashboard;
use chainview::client::{HttpNodeClient, NodeApi};
use chainview::config::NodeConfig;
use chainview::error::ViewError;
use chainview::model::RegisterNodesRequest;
use chainview::surface::MemorySurface;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct FakeNode {
    pending: Arc<Mutex<Vec<Value>>>,
    peers: Arc<Mutex<Vec<String>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FakeNode {
    fn hit(&self, path: &str) {
        self.hits.lock().unwrap().push(path.to_string());
    }
}

async fn get_transactions(State(node): State<FakeNode>) -> Json<Value> {
    node.hit("/transactions/get");
    let pending = node.pending.lock().unwrap().clone();
    Json(json!({ "transactions": pending }))
}

async fn mine(State(node): State<FakeNode>) -> Json<Value> {
    node.hit("/mine");
    let mined: Vec<Value> = node.pending.lock().unwrap().drain(..).collect();
    Json(json!({
        "message": "New Block Forged",
        "block_number": 2,
        "transactions": mined,
        "nonce": 77,
        "previous_hash": "00f3"
    }))
}

async fn new_wallet(State(node): State<FakeNode>) -> Json<Value> {
    node.hit("/wallet/new");
    Json(json!({
        "public_key": "30819f300d06092a864886f70d010101050003818d0030818902818100b1",
        "private_key": "3082025c02010002818100b1c2d3e4f5"
    }))
}

async fn get_nodes(State(node): State<FakeNode>) -> Json<Value> {
    node.hit("/nodes/get");
    Json(json!({ "nodes": node.peers.lock().unwrap().clone() }))
}

async fn register_nodes(
    State(node): State<FakeNode>,
    Json(body): Json<RegisterNodesRequest>,
) -> (StatusCode, Json<Value>) {
    node.hit("/nodes/register");
    let mut peers = node.peers.lock().unwrap();
    peers.extend(body.nodes);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "New nodes have been added", "total_nodes": peers.clone() })),
    )
}

async fn resolve() -> Json<Value> {
    Json(json!({ "message": "Our chain is authoritative", "chain": [] }))
}

async fn spawn_node(node: FakeNode) -> HttpNodeClient {
    let app = Router::new()
        .route("/transactions/get", get(get_transactions))
        .route("/mine", get(mine))
        .route("/wallet/new", get(new_wallet))
        .route("/nodes/get", get(get_nodes))
        .route("/nodes/register", post(register_nodes))
        .route("/nodes/resolve", get(resolve))
        .with_state(node);
    spawn_app(app).await
}

async fn spawn_app(app: Router) -> HttpNodeClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpNodeClient::new(&NodeConfig {
        url: format!("http://{}", addr),
        request_timeout_secs: 5,
    })
    .unwrap()
}

fn pending_tx(recipient: &str, sender: &str, value: i64) -> Value {
    json!({ "recipient_address": recipient, "sender_address": sender, "value": value })
}

#[tokio::test]
async fn test_fetch_mine_and_wallet() {
    let node = FakeNode::default();
    node.pending
        .lock()
        .unwrap()
        .extend([pending_tx("A", "B", 5), pending_tx("C", "D", 10)]);
    let client = spawn_node(node.clone()).await;

    let list = client.get_transactions().await.unwrap();
    assert_eq!(list.transactions.len(), 2);
    assert_eq!(list.transactions[1].recipient_address, "C");

    let mined = client.mine().await.unwrap();
    assert_eq!(mined.message, "New Block Forged");
    assert_eq!(mined.block_number, Some(2));
    assert_eq!(mined.transactions.len(), 2);

    assert!(client.get_transactions().await.unwrap().transactions.is_empty());

    let keys = client.new_wallet().await.unwrap();
    assert!(keys.public_key.starts_with("30819f"));
}

#[tokio::test]
async fn test_register_posts_json_body() {
    let node = FakeNode::default();
    let client = spawn_node(node.clone()).await;

    let response = client
        .register_nodes(vec!["127.0.0.1:5001".to_string()])
        .await
        .unwrap();
    assert_eq!(response.total_nodes, vec!["127.0.0.1:5001"]);
    assert_eq!(client.get_nodes().await.unwrap().nodes, vec!["127.0.0.1:5001"]);

    let resolved = client.resolve_conflicts().await.unwrap();
    assert_eq!(resolved.message, "Our chain is authoritative");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let app = Router::new().route(
        "/mine",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = spawn_app(app).await;

    match client.mine().await {
        Err(ViewError::StatusError { code, body }) => {
            assert_eq!(code, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }

    // Unrouted path: 404
    assert!(matches!(
        client.get_transactions().await,
        Err(ViewError::StatusError { code: 404, .. })
    ));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let app = Router::new()
        .route("/transactions/get", get(|| async { "<html>not json</html>" }))
        .route(
            "/wallet/new",
            get(|| async { Json(json!({ "public_key": "only half" })) }),
        );
    let client = spawn_app(app).await;

    assert!(matches!(
        client.get_transactions().await,
        Err(ViewError::DecodeError(_))
    ));
    assert!(matches!(
        client.new_wallet().await,
        Err(ViewError::DecodeError(_))
    ));
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let node = FakeNode::default();
    node.pending.lock().unwrap().push(pending_tx("A", "B", 5));
    let client = spawn_node(node.clone()).await;

    let surface = Arc::new(MemorySurface::new());
    let dashboard = Dashboard::new(Arc::new(client), surface.clone(), 20);

    assert!(dashboard.start().await);
    assert_eq!(surface.snapshot().transactions.data_row_count(), 1);

    dashboard.transactions.trigger_mining().await.unwrap();
    let state = surface.snapshot();
    assert!(state.transactions.is_placeholder());
    assert_eq!(
        surface.take_acknowledgments(),
        vec!["New Block Forged".to_string()]
    );

    assert_eq!(
        *node.hits.lock().unwrap(),
        vec!["/transactions/get", "/mine", "/transactions/get"]
    );
}

#[tokio::test]
async fn test_mined_block_with_odd_fields_still_acknowledges() {
    let app = Router::new()
        .route(
            "/mine",
            get(|| async {
                Json(json!({
                    "message": "New Block Forged",
                    "block_number": "2",
                    "nonce": 77,
                    "transactions": [
                        { "sender_address": "0", "recipient_address": "A", "value": "5", "signature": "" }
                    ]
                }))
            }),
        )
        .route(
            "/transactions/get",
            get(|| async { Json(json!({ "transactions": [] })) }),
        );
    let client = spawn_app(app).await;

    let surface = Arc::new(MemorySurface::new());
    let dashboard = Dashboard::new(Arc::new(client), surface.clone(), 20);

    let mined = dashboard.transactions.trigger_mining().await.unwrap();
    assert_eq!(mined.block_number, None);
    assert_eq!(mined.nonce, Some(77));
    assert_eq!(mined.transactions.len(), 1);
    assert_eq!(
        surface.take_acknowledgments(),
        vec!["New Block Forged".to_string()]
    );
    assert_eq!(surface.snapshot().transaction_renders, 1);
    assert!(surface.snapshot().transactions.is_placeholder());
}
