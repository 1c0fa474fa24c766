//! Browser front end
//!
//! Serves the transaction, wallet and node pages as server-rendered HTML.
//! Buttons are plain form posts: the handler runs the matching [`UiEvent`]
//! to completion, then redirects back to the page, which shows the fresh
//! view and any acknowledgment exactly once.
//!
//! Acknowledgments are filed under the page the action redirects to, so a
//! message from the node page never shows up on the transactions page.
//! Views and flashes are shared by every browser talking to one server.

use crate::app::{Dashboard, UiEvent};
use crate::config::Config;
use crate::nodes::parse_node_urls;
use crate::surface::MemorySurface;
use crate::view::html;
use axum::{
    extract::{Form, State},
    http,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

const TRANSACTIONS_PAGE: &str = "/";
const WALLET_PAGE: &str = "/wallet";
const CONFIGURE_PAGE: &str = "/configure";

#[derive(Clone)]
pub struct WebState {
    pub dashboard: Arc<Dashboard>,
    pub surface: Arc<MemorySurface>,
    flashes: Arc<Mutex<HashMap<&'static str, Vec<String>>>>,
}

impl WebState {
    pub fn new(dashboard: Arc<Dashboard>, surface: Arc<MemorySurface>) -> Self {
        Self {
            dashboard,
            surface,
            flashes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Run `event`, file its acknowledgments under `page` and redirect there.
    async fn act(&self, event: UiEvent, page: &'static str) -> Redirect {
        self.dashboard.handle(event).await;
        let messages = self.surface.take_acknowledgments();
        if !messages.is_empty() {
            self.flashes.lock().entry(page).or_default().extend(messages);
        }
        Redirect::to(page)
    }

    fn take_flashes(&self, page: &'static str) -> Vec<String> {
        self.flashes.lock().remove(page).unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct RegisterForm {
    #[serde(default)]
    nodes: String,
}

// ============================================================================
// Page layout
// ============================================================================

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left;word-break:break-all}\
.placeholder{text-align:center;color:#777}\
.full-key{font-family:monospace;word-break:break-all}\
.flash{background:#e8f5e9;border:1px solid #66bb6a;padding:.6rem;margin-bottom:1rem}\
nav a{margin-right:1rem}";

fn page(title: &str, flashes: &[String], body: &str) -> Html<String> {
    let mut out = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>\n<body>\n\
         <nav><a href=\"/\">Mine</a><a href=\"/wallet\">Wallet Generator</a><a href=\"/configure\">Configure</a></nav>\n",
        html::escape(title),
        STYLE
    );
    for message in flashes {
        let _ = writeln!(out, "<div class=\"flash\">{}</div>", html::escape(message));
    }
    out.push_str(body);
    out.push_str("\n</body>\n</html>\n");
    Html(out)
}

fn button(action: &str, id: &str, label: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button id=\"{}\" type=\"submit\">{}</button></form>",
        action, id, label
    )
}

// ============================================================================
// Handlers
// ============================================================================

async fn transactions_page(State(state): State<WebState>) -> Html<String> {
    // First display of the page runs the initial refresh.
    state.dashboard.start().await;

    let snapshot = state.surface.snapshot();
    let flashes = state.take_flashes(TRANSACTIONS_PAGE);
    let body = format!(
        "<h2>Transactions to be added to the next block</h2>\n{}\n{}\n{}",
        button("/refresh", "refresh_transactions", "Refresh"),
        html::transaction_table(&snapshot.transactions),
        button("/mine", "mine_button", "Mine")
    );
    page("Blockchain", &flashes, &body)
}

async fn wallet_page(State(state): State<WebState>) -> Html<String> {
    let snapshot = state.surface.snapshot();
    let flashes = state.take_flashes(WALLET_PAGE);
    let body = format!(
        "<h2>Wallet Generator</h2>\n{}\n{}",
        button("/wallet/new", "generate_wallet", "Generate Wallet"),
        html::wallet_details(snapshot.wallet.as_ref())
    );
    page("Wallet", &flashes, &body)
}

async fn configure_page(State(state): State<WebState>) -> Html<String> {
    state.dashboard.handle(UiEvent::RefreshNodes).await;

    let snapshot = state.surface.snapshot();
    let flashes = state.take_flashes(CONFIGURE_PAGE);
    let body = format!(
        "<h2>Add Blockchain Nodes</h2>\n\
         <form method=\"post\" action=\"/nodes/register\">\
         <input type=\"text\" name=\"nodes\" id=\"node_urls\" placeholder=\"http://127.0.0.1:5001, http://127.0.0.1:5002\">\
         <button id=\"add_node_button\" type=\"submit\">Add Node</button></form>\n\
         <h2>This node can retrieve Blockchain data from the following nodes</h2>\n{}\n{}",
        html::node_list(&snapshot.nodes),
        button("/nodes/resolve", "resolve_button", "Resolve Conflicts")
    );
    page("Configure", &flashes, &body)
}

async fn mine(State(state): State<WebState>) -> Redirect {
    state.act(UiEvent::Mine, TRANSACTIONS_PAGE).await
}

async fn refresh(State(state): State<WebState>) -> Redirect {
    state.act(UiEvent::RefreshTransactions, TRANSACTIONS_PAGE).await
}

async fn new_wallet(State(state): State<WebState>) -> Redirect {
    state.act(UiEvent::GenerateWallet, WALLET_PAGE).await
}

async fn register_nodes(State(state): State<WebState>, Form(form): Form<RegisterForm>) -> Redirect {
    state
        .act(UiEvent::RegisterNodes(parse_node_urls(&form.nodes)), CONFIGURE_PAGE)
        .await
}

async fn resolve_conflicts(State(state): State<WebState>) -> Redirect {
    state.act(UiEvent::ResolveConflicts, CONFIGURE_PAGE).await
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// ============================================================================
// Server
// ============================================================================

/// Build the router with all pages and actions (for testing)
pub fn build_router(state: WebState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(vec![http::Method::GET, http::Method::OPTIONS]);

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .layer(cors);

    Router::new()
        .route(TRANSACTIONS_PAGE, get(transactions_page))
        .route("/refresh", post(refresh))
        .route("/mine", post(mine))
        .route(WALLET_PAGE, get(wallet_page))
        .route("/wallet/new", post(new_wallet))
        .route(CONFIGURE_PAGE, get(configure_page))
        .route("/nodes/register", post(register_nodes))
        .route("/nodes/resolve", post(resolve_conflicts))
        .with_state(state)
        .nest("/api", api_routes)
}

pub async fn run_web_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let surface = Arc::new(MemorySurface::new());
    let dashboard = Dashboard::from_config(config, surface.clone())?;
    let app = build_router(WebState::new(dashboard, surface));

    let addr: SocketAddr = config.web.bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, node = %config.node.url, "web.listening");
    println!("chainview web front end listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
