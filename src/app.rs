//! Startup wiring and UI event dispatch.
//!
//! [`Dashboard`] owns one instance of each view module against a shared
//! node client and surface. Front ends translate their input (key presses,
//! form posts) into [`UiEvent`]s and hand them to [`Dashboard::dispatch`].

use crate::client::{HttpNodeClient, NodeApi};
use crate::config::Config;
use crate::error::Result;
use crate::nodes::NodeDirectory;
use crate::surface::Surface;
use crate::sync::TransactionSync;
use crate::wallet::WalletDisplay;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    RefreshTransactions,
    Mine,
    GenerateWallet,
    RefreshNodes,
    RegisterNodes(Vec<String>),
    ResolveConflicts,
}

pub struct Dashboard {
    pub transactions: TransactionSync,
    pub wallet: WalletDisplay,
    pub nodes: NodeDirectory,
    started: AtomicBool,
}

impl Dashboard {
    pub fn new(api: Arc<dyn NodeApi>, surface: Arc<dyn Surface>, truncate_len: usize) -> Arc<Self> {
        Arc::new(Self {
            transactions: TransactionSync::new(api.clone(), surface.clone()),
            wallet: WalletDisplay::with_truncate_len(api.clone(), surface.clone(), truncate_len),
            nodes: NodeDirectory::new(api, surface),
            started: AtomicBool::new(false),
        })
    }

    /// Build a dashboard talking HTTP to the node named in `config`.
    pub fn from_config(config: &Config, surface: Arc<dyn Surface>) -> Result<Arc<Self>> {
        let client = HttpNodeClient::new(&config.node)?;
        tracing::info!(node = %client.base_url(), "using node");
        Ok(Self::new(
            Arc::new(client),
            surface,
            config.display.truncate_len,
        ))
    }

    /// Startup: the initial transaction refresh. Runs once per dashboard;
    /// later calls return `false` without touching the node.
    pub async fn start(&self) -> bool {
        if self.started.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::info!("dashboard.start");
        // Errors are already logged by the view module.
        let _ = self.transactions.initialize().await;
        true
    }

    /// Handle one event to completion.
    pub async fn handle(&self, event: UiEvent) {
        tracing::debug!(?event, "ui.event");
        // Each module logs its own failures; the view stays as it was.
        match event {
            UiEvent::RefreshTransactions => {
                let _ = self.transactions.refresh_transactions().await;
            }
            UiEvent::Mine => {
                let _ = self.transactions.trigger_mining().await;
            }
            UiEvent::GenerateWallet => {
                let _ = self.wallet.generate_wallet().await;
            }
            UiEvent::RefreshNodes => {
                let _ = self.nodes.refresh_nodes().await;
            }
            UiEvent::RegisterNodes(urls) => {
                let _ = self.nodes.register_nodes(urls).await;
            }
            UiEvent::ResolveConflicts => {
                // A replaced chain changes the pending set.
                if self.nodes.resolve_conflicts().await.is_ok() {
                    let _ = self.transactions.refresh_transactions().await;
                }
            }
        }
    }

    /// Handle `event` on its own task, so overlapping events run
    /// concurrently the way repeated clicks do.
    pub fn dispatch(self: &Arc<Self>, event: UiEvent) -> JoinHandle<()> {
        let dashboard = self.clone();
        tokio::spawn(async move { dashboard.handle(event).await })
    }
}
