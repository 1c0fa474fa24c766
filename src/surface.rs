//! Rendering targets.
//!
//! A [`Surface`] owns the on-screen regions the view modules write into: the
//! transaction table, the wallet panel, the node list, and the user-facing
//! acknowledgment channel. Every `show_*` call replaces the region wholesale.

use crate::config::AcknowledgeMode;
use crate::view::{terminal, NodeListView, TransactionTable, WalletDetails};
use async_trait::async_trait;
use colored::*;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

#[async_trait]
pub trait Surface: Send + Sync {
    fn show_transactions(&self, table: TransactionTable);
    fn show_wallet(&self, details: WalletDetails);
    fn show_nodes(&self, nodes: NodeListView);

    /// Surface `message` to the user and resolve only once they have
    /// acknowledged it.
    async fn acknowledge(&self, message: &str);
}

/// Snapshot of everything a [`MemorySurface`] currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub transactions: TransactionTable,
    pub wallet: Option<WalletDetails>,
    pub nodes: NodeListView,
    /// Acknowledgments not yet consumed by [`MemorySurface::take_acknowledgments`].
    pub pending_acknowledgments: Vec<String>,
    pub transaction_renders: u64,
    pub acknowledgment_count: u64,
}

/// Keeps the latest views in memory. Backs the web front end, where a page
/// render reads the state, and the unit tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SurfaceState {
        self.state.lock().clone()
    }

    /// Drain acknowledgments; each is handed out exactly once.
    pub fn take_acknowledgments(&self) -> Vec<String> {
        std::mem::take(&mut self.state.lock().pending_acknowledgments)
    }
}

#[async_trait]
impl Surface for MemorySurface {
    fn show_transactions(&self, table: TransactionTable) {
        let mut state = self.state.lock();
        state.transactions = table;
        state.transaction_renders += 1;
    }

    fn show_wallet(&self, details: WalletDetails) {
        self.state.lock().wallet = Some(details);
    }

    fn show_nodes(&self, nodes: NodeListView) {
        self.state.lock().nodes = nodes;
    }

    async fn acknowledge(&self, message: &str) {
        let mut state = self.state.lock();
        state.pending_acknowledgments.push(message.to_string());
        state.acknowledgment_count += 1;
    }
}

/// Prints each view to stdout as it arrives.
#[derive(Debug)]
pub struct ConsoleSurface {
    mode: AcknowledgeMode,
    full_keys_only: bool,
    // Serializes prompts so two acknowledgments never interleave.
    prompt_lock: tokio::sync::Mutex<()>,
}

impl ConsoleSurface {
    pub fn new(mode: AcknowledgeMode) -> Self {
        Self {
            mode,
            full_keys_only: false,
            prompt_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Print wallets as the bare full keys, one per line.
    pub fn full_keys_only(mut self, enabled: bool) -> Self {
        self.full_keys_only = enabled;
        self
    }
}

#[async_trait]
impl Surface for ConsoleSurface {
    fn show_transactions(&self, table: TransactionTable) {
        println!("{}", "Transactions to be added to the next block".bright_cyan().bold());
        println!("{}", terminal::transaction_table(&table));
    }

    fn show_wallet(&self, details: WalletDetails) {
        if self.full_keys_only {
            print!("{}", terminal::full_keys(&details));
        } else {
            println!("{}", terminal::wallet_details(&details));
        }
    }

    fn show_nodes(&self, nodes: NodeListView) {
        println!("{}", "Registered nodes".bright_cyan().bold());
        print!("{}", terminal::node_list(&nodes));
    }

    async fn acknowledge(&self, message: &str) {
        let _guard = self.prompt_lock.lock().await;
        println!("{} {}", "✔".green().bold(), message.bright_white());

        if self.mode == AcknowledgeMode::Prompt {
            println!("{}", "Press Enter to continue...".dimmed());
            let mut line = String::new();
            let mut stdin = BufReader::new(tokio::io::stdin());
            if let Err(e) = stdin.read_line(&mut line).await {
                tracing::warn!(error = %e, "could not read acknowledgment from stdin");
            }
        }
    }
}

struct PendingPrompt {
    message: String,
    done: oneshot::Sender<()>,
}

#[derive(Default)]
struct InteractiveState {
    views: SurfaceState,
    prompts: VecDeque<PendingPrompt>,
    last_update: Option<chrono::DateTime<chrono::Local>>,
}

/// Surface for full-screen front ends that redraw on a tick. Views are read
/// with [`InteractiveSurface::snapshot`]; acknowledgments queue up as modal
/// prompts and each `acknowledge` call resolves when its prompt is dismissed.
#[derive(Default)]
pub struct InteractiveSurface {
    state: Mutex<InteractiveState>,
}

impl InteractiveSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SurfaceState {
        self.state.lock().views.clone()
    }

    pub fn last_update(&self) -> Option<chrono::DateTime<chrono::Local>> {
        self.state.lock().last_update
    }

    /// The prompt currently on screen, if any.
    pub fn current_prompt(&self) -> Option<String> {
        self.state.lock().prompts.front().map(|p| p.message.clone())
    }

    /// Dismiss the prompt on screen, releasing the operation waiting on it.
    pub fn dismiss(&self) -> bool {
        let prompt = self.state.lock().prompts.pop_front();
        match prompt {
            Some(prompt) => {
                let _ = prompt.done.send(());
                true
            }
            None => false,
        }
    }

    fn touch(state: &mut InteractiveState) {
        state.last_update = Some(chrono::Local::now());
    }
}

#[async_trait]
impl Surface for InteractiveSurface {
    fn show_transactions(&self, table: TransactionTable) {
        let mut state = self.state.lock();
        state.views.transactions = table;
        state.views.transaction_renders += 1;
        Self::touch(&mut state);
    }

    fn show_wallet(&self, details: WalletDetails) {
        let mut state = self.state.lock();
        state.views.wallet = Some(details);
        Self::touch(&mut state);
    }

    fn show_nodes(&self, nodes: NodeListView) {
        let mut state = self.state.lock();
        state.views.nodes = nodes;
        Self::touch(&mut state);
    }

    async fn acknowledge(&self, message: &str) {
        let (done, dismissed) = oneshot::channel();
        {
            let mut state = self.state.lock();
            state.views.acknowledgment_count += 1;
            state.prompts.push_back(PendingPrompt {
                message: message.to_string(),
                done,
            });
        }
        // A dropped surface counts as dismissed.
        let _ = dismissed.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tx;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_interactive_acknowledge_waits_for_dismiss() {
        let surface = Arc::new(InteractiveSurface::new());
        assert!(!surface.dismiss());

        let waiting = tokio::spawn({
            let surface = surface.clone();
            async move { surface.acknowledge("New Block Forged").await }
        });
        while surface.current_prompt().is_none() {
            tokio::task::yield_now().await;
        }

        assert_eq!(surface.current_prompt().as_deref(), Some("New Block Forged"));
        assert!(!waiting.is_finished());

        assert!(surface.dismiss());
        waiting.await.unwrap();
        assert!(surface.current_prompt().is_none());
        assert_eq!(surface.snapshot().acknowledgment_count, 1);
    }

    #[tokio::test]
    async fn test_interactive_records_update_time() {
        let surface = InteractiveSurface::new();
        assert!(surface.last_update().is_none());
        surface.show_transactions(TransactionTable::from_transactions(&[]));
        assert!(surface.last_update().is_some());
        assert_eq!(surface.snapshot().transaction_renders, 1);
    }

    #[tokio::test]
    async fn test_memory_surface_replaces_views() {
        let surface = MemorySurface::new();
        surface.show_transactions(TransactionTable::from_transactions(&[tx("A", "B", 1)]));
        surface.show_transactions(TransactionTable::from_transactions(&[]));

        let state = surface.snapshot();
        assert!(state.transactions.is_placeholder());
        assert_eq!(state.transaction_renders, 2);
    }

    #[tokio::test]
    async fn test_acknowledgments_taken_once() {
        let surface = MemorySurface::new();
        surface.acknowledge("New Block Forged").await;

        assert_eq!(surface.take_acknowledgments(), vec!["New Block Forged".to_string()]);
        assert!(surface.take_acknowledgments().is_empty());
        assert_eq!(surface.snapshot().acknowledgment_count, 1);
    }
}
