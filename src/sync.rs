//! Transaction view synchronization
//!
//! Keeps the surface's transaction table in step with the node's pending
//! transactions:
//! - [`TransactionSync::initialize`] runs the first refresh once at startup
//! - [`TransactionSync::refresh_transactions`] rebuilds the table from the node
//! - [`TransactionSync::trigger_mining`] asks the node to mine, acknowledges
//!   the result and refreshes
//!
//! Failures are logged and leave the table as it was.

use crate::client::NodeApi;
use crate::error::Result;
use crate::generation::Generation;
use crate::model::MineResponse;
use crate::surface::Surface;
use crate::view::TransactionTable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What a successful refresh did with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { rows: usize },
    /// A newer refresh had already rendered; this response was dropped.
    Stale,
}

pub struct TransactionSync {
    api: Arc<dyn NodeApi>,
    surface: Arc<dyn Surface>,
    generation: Generation,
    initialized: AtomicBool,
}

impl TransactionSync {
    pub fn new(api: Arc<dyn NodeApi>, surface: Arc<dyn Surface>) -> Self {
        Self {
            api,
            surface,
            generation: Generation::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// First refresh on startup. Later calls do nothing and return `None`.
    pub async fn initialize(&self) -> Option<Result<RefreshOutcome>> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("transaction view already initialized");
            return None;
        }
        Some(self.refresh_transactions().await)
    }

    pub async fn refresh_transactions(&self) -> Result<RefreshOutcome> {
        let ticket = self.generation.issue();

        let list = match self.api.get_transactions().await {
            Ok(list) => list,
            Err(e) => {
                tracing::error!(error = %e, ticket = ticket.number(), "Error fetching transactions");
                return Err(e);
            }
        };

        let table = TransactionTable::from_transactions(&list.transactions);
        let rows = list.transactions.len();
        let surface = &self.surface;
        if self
            .generation
            .commit(ticket, || surface.show_transactions(table))
        {
            tracing::info!(rows, ticket = ticket.number(), "transactions.rendered");
            Ok(RefreshOutcome::Rendered { rows })
        } else {
            tracing::debug!(
                ticket = ticket.number(),
                latest = self.generation.latest_rendered(),
                "dropping stale transaction response"
            );
            Ok(RefreshOutcome::Stale)
        }
    }

    /// Mine a block, wait for the user to acknowledge the node's message, then
    /// refresh the table once. A failed refresh after a successful mine is
    /// logged by the refresh itself and does not fail the mine.
    pub async fn trigger_mining(&self) -> Result<MineResponse> {
        let response = match self.api.mine().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error mining block");
                return Err(e);
            }
        };

        tracing::info!(
            block_number = ?response.block_number,
            nonce = ?response.nonce,
            previous_hash = ?response.previous_hash,
            transactions = response.transactions.len(),
            "mine.completed"
        );
        self.surface.acknowledge(&response.message).await;

        let _ = self.refresh_transactions().await;
        Ok(response)
    }
}
