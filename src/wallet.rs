//! Wallet display: fetch a fresh key pair from the node and show it.
//!
//! Keys are generated by the node. This module only formats them and never
//! keeps a copy beyond the render.

use crate::client::NodeApi;
use crate::error::Result;
use crate::generation::Generation;
use crate::surface::Surface;
use crate::view::WalletDetails;
use std::sync::Arc;

pub const DEFAULT_TRUNCATE_LEN: usize = 20;
pub const ELLIPSIS: &str = "...";

/// First `max_len` characters of `key` plus `...`, or `key` unchanged when it
/// is no longer than `max_len`.
pub fn truncate(key: &str, max_len: usize) -> String {
    match key.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &key[..cut], ELLIPSIS),
        None => key.to_string(),
    }
}

pub struct WalletDisplay {
    api: Arc<dyn NodeApi>,
    surface: Arc<dyn Surface>,
    truncate_len: usize,
    generation: Generation,
}

impl WalletDisplay {
    pub fn new(api: Arc<dyn NodeApi>, surface: Arc<dyn Surface>) -> Self {
        Self::with_truncate_len(api, surface, DEFAULT_TRUNCATE_LEN)
    }

    pub fn with_truncate_len(
        api: Arc<dyn NodeApi>,
        surface: Arc<dyn Surface>,
        truncate_len: usize,
    ) -> Self {
        Self {
            api,
            surface,
            truncate_len,
            generation: Generation::new(),
        }
    }

    /// Request a new key pair and render it. Returns `Ok(false)` when a newer
    /// request already rendered.
    pub async fn generate_wallet(&self) -> Result<bool> {
        let ticket = self.generation.issue();

        let keys = match self.api.new_wallet().await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::error!(error = %e, "Error generating wallet");
                return Err(e);
            }
        };

        let details = WalletDetails::from_key_pair(&keys, self.truncate_len);
        let surface = &self.surface;
        let rendered = self
            .generation
            .commit(ticket, || surface.show_wallet(details));
        if rendered {
            tracing::info!(ticket = ticket.number(), "wallet.rendered");
        } else {
            tracing::debug!(ticket = ticket.number(), "dropping stale wallet response");
        }
        Ok(rendered)
    }
}
