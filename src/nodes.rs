//! Peer node directory: list, register and resolve.

use crate::client::NodeApi;
use crate::error::{Result, ViewError};
use crate::generation::Generation;
use crate::model::{RegisterNodesResponse, ResolveResponse};
use crate::surface::Surface;
use crate::view::NodeListView;
use std::sync::Arc;

pub struct NodeDirectory {
    api: Arc<dyn NodeApi>,
    surface: Arc<dyn Surface>,
    generation: Generation,
}

/// Split user input on commas and whitespace, dropping empty entries.
pub fn parse_node_urls(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl NodeDirectory {
    pub fn new(api: Arc<dyn NodeApi>, surface: Arc<dyn Surface>) -> Self {
        Self {
            api,
            surface,
            generation: Generation::new(),
        }
    }

    pub async fn refresh_nodes(&self) -> Result<bool> {
        let ticket = self.generation.issue();
        let list = match self.api.get_nodes().await {
            Ok(list) => list,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching nodes");
                return Err(e);
            }
        };

        let view = NodeListView::from_nodes(&list);
        let surface = &self.surface;
        Ok(self.generation.commit(ticket, || surface.show_nodes(view)))
    }

    /// Register peers with the node. Entries are trimmed and blanks dropped;
    /// nothing is sent when no entry remains.
    pub async fn register_nodes(&self, nodes: Vec<String>) -> Result<RegisterNodesResponse> {
        let nodes: Vec<String> = nodes
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        if nodes.is_empty() {
            let err = ViewError::InvalidInput("Please supply a valid list of nodes".to_string());
            tracing::warn!(error = %err, "node registration skipped");
            return Err(err);
        }

        let ticket = self.generation.issue();
        let response = match self.api.register_nodes(nodes).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error registering nodes");
                return Err(e);
            }
        };

        tracing::info!(total = response.total_nodes.len(), "nodes.registered");
        let view = NodeListView {
            nodes: response.total_nodes.clone(),
        };
        let surface = &self.surface;
        self.generation.commit(ticket, || surface.show_nodes(view));
        self.surface.acknowledge(&response.message).await;
        Ok(response)
    }

    /// Ask the node to run conflict resolution and acknowledge its verdict.
    pub async fn resolve_conflicts(&self) -> Result<ResolveResponse> {
        let response = match self.api.resolve_conflicts().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error resolving conflicts");
                return Err(e);
            }
        };
        tracing::info!(message = %response.message, "nodes.resolved");
        self.surface.acknowledge(&response.message).await;
        Ok(response)
    }
}
