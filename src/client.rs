//! HTTP client for the node's JSON API
//!
//! [`NodeApi`] is the seam the view modules talk through. [`HttpNodeClient`]
//! is the real implementation; tests substitute scripted ones.

use crate::config::NodeConfig;
use crate::error::{Result, ViewError};
use crate::model::{
    MineResponse, NodeList, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
    TransactionList, WalletKeyPair,
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

pub const TRANSACTIONS_PATH: &str = "/transactions/get";
pub const MINE_PATH: &str = "/mine";
pub const WALLET_NEW_PATH: &str = "/wallet/new";
pub const NODES_GET_PATH: &str = "/nodes/get";
pub const NODES_REGISTER_PATH: &str = "/nodes/register";
pub const NODES_RESOLVE_PATH: &str = "/nodes/resolve";

/// Operations the front end needs from a node.
#[async_trait]
pub trait NodeApi: Send + Sync {
    async fn get_transactions(&self) -> Result<TransactionList>;
    async fn mine(&self) -> Result<MineResponse>;
    async fn new_wallet(&self) -> Result<WalletKeyPair>;
    async fn get_nodes(&self) -> Result<NodeList>;
    async fn register_nodes(&self, nodes: Vec<String>) -> Result<RegisterNodesResponse>;
    async fn resolve_conflicts(&self) -> Result<ResolveResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    http: Client,
    base: Url,
}

impl HttpNodeClient {
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .map_err(|e| ViewError::ConfigError(format!("invalid node url: {}", e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ViewError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        // Keep any path prefix on the base (e.g. a node mounted under /chain/).
        let joined = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ViewError::ConfigError(format!("bad endpoint {}: {}", joined, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        decode(response).await
    }
}

/// Reject non-2xx statuses (keeping the body for the diagnostic), then parse JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ViewError::StatusError {
            code: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl NodeApi for HttpNodeClient {
    async fn get_transactions(&self) -> Result<TransactionList> {
        self.get_json(TRANSACTIONS_PATH).await
    }

    async fn mine(&self) -> Result<MineResponse> {
        self.get_json(MINE_PATH).await
    }

    async fn new_wallet(&self) -> Result<WalletKeyPair> {
        self.get_json(WALLET_NEW_PATH).await
    }

    async fn get_nodes(&self) -> Result<NodeList> {
        self.get_json(NODES_GET_PATH).await
    }

    async fn register_nodes(&self, nodes: Vec<String>) -> Result<RegisterNodesResponse> {
        self.post_json(NODES_REGISTER_PATH, &RegisterNodesRequest { nodes })
            .await
    }

    async fn resolve_conflicts(&self) -> Result<ResolveResponse> {
        self.get_json(NODES_RESOLVE_PATH).await
    }
}
