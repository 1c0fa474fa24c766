//! Wire types returned by the node's JSON API.
//!
//! All of these are read-only snapshots owned by the node. A view builds its
//! rendering from one and drops it afterwards.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A pending (unmined) transaction as listed by `/transactions/get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub recipient_address: String,
    pub sender_address: String,
    /// The node passes the submitted amount through untyped, so this may be
    /// a number or a string. Kept raw so `5` renders as `5` and `0.5` as `0.5`.
    pub value: serde_json::Value,
}

impl Transaction {
    /// The value as shown in a table cell. Strings render without quotes.
    pub fn display_value(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

/// Decode an optional field, falling back to its default when the node sent
/// something of another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Response of `/mine`. Only `message` is guaranteed. The block fields are
/// informational and never fail the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    #[serde(default, deserialize_with = "lenient")]
    pub block_number: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub nonce: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub previous_hash: Option<String>,
    /// Block contents, opaque to the front end.
    #[serde(default, deserialize_with = "lenient")]
    pub transactions: Vec<serde_json::Value>,
}

/// Key pair generated by `/wallet/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletKeyPair {
    pub public_key: String,
    pub private_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeList {
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    #[serde(default)]
    pub total_nodes: Vec<String>,
}

/// Response of `/nodes/resolve`. The chain payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub message: String,
}
