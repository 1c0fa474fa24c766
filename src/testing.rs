//! Test doubles shared by the unit tests.

use crate::client::NodeApi;
use crate::error::{Result, ViewError};
use crate::model::{
    MineResponse, NodeList, RegisterNodesResponse, ResolveResponse, TransactionList, WalletKeyPair,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use tokio::sync::oneshot;

/// A scripted response, optionally held back until its gate is released.
pub(crate) struct Scripted<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T>,
}

impl<T> Scripted<T> {
    pub fn ready(result: Result<T>) -> Self {
        Self { gate: None, result }
    }

    /// Returns the response and the sender that releases it.
    pub fn gated(result: Result<T>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Some(rx),
                result,
            },
            tx,
        )
    }

    async fn resolve(self) -> Result<T> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.result
    }
}

pub(crate) fn network_down() -> ViewError {
    ViewError::NetworkError("connection refused".to_string())
}

/// In-process node. Queued responses are served in order; an empty queue
/// falls back to a benign default.
#[derive(Default)]
pub(crate) struct MockNode {
    pub transactions: Mutex<VecDeque<Scripted<TransactionList>>>,
    pub mines: Mutex<VecDeque<Result<MineResponse>>>,
    pub wallets: Mutex<VecDeque<Scripted<WalletKeyPair>>>,
    pub nodes: Mutex<VecDeque<Result<NodeList>>>,
    pub registrations: Mutex<VecDeque<Result<RegisterNodesResponse>>>,
    pub resolves: Mutex<VecDeque<Result<ResolveResponse>>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_transactions(&self, result: Result<TransactionList>) {
        self.transactions.lock().push_back(Scripted::ready(result));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }
}

#[async_trait]
impl NodeApi for MockNode {
    async fn get_transactions(&self) -> Result<TransactionList> {
        self.record("transactions");
        let next = self.transactions.lock().pop_front();
        match next {
            Some(scripted) => scripted.resolve().await,
            None => Ok(TransactionList::default()),
        }
    }

    async fn mine(&self) -> Result<MineResponse> {
        self.record("mine");
        let next = self.mines.lock().pop_front();
        next.unwrap_or_else(|| {
            Ok(MineResponse {
                message: "New Block Forged".to_string(),
                block_number: None,
                nonce: None,
                previous_hash: None,
                transactions: Vec::new(),
            })
        })
    }

    async fn new_wallet(&self) -> Result<WalletKeyPair> {
        self.record("wallet");
        let next = self.wallets.lock().pop_front();
        match next {
            Some(scripted) => scripted.resolve().await,
            None => Ok(WalletKeyPair {
                public_key: "public".to_string(),
                private_key: "private".to_string(),
            }),
        }
    }

    async fn get_nodes(&self) -> Result<NodeList> {
        self.record("nodes");
        let next = self.nodes.lock().pop_front();
        next.unwrap_or_else(|| Ok(NodeList::default()))
    }

    async fn register_nodes(&self, nodes: Vec<String>) -> Result<RegisterNodesResponse> {
        self.record("register");
        let next = self.registrations.lock().pop_front();
        next.unwrap_or_else(|| {
            Ok(RegisterNodesResponse {
                message: "New nodes have been added".to_string(),
                total_nodes: nodes,
            })
        })
    }

    async fn resolve_conflicts(&self) -> Result<ResolveResponse> {
        self.record("resolve");
        let next = self.resolves.lock().pop_front();
        next.unwrap_or_else(|| {
            Ok(ResolveResponse {
                message: "Our chain is authoritative".to_string(),
            })
        })
    }
}

/// Captures formatted `tracing` output for the current thread.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
