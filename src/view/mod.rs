//! Render models for each on-screen region.
//!
//! A view is rebuilt from scratch out of one node response and never patched
//! in place. Surfaces ([`crate::surface`]) decide how a view reaches the user:
//! [`html`] for the web front end, [`terminal`] for the CLI.

pub mod html;
pub mod terminal;

use crate::model::{NodeList, Transaction, WalletKeyPair};
use crate::wallet::truncate;

pub const TRANSACTION_HEADERS: [&str; 4] = ["#", "Recipient Address", "Sender Address", "Value"];
pub const NO_DATA_MESSAGE: &str = "No data available in table";
pub const NO_NODES_MESSAGE: &str = "No nodes registered";
pub const WALLET_HEADING: &str = "Wallet Details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Data {
        index: usize,
        recipient_address: String,
        sender_address: String,
        value: String,
    },
    /// Single cell spanning `colspan` columns.
    Placeholder { colspan: usize, message: String },
}

/// The unmined-transactions table. The header row is fixed and always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTable {
    pub headers: [&'static str; 4],
    pub rows: Vec<TableRow>,
}

impl Default for TransactionTable {
    /// Header only; what a page shows before the first fetch completes.
    fn default() -> Self {
        Self {
            headers: TRANSACTION_HEADERS,
            rows: Vec::new(),
        }
    }
}

impl TransactionTable {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let rows = if transactions.is_empty() {
            vec![TableRow::Placeholder {
                colspan: TRANSACTION_HEADERS.len(),
                message: NO_DATA_MESSAGE.to_string(),
            }]
        } else {
            transactions
                .iter()
                .enumerate()
                .map(|(i, tx)| TableRow::Data {
                    index: i + 1,
                    recipient_address: tx.recipient_address.clone(),
                    sender_address: tx.sender_address.clone(),
                    value: tx.display_value(),
                })
                .collect()
        };

        Self {
            headers: TRANSACTION_HEADERS,
            rows,
        }
    }

    pub fn data_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, TableRow::Data { .. }))
            .count()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder { .. }])
    }
}

/// One labelled line of the wallet panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    pub label: &'static str,
    pub value: String,
    /// Full keys are rendered in a monospace/selectable style.
    pub full_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletDetails {
    pub heading: &'static str,
    pub fields: [LabeledField; 4],
}

impl WalletDetails {
    pub fn from_key_pair(keys: &WalletKeyPair, truncate_len: usize) -> Self {
        Self {
            heading: WALLET_HEADING,
            fields: [
                LabeledField {
                    label: "Public Key",
                    value: truncate(&keys.public_key, truncate_len),
                    full_key: false,
                },
                LabeledField {
                    label: "Private Key",
                    value: truncate(&keys.private_key, truncate_len),
                    full_key: false,
                },
                LabeledField {
                    label: "Full Public Key",
                    value: keys.public_key.clone(),
                    full_key: true,
                },
                LabeledField {
                    label: "Full Private Key",
                    value: keys.private_key.clone(),
                    full_key: true,
                },
            ],
        }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeListView {
    pub nodes: Vec<String>,
}

impl NodeListView {
    pub fn from_nodes(list: &NodeList) -> Self {
        Self {
            nodes: list.nodes.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn tx(recipient: &str, sender: &str, value: i64) -> Transaction {
    Transaction {
        recipient_address: recipient.to_string(),
        sender_address: sender.to_string(),
        value: value.into(),
    }
}
