//! HTML fragments for the web front end.
//!
//! Every node-supplied string goes through [`escape`]; addresses and keys are
//! data, never markup.

use super::{NodeListView, TableRow, TransactionTable, WalletDetails, NO_NODES_MESSAGE};
use std::fmt::Write;

pub const TRANSACTIONS_TABLE_ID: &str = "unmined_transactions_table";
pub const WALLET_DETAILS_ID: &str = "wallet_details";
pub const NODE_LIST_ID: &str = "node_list";

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn transaction_table(table: &TransactionTable) -> String {
    let mut html = format!("<table id=\"{}\">\n<tr>", TRANSACTIONS_TABLE_ID);
    for header in table.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr>\n");

    for row in &table.rows {
        match row {
            TableRow::Data {
                index,
                recipient_address,
                sender_address,
                value,
            } => {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    index,
                    escape(recipient_address),
                    escape(sender_address),
                    escape(value)
                );
            }
            TableRow::Placeholder { colspan, message } => {
                let _ = writeln!(
                    html,
                    "<tr><td colspan=\"{}\" class=\"placeholder\">{}</td></tr>",
                    colspan,
                    escape(message)
                );
            }
        }
    }

    html.push_str("</table>");
    html
}

/// Wallet panel. `None` renders the empty container.
pub fn wallet_details(details: Option<&WalletDetails>) -> String {
    let Some(details) = details else {
        return format!("<div id=\"{}\"></div>", WALLET_DETAILS_ID);
    };

    let mut html = format!(
        "<div id=\"{}\">\n<h3>{}</h3>\n",
        WALLET_DETAILS_ID,
        escape(details.heading)
    );
    for field in &details.fields {
        let value = if field.full_key {
            format!("<span class=\"full-key\">{}</span>", escape(&field.value))
        } else {
            escape(&field.value)
        };
        let _ = writeln!(
            html,
            "<p><strong>{}:</strong> {}</p>",
            escape(field.label),
            value
        );
    }
    html.push_str("</div>");
    html
}

pub fn node_list(view: &NodeListView) -> String {
    let mut html = format!("<ul id=\"{}\">\n", NODE_LIST_ID);
    if view.is_empty() {
        let _ = writeln!(html, "<li class=\"placeholder\">{}</li>", NO_NODES_MESSAGE);
    }
    for node in &view.nodes {
        let _ = writeln!(html, "<li>{}</li>", escape(node));
    }
    html.push_str("</ul>");
    html
}
