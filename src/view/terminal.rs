//! Plain terminal rendering for the CLI.

use super::{NodeListView, TableRow, TransactionTable, WalletDetails, NO_NODES_MESSAGE};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

pub fn transaction_table(view: &TransactionTable) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            view.headers
                .iter()
                .map(|h| {
                    Cell::new(h)
                        .fg(TableColor::Cyan)
                        .add_attribute(Attribute::Bold)
                })
                .collect::<Vec<_>>(),
        );

    for row in &view.rows {
        match row {
            TableRow::Data {
                index,
                recipient_address,
                sender_address,
                value,
            } => {
                table.add_row(vec![
                    Cell::new(index).fg(TableColor::White),
                    Cell::new(recipient_address).fg(TableColor::Green),
                    Cell::new(sender_address).fg(TableColor::Yellow),
                    Cell::new(value)
                        .fg(TableColor::White)
                        .set_alignment(CellAlignment::Right),
                ]);
            }
            TableRow::Placeholder { message, .. } => {
                // comfy-table has no colspan; the message sits in the first
                // cell with the rest left blank.
                let mut cells = vec![Cell::new(message).fg(TableColor::Grey)];
                cells.extend((1..view.headers.len()).map(|_| Cell::new("")));
                table.add_row(cells);
            }
        }
    }

    table
}

pub fn wallet_details(details: &WalletDetails) -> String {
    let mut out = format!("{}\n", details.heading.bright_cyan().bold());
    for field in &details.fields {
        let value = if field.full_key {
            field.value.bright_white()
        } else {
            field.value.white()
        };
        out.push_str(&format!("{} {}\n", format!("{}:", field.label).bold(), value));
    }
    out
}

/// Untruncated keys only, no labels or colour, for piping into other tools.
pub fn full_keys(details: &WalletDetails) -> String {
    details
        .fields
        .iter()
        .filter(|f| f.full_key)
        .map(|f| format!("{}\n", f.value))
        .collect()
}

pub fn node_list(view: &NodeListView) -> String {
    if view.is_empty() {
        return format!("{}\n", NO_NODES_MESSAGE.yellow());
    }
    view.nodes
        .iter()
        .map(|n| format!("  • {}\n", n.bright_white()))
        .collect()
}
