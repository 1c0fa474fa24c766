#![forbid(unsafe_code)]
//! Command line front end: one request, one rendering, exit.

use chainview::app::{Dashboard, UiEvent};
use chainview::config::{load_config, load_config_from, AcknowledgeMode};
use chainview::error::ViewError;
use chainview::nodes::parse_node_urls;
use chainview::surface::ConsoleSurface;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "chainview", version, about = "Blockchain node front end")]
struct Cli {
    /// Node base URL (overrides the config file)
    #[arg(long, global = true)]
    node: Option<String>,

    /// Path to a config file (default: ./chainview.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not wait for Enter after acknowledgments
    #[arg(long, global = true)]
    no_prompt: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show transactions waiting for the next block
    Transactions,
    /// Mine a block, then show the remaining transactions
    Mine,
    /// Generate a new wallet key pair
    Wallet {
        /// Print only the full keys, one per line
        #[arg(long)]
        full: bool,
    },
    /// Manage peer nodes
    Nodes {
        #[command(subcommand)]
        action: NodesCommand,
    },
}

#[derive(Subcommand)]
enum NodesCommand {
    /// List registered nodes
    List,
    /// Register one or more nodes (comma or space separated)
    Register { urls: Vec<String> },
    /// Run conflict resolution on the node
    Resolve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    chainview::logging::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(node) = cli.node {
        config.node.url = node;
        config.validate()?;
    }
    if cli.no_prompt {
        config.display.acknowledge = AcknowledgeMode::Auto;
    }

    let full_keys_only = matches!(cli.command, Command::Wallet { full: true });
    let surface = Arc::new(
        ConsoleSurface::new(config.display.acknowledge).full_keys_only(full_keys_only),
    );
    let dashboard = Dashboard::from_config(&config, surface)?;

    let result = match cli.command {
        Command::Transactions => dashboard
            .transactions
            .refresh_transactions()
            .await
            .map(|_| ()),
        Command::Mine => dashboard.transactions.trigger_mining().await.map(|_| ()),
        Command::Wallet { .. } => dashboard.wallet.generate_wallet().await.map(|_| ()),
        Command::Nodes { action } => match action {
            NodesCommand::List => dashboard.nodes.refresh_nodes().await.map(|_| ()),
            NodesCommand::Register { urls } => dashboard
                .nodes
                .register_nodes(parse_node_urls(&urls.join(" ")))
                .await
                .map(|_| ()),
            NodesCommand::Resolve => match dashboard.nodes.resolve_conflicts().await {
                Ok(_) => {
                    dashboard.handle(UiEvent::RefreshTransactions).await;
                    Ok(())
                }
                Err(e) => Err(e),
            },
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "❌".red(), e.to_string().red());
        if matches!(e, ViewError::NetworkError(_)) {
            eprintln!(
                "{}",
                format!("💡 Is the node running at {}?", config.node.url).yellow()
            );
        }
        std::process::exit(1);
    }

    Ok(())
}
