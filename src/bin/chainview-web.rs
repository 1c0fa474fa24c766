#![forbid(unsafe_code)]
//! Browser front end for a blockchain node.

use chainview::config::load_config;
use chainview::web::run_web_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    chainview::logging::init();
    let config = load_config()?;
    run_web_server(&config).await
}
