//! `wayfind`: newline-delimited JSON front end for the navigation runtime.
//!
//! ```bash
//! # config/default.toml (+ config/$RUN_MODE.toml, WAYFIND__* overrides)
//! wayfind
//!
//! # explicit config file
//! wayfind path/to/config.toml
//!
//! echo '{"start_location_id": 12, "end_location_id": 4, "emergency": true}' | wayfind
//! ```

use anyhow::Result;
use std::env;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info};
use wayfind_core::config::AppConfig;
use wayfind_sdk::{Command, Runtime};

#[tokio::main]
async fn main() -> Result<()> {
    wayfind_core::init_tracing();

    let config = match env::args().nth(1) {
        Some(path) => AppConfig::load_from(&path)?,
        None => AppConfig::load()?,
    };
    info!("Loading graph from {}", config.graph.source_path);
    let runtime = Runtime::from_config(&config).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut writer = BufWriter::new(tokio::io::stdout());

    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        debug!("Received: {:?}", command);

        let reply = runtime.execute(command).await;
        writer.write_all(serde_json::to_string(&reply)?.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    info!("stdin closed, shutting down");
    runtime.shutdown().await;
    Ok(())
}
