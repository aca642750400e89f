// Copyright 2025 coScene
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod protocol;
mod record;
mod server;
mod store;

use config::load_config_with_env;
use store::StoreSet;

/// Form Recorder - persist form submissions to interchangeable backends
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Bind address (overrides config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Data directory for file-backed stores (overrides config file)
    #[arg(short, long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration from file
    let mut app_config = load_config_with_env(&args.config)?;

    // Apply CLI overrides
    if let Some(bind) = args.bind {
        app_config.server.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        app_config.storage.data_dir = data_dir;
    }

    // Initialize tracing with configured level
    let log_level = match app_config.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Form Recorder");
    info!("Loaded configuration from: {:?}", args.config);
    info!("Data directory: {}", app_config.storage.data_dir);
    info!("Database: {}", app_config.storage.db_path().display());

    // Build the four store singletons and make sure every backing
    // resource exists before the first request.
    let stores = Arc::new(StoreSet::from_config(&app_config.storage)?);
    stores.initialize_all().await?;
    info!("All storage backends initialized");

    let bind_addr = app_config.server.bind_addr.clone();

    // Run the server (blocks until Ctrl+C)
    tokio::select! {
        result = server::run(&bind_addr, stores) => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
            info!("Server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    info!("Form Recorder shut down successfully");

    Ok(())
}
