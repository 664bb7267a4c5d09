#![forbid(unsafe_code)]

//! deedboard
//!
//! Serves the deed upload and dashboard API, and manages its config file.

mod cli;
mod config;
mod config_handlers;
mod error;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use deedboard_api::{DeedService, Server};
use deedboard_store::{KvStore, MemoryStore, RedisStore};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use config::DeedboardConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    match args.command {
        Command::Serve(serve) => {
            let mut config = DeedboardConfig::load(config_path)?;
            config.apply_serve_args(&serve);
            init_tracing(&config, args.verbose);
            serve_with(config).await
        }
        Command::Config { action } => {
            init_tracing(&DeedboardConfig::default(), args.verbose);
            config_handlers::handle_config_command(config_path, action)?;
            Ok(())
        }
    }
}

fn init_tracing(config: &DeedboardConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve_with(config: DeedboardConfig) -> Result<()> {
    let store = open_store(&config.store.url)?;
    tracing::info!(backend = store.backend(), namespace = %config.store.namespace, "store ready");

    let service = DeedService::new(store)
        .with_key_scheme(config.key_scheme()?)
        .with_listing_policy(config.listing_policy);
    let server_config = config.server_config()?;

    Server::new(server_config, service)
        .serve()
        .await
        .context("server failed")
}

fn open_store(url: &str) -> Result<Arc<dyn KvStore>> {
    if url.starts_with("memory://") {
        tracing::warn!("using in-memory store; uploads are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = RedisStore::open(url).context("cannot open store")?;
    Ok(Arc::new(store))
}
