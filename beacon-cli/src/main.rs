// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use anyhow::{Context, Result};
use beacon_hid::{ColorDriver, HidLight};
use beacon_web::WebServer;
use clap::Parser;
use lib_base::{BlinkController, Config};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// HTTP command server for a USB HID status light
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured server port
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load().context("Failed to load configuration")?,
    };

    init_logging(&config, args.verbose);

    // No matching device at startup is fatal
    let light = HidLight::open(&config.get_device_info())
        .context("No status light found; check that the device is plugged in")?;
    info!(
        "Using light: {}",
        light.product_string().unwrap_or("<unnamed device>")
    );

    let controller = BlinkController::new(ColorDriver::new(Arc::new(light)));

    let port = args.port.unwrap_or(config.server.bind_port);
    WebServer::new(controller, config.server.bind_address.clone(), port)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

fn init_logging(config: &Config, verbose: bool) {
    let level: &str = if verbose {
        "debug"
    } else {
        &config.logging.level
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
