// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

//! Runs the command server against a virtual light that logs frames instead
//! of writing to hardware. Useful for exercising the HTTP surface without a
//! device attached:
//!
//! ```sh
//! cargo run --example server
//! curl -X POST localhost:9123/command/color -d '{"color":"red"}' \
//!     -H 'content-type: application/json'
//! ```

use beacon_hid::{ColorDriver, HidOutputReport, LightError, LightTransport};
use beacon_web::WebServer;
use lib_base::BlinkController;
use std::sync::Arc;

struct VirtualLight;

impl LightTransport for VirtualLight {
    fn write_report(&self, report: &dyn HidOutputReport) -> Result<usize, LightError> {
        let mut frame = vec![report.report_id()];
        frame.extend_from_slice(&report.to_buffer());
        log::info!("virtual light: {:02x?}", frame);
        Ok(frame.len())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let controller = BlinkController::new(ColorDriver::new(Arc::new(VirtualLight)));
    WebServer::new(controller, "127.0.0.1", 9123).run().await
}
