// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use beacon_hid::{Color, ColorDriver, HidLight};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Open the first light found by product string
    let light = Arc::new(HidLight::open(&[])?);
    println!(
        "Opened light: {}",
        light.product_string().unwrap_or("<unnamed>")
    );

    let driver = ColorDriver::new(light);

    for name in ["red", "green", "blue", "off"] {
        println!("Setting color {}...", name);
        if let Err(e) = driver.set_color(&Color::parse(name)) {
            eprintln!("Failed to set color: {}", e);
        }
        std::thread::sleep(Duration::from_secs(1));
    }

    Ok(())
}
