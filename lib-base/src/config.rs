// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

//! Configuration management for beacon
//!
//! This module provides configuration loading with automatic file discovery.
//! Configuration files are searched in the following order:
//! 1. Current directory (beacon.yaml)
//! 2. User's config directory:
//!    - macOS: ~/Library/Application Support/beacon/beacon.yaml
//!    - Linux: ~/.config/beacon/beacon.yaml
//!    - Windows: %APPDATA%\beacon\beacon.yaml
//!
//! If no configuration file is found, a default one is created in the user's
//! config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub version: u32,
    #[serde(default = "default_device_identifications")]
    pub device_identifications: Vec<DeviceIdentification>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Device identification (vendor ID, product ID)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentification {
    pub vendor_id: u16,
    pub product_id: u16,
}

fn default_device_identifications() -> Vec<DeviceIdentification> {
    vec![DeviceIdentification {
        vendor_id: beacon_hid::DEFAULT_VENDOR_ID,
        product_id: beacon_hid::DEFAULT_PRODUCT_ID,
    }]
}

/// HTTP command server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    9123
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML config")?;
        Ok(config)
    }

    /// Find and load configuration file from multiple locations.
    /// If no config file is found, creates a default one in the user's config
    /// directory.
    pub fn load() -> Result<Self> {
        Self::load_with_name("beacon.yaml")
    }

    /// Find and load configuration file with a specific filename
    pub fn load_with_name(filename: &str) -> Result<Self> {
        let search_paths = Self::get_config_search_paths(filename);

        // Try to find existing config file
        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        // No config found, create default in user config directory
        let config_dir = Self::get_user_config_dir()?;
        let config_path = config_dir.join(filename);

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
        }

        let default_config = Self::default_config();
        let yaml = serde_yaml::to_string(&default_config)
            .with_context(|| "Failed to serialize default config")?;

        fs::write(&config_path, yaml)
            .with_context(|| format!("Failed to write default config to: {:?}", config_path))?;

        Ok(default_config)
    }

    /// Get search paths for configuration file
    fn get_config_search_paths(filename: &str) -> Vec<std::path::PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory
        paths.push(std::path::PathBuf::from(filename));

        // 2. User config directory
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join(filename));
        }

        paths
    }

    /// Get user's configuration directory
    fn get_user_config_dir() -> Result<std::path::PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("beacon");

        Ok(config_dir)
    }

    /// Create a default configuration
    fn default_config() -> Self {
        Self {
            version: 1,
            device_identifications: default_device_identifications(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Get device info for HID connection
    pub fn get_device_info(&self) -> Vec<beacon_hid::DeviceInfo> {
        self.device_identifications
            .iter()
            .map(|d| beacon_hid::DeviceInfo {
                vendor_id: d.vendor_id,
                product_id: d.product_id,
                serial_number: None,
            })
            .collect()
    }
}
