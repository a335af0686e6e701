// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

//! # Beacon HID Light Library
//!
//! This library drives a USB HID-attached RGB status light, including:
//! - Device discovery and connection
//! - Fixed-format color report building
//! - A serialized write path shared by all light commands

pub mod constants;
pub mod driver;
pub mod hid_light;
pub mod hid_reports;

// Re-export commonly used types
pub use constants::*;
pub use driver::ColorDriver;
pub use hid_light::{DeviceInfo, HidLight, LightError, LightTransport};
pub use hid_reports::{Color, HidOutputReport, SetColor};
