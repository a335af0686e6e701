// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use crate::constants::PRODUCT_STRING_MATCH;
use crate::hid_reports::HidOutputReport;
use hidapi::{HidApi, HidDevice as RawHidDevice};
use log::{debug, info};
use std::sync::Mutex;

/// Device identification information
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
}

/// Errors that can occur with light operations
#[derive(Debug, thiserror::Error)]
pub enum LightError {
    #[error("no status light found")]
    DeviceNotFound,

    #[error("failed to write to device: {0}")]
    WriteFailed(String),

    #[error("HID API error: {0}")]
    HidApiError(String),
}

/// Sink for HID output reports. The one write path shared by the steady-color
/// command handlers and the blink loop; implementations must serialize writes.
pub trait LightTransport: Send + Sync {
    fn write_report(&self, report: &dyn HidOutputReport) -> Result<usize, LightError>;
}

/// hidapi-backed status light
pub struct HidLight {
    device: Mutex<RawHidDevice>,
    product: Option<String>,
}

impl HidLight {
    /// Open the first matching device. With an empty list, falls back to
    /// matching the product string against known light names.
    pub fn open(device_info: &[DeviceInfo]) -> Result<Self, LightError> {
        let api = HidApi::new().map_err(|e| LightError::HidApiError(e.to_string()))?;

        let device = Self::search_for_device(&api, device_info)?;
        let product = device.get_product_string().ok().flatten();

        info!(
            "Connected to light: {}",
            product.as_deref().unwrap_or("<unnamed device>")
        );

        Ok(Self {
            device: Mutex::new(device),
            product,
        })
    }

    /// Product string reported by the device, if any
    pub fn product_string(&self) -> Option<&str> {
        self.product.as_deref()
    }

    fn search_for_device(
        api: &HidApi,
        device_info: &[DeviceInfo],
    ) -> Result<RawHidDevice, LightError> {
        // If no specific device info, search by product string
        if device_info.is_empty() {
            for info in api.device_list() {
                if let Some(product) = info.product_string() {
                    if product.to_lowercase().contains(PRODUCT_STRING_MATCH) {
                        debug!("Found light by product string: {:?}", info);
                        return info
                            .open_device(api)
                            .map_err(|e| LightError::HidApiError(e.to_string()));
                    }
                }
            }
            return Err(LightError::DeviceNotFound);
        }

        for info in device_info {
            let result = if let Some(serial) = &info.serial_number {
                api.open_serial(info.vendor_id, info.product_id, serial).ok()
            } else {
                api.open(info.vendor_id, info.product_id).ok()
            };

            if let Some(device) = result {
                info!(
                    "Device {:04x}:{:04x} opened successfully",
                    info.vendor_id, info.product_id
                );
                return Ok(device);
            }
        }

        Err(LightError::DeviceNotFound)
    }
}

impl LightTransport for HidLight {
    fn write_report(&self, report: &dyn HidOutputReport) -> Result<usize, LightError> {
        let device = self
            .device
            .lock()
            .map_err(|_| LightError::WriteFailed("device mutex poisoned".to_string()))?;

        let mut buffer = vec![report.report_id()];
        buffer.extend_from_slice(&report.to_buffer());

        debug!("HID TX: {:02x?}", buffer);

        device
            .write(&buffer)
            .map_err(|e| LightError::WriteFailed(e.to_string()))
    }
}
