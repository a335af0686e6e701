// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use crate::hid_light::{LightError, LightTransport};
use crate::hid_reports::{Color, SetColor};
use log::{debug, warn};
use std::sync::Arc;

/// Stateless translation of a color to its wire report. One device write per
/// call, no retries; failures are surfaced to the caller.
#[derive(Clone)]
pub struct ColorDriver {
    transport: Arc<dyn LightTransport>,
}

impl ColorDriver {
    pub fn new(transport: Arc<dyn LightTransport>) -> Self {
        Self { transport }
    }

    pub fn set_color(&self, color: &Color) -> Result<(), LightError> {
        if let Color::Unknown(name) = color {
            warn!("Unknown color {:?}, treating as off", name);
        }

        debug!("Setting color: {}", color);
        self.transport.write_report(&SetColor::new(color.clone()))?;
        Ok(())
    }
}
