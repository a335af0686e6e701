// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use crate::constants::{HID_REPORT_ID_COLOR, LED_ALL, MODE_STATIC_COLOR};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Colors the light can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
    Off,
    /// Anything we did not recognize; keeps the original text for diagnostics
    Unknown(String),
}

impl Color {
    /// Parse a color name, case-insensitively. Never fails: unrecognized
    /// input becomes `Color::Unknown` and renders the same as `Off`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "red" => Color::Red,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "off" => Color::Off,
            _ => Color::Unknown(name.to_string()),
        }
    }

    /// Returns RGB values
    pub fn to_rgb(&self) -> [u8; 3] {
        match self {
            Color::Red => [0xFF, 0x00, 0x00],
            Color::Green => [0x00, 0xFF, 0x00],
            Color::Blue => [0x00, 0x00, 0xFF],
            Color::Off | Color::Unknown(_) => [0x00, 0x00, 0x00],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Green => write!(f, "green"),
            Color::Blue => write!(f, "blue"),
            Color::Off => write!(f, "off"),
            Color::Unknown(name) => write!(f, "unknown({})", name),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Color::parse(&name))
    }
}

/// Base trait for HID output reports
pub trait HidOutputReport: fmt::Debug + Send + Sync {
    fn to_buffer(&self) -> Vec<u8>;
    fn report_id(&self) -> u8 {
        HID_REPORT_ID_COLOR
    }
}

/// Set the whole light to a steady color
#[derive(Debug, Clone)]
pub struct SetColor {
    color: Color,
}

impl SetColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl HidOutputReport for SetColor {
    fn to_buffer(&self) -> Vec<u8> {
        let rgb = self.color.to_rgb();
        vec![
            MODE_STATIC_COLOR,
            LED_ALL,
            rgb[0],
            rgb[1],
            rgb[2],
            0,
            0,
            0,
        ]
    }
}

impl fmt::Display for SetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetColor {{ color: {} }}", self.color)
    }
}
