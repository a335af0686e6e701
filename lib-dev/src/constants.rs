// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

/// Default vendor ID for Luxafor-class lights (Microchip)
pub const DEFAULT_VENDOR_ID: u16 = 0x04D8;

/// Default product ID for the Luxafor flag
pub const DEFAULT_PRODUCT_ID: u16 = 0xF372;

/// Product string fragment used for discovery when no IDs are configured
pub const PRODUCT_STRING_MATCH: &str = "luxafor";

/// HID report ID for color commands
pub const HID_REPORT_ID_COLOR: u8 = 0x00;

/// Command byte selecting the static-color mode
pub const MODE_STATIC_COLOR: u8 = 0x01;

/// LED mask addressing all LEDs on the light
pub const LED_ALL: u8 = 0xFF;

/// Total size of a color report on the wire, report ID included
pub const COLOR_REPORT_SIZE: usize = 9;
