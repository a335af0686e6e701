// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

mod blink;
mod config;

pub use blink::*;
pub use config::*;
