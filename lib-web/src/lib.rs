// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

//! # Beacon Command Server
//!
//! HTTP surface for the status light: JSON commands for steady color, blink
//! patterns and blink cancellation.

pub mod server;

pub use server::{router, WebServer};
