//! API Module
//!
//! Tauri command surface for the webview frontend.
//!
//! Structure:
//! - commands.rs: command implementations and their DTOs
//! - engine_status.rs: status structures reported to the frontend

pub mod commands;
pub mod engine_status;

pub use commands::*;
