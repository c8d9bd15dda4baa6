//! qchat - a terminal client for a streaming chat backend
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod sse;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
