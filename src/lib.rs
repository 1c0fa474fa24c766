//! chainview - front end for a proof-of-work blockchain node
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Node Access
//! - [`client`] - HTTP client for the node's JSON API
//! - [`model`] - Wire types returned by the node
//!
//! ## Views
//! - [`sync`] - Pending transactions table and mining
//! - [`wallet`] - Key pair display and truncation
//! - [`nodes`] - Peer node directory
//! - [`view`] - Render models, HTML and terminal renderers
//! - [`surface`] - Rendering targets
//! - [`generation`] - Stale response guard
//!
//! ## Front Ends
//! - [`app`] - Startup wiring and event dispatch
//! - `web` - Server-rendered browser pages (feature `web`)
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`logging`] - Tracing setup

#![forbid(unsafe_code)]

// ============================================================================
// Node Access
// ============================================================================
pub mod client;
pub mod model;

// ============================================================================
// Views
// ============================================================================
pub mod generation;
pub mod nodes;
pub mod surface;
pub mod sync;
pub mod view;
pub mod wallet;

// ============================================================================
// Front Ends
// ============================================================================
pub mod app;
#[cfg(feature = "web")]
pub mod web;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
pub mod logging;

#[cfg(test)]
pub(crate) mod testing;
