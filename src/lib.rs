//! # Dramascore
//!
//! A scoring and ranking service for short-drama scripts, usable both as a
//! standalone binary and as a library.
//!
//! Raters score scripts on four dimensions. Every rating write recomputes the
//! rating's total and the owning script's cached average, which listing,
//! ranking and dashboard queries read.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! dramascore = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dramascore::config::ServerConfig;
//! use dramascore::server::{AppState, create_router};
//! use dramascore::store::{SqliteStore, Store};
//!
//! let config = ServerConfig::default();
//! let store = SqliteStore::new(config.db_path()).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), config));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod scoring;
pub mod server;
pub mod store;
pub mod types;
