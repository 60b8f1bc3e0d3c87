//! Coursify course platform
//!
//! REST JSON API for publishing courses, enrolling in them and reading their
//! lessons. Every call except registration, image storage and the health check
//! is authenticated with HTTP Basic credentials.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
