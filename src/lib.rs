//! Library catalog server
//!
//! A small REST JSON API for listing, creating and deleting catalog books,
//! with HTTP Basic authentication and role-gated write operations.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::policy::AccessPolicy;
use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    /// Wire services over `repository` with the books access policy
    pub fn new(config: AppConfig, repository: Repository) -> AppResult<Self> {
        let services = Services::new(repository, &config.auth)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
            policy: Arc::new(AccessPolicy::books(api::BOOKS_PATH)),
        })
    }
}
