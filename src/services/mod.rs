//! Business logic services

pub mod auth;
pub mod books;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(&auth_config.users, auth_config.realm.clone())?,
            books: books::BooksService::new(repository.books),
        })
    }
}
