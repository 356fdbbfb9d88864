//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Catalog book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Book {
    /// A book that has not been persisted yet
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewBook {
    #[validate(length(max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 50000))]
    pub description: String,
}

impl From<NewBook> for Book {
    fn from(data: NewBook) -> Self {
        Book::new(data.title, data.description)
    }
}
