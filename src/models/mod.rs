//! Data models for the library catalog

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, NewBook};
pub use user::{Principal, Role, UserAccount};
