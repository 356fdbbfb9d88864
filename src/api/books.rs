//! Books API endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

use super::{AppJson, AppPath, CurrentPrincipal};

/// List all books
#[utoipa::path(
    get,
    path = "/books/",
    tag = "books",
    responses(
        (status = 200, description = "All books in catalog order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.find_all().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.find_one(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books/",
    tag = "books",
    security(("basic_auth" = [])),
    request_body = NewBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    AppJson(data): AppJson<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    data.validate()?;

    let book = state.services.books.save(data.into()).await?;
    tracing::info!(
        "Book {:?} created by {}",
        book.id,
        principal.display_name()
    );
    Ok((StatusCode::CREATED, Json(book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("basic_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Admin role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    tracing::info!("Book {} deleted by {}", id, principal.display_name());
    Ok(StatusCode::OK)
}
