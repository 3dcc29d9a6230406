//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookListQuery, CreateBook, UpdateBook},
};

use super::{ApiResponse, Pagination};

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Validation failed or duplicate ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<ApiResponse<Book>>)> {
    payload.validate()?;

    let book = state.services.catalog.create_book(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Book created successfully", book)),
    ))
}

/// List books with filtering, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookListQuery),
    responses(
        (status = 200, description = "Page of books")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Book>>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);

    let (books, total) = state.services.catalog.list_books(&query).await?;

    Ok(Json(ApiResponse::paginated(
        "Books retrieved successfully",
        books,
        Pagination::new(total, page, limit),
    )))
}

/// Get a book by ID. Returns `data: null` when the id does not resolve.
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details (null when absent)")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Option<Book>>>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(ApiResponse::new("Book retrieved successfully", book)))
}

/// Partially update a book; availability is recomputed from copies
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    payload.validate()?;

    let book = state.services.catalog.update_book(id, payload).await?;
    Ok(Json(ApiResponse::new("Book updated successfully", book)))
}

/// Delete a book. Idempotent: absent ids succeed with `data: null`.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Option<Book>>>> {
    state.services.catalog.delete_book(id).await?;
    Ok(Json(ApiResponse::new("Book deleted successfully", None)))
}
