//! Borrow endpoints
//!
//! `GET /borrow` returns the aggregated per-book summary; the raw
//! paginated listing lives at `GET /borrow/list`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowListQuery, BorrowRecord, BorrowSummary, CreateBorrow},
};

use super::{ApiResponse, Pagination};

/// Borrow copies of a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrow",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Book borrowed"),
        (status = 400, description = "Validation failed or not enough copies", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<ApiResponse<Borrow>>)> {
    payload.validate()?;

    let borrow = state.services.circulation.borrow_book(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Book borrowed successfully", borrow)),
    ))
}

/// Aggregated borrow summary: total borrowed quantity per book
#[utoipa::path(
    get,
    path = "/borrow",
    tag = "borrow",
    responses(
        (status = 200, description = "Per-book borrow totals")
    )
)]
pub async fn borrow_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<BorrowSummary>>>> {
    let summary = state.services.circulation.borrow_summary().await?;
    Ok(Json(ApiResponse::new(
        "Borrowed books summary retrieved successfully",
        summary,
    )))
}

/// Paginated borrow listing with book details
#[utoipa::path(
    get,
    path = "/borrow/list",
    tag = "borrow",
    params(BorrowListQuery),
    responses(
        (status = 200, description = "Page of borrow records")
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowListQuery>,
) -> AppResult<Json<ApiResponse<Vec<BorrowRecord>>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);

    let (records, total) = state.services.circulation.list_borrows(page, limit).await?;

    Ok(Json(ApiResponse::paginated(
        "Borrow records retrieved successfully",
        records,
        Pagination::new(total, page, limit),
    )))
}
