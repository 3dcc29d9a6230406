//! Borrow (checkout transaction) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Borrow record from database.
///
/// Created only by the borrow workflow and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: Uuid,
    /// Non-owning reference to the borrowed book
    #[serde(rename = "book")]
    pub book_id: Uuid,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Create borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrow {
    /// ID of the book to borrow
    pub book: Uuid,
    #[validate(range(min = 1, message = "Quantity must be a positive number"))]
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
}

/// Short book reference joined into borrow listings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowedBook {
    pub title: String,
    pub isbn: String,
    pub copies: i32,
}

/// Borrow record with its book joined for display.
/// `book` is null when the referenced book no longer exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub id: Uuid,
    pub book: Option<BorrowedBook>,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Per-book aggregate over all borrow records
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowSummary {
    pub book: SummaryBook,
    pub total_quantity: i64,
}

/// Book identity carried by a summary row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryBook {
    pub title: String,
    pub isbn: String,
}

/// Query parameters for the paginated borrow listing
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BorrowListQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 10)
    pub limit: Option<i64>,
}
