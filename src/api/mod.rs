//! API handlers for Biblio REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pagination {
    /// Total number of matching records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub limit: i64,
    /// Total number of pages
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// Uniform success envelope for all endpoints.
/// `data` carries the payload; `pagination` only appears on listings.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            pagination: None,
        }
    }

    pub fn paginated(message: &str, data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            pagination: Some(pagination),
        }
    }
}
