//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrows, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblio API",
        version = "0.1.0",
        description = "Library Management REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Borrow
        borrows::create_borrow,
        borrows::borrow_summary,
        borrows::list_borrows,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::Genre,
            crate::models::book::SortDirection,
            // Borrow
            crate::models::borrow::Borrow,
            crate::models::borrow::CreateBorrow,
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::BorrowedBook,
            crate::models::borrow::BorrowSummary,
            crate::models::borrow::SummaryBook,
            // Envelopes
            crate::api::Pagination,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "borrow", description = "Borrow transactions and reporting")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
