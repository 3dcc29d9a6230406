//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book genre codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "genre")]
pub enum Genre {
    #[sqlx(rename = "FICTION")]
    Fiction,
    #[sqlx(rename = "NON_FICTION")]
    NonFiction,
    #[sqlx(rename = "SCIENCE")]
    Science,
    #[sqlx(rename = "HISTORY")]
    History,
    #[sqlx(rename = "BIOGRAPHY")]
    Biography,
    #[sqlx(rename = "FANTASY")]
    Fantasy,
}

impl Genre {
    /// Return the wire/storage code for this genre
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::Science => "SCIENCE",
            Genre::History => "HISTORY",
            Genre::Biography => "BIOGRAPHY",
            Genre::Fantasy => "FANTASY",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub isbn: String,
    pub description: Option<String>,
    pub copies: i32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// The availability invariant: a book is available iff copies remain.
    pub fn availability(copies: i32) -> bool {
        copies > 0
    }

    /// Recompute `available` from `copies`. Must be called after every
    /// in-memory mutation of `copies` before the entity is persisted.
    pub fn update_availability(&mut self) {
        self.available = Self::availability(self.copies);
    }

    /// Apply a partial update, then restore the availability invariant.
    pub fn apply_update(&mut self, update: UpdateBook) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(genre) = update.genre {
            self.genre = genre;
        }
        if let Some(isbn) = update.isbn {
            self.isbn = isbn;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(copies) = update.copies {
            self.copies = copies;
        }
        self.update_availability();
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 3, message = "Author must be at least 3 characters"))]
    pub author: String,
    pub genre: Genre,
    #[validate(length(min = 3, message = "ISBN must be at least 3 characters"))]
    pub isbn: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Copies must be a positive number"))]
    pub copies: i32,
}

/// Partial book update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 3, message = "Author must be at least 3 characters"))]
    pub author: Option<String>,
    pub genre: Option<Genre>,
    #[validate(length(min = 3, message = "ISBN must be at least 3 characters"))]
    pub isbn: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Copies must be a positive number"))]
    pub copies: Option<i32>,
}

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Query parameters for the paginated book listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BookListQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 10)
    pub limit: Option<i64>,
    /// Filter by genre
    pub filter: Option<Genre>,
    /// Case-insensitive substring search over title and author
    pub search: Option<String>,
    /// Sort field (default: createdAt)
    pub sort_by: Option<String>,
    /// Sort direction (default: asc)
    pub sort: Option<SortDirection>,
}
