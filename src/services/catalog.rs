//! Catalog management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookListQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book with an explicit ISBN uniqueness check
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        if self.repository.books.isbn_exists(&book.isbn, None).await? {
            return Err(AppError::Duplicate {
                field: "isbn",
                message: format!("A book with ISBN {} already exists", book.isbn),
            });
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Catalog create: book id={} isbn={}", created.id, created.isbn);
        Ok(created)
    }

    /// List books with filters and pagination
    pub async fn list_books(&self, query: &BookListQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Get a book by ID (None when absent)
    pub async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.repository.books.get_by_id(id).await
    }

    /// Apply a partial update to an existing book and persist it.
    /// `Book::apply_update` restores the availability invariant before the
    /// write reaches the repository.
    pub async fn update_book(&self, id: Uuid, update: UpdateBook) -> AppResult<Book> {
        let mut book = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        if let Some(ref isbn) = update.isbn {
            if self.repository.books.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::Duplicate {
                    field: "isbn",
                    message: format!("A book with ISBN {} already exists", isbn),
                });
            }
        }

        book.apply_update(update);
        self.repository.books.update(&book).await
    }

    /// Delete a book (idempotent)
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
