//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookListQuery, CreateBook, SortDirection},
};

/// Map the wire sort field to a whitelisted column. Unknown fields fall
/// back to the creation timestamp.
fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "title" => "title",
        "author" => "author",
        "genre" => "genre",
        "isbn" => "isbn",
        "copies" => "copies",
        "available" => "available",
        "updatedAt" => "updated_at",
        _ => "created_at",
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a book by ID, or None if absent
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Check whether another book already uses this ISBN
    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND ($2::uuid IS NULL OR id != $2))",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a new book. The availability flag is derived from copies at
    /// insert time; the isbn UNIQUE constraint is the storage-level backstop
    /// behind [`Self::isbn_exists`].
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, isbn, description, copies, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .bind(Book::availability(book.copies))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Duplicate {
                    field: "isbn",
                    message: format!("A book with ISBN {} already exists", book.isbn),
                }
            }
            _ => AppError::Database(e),
        })?;

        Ok(created)
    }

    /// Persist a fully materialized book (used by the partial-update path,
    /// after `Book::apply_update` has restored the availability invariant)
    pub async fn update(&self, book: &Book) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, genre = $4, isbn = $5, description = $6,
                copies = $7, available = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .bind(book.available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        Ok(updated)
    }

    /// Delete a book. Idempotent: deleting an absent id is not an error.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// List books with filtering, search, sorting and pagination.
    /// Returns the page of rows plus the total matching count.
    pub async fn search(&self, query: &BookListQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).max(1);
        let offset = (page - 1) * limit;

        let mut conditions = vec!["1=1".to_string()];
        let mut param = 0;

        if query.filter.is_some() {
            param += 1;
            conditions.push(format!("genre = ${}", param));
        }
        if query.search.is_some() {
            param += 1;
            conditions.push(format!("(title ILIKE ${p} OR author ILIKE ${p})", p = param));
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM books WHERE {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(genre) = query.filter {
            count = count.bind(genre);
        }
        if let Some(ref search) = query.search {
            count = count.bind(format!("%{}%", search));
        }
        let total = count.fetch_one(&self.pool).await?;

        let order_column = sort_column(query.sort_by.as_deref().unwrap_or("createdAt"));
        let order_dir = query.sort.unwrap_or(SortDirection::Asc).as_sql();

        let select_query = format!(
            "SELECT * FROM books WHERE {} ORDER BY {} {} LIMIT {} OFFSET {}",
            where_clause, order_column, order_dir, limit, offset
        );
        let mut select = sqlx::query_as::<_, Book>(&select_query);
        if let Some(genre) = query.filter {
            select = select.bind(genre);
        }
        if let Some(ref search) = query.search {
            select = select.bind(format!("%{}%", search));
        }
        let books = select.fetch_all(&self.pool).await?;

        Ok((books, total))
    }
}
