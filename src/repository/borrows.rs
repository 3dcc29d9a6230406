//! Borrows repository for database operations

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        borrow::{Borrow, BorrowRecord, BorrowSummary, BorrowedBook, CreateBorrow, SummaryBook},
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow `quantity` copies of a book: decrement inventory and record
    /// the transaction, both inside one database transaction.
    ///
    /// The decrement is conditional (`copies >= quantity`), so two
    /// concurrent borrows of the last copy serialize on the row lock and at
    /// most one succeeds. The availability flag is recomputed in the same
    /// statement, keeping the `available == (copies > 0)` invariant. If the
    /// borrow insert fails the decrement rolls back with it.
    pub async fn create(&self, borrow: &CreateBorrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET copies = copies - $2,
                available = (copies - $2) > 0,
                updated_at = NOW()
            WHERE id = $1 AND copies >= $2
            RETURNING *
            "#,
        )
        .bind(borrow.book)
        .bind(borrow.quantity)
        .fetch_optional(&mut *tx)
        .await?;

        let book = match updated {
            Some(book) => book,
            None => {
                // No row matched: either the book is missing or it has
                // fewer copies than requested.
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                        .bind(borrow.book)
                        .fetch_one(&mut *tx)
                        .await?;
                return Err(if exists {
                    AppError::InsufficientInventory("Not enough copies available".to_string())
                } else {
                    AppError::NotFound("Book not found".to_string())
                });
            }
        };

        let created = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (book_id, quantity, due_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(borrow.book)
        .bind(borrow.quantity)
        .bind(borrow.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Borrowed {} x {} (book id={}, {} copies left)",
            created.quantity,
            book.title,
            book.id,
            book.copies
        );

        Ok(created)
    }

    /// Paginated borrow listing, each record joined to its book's
    /// title/isbn/copies. A dangling book reference yields `book: null`.
    pub async fn list(&self, page: i64, limit: i64) -> AppResult<(Vec<BorrowRecord>, i64)> {
        let offset = (page - 1) * limit;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT br.id, br.quantity, br.due_date, br.created_at,
                   b.title, b.isbn, b.copies
            FROM borrows br
            LEFT JOIN books b ON b.id = br.book_id
            ORDER BY br.created_at
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .into_iter()
            .map(|row| {
                let title: Option<String> = row.get("title");
                BorrowRecord {
                    id: row.get("id"),
                    book: title.map(|title| BorrowedBook {
                        title,
                        isbn: row.get("isbn"),
                        copies: row.get("copies"),
                    }),
                    quantity: row.get("quantity"),
                    due_date: row.get("due_date"),
                    created_at: row.get("created_at"),
                }
            })
            .collect();

        Ok((records, total))
    }

    /// Aggregate summary: total borrowed quantity per book. Unpaginated;
    /// intended for small datasets.
    pub async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT b.title, b.isbn, SUM(br.quantity) as total_quantity
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            GROUP BY b.id, b.title, b.isbn
            ORDER BY total_quantity DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| BorrowSummary {
                book: SummaryBook {
                    title: row.get("title"),
                    isbn: row.get("isbn"),
                },
                total_quantity: row.get("total_quantity"),
            })
            .collect())
    }
}
