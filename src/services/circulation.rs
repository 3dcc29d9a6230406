//! Circulation service: borrow workflow and borrow reporting

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowRecord, BorrowSummary, CreateBorrow},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow copies of a book. The inventory decrement and the borrow
    /// record commit atomically in the repository.
    pub async fn borrow_book(&self, borrow: CreateBorrow) -> AppResult<Borrow> {
        self.repository.borrows.create(&borrow).await
    }

    /// Paginated borrow listing with book details joined in
    pub async fn list_borrows(&self, page: i64, limit: i64) -> AppResult<(Vec<BorrowRecord>, i64)> {
        self.repository.borrows.list(page, limit).await
    }

    /// Per-book totals over all borrow records
    pub async fn borrow_summary(&self) -> AppResult<Vec<BorrowSummary>> {
        self.repository.borrows.summary().await
    }
}
