//! # Backend Seam
//!
//! The transaction subsystem talks to the backend only through this trait, so
//! the browser client and in-memory doubles are interchangeable.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{PaginatedResponse, Transaction, TransactionCreate, TransactionUpdate};
use crate::query::TransactionQuery;

/// Transaction endpoints of the MeuFuturo API.
///
/// Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait TransactionApi {
    /// List one page of transactions matching the query
    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<PaginatedResponse<Transaction>, ApiError>;

    async fn create_transaction(&self, data: &TransactionCreate) -> Result<Transaction, ApiError>;

    async fn update_transaction(
        &self,
        id: &str,
        data: &TransactionUpdate,
    ) -> Result<Transaction, ApiError>;

    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError>;
}
