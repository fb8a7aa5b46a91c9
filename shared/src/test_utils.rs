//! In-memory stand-in for the backend used by the unit tests

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::collections::VecDeque;
use tokio::sync::oneshot;

use crate::api::TransactionApi;
use crate::error::ApiError;
use crate::models::{
    PaginatedResponse, Transaction, TransactionCreate, TransactionType, TransactionUpdate,
};
use crate::query::TransactionQuery;

pub type ListResult = Result<PaginatedResponse<Transaction>, ApiError>;

/// Mutations recorded by [`MockApi`], in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(String),
    Update(String),
    Delete(String),
}

/// Scriptable [`TransactionApi`].
///
/// List calls consume, in order: a pending gate (resolved by the test), a
/// queued result, or an empty page echoing the requested page.
#[derive(Default)]
pub struct MockApi {
    list_calls: RefCell<Vec<TransactionQuery>>,
    list_results: RefCell<VecDeque<ListResult>>,
    list_gates: RefCell<VecDeque<oneshot::Receiver<ListResult>>>,
    mutations: RefCell<Vec<Mutation>>,
    mutation_error: RefCell<Option<ApiError>>,
    mutation_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list_result(&self, result: ListResult) {
        self.list_results.borrow_mut().push_back(result);
    }

    /// Hold the next list call until the returned sender fires
    pub fn gate_next_list(&self) -> oneshot::Sender<ListResult> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn gate_next_mutation(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.mutation_gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn fail_mutations_with(&self, err: ApiError) {
        *self.mutation_error.borrow_mut() = Some(err);
    }

    pub fn list_calls(&self) -> Vec<TransactionQuery> {
        self.list_calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.borrow().clone()
    }

    async fn mutate(&self, mutation: Mutation) -> Result<(), ApiError> {
        self.mutations.borrow_mut().push(mutation);
        let gate = self.mutation_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.mutation_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl TransactionApi for MockApi {
    async fn list_transactions(&self, query: &TransactionQuery) -> ListResult {
        self.list_calls.borrow_mut().push(query.clone());

        let gate = self.list_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string())));
        }

        let queued = self.list_results.borrow_mut().pop_front();
        queued.unwrap_or_else(|| Ok(page_of(Vec::new(), query.page, 0, 0)))
    }

    async fn create_transaction(&self, data: &TransactionCreate) -> Result<Transaction, ApiError> {
        self.mutate(Mutation::Create(data.description.clone())).await?;
        let mut tx = sample_transaction("created", data.transaction_type, data.amount);
        tx.description = data.description.clone();
        tx.transaction_date = data.transaction_date;
        Ok(tx)
    }

    async fn update_transaction(
        &self,
        id: &str,
        data: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        self.mutate(Mutation::Update(id.to_string())).await?;
        let mut tx = sample_transaction(
            id,
            data.transaction_type.unwrap_or(TransactionType::Expense),
            data.amount.unwrap_or(Decimal::ONE),
        );
        if let Some(description) = &data.description {
            tx.description = description.clone();
        }
        Ok(tx)
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.mutate(Mutation::Delete(id.to_string())).await
    }
}

/// A page whose flags are consistent with `page`/`pages`
pub fn page_of(
    items: Vec<Transaction>,
    page: u32,
    pages: u32,
    total: u64,
) -> PaginatedResponse<Transaction> {
    PaginatedResponse {
        items,
        total,
        page,
        size: 20,
        pages,
        has_next: page < pages,
        has_previous: page > 1,
    }
}

pub fn sample_transaction(
    id: &str,
    transaction_type: TransactionType,
    amount: Decimal,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        transaction_type,
        amount,
        description: format!("Transação {id}"),
        transaction_date: NaiveDate::from_ymd_opt(2025, 1, 24).unwrap(),
        notes: None,
        category_id: None,
        category: None,
        category_name: None,
        signed_amount: None,
        user_id: "user-1".to_string(),
        created_at: "2025-01-24T10:00:00Z".to_string(),
        updated_at: "2025-01-24T10:00:00Z".to_string(),
    }
}

pub fn sample_create(transaction_type: TransactionType) -> TransactionCreate {
    TransactionCreate {
        transaction_type,
        amount: Decimal::new(15000, 2),
        description: "Mercado".to_string(),
        transaction_date: NaiveDate::from_ymd_opt(2025, 1, 24).unwrap(),
        notes: None,
        category_id: None,
    }
}
