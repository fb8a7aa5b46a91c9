//! # Transaction List Loader
//!
//! Issues list requests and owns the loaded transactions plus the request
//! status. Only the most recently issued request may write its result; older
//! responses that arrive later are dropped.

use log::{debug, warn};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::api::TransactionApi;
use crate::error::ApiError;
use crate::models::Transaction;
use crate::pagination::PaginationPatch;
use crate::query::TransactionQuery;
use crate::ChangeListener;

/// Status of the transaction list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Human-readable message of the last failure
    Errored(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to one `load` call
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The response was stored; carries its pagination metadata
    Loaded(PaginationPatch),
    /// The request failed; previous transactions were kept
    Failed(ApiError),
    /// A newer request was issued while this one was in flight
    Superseded,
}

pub struct TransactionListLoader<A: TransactionApi> {
    api: Rc<A>,
    transactions: RefCell<Vec<Transaction>>,
    status: RefCell<LoadStatus>,
    latest_ticket: Cell<u64>,
    listener: ChangeListener,
}

impl<A: TransactionApi> TransactionListLoader<A> {
    pub fn new(api: Rc<A>, listener: ChangeListener) -> Self {
        Self {
            api,
            transactions: RefCell::new(Vec::new()),
            status: RefCell::new(LoadStatus::Idle),
            latest_ticket: Cell::new(0),
            listener,
        }
    }

    pub fn transactions(&self) -> Ref<'_, Vec<Transaction>> {
        self.transactions.borrow()
    }

    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    /// Fetch one page. Never fails past this boundary: errors end up in
    /// the status and in the returned outcome.
    pub async fn load(&self, query: &TransactionQuery) -> LoadOutcome {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);
        self.set_status(LoadStatus::Loading);
        debug!("loading transactions (request #{ticket}): {query:?}");

        let result = self.api.list_transactions(query).await;

        if ticket != self.latest_ticket.get() {
            debug!(
                "discarding stale transactions response #{ticket}, latest is #{}",
                self.latest_ticket.get()
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(page) => {
                let patch = PaginationPatch::from(&page);
                debug!(
                    "loaded {} transactions (page {} of {}, total {})",
                    page.items.len(),
                    page.page,
                    page.pages,
                    page.total
                );
                *self.transactions.borrow_mut() = page.items;
                self.set_status(LoadStatus::Loaded);
                LoadOutcome::Loaded(patch)
            }
            Err(err) => {
                warn!("failed to load transactions: {err}");
                self.set_status(LoadStatus::Errored(err.to_string()));
                LoadOutcome::Failed(err)
            }
        }
    }

    fn set_status(&self, status: LoadStatus) {
        *self.status.borrow_mut() = status;
        (self.listener)();
    }
}
