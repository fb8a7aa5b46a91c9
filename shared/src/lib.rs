//! Core of the MeuFuturo web client: wire models of the backend API and the
//! transaction list / filter / pagination / CRUD coordination, independent of
//! any UI toolkit.

use std::rc::Rc;

pub mod api;
pub mod config;
pub mod controller;
pub mod crud;
pub mod error;
pub mod events;
pub mod filters;
pub mod loader;
pub mod models;
pub mod pagination;
pub mod query;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use api::TransactionApi;
pub use config::ClientConfig;
pub use controller::{TransactionsController, TransactionsView};
pub use error::ApiError;
pub use events::{AuthEvent, AuthEvents, Subscription};
pub use filters::{
    parse_amount, AmountBound, AmountRange, CategoryFilter, DateRange, FilterCriteria,
    FilterPatch, FilterStore, SortBy, SortOrder, TypeFilter,
};
pub use loader::{LoadOutcome, LoadStatus, TransactionListLoader};
pub use models::*;
pub use pagination::{PaginationPatch, PaginationState, PaginationStore};
pub use query::TransactionQuery;
pub use validation::{validate_filters, FilterValidationError};

/// Callback run after a store changes, so the view can re-render
pub type ChangeListener = Rc<dyn Fn()>;
