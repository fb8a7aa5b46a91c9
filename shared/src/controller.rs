//! # Transactions Controller
//!
//! The single entry point the transactions page calls. It owns the filter and
//! pagination stores, the list loader and the CRUD operations, and is the only
//! place that touches more than one of them in one operation.
//!
//! ## Flow:
//! - Editing filters only updates the filter store
//! - Applying validates, resets to page 1 and loads
//! - Every successful load writes its pagination metadata back
//! - A successful mutation reloads the page that was current when it started
//!
//! Failures are kept as visible state for the UI; nothing is retried.

use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::TransactionApi;
use crate::crud::TransactionCrud;
use crate::error::ApiError;
use crate::filters::{FilterCriteria, FilterPatch, FilterStore};
use crate::loader::{LoadOutcome, LoadStatus, TransactionListLoader};
use crate::models::{Transaction, TransactionCreate, TransactionUpdate};
use crate::pagination::{PaginationState, PaginationStore};
use crate::query::TransactionQuery;
use crate::validation::{validate_filters, FilterValidationError};
use crate::ChangeListener;

/// Everything the transactions page renders, captured at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsView {
    pub criteria: FilterCriteria,
    pub pagination: PaginationState,
    pub transactions: Vec<Transaction>,
    pub status: LoadStatus,
    pub validation_error: Option<FilterValidationError>,
    pub has_active_filters: bool,
    pub active_filters_count: usize,
    pub saving: bool,
}

pub struct TransactionsController<A: TransactionApi> {
    filters: RefCell<FilterStore>,
    pagination: RefCell<PaginationStore>,
    loader: TransactionListLoader<A>,
    crud: TransactionCrud<A>,
    validation_error: RefCell<Option<FilterValidationError>>,
    initial_load_started: Cell<bool>,
    listener: ChangeListener,
}

impl<A: TransactionApi> TransactionsController<A> {
    /// `listener` runs after every state change
    pub fn new(api: Rc<A>, page_size: u32, listener: impl Fn() + 'static) -> Self {
        let listener: ChangeListener = Rc::new(listener);
        Self {
            filters: RefCell::new(FilterStore::new()),
            pagination: RefCell::new(PaginationStore::new(page_size)),
            loader: TransactionListLoader::new(api.clone(), listener.clone()),
            crud: TransactionCrud::new(api, listener.clone()),
            validation_error: RefCell::new(None),
            initial_load_started: Cell::new(false),
            listener,
        }
    }

    pub fn snapshot(&self) -> TransactionsView {
        let filters = self.filters.borrow();
        TransactionsView {
            criteria: filters.criteria().clone(),
            pagination: self.pagination.borrow().state().clone(),
            transactions: self.loader.transactions().clone(),
            status: self.loader.status(),
            validation_error: self.validation_error.borrow().clone(),
            has_active_filters: filters.has_active_filters(),
            active_filters_count: filters.active_filters_count(),
            saving: self.crud.saving(),
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.filters.borrow().criteria().clone()
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination.borrow().state().clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.loader.transactions().clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.loader.status()
    }

    /// Edit the criteria without loading anything
    pub fn update_filters(&self, patch: FilterPatch) {
        self.filters.borrow_mut().update(patch);
        self.validation_error.replace(None);
        self.notify();
    }

    /// First load on mount: page 1, default filters. Later calls do nothing.
    pub async fn load_initial(&self) {
        if self.initial_load_started.replace(true) {
            return;
        }
        info!("initial transactions load");
        let query = TransactionQuery::unfiltered(1, self.page_size());
        self.load(query).await;
    }

    /// Validate the current criteria and load their first page.
    ///
    /// Invalid criteria issue no request and leave pagination and the
    /// loaded transactions as they were; the criteria themselves are kept
    /// so the user can fix them.
    pub async fn apply_filters(&self) -> Result<(), FilterValidationError> {
        let criteria = self.criteria();
        if let Err(err) = validate_filters(&criteria) {
            debug!("filters rejected: {err}");
            self.validation_error.replace(Some(err.clone()));
            self.notify();
            return Err(err);
        }

        self.validation_error.replace(None);
        self.pagination.borrow_mut().go_to_page(1);
        self.notify();

        let query = criteria.to_query(1, self.page_size());
        self.load(query).await;
        Ok(())
    }

    /// Load page `page` with the current criteria. Out-of-range pages are
    /// left for the backend to answer.
    pub async fn change_page(&self, page: u32) {
        self.pagination.borrow_mut().go_to_page(page);
        self.notify();
        self.load_page(self.current_page()).await;
    }

    /// Reset criteria and pagination, then load the unfiltered first page
    pub async fn clear_filters(&self) {
        self.filters.borrow_mut().clear();
        self.pagination.borrow_mut().reset();
        self.validation_error.replace(None);
        self.notify();

        let query = TransactionQuery::unfiltered(1, self.page_size());
        self.load(query).await;
    }

    /// Reload the current page with the current criteria
    pub async fn refresh(&self) {
        self.load_page(self.current_page()).await;
    }

    pub async fn create_transaction(
        &self,
        data: &TransactionCreate,
    ) -> Result<Transaction, ApiError> {
        let page = self.current_page();
        let created = self.crud.create(data).await?;
        info!("transaction {} created", created.id);
        self.load_page(page).await;
        Ok(created)
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        data: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        let page = self.current_page();
        let updated = self.crud.update(id, data).await?;
        info!("transaction {id} updated");
        self.load_page(page).await;
        Ok(updated)
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        let page = self.current_page();
        self.crud.delete(id).await?;
        info!("transaction {id} deleted");
        self.load_page(page).await;
        Ok(())
    }

    fn current_page(&self) -> u32 {
        self.pagination.borrow().current_page()
    }

    fn page_size(&self) -> u32 {
        self.pagination.borrow().page_size()
    }

    async fn load_page(&self, page: u32) {
        let query = self.criteria().to_query(page, self.page_size());
        self.load(query).await;
    }

    async fn load(&self, query: TransactionQuery) {
        if let LoadOutcome::Loaded(patch) = self.loader.load(&query).await {
            self.pagination.borrow_mut().update(patch);
            self.notify();
        }
    }

    fn notify(&self) {
        (self.listener)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AmountBound, AmountRange, CategoryFilter, TypeFilter};
    use crate::models::{PaginatedResponse, TransactionType};
    use crate::test_utils::{page_of, sample_create, sample_transaction, MockApi, Mutation};
    use rust_decimal::Decimal;

    fn controller(api: &Rc<MockApi>) -> TransactionsController<MockApi> {
        TransactionsController::new(api.clone(), 20, || {})
    }

    fn tx(id: &str) -> Transaction {
        sample_transaction(id, TransactionType::Expense, Decimal::from(10))
    }

    /// Bring the controller to `page` of a 3-page result set
    async fn settle_on_page(
        controller: &TransactionsController<MockApi>,
        api: &MockApi,
        page: u32,
    ) {
        api.push_list_result(Ok(page_of(vec![tx(&format!("p{page}"))], page, 3, 45)));
        controller.change_page(page).await;
    }

    #[tokio::test]
    async fn test_initial_load_uses_default_query_once() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);

        controller.load_initial().await;
        controller.load_initial().await;

        assert_eq!(api.list_calls(), vec![TransactionQuery::unfiltered(1, 20)]);
        let pairs = api.list_calls()[0].to_query_pairs();
        assert_eq!(pairs.len(), 4);
        assert_eq!(controller.status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn test_apply_type_filter_updates_pagination_from_response() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        api.push_list_result(Ok(PaginatedResponse {
            items: vec![tx("a")],
            total: 7,
            page: 1,
            size: 20,
            pages: 1,
            has_next: false,
            has_previous: false,
        }));

        controller.update_filters(FilterPatch::transaction_type(TypeFilter::Expense));
        controller.apply_filters().await.unwrap();

        let query = &api.list_calls()[0];
        assert_eq!(query.transaction_type, Some(TransactionType::Expense));
        assert_eq!(query.page, 1);
        assert_eq!(
            controller.pagination(),
            PaginationState {
                current_page: 1,
                page_size: 20,
                total_items: 7,
                total_pages: 1,
                has_next: false,
                has_previous: false,
            }
        );
    }

    #[tokio::test]
    async fn test_apply_filters_always_starts_at_page_one() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        settle_on_page(&controller, &api, 3).await;

        controller.update_filters(FilterPatch::search("aluguel"));
        controller.apply_filters().await.unwrap();

        let last = api.list_calls().last().cloned().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.search.as_deref(), Some("aluguel"));
        assert_eq!(controller.pagination().current_page, 1);
    }

    #[tokio::test]
    async fn test_invalid_amount_range_issues_no_request() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        settle_on_page(&controller, &api, 2).await;
        let calls_before = api.list_calls().len();
        let pagination_before = controller.pagination();
        let transactions_before = controller.transactions();

        controller.update_filters(FilterPatch::amount_range(
            Some(Decimal::from(100)),
            Some(Decimal::from(50)),
        ));
        let err = controller.apply_filters().await.unwrap_err();

        assert_eq!(err.to_string(), "valor mínimo não pode ser maior que o máximo");
        assert_eq!(api.list_calls().len(), calls_before);
        assert_eq!(controller.pagination(), pagination_before);
        assert_eq!(controller.transactions(), transactions_before);
        assert_eq!(
            controller.criteria().amount_range,
            AmountRange::new(Some(Decimal::from(100)), Some(Decimal::from(50)))
        );
        assert_eq!(
            controller.snapshot().validation_error,
            Some(FilterValidationError::MinGreaterThanMax)
        );
    }

    #[tokio::test]
    async fn test_unreadable_amount_bound_issues_no_request() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        controller.load_initial().await;
        let calls_before = api.list_calls().len();

        controller.update_filters(FilterPatch::amount_bounds(
            AmountBound::parse("abc"),
            AmountBound::parse("50"),
        ));
        let err = controller.apply_filters().await.unwrap_err();

        assert_eq!(err, FilterValidationError::InvalidMinAmount);
        assert_eq!(api.list_calls().len(), calls_before);
        assert_eq!(
            controller.criteria().amount_range.min,
            AmountBound::Invalid("abc".to_string())
        );
        assert_eq!(
            controller.snapshot().validation_error,
            Some(FilterValidationError::InvalidMinAmount)
        );
    }

    #[tokio::test]
    async fn test_editing_filters_clears_validation_message() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        controller.update_filters(FilterPatch::search("x"));
        assert!(controller.apply_filters().await.is_err());

        controller.update_filters(FilterPatch::search("xy"));
        assert_eq!(controller.snapshot().validation_error, None);
    }

    #[tokio::test]
    async fn test_change_page_keeps_criteria() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        controller.update_filters(FilterPatch::category(CategoryFilter::Id("c1".to_string())));
        let before = controller.criteria();

        controller.change_page(2).await;

        assert_eq!(controller.criteria(), before);
        let query = api.list_calls().last().cloned().unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.category_id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_clear_filters_from_filtered_page() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        controller.update_filters(FilterPatch::transaction_type(TypeFilter::Income));
        settle_on_page(&controller, &api, 3).await;

        controller.clear_filters().await;

        assert_eq!(controller.criteria(), FilterCriteria::default());
        assert_eq!(controller.pagination().current_page, 1);
        assert_eq!(api.list_calls().last().cloned().unwrap(), TransactionQuery::unfiltered(1, 20));
        assert!(!controller.snapshot().has_active_filters);
    }

    #[tokio::test]
    async fn test_refresh_reissues_current_page() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        settle_on_page(&controller, &api, 2).await;

        controller.refresh().await;

        assert_eq!(api.list_calls().last().unwrap().page, 2);
    }

    #[tokio::test]
    async fn test_successful_delete_reloads_current_page_once() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        settle_on_page(&controller, &api, 2).await;
        let calls_before = api.list_calls().len();

        controller.delete_transaction("p2").await.unwrap();

        let calls = api.list_calls();
        assert_eq!(calls.len(), calls_before + 1);
        assert_eq!(calls.last().unwrap().page, 2);
        assert_eq!(api.mutations(), vec![Mutation::Delete("p2".to_string())]);
    }

    #[tokio::test]
    async fn test_successful_create_and_update_reload_once_each() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        controller.load_initial().await;

        controller.create_transaction(&sample_create(TransactionType::Income)).await.unwrap();
        let update = TransactionUpdate {
            notes: Some("ok".to_string()),
            ..TransactionUpdate::default()
        };
        controller.update_transaction("created", &update).await.unwrap();

        assert_eq!(api.list_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_reload_targets_page_active_when_mutation_started() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        settle_on_page(&controller, &api, 2).await;
        let gate = api.gate_next_mutation();

        let (result, _) = tokio::join!(controller.delete_transaction("p2"), async {
            // User moves on while the delete is still in flight
            controller.change_page(3).await;
            let _ = gate.send(());
        });

        assert!(result.is_ok());
        assert_eq!(api.list_calls().last().unwrap().page, 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_reload() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        api.push_list_result(Ok(page_of(vec![tx("keep")], 1, 1, 1)));
        controller.load_initial().await;
        api.fail_mutations_with(ApiError::Unauthorized("Sessão expirada".to_string()));

        let err = controller.delete_transaction("keep").await.unwrap_err();

        assert!(err.is_auth_error());
        assert_eq!(api.list_calls().len(), 1);
        assert_eq!(controller.transactions(), vec![tx("keep")]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_loaded_transactions() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        api.push_list_result(Ok(page_of(vec![tx("good")], 1, 1, 1)));
        controller.load_initial().await;
        api.push_list_result(Err(ApiError::Http {
            status: 500,
            message: "Erro interno do servidor.".to_string(),
        }));

        controller.refresh().await;

        assert_eq!(controller.transactions(), vec![tx("good")]);
        assert_eq!(
            controller.status(),
            LoadStatus::Errored("Erro interno do servidor.".to_string())
        );
        assert_eq!(controller.pagination().total_items, 1);
    }

    #[tokio::test]
    async fn test_latest_request_wins_between_apply_and_page_change() {
        let api = Rc::new(MockApi::new());
        let controller = controller(&api);
        let apply_gate = api.gate_next_list();
        let page_gate = api.gate_next_list();

        let (applied, _, _) = tokio::join!(
            controller.apply_filters(),
            controller.change_page(2),
            async {
                let _ = page_gate.send(Ok(page_of(vec![tx("page-2")], 2, 2, 25)));
                tokio::task::yield_now().await;
                let _ = apply_gate.send(Ok(page_of(vec![tx("page-1")], 1, 2, 25)));
            }
        );

        assert!(applied.is_ok());
        assert_eq!(controller.transactions(), vec![tx("page-2")]);
        assert_eq!(controller.pagination().current_page, 2);
    }

    #[tokio::test]
    async fn test_listener_is_called_on_changes() {
        let api = Rc::new(MockApi::new());
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let controller =
            TransactionsController::new(api, 20, move || counter.set(counter.get() + 1));

        controller.update_filters(FilterPatch::search("luz"));
        assert_eq!(count.get(), 1);

        controller.apply_filters().await.unwrap();
        assert!(count.get() > 1);
    }
}
