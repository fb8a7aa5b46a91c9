use log::{debug, warn};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::api::TransactionApi;
use crate::error::ApiError;
use crate::models::{Transaction, TransactionCreate, TransactionUpdate};
use crate::ChangeListener;

/// Single-request mutations of one transaction.
///
/// Each call performs exactly one request and reports failure through its
/// `Result`. Reloading the list afterwards is the orchestrator's job.
pub struct TransactionCrud<A: TransactionApi> {
    api: Rc<A>,
    in_flight: Cell<usize>,
    listener: ChangeListener,
}

impl<A: TransactionApi> TransactionCrud<A> {
    pub fn new(api: Rc<A>, listener: ChangeListener) -> Self {
        Self {
            api,
            in_flight: Cell::new(0),
            listener,
        }
    }

    /// True while any mutation is waiting for the backend
    pub fn saving(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub async fn create(&self, data: &TransactionCreate) -> Result<Transaction, ApiError> {
        debug!("creating transaction '{}'", data.description);
        self.track("create", self.api.create_transaction(data)).await
    }

    pub async fn update(
        &self,
        id: &str,
        data: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        debug!("updating transaction {id}");
        self.track("update", self.api.update_transaction(id, data)).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        debug!("deleting transaction {id}");
        self.track("delete", self.api.delete_transaction(id)).await
    }

    async fn track<T>(
        &self,
        operation: &str,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        self.in_flight.set(self.in_flight.get() + 1);
        (self.listener)();

        let result = request.await;

        self.in_flight.set(self.in_flight.get().saturating_sub(1));
        (self.listener)();

        if let Err(err) = &result {
            warn!("transaction {operation} failed: {err}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::test_utils::{sample_create, MockApi, Mutation};

    #[tokio::test]
    async fn test_create_performs_one_request_and_no_list_reload() {
        let api = Rc::new(MockApi::new());
        let crud = TransactionCrud::new(api.clone(), Rc::new(|| {}));

        let created = crud.create(&sample_create(TransactionType::Expense)).await.unwrap();

        assert_eq!(created.description, "Mercado");
        assert_eq!(api.mutations(), vec![Mutation::Create("Mercado".to_string())]);
        assert!(api.list_calls().is_empty());
        assert!(!crud.saving());
    }

    #[tokio::test]
    async fn test_failure_is_returned_not_panicked() {
        let api = Rc::new(MockApi::new());
        api.fail_mutations_with(ApiError::Http {
            status: 404,
            message: "Transação não encontrada".to_string(),
        });
        let crud = TransactionCrud::new(api.clone(), Rc::new(|| {}));

        let err = crud.delete("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Transação não encontrada");
        assert_eq!(api.mutations(), vec![Mutation::Delete("missing".to_string())]);
        assert!(!crud.saving());
    }

    #[tokio::test]
    async fn test_saving_flag_during_request() {
        let api = Rc::new(MockApi::new());
        let gate = api.gate_next_mutation();
        let crud = TransactionCrud::new(api.clone(), Rc::new(|| {}));

        let update = TransactionUpdate {
            description: Some("Feira".to_string()),
            ..TransactionUpdate::default()
        };
        let (result, _) = tokio::join!(crud.update("t1", &update), async {
            assert!(crud.saving());
            let _ = gate.send(());
        });

        assert!(result.is_ok());
        assert!(!crud.saving());
    }
}
