use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::{
    FilterPatch, TransactionCreate, TransactionUpdate, TransactionsController, TransactionsView,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

const FEEDBACK_TIMEOUT_MS: u32 = 3000;

/// Result of the last create/update/delete, shown as a banner
#[derive(Debug, Clone, PartialEq)]
pub enum CrudFeedback {
    Success(String),
    Error(String),
}

pub struct UseTransactionsResult {
    pub view: TransactionsView,
    pub feedback: Option<CrudFeedback>,
    pub actions: UseTransactionsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTransactionsActions {
    pub update_filters: Callback<FilterPatch>,
    pub apply_filters: Callback<()>,
    pub clear_filters: Callback<()>,
    pub change_page: Callback<u32>,
    pub refresh: Callback<()>,
    /// The inner callback runs once the transaction was saved
    pub create: Callback<(TransactionCreate, Callback<()>)>,
    pub update: Callback<(String, TransactionUpdate, Callback<()>)>,
    pub delete: Callback<String>,
    pub dismiss_feedback: Callback<()>,
}

/// Counts shown messages so an expiring timer only hides its own message
#[derive(Debug, Default)]
struct FeedbackGeneration(Cell<u64>);

impl FeedbackGeneration {
    fn next(&self) -> u64 {
        let generation = self.0.get() + 1;
        self.0.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}

/// Show a feedback message and hide it again after a few seconds
fn flash(
    feedback: &UseStateHandle<Option<CrudFeedback>>,
    generations: &Rc<FeedbackGeneration>,
    message: CrudFeedback,
) {
    feedback.set(Some(message));
    let generation = generations.next();
    let feedback = feedback.clone();
    let generations = generations.clone();
    spawn_local(async move {
        TimeoutFuture::new(FEEDBACK_TIMEOUT_MS).await;
        if generations.is_current(generation) {
            feedback.set(None);
        }
    });
}

#[hook]
pub fn use_transactions(api_client: &Rc<ApiClient>, page_size: u32) -> UseTransactionsResult {
    let rerender = use_force_update();
    let feedback = use_state(|| None::<CrudFeedback>);
    let generations = use_memo((), |_| FeedbackGeneration::default());

    // One controller per mount; every state change inside it re-renders us
    let controller = {
        let api_client = api_client.clone();
        use_memo((), move |_| {
            TransactionsController::new(api_client, page_size, move || rerender.force_update())
        })
    };

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                controller.load_initial().await;
            });
            || ()
        });
    }

    let update_filters = {
        let controller = controller.clone();
        use_callback((), move |patch: FilterPatch, _| {
            controller.update_filters(patch);
        })
    };

    let apply_filters = {
        let controller = controller.clone();
        use_callback((), move |_, _| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(e) = controller.apply_filters().await {
                    log::debug!("filters rejected: {e}");
                }
            });
        })
    };

    let clear_filters = {
        let controller = controller.clone();
        use_callback((), move |_, _| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.clear_filters().await;
            });
        })
    };

    let change_page = {
        let controller = controller.clone();
        use_callback((), move |page: u32, _| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.change_page(page).await;
            });
        })
    };

    let refresh = {
        let controller = controller.clone();
        use_callback((), move |_, _| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.refresh().await;
            });
        })
    };

    let create = {
        let controller = controller.clone();
        let feedback = feedback.clone();
        let generations = generations.clone();
        use_callback((), move |(data, on_saved): (TransactionCreate, Callback<()>), _| {
            let controller = controller.clone();
            let feedback = feedback.clone();
            let generations = generations.clone();
            spawn_local(async move {
                let message = match controller.create_transaction(&data).await {
                    Ok(_) => {
                        on_saved.emit(());
                        CrudFeedback::Success("Transação criada com sucesso".to_string())
                    }
                    Err(e) => CrudFeedback::Error(e.to_string()),
                };
                flash(&feedback, &generations, message);
            });
        })
    };

    let update = {
        let controller = controller.clone();
        let feedback = feedback.clone();
        let generations = generations.clone();
        use_callback(
            (),
            move |(id, data, on_saved): (String, TransactionUpdate, Callback<()>), _| {
                let controller = controller.clone();
                let feedback = feedback.clone();
                let generations = generations.clone();
                spawn_local(async move {
                    let message = match controller.update_transaction(&id, &data).await {
                        Ok(_) => {
                            on_saved.emit(());
                            CrudFeedback::Success("Transação atualizada".to_string())
                        }
                        Err(e) => CrudFeedback::Error(e.to_string()),
                    };
                    flash(&feedback, &generations, message);
                });
            },
        )
    };

    let delete = {
        let controller = controller.clone();
        let feedback = feedback.clone();
        let generations = generations.clone();
        use_callback((), move |id: String, _| {
            let controller = controller.clone();
            let feedback = feedback.clone();
            let generations = generations.clone();
            spawn_local(async move {
                let message = match controller.delete_transaction(&id).await {
                    Ok(()) => CrudFeedback::Success("Transação excluída".to_string()),
                    Err(e) => CrudFeedback::Error(e.to_string()),
                };
                flash(&feedback, &generations, message);
            });
        })
    };

    let dismiss_feedback = {
        let feedback = feedback.clone();
        use_callback((), move |_, _| feedback.set(None))
    };

    UseTransactionsResult {
        view: controller.snapshot(),
        feedback: (*feedback).clone(),
        actions: UseTransactionsActions {
            update_filters,
            apply_filters,
            clear_filters,
            change_page,
            refresh,
            create,
            update,
            delete,
            dismiss_feedback,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_timer_does_not_hide_newer_message() {
        let generations = FeedbackGeneration::default();
        let first = generations.next();
        let second = generations.next();

        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }
}
