use std::rc::Rc;

use shared::Transaction;
use yew::prelude::*;

use super::filter_panel::FilterPanel;
use super::pagination_controls::PaginationControls;
use super::transaction_form::TransactionForm;
use super::transaction_table::TransactionTable;
use crate::hooks::{use_categories, use_transactions, CrudFeedback};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransactionViewContainerProps {
    pub api_client: Rc<ApiClient>,
    pub page_size: u32,
    pub on_logout: Callback<()>,
}

#[derive(Clone, PartialEq, Debug)]
enum FormMode {
    Hidden,
    Create,
    Edit(Transaction),
}

/// The transactions page: filters, list, pagination and the create/edit form
#[function_component(TransactionViewContainer)]
pub fn transaction_view_container(props: &TransactionViewContainerProps) -> Html {
    let transactions = use_transactions(&props.api_client, props.page_size);
    let categories = use_categories(&props.api_client);
    let form_mode = use_state(|| FormMode::Hidden);

    let view = &transactions.view;
    let actions = &transactions.actions;
    log::trace!(
        "rendering {} transactions, status {:?}",
        view.transactions.len(),
        view.status
    );

    let open_create = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: MouseEvent| form_mode.set(FormMode::Create))
    };
    let open_edit = {
        let form_mode = form_mode.clone();
        Callback::from(move |tx: Transaction| form_mode.set(FormMode::Edit(tx)))
    };
    let close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_: ()| form_mode.set(FormMode::Hidden))
    };
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    let form = match &*form_mode {
        FormMode::Hidden => html! {},
        mode => {
            let editing = match mode {
                FormMode::Edit(tx) => Some(tx.clone()),
                _ => None,
            };
            // Keyed so switching between transactions starts a fresh form
            let key = editing.as_ref().map(|tx| tx.id.clone()).unwrap_or_else(|| "new".to_string());
            html! {
                <TransactionForm
                    key={key}
                    editing={editing}
                    categories={categories.clone()}
                    saving={view.saving}
                    on_create={actions.create.clone()}
                    on_update={actions.update.clone()}
                    on_close={close_form}
                />
            }
        }
    };

    let feedback = match transactions.feedback.as_ref() {
        Some(feedback) => {
            let (class, message) = match feedback {
                CrudFeedback::Success(message) => ("form-message success", message),
                CrudFeedback::Error(message) => ("form-message error", message),
            };
            let dismiss = actions.dismiss_feedback.clone();
            html! {
                <div class={class} onclick={Callback::from(move |_: MouseEvent| dismiss.emit(()))}>
                    {message}
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <div class="transaction-view-container">
            <div class="transaction-view-header">
                <h2>{"Transações"}</h2>
                <div class="view-toggle-buttons">
                    <button class="btn btn-primary" onclick={open_create} disabled={view.saving}>
                        <i class="fas fa-plus"></i>
                        <span class="btn-label">{"Nova transação"}</span>
                    </button>
                    <button class="btn btn-secondary" onclick={on_logout}>
                        <i class="fas fa-sign-out-alt"></i>
                        <span class="btn-label">{"Sair"}</span>
                    </button>
                </div>
            </div>

            {feedback}
            {form}

            <FilterPanel
                criteria={view.criteria.clone()}
                categories={categories.clone()}
                has_active_filters={view.has_active_filters}
                active_filters_count={view.active_filters_count}
                validation_error={view.validation_error.as_ref().map(|e| e.to_string())}
                loading={view.status.is_loading()}
                on_change={actions.update_filters.clone()}
                on_apply={actions.apply_filters.clone()}
                on_clear={actions.clear_filters.clone()}
            />

            <TransactionTable
                transactions={view.transactions.clone()}
                loading={view.status.is_loading()}
                error={view.status.error().map(str::to_string)}
                saving={view.saving}
                on_edit={open_edit}
                on_delete={actions.delete.clone()}
                on_retry={actions.refresh.clone()}
            />

            <PaginationControls
                pagination={view.pagination.clone()}
                loading={view.status.is_loading()}
                on_change_page={actions.change_page.clone()}
            />
        </div>
    }
}
