use yew::prelude::*;
use shared::{Transaction, TransactionType};

use crate::services::format::{format_brl, format_date_br};

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub error: Option<String>,
    /// Disables row actions while a create/update/delete is running
    pub saving: bool,
    pub on_edit: Callback<Transaction>,
    pub on_delete: Callback<String>,
    pub on_retry: Callback<()>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    let error_banner = if let Some(message) = props.error.as_ref() {
        let on_retry = props.on_retry.clone();
        html! {
            <div class="form-message error">
                {message}
                <button class="btn btn-link" onclick={Callback::from(move |_: MouseEvent| on_retry.emit(()))}>
                    {"Tentar novamente"}
                </button>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <section class="transactions-section">
            {error_banner}

            {if props.loading && props.transactions.is_empty() {
                html! { <div class="loading">{"Carregando transações..."}</div> }
            } else if props.transactions.is_empty() {
                html! { <div class="empty">{"Nenhuma transação encontrada"}</div> }
            } else {
                html! {
                    <div class={classes!("table-container", props.loading.then_some("refreshing"))}>
                        <table class="transactions-table">
                            <thead>
                                <tr>
                                    <th>{"Data"}</th>
                                    <th>{"Descrição"}</th>
                                    <th>{"Categoria"}</th>
                                    <th>{"Valor"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.transactions.iter().map(|transaction| {
                                    let (amount_class, sign) = match transaction.transaction_type {
                                        TransactionType::Income => ("amount positive", ""),
                                        TransactionType::Expense => ("amount negative", "-"),
                                    };

                                    let on_edit = {
                                        let on_edit = props.on_edit.clone();
                                        let transaction = transaction.clone();
                                        Callback::from(move |_: MouseEvent| on_edit.emit(transaction.clone()))
                                    };

                                    let on_delete = {
                                        let on_delete = props.on_delete.clone();
                                        let id = transaction.id.clone();
                                        let description = transaction.description.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            let question = format!("Excluir a transação \"{description}\"?");
                                            if gloo::dialogs::confirm(&question) {
                                                on_delete.emit(id.clone());
                                            }
                                        })
                                    };

                                    html! {
                                        <tr key={transaction.id.clone()}>
                                            <td class="date">{format_date_br(transaction.transaction_date)}</td>
                                            <td class="description">
                                                {&transaction.description}
                                                {if let Some(notes) = transaction.notes.as_ref() {
                                                    html! { <span class="notes">{notes}</span> }
                                                } else { html! {} }}
                                            </td>
                                            <td class="category">{transaction.display_category().unwrap_or("-")}</td>
                                            <td class={amount_class}>
                                                {format!("{sign}{}", format_brl(transaction.amount))}
                                            </td>
                                            <td class="actions">
                                                <button class="btn btn-icon" title="Editar" onclick={on_edit} disabled={props.saving}>
                                                    <i class="fas fa-pen"></i>
                                                </button>
                                                <button class="btn btn-icon danger" title="Excluir" onclick={on_delete} disabled={props.saving}>
                                                    <i class="fas fa-trash"></i>
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
