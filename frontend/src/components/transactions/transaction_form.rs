use std::rc::Rc;

use rust_decimal::Decimal;
use shared::{
    parse_amount, Category, Transaction, TransactionCreate, TransactionType, TransactionUpdate,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::format::{date_input_value, parse_date_input, today};

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    /// Transaction being edited; `None` creates a new one
    pub editing: Option<Transaction>,
    pub categories: Rc<Vec<Category>>,
    pub saving: bool,
    pub on_create: Callback<(TransactionCreate, Callback<()>)>,
    pub on_update: Callback<(String, TransactionUpdate, Callback<()>)>,
    /// Closes the form; also run after a successful save
    pub on_close: Callback<()>,
}

/// Raw field values as typed by the user
#[derive(Clone, PartialEq)]
struct FormFields {
    transaction_type: TransactionType,
    amount: String,
    description: String,
    date: String,
    notes: String,
    category_id: String,
}

impl FormFields {
    fn new(editing: Option<&Transaction>) -> Self {
        match editing {
            Some(tx) => Self {
                transaction_type: tx.transaction_type,
                amount: tx.amount.normalize().to_string(),
                description: tx.description.clone(),
                date: date_input_value(Some(tx.transaction_date)),
                notes: tx.notes.clone().unwrap_or_default(),
                category_id: tx.category_id.clone().unwrap_or_default(),
            },
            None => Self {
                transaction_type: TransactionType::Expense,
                amount: String::new(),
                description: String::new(),
                date: date_input_value(Some(today())),
                notes: String::new(),
                category_id: String::new(),
            },
        }
    }

    /// Turn the typed values into a request body, or a message for the user
    fn to_create(&self) -> Result<TransactionCreate, String> {
        let amount = parse_amount(&self.amount)
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| "Informe um valor maior que zero".to_string())?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Informe uma descrição".to_string());
        }
        let transaction_date =
            parse_date_input(&self.date).ok_or_else(|| "Informe uma data válida".to_string())?;

        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(TransactionCreate {
            transaction_type: self.transaction_type,
            amount,
            description: description.to_string(),
            transaction_date,
            notes: optional(&self.notes),
            category_id: optional(&self.category_id),
        })
    }
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let fields = {
        let editing = props.editing.clone();
        use_state(move || FormFields::new(editing.as_ref()))
    };
    let error = use_state(|| None::<String>);

    // One setter per field, all clearing the error message
    let edit = |apply: fn(&mut FormFields, String)| {
        let fields = fields.clone();
        let error = error.clone();
        move |value: String| {
            let mut next = (*fields).clone();
            apply(&mut next, value);
            fields.set(next);
            error.set(None);
        }
    };

    let on_type = {
        let set = edit(|f, v| {
            f.transaction_type = match v.as_str() {
                "income" => TransactionType::Income,
                _ => TransactionType::Expense,
            }
        });
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set(select.value());
        })
    };
    let on_category = {
        let set = edit(|f, v| f.category_id = v);
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set(select.value());
        })
    };
    let input_callback = |set: Box<dyn Fn(String)>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set(input.value());
        })
    };
    let on_amount = input_callback(Box::new(edit(|f, v| f.amount = v)));
    let on_description = input_callback(Box::new(edit(|f, v| f.description = v)));
    let on_date = input_callback(Box::new(edit(|f, v| f.date = v)));
    let on_notes = input_callback(Box::new(edit(|f, v| f.notes = v)));

    let on_submit = {
        let fields = fields.clone();
        let error = error.clone();
        let editing_id = props.editing.as_ref().map(|tx| tx.id.clone());
        let on_create = props.on_create.clone();
        let on_update = props.on_update.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match fields.to_create() {
                Ok(data) => match editing_id.clone() {
                    Some(id) => {
                        on_update.emit((id, TransactionUpdate::from(data), on_close.clone()))
                    }
                    None => on_create.emit((data, on_close.clone())),
                },
                Err(message) => error.set(Some(message)),
            }
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let title = if props.editing.is_some() { "Editar transação" } else { "Nova transação" };

    html! {
        <section class="transaction-form-section">
            <h3>{title}</h3>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            <form class="transaction-form" onsubmit={on_submit}>
                <div class="form-row">
                    <div class="form-group">
                        <label for="tx-type">{"Tipo"}</label>
                        <select id="tx-type" onchange={on_type} disabled={props.saving}>
                            {for [TransactionType::Expense, TransactionType::Income].into_iter().map(|t| html! {
                                <option value={t.as_str()} selected={fields.transaction_type == t}>{t.label()}</option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="tx-amount">{"Valor (R$)"}</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="tx-amount"
                            placeholder="0,00"
                            value={fields.amount.clone()}
                            onchange={on_amount}
                            disabled={props.saving}
                        />
                    </div>
                    <div class="form-group">
                        <label for="tx-date">{"Data"}</label>
                        <input
                            type="date"
                            id="tx-date"
                            value={fields.date.clone()}
                            onchange={on_date}
                            disabled={props.saving}
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="tx-description">{"Descrição"}</label>
                    <input
                        type="text"
                        id="tx-description"
                        maxlength="500"
                        value={fields.description.clone()}
                        onchange={on_description}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-group">
                    <label for="tx-category">{"Categoria"}</label>
                    <select id="tx-category" onchange={on_category} disabled={props.saving}>
                        <option value="" selected={fields.category_id.is_empty()}>{"Sem categoria"}</option>
                        {for Category::flatten(&props.categories).into_iter().map(|category| html! {
                            <option value={category.id.clone()} selected={fields.category_id == category.id}>
                                {category.label()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="tx-notes">{"Observações"}</label>
                    <input
                        type="text"
                        id="tx-notes"
                        maxlength="1000"
                        value={fields.notes.clone()}
                        onchange={on_notes}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={props.saving}>
                        {if props.saving { "Salvando..." } else { "Salvar" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.saving}>
                        {"Cancelar"}
                    </button>
                </div>
            </form>
        </section>
    }
}
