use std::rc::Rc;

use shared::{
    AmountBound, Category, CategoryFilter, FilterCriteria, FilterPatch, SortBy, SortOrder,
    TypeFilter,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::format::{date_input_value, parse_date_input};

#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub criteria: FilterCriteria,
    pub categories: Rc<Vec<Category>>,
    pub has_active_filters: bool,
    pub active_filters_count: usize,
    pub validation_error: Option<String>,
    pub loading: bool,

    pub on_change: Callback<FilterPatch>,
    pub on_apply: Callback<()>,
    pub on_clear: Callback<()>,
}

fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

fn input_value(e: &Event) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let criteria = &props.criteria;

    let on_search = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(FilterPatch::search(input.value()));
        })
    };

    let on_type = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let value = TypeFilter::from_select_value(&select_value(&e));
            on_change.emit(FilterPatch::transaction_type(value));
        })
    };

    let on_category = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let value = CategoryFilter::from_select_value(&select_value(&e));
            on_change.emit(FilterPatch::category(value));
        })
    };

    // Range inputs patch the whole range, carrying the other end along
    let on_start_date = {
        let on_change = props.on_change.clone();
        let end = criteria.date_range.end;
        Callback::from(move |e: Event| {
            on_change.emit(FilterPatch::date_range(parse_date_input(&input_value(&e)), end));
        })
    };

    let on_end_date = {
        let on_change = props.on_change.clone();
        let start = criteria.date_range.start;
        Callback::from(move |e: Event| {
            on_change.emit(FilterPatch::date_range(start, parse_date_input(&input_value(&e))));
        })
    };

    // Unreadable amounts are kept as typed; applying reports them
    let on_min_amount = {
        let on_change = props.on_change.clone();
        let max = criteria.amount_range.max.clone();
        Callback::from(move |e: Event| {
            let min = AmountBound::parse(&input_value(&e));
            on_change.emit(FilterPatch::amount_bounds(min, max.clone()));
        })
    };

    let on_max_amount = {
        let on_change = props.on_change.clone();
        let min = criteria.amount_range.min.clone();
        Callback::from(move |e: Event| {
            let max = AmountBound::parse(&input_value(&e));
            on_change.emit(FilterPatch::amount_bounds(min.clone(), max));
        })
    };

    let on_sort_by = {
        let on_change = props.on_change.clone();
        let order = criteria.sort_order;
        Callback::from(move |e: Event| {
            on_change.emit(FilterPatch::sort(SortBy::from_select_value(&select_value(&e)), order));
        })
    };

    let on_sort_order = {
        let on_change = props.on_change.clone();
        let sort_by = criteria.sort_by;
        Callback::from(move |e: Event| {
            let order = SortOrder::from_select_value(&select_value(&e));
            on_change.emit(FilterPatch::sort(sort_by, order));
        })
    };

    let on_submit = {
        let on_apply = props.on_apply.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_apply.emit(());
        })
    };

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <section class="filter-panel">
            <div class="filter-panel-header">
                <h3>{"Filtros"}</h3>
                {if props.active_filters_count > 0 {
                    html! {
                        <span class="active-filters-badge">
                            {format!("{} ativo(s)", props.active_filters_count)}
                        </span>
                    }
                } else { html! {} }}
            </div>

            {if let Some(message) = props.validation_error.as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            <form class="filter-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="filter-search">{"Buscar"}</label>
                    <input
                        type="search"
                        id="filter-search"
                        placeholder="Descrição ou observações"
                        value={criteria.search.clone()}
                        oninput={on_search}
                    />
                </div>

                <div class="form-group">
                    <label for="filter-type">{"Tipo"}</label>
                    <select id="filter-type" onchange={on_type}>
                        {for [
                            (TypeFilter::All, "Todos"),
                            (TypeFilter::Income, "Receitas"),
                            (TypeFilter::Expense, "Despesas"),
                        ].into_iter().map(|(type_filter, label)| html! {
                            <option
                                value={type_filter.as_str()}
                                selected={criteria.transaction_type == type_filter}
                            >
                                {label}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="filter-category">{"Categoria"}</label>
                    <select id="filter-category" onchange={on_category}>
                        <option value="all" selected={criteria.category == CategoryFilter::All}>{"Todas"}</option>
                        {for Category::flatten(&props.categories).into_iter().map(|category| {
                            html! {
                                <option
                                    value={category.id.clone()}
                                    selected={criteria.category.id() == Some(category.id.as_str())}
                                >
                                    {category.label()}
                                </option>
                            }
                        })}
                    </select>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="filter-start">{"De"}</label>
                        <input
                            type="date"
                            id="filter-start"
                            value={date_input_value(criteria.date_range.start)}
                            onchange={on_start_date}
                        />
                    </div>
                    <div class="form-group">
                        <label for="filter-end">{"Até"}</label>
                        <input
                            type="date"
                            id="filter-end"
                            value={date_input_value(criteria.date_range.end)}
                            onchange={on_end_date}
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="filter-min">{"Valor mínimo"}</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="filter-min"
                            placeholder="0,00"
                            value={criteria.amount_range.min.input_text()}
                            onchange={on_min_amount}
                        />
                    </div>
                    <div class="form-group">
                        <label for="filter-max">{"Valor máximo"}</label>
                        <input
                            type="text"
                            inputmode="decimal"
                            id="filter-max"
                            placeholder="0,00"
                            value={criteria.amount_range.max.input_text()}
                            onchange={on_max_amount}
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="filter-sort-by">{"Ordenar por"}</label>
                        <select id="filter-sort-by" onchange={on_sort_by}>
                            {for [
                                (SortBy::TransactionDate, "Data"),
                                (SortBy::Amount, "Valor"),
                                (SortBy::Description, "Descrição"),
                                (SortBy::CreatedAt, "Criação"),
                            ].into_iter().map(|(sort_by, label)| html! {
                                <option value={sort_by.as_str()} selected={criteria.sort_by == sort_by}>{label}</option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="filter-sort-order">{"Ordem"}</label>
                        <select id="filter-sort-order" onchange={on_sort_order}>
                            <option value="desc" selected={criteria.sort_order == SortOrder::Desc}>{"Decrescente"}</option>
                            <option value="asc" selected={criteria.sort_order == SortOrder::Asc}>{"Crescente"}</option>
                        </select>
                    </div>
                </div>

                <div class="filter-actions">
                    <button type="submit" class="btn btn-primary" disabled={props.loading}>
                        {"Aplicar"}
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={on_clear}
                        disabled={!props.has_active_filters || props.loading}
                    >
                        {"Limpar filtros"}
                    </button>
                </div>
            </form>
        </section>
    }
}
