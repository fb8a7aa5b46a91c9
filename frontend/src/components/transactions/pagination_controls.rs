use shared::PaginationState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub pagination: PaginationState,
    pub loading: bool,
    pub on_change_page: Callback<u32>,
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    let state = &props.pagination;
    if state.total_pages <= 1 && state.current_page <= 1 {
        return html! {
            <div class="pagination-summary">{format!("{} transação(ões)", state.total_items)}</div>
        };
    }

    let go_to = |page: u32| {
        let on_change_page = props.on_change_page.clone();
        Callback::from(move |_: MouseEvent| on_change_page.emit(page))
    };

    html! {
        <nav class="pagination-controls">
            <button
                class="btn btn-secondary"
                onclick={go_to(state.current_page.saturating_sub(1).max(1))}
                disabled={!state.has_previous || props.loading}
            >
                {"Anterior"}
            </button>
            <span class="pagination-summary">
                {format!(
                    "Página {} de {} ({} transações)",
                    state.current_page,
                    state.total_pages.max(1),
                    state.total_items
                )}
            </span>
            <button
                class="btn btn-secondary"
                onclick={go_to(state.current_page + 1)}
                disabled={!state.has_next || props.loading}
            >
                {"Próxima"}
            </button>
        </nav>
    }
}
