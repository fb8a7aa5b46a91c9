use std::rc::Rc;

use shared::Category;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Categories for the filter and form dropdowns, loaded once per mount.
/// A failed load leaves the list empty; the dropdown then only offers "all".
#[hook]
pub fn use_categories(api_client: &Rc<ApiClient>) -> Rc<Vec<Category>> {
    let categories = use_state(|| Rc::new(Vec::<Category>::new()));

    {
        let api_client = api_client.clone();
        let categories = categories.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.list_categories().await {
                    Ok(loaded) => {
                        log::debug!("loaded {} categories", loaded.len());
                        categories.set(Rc::new(loaded));
                    }
                    Err(e) => log::warn!("failed to load categories: {e}"),
                }
            });
            || ()
        });
    }

    (*categories).clone()
}
