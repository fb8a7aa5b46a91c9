use shared::{AuthEvents, ClientConfig};
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::{LoginForm, TransactionViewContainer};
use hooks::use_session;
use services::api::ApiClient;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: ClientConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let auth_events = use_memo((), |_| AuthEvents::new());
    let session = use_session(&auth_events);

    let api_client = {
        let config = props.config.clone();
        let session = (*session.session).clone();
        let auth_events = (*auth_events).clone();
        use_memo((), move |_| ApiClient::new(config, session, auth_events))
    };

    html! {
        <div class="app">
            <header class="header">
                <div class="container">
                    <h1>{"MeuFuturo"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    {if session.authenticated {
                        html! {
                            <TransactionViewContainer
                                api_client={api_client.clone()}
                                page_size={props.config.page_size}
                                on_logout={session.actions.log_out.clone()}
                            />
                        }
                    } else {
                        html! {
                            <LoginForm
                                api_client={api_client.clone()}
                                notice={session.notice.clone()}
                                on_logged_in={session.actions.log_in.clone()}
                            />
                        }
                    }}
                </div>
            </main>
        </div>
    }
}

fn main() {
    let config = config::load();
    services::logging::init(config.log_level_filter());
    log::info!("starting MeuFuturo client against {}", config.api_base_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
