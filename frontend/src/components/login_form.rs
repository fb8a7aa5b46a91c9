use std::rc::Rc;

use shared::TwoFactorVerify;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub api_client: Rc<ApiClient>,
    /// Shown above the form, e.g. when the previous session expired
    pub notice: Option<String>,
    /// Receives the access token after a successful login
    pub on_logged_in: Callback<String>,
}

/// Login stopped at the second factor
#[derive(Clone, PartialEq)]
struct PendingTwoFactor {
    user_id: String,
    message: String,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let code = use_state(String::new);
    let pending = use_state(|| None::<PendingTwoFactor>);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    let text_setter = |field: &UseStateHandle<String>| {
        let field = field.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value());
            error.set(None);
        })
    };
    let on_email_change = text_setter(&email);
    let on_password_change = text_setter(&password);
    let on_code_change = text_setter(&code);

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_logged_in = props.on_logged_in.clone();
        let email = email.clone();
        let password = password.clone();
        let pending = pending.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if email.trim().is_empty() || password.is_empty() {
                error.set(Some("Informe e-mail e senha".to_string()));
                return;
            }

            let api_client = api_client.clone();
            let on_logged_in = on_logged_in.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let pending = pending.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            spawn_local(async move {
                submitting.set(true);
                match api_client.login(&email, &password).await {
                    Ok(response) if response.requires_two_factor => {
                        match response.pending_two_factor() {
                            Some(user_id) => {
                                log::info!("login requires a verification code");
                                pending.set(Some(PendingTwoFactor {
                                    user_id: user_id.to_string(),
                                    message: response.message.clone().unwrap_or_else(|| {
                                        "Informe o código do aplicativo autenticador".to_string()
                                    }),
                                }));
                            }
                            None => error.set(Some(
                                "Verificação em duas etapas necessária".to_string(),
                            )),
                        }
                    }
                    Ok(response) => on_logged_in.emit(response.access_token),
                    Err(e) => error.set(Some(e.to_string())),
                }
                submitting.set(false);
            });
        })
    };

    let on_verify = {
        let api_client = props.api_client.clone();
        let on_logged_in = props.on_logged_in.clone();
        let code = code.clone();
        let pending = pending.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(user_id) = (*pending).as_ref().map(|p| p.user_id.clone()) else {
                return;
            };
            let Some(verify) = TwoFactorVerify::from_input(&code) else {
                error.set(Some("Informe o código de 6 dígitos".to_string()));
                return;
            };

            let api_client = api_client.clone();
            let on_logged_in = on_logged_in.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            spawn_local(async move {
                submitting.set(true);
                match api_client.verify_two_factor(&user_id, &verify.totp_code).await {
                    Ok(response) => on_logged_in.emit(response.access_token),
                    Err(e) => error.set(Some(e.to_string())),
                }
                submitting.set(false);
            });
        })
    };

    let on_back = {
        let pending = pending.clone();
        let code = code.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            pending.set(None);
            code.set(String::new());
            error.set(None);
        })
    };

    let form = match (*pending).as_ref() {
        Some(step) => html! {
            <form class="login-form" onsubmit={on_verify}>
                <div class="form-message info">{step.message.clone()}</div>
                <div class="form-group">
                    <label for="login-code">{"Código de verificação"}</label>
                    <input
                        type="text"
                        id="login-code"
                        inputmode="numeric"
                        autocomplete="one-time-code"
                        maxlength="6"
                        value={(*code).clone()}
                        onchange={on_code_change}
                        disabled={*submitting}
                    />
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Verificando..." } else { "Verificar" }}
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={on_back}
                        disabled={*submitting}
                    >
                        {"Voltar"}
                    </button>
                </div>
            </form>
        },
        None => html! {
            <form class="login-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="login-email">{"E-mail"}</label>
                    <input
                        type="email"
                        id="login-email"
                        autocomplete="username"
                        value={(*email).clone()}
                        onchange={on_email_change}
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="login-password">{"Senha"}</label>
                    <input
                        type="password"
                        id="login-password"
                        autocomplete="current-password"
                        value={(*password).clone()}
                        onchange={on_password_change}
                        disabled={*submitting}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {if *submitting { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
        },
    };

    html! {
        <section class="login-section">
            <h2>{"Entrar no MeuFuturo"}</h2>

            {if let Some(notice) = props.notice.as_ref() {
                html! { <div class="form-message info">{notice}</div> }
            } else { html! {} }}

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            {form}
        </section>
    }
}
