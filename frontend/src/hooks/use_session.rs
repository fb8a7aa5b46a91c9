use std::rc::Rc;

use shared::{AuthEvent, AuthEvents};
use yew::prelude::*;

use crate::services::session::Session;

pub struct UseSessionResult {
    pub session: Rc<Session>,
    pub authenticated: bool,
    /// Why the user was sent back to the login form, if it was not their choice
    pub notice: Option<String>,
    pub actions: UseSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    /// Store a freshly issued access token
    pub log_in: Callback<String>,
    pub log_out: Callback<()>,
}

#[hook]
pub fn use_session(auth_events: &AuthEvents) -> UseSessionResult {
    let session = use_memo((), |_| Session::restore());
    let authenticated = use_state(|| session.is_authenticated());
    let notice = use_state(|| None::<String>);

    // Session changes arrive as auth events, whoever raised them
    {
        let session = session.clone();
        let authenticated = authenticated.clone();
        let notice = notice.clone();
        use_effect_with(auth_events.clone(), move |events| {
            let subscription = events.subscribe(move |event| match event {
                AuthEvent::SessionExpired { message } => {
                    log::info!("session expired");
                    session.clear();
                    authenticated.set(false);
                    notice.set(Some(message.clone()));
                }
                AuthEvent::LoggedOut => {
                    session.clear();
                    authenticated.set(false);
                    notice.set(None);
                }
                AuthEvent::LoggedIn => {
                    authenticated.set(true);
                    notice.set(None);
                }
            });
            move || drop(subscription)
        });
    }

    let log_in = {
        let session = session.clone();
        let auth_events = auth_events.clone();
        use_callback((), move |token: String, _| {
            if let Err(e) = session.store(token) {
                log::warn!("{e:#}");
            }
            auth_events.emit(&AuthEvent::LoggedIn);
        })
    };

    let log_out = {
        let auth_events = auth_events.clone();
        use_callback((), move |_, _| auth_events.emit(&AuthEvent::LoggedOut))
    };

    UseSessionResult {
        session,
        authenticated: *authenticated,
        notice: (*notice).clone(),
        actions: UseSessionActions { log_in, log_out },
    }
}
