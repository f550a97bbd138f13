//! The authorization page.
//!
//! The query string is resolved into an `AuthorizationRequestContext` on
//! mount and after every history navigation; details are fetched only when
//! that context changes. Pressing Authorize runs one ceremony attempt.

pub mod passkey;

use std::cell::RefCell;
use std::rc::Rc;

use authz_core::{
    authorize, load_authorization, AuthorizationRequestContext, ContextTracker, PageState,
};
use dioxus::prelude::*;

use crate::api::HttpBackend;
use crate::components::styles::PAGE_CSS;
use crate::components::PayloadView;
use crate::config::PAGE_TITLE;
use crate::interop;
use passkey::BrowserAuthenticator;

#[component]
pub fn AuthorizePage() -> Element {
    let mut query = use_signal(interop::current_query);
    let mut page = use_signal(PageState::new);
    let mut request = use_signal(|| None::<AuthorizationRequestContext>);
    let tracker = use_hook(|| Rc::new(RefCell::new(ContextTracker::new())));

    use_hook(|| interop::on_popstate(move || query.set(interop::current_query())));

    // Re-resolve the context whenever the query changes
    use_effect(move || {
        let current = query();
        let Some(resolved) = tracker.borrow_mut().observe(&current) else {
            return;
        };

        match resolved {
            Err(e) => {
                request.set(None);
                page.write().apply_context_error(&e);
            }
            Ok(ctx) => {
                request.set(Some(ctx.clone()));
                page.write().reset();
                spawn(async move {
                    let result = load_authorization(&HttpBackend::new(), &ctx).await;
                    // A newer context may have replaced this one meanwhile.
                    if *request.peek() == Some(ctx.clone()) {
                        page.write().apply_details(result);
                    }
                });
            }
        }
    });

    let on_authorize = move |_: MouseEvent| {
        let Some(ctx) = request.peek().clone() else {
            return;
        };
        let Some(ticket) = page.write().begin_ceremony() else {
            return;
        };
        spawn(async move {
            let outcome = authorize(&ctx, &HttpBackend::new(), &BrowserAuthenticator).await;
            // The page may have moved to another context meanwhile.
            if *request.peek() != Some(ctx) {
                return;
            }
            let redirect = page.write().finish_ceremony(ticket, outcome);
            if let Some(url) = redirect {
                interop::navigate_to(&url);
            }
        });
    };

    let view = page.read().view();

    rsx! {
        style { {PAGE_CSS} }
        div {
            class: "authz-page",
            h1 { "{PAGE_TITLE}" }
            div {
                hidden: !view.show_payload,
                PayloadView { json: view.payload_json.clone() }
                button {
                    id: "authorize-button",
                    disabled: !view.authorize_enabled,
                    onclick: on_authorize,
                    "Authorize"
                }
            }
            div {
                id: "status",
                class: "authz-status",
                hidden: !view.show_status,
                "{view.status}"
            }
            div {
                id: "error",
                class: "authz-error",
                hidden: !view.show_error,
                "{view.error}"
            }
        }
    }
}
