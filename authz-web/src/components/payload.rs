use dioxus::prelude::*;

/// Read-only view of the authorization payload.
#[component]
pub fn PayloadView(json: String) -> Element {
    rsx! {
        div {
            id: "json-editor",
            class: "payload-view",
            pre { "{json}" }
        }
    }
}
