use dioxus::launch;
use dioxus::prelude::*;
use dioxus_logger::tracing::Level;

use authz_web::AuthorizePage;

fn main() {
    // Browser console logging
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_logger::init(Level::INFO).ok();

    launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AuthorizePage {}
    }
}
