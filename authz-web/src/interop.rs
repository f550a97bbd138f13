use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};

/// The page's current `location.search`, including the leading `?`.
pub fn current_query() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Leave the page for `url`.
pub fn navigate_to(url: &str) {
    let Some(window) = window() else {
        log::warn!("no window to navigate to {url}");
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        log::warn!("navigation to {url} failed: {e:?}");
    }
}

/// Call `handler` on every history navigation (back/forward, pushState
/// followed by a dispatched popstate).
pub fn on_popstate(mut handler: impl FnMut() + 'static) {
    let Some(window) = window() else {
        return;
    };

    let closure = Closure::wrap(Box::new(move |_e: Event| handler()) as Box<dyn FnMut(Event)>);

    if let Err(e) =
        window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
    {
        log::warn!("failed to add popstate listener: {e:?}");
    }

    // Leak the closure to keep it alive for the lifetime of the page
    closure.forget();
}
