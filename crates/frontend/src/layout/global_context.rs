use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

use crate::routes::policy::Location;
use crate::shared::catalog::BrandCatalog;

/// Browser location as the routing pipeline sees it
pub fn current_location() -> Location {
    let Some(location) = window().map(|w| w.location()) else {
        return Location::default();
    };
    Location::new(
        &location.pathname().unwrap_or_default(),
        &location.search().unwrap_or_default(),
    )
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub location: RwSignal<Location>,
    pub brands: RwSignal<BrandCatalog>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            location: RwSignal::new(current_location()),
            brands: RwSignal::new(BrandCatalog::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Follow back/forward buttons
    pub fn init_router_integration(&self) {
        let this = *self;
        let on_popstate = Closure::<dyn Fn()>::new(move || {
            this.location.set(current_location());
        });
        if let Some(w) = window() {
            let _ = w.add_event_listener_with_callback(
                "popstate",
                on_popstate.as_ref().unchecked_ref(),
            );
        }
        on_popstate.forget();
    }

    /// Client-side navigation that adds a history entry
    pub fn navigate(&self, target: &str) {
        leptos::logging::log!("navigate: '{}'", target);
        self.update_history(target, false);
    }

    /// Client-side navigation that replaces the current entry, so a redirect
    /// never leaves a back-button trap behind
    pub fn redirect(&self, target: &str) {
        leptos::logging::log!("redirect: '{}'", target);
        self.update_history(target, true);
    }

    fn update_history(&self, target: &str, replace: bool) {
        if let Some(history) = window().and_then(|w| w.history().ok()) {
            let result = if replace {
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(target))
            } else {
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(target))
            };
            if let Err(e) = result {
                log::warn!("History update to '{}' failed: {:?}", target, e);
            }
        }
        self.location.set(Location::parse(target));
    }

    /// Swap in a freshly fetched brand snapshot
    pub fn replace_brands(&self, next: BrandCatalog) {
        log::info!("Brand catalog refreshed: {} brand(s)", next.brands().len());
        self.brands.update(|catalog| catalog.replace(next));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
