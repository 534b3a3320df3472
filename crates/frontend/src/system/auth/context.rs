use contracts::system::auth::LoginResponse;
use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

use super::session::{self, SessionStore};
use super::storage::BrowserStorage;

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(SessionStore::restore(&BrowserStorage));

    // Another tab may have granted roles since this one started
    let on_storage = Closure::<dyn Fn()>::new(move || {
        refresh_session(session);
    });
    if let Some(w) = window() {
        let _ = w.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref());
    }
    on_storage.forget();

    provide_context(session);

    children()
}

/// Hook to access the session store
pub fn use_auth() -> RwSignal<SessionStore> {
    use_context::<RwSignal<SessionStore>>().expect("AuthProvider not found in component tree")
}

/// Helper: start the session handed over by the login flow
pub fn do_login(session: RwSignal<SessionStore>, response: LoginResponse) {
    session.update(|store| store.login(response, &BrowserStorage));
}

/// Helper: sign out; `leave` performs the navigation away from the protected page.
///
/// The logout flag stays set until [`settle_logout`] runs, so guards
/// rendering in between show a placeholder instead of redirecting again.
pub fn do_logout(session: RwSignal<SessionStore>, leave: impl FnOnce()) {
    session.update(|store| store.begin_logout());
    session::clear_persisted(&BrowserStorage);
    leave();
}

/// Helper: clear the logout flag once navigation has left the protected pages
pub fn settle_logout(session: RwSignal<SessionStore>) {
    if session.with_untracked(|store| store.is_logout_in_progress()) {
        log::debug!("Logout settled");
        session.update(|store| store.finish_logout());
    }
}

/// Helper: merge roles persisted since the session started
pub fn refresh_session(session: RwSignal<SessionStore>) {
    session.update(|store| store.sync_roles(&BrowserStorage));
}
