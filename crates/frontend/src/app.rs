use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::config::{host_settings_json, load_settings};
use crate::system::auth::context::{use_auth, AuthProvider};
use crate::system::auth::session::SessionStore;
use leptos::prelude::*;
use std::cell::Cell;

thread_local! {
    static HANDLES: Cell<Option<(AppGlobalContext, RwSignal<SessionStore>)>> = const { Cell::new(None) };
}

/// Run `f` against the mounted app; `None` before `App` has rendered
pub fn with_handles<T>(f: impl FnOnce(AppGlobalContext, RwSignal<SessionStore>) -> T) -> Option<T> {
    HANDLES.with(|handles| handles.get()).map(|(ctx, session)| f(ctx, session))
}

#[component]
fn RegisterHandles() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let session = use_auth();
    HANDLES.with(|handles| handles.set(Some((ctx, session))));

    view! { <AppRoutes /> }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(load_settings(host_settings_json().as_deref()));

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <RegisterHandles />
        </AuthProvider>
    }
}
