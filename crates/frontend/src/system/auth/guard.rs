use contracts::shared::settings::PortalSettings;
use leptos::prelude::*;

use super::context::use_auth;
use super::storage::{BrowserStorage, StoredPreferences};
use crate::layout::global_context::AppGlobalContext;
use crate::routes::policy::{AccessPolicy, RedirectDecision};
use crate::routes::resolver::PathResolver;
use crate::shared::catalog::LocaleCatalog;

/// Decision for the current location, recomputed whenever it or the session changes
fn use_access_decision(requires_admin: bool) -> Memo<RedirectDecision> {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let settings = use_context::<PortalSettings>().expect("PortalSettings not provided");
    let session = use_auth();

    Memo::new(move |_| {
        let location = ctx.location.get();
        let prefs = StoredPreferences::load(&BrowserStorage);
        let logout_in_progress = session.with(|store| store.is_logout_in_progress());

        ctx.brands.with(|brands| {
            let locales = LocaleCatalog::from_brands(brands, &settings);
            let route = PathResolver::new(&settings, brands, &locales).resolve(&location.path);
            let policy = AccessPolicy::new(&settings, &prefs, &location)
                .with_logout_in_progress(logout_in_progress);
            session.with(|store| policy.authorize(&route, requires_admin, store.current()))
        })
    })
}

fn guarded(decision: Memo<RedirectDecision>, children: ChildrenFn) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    Effect::new(move |_| {
        if let RedirectDecision::RedirectTo(target) = decision.get() {
            ctx.redirect(&target);
        }
    });

    view! {
        <Show
            when=move || decision.get().is_allowed()
            fallback=|| view! { <div class="redirecting">"Redirecting…"</div> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires authentication
/// Redirects to the login page otherwise
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(use_access_decision(false), children)
}

/// Component that requires admin privileges
/// Redirects to the admin fallback page otherwise
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    guarded(use_access_decision(true), children)
}
