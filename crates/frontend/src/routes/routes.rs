use contracts::shared::settings::PortalSettings;
use leptos::prelude::*;

use super::navigator::{LoginParams, NavigationOutcome, Navigator};
use super::pages::Page;
use super::resolver::RouteDescriptor;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::top_header::TopHeader;
use crate::layout::Shell;
use crate::system::auth::context::{settle_logout, use_auth};
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::auth::storage::{BrowserStorage, StoredPreferences};

fn page_body(title: String, meta: String, slug: String) -> impl IntoView {
    view! {
        <section class="page" data-page=slug>
            <h1 class="page__title">{title}</h1>
            <p class="page__meta">{meta}</p>
        </section>
    }
}

#[component]
fn PageOutlet(route: RouteDescriptor, page: Page) -> impl IntoView {
    let title = page.title().to_string();
    let slug = page.slug().to_string();
    let meta = format!("{} · {} · {}", route.brand, route.locale, slug);

    if page.requires_admin() {
        view! {
            <RequireAdmin>{page_body(title.clone(), meta.clone(), slug.clone())}</RequireAdmin>
        }
        .into_any()
    } else {
        view! {
            <RequireAuth>{page_body(title.clone(), meta.clone(), slug.clone())}</RequireAuth>
        }
        .into_any()
    }
}

/// Host for the identity provider's sign-in widget
#[component]
fn LoginScreen(params: LoginParams) -> impl IntoView {
    let theme = params.theme.unwrap_or_default();
    let locale = params.locale.unwrap_or_default();

    view! {
        <div class="login-container" data-theme=theme>
            <div class="login-box">
                <h1>"Sign in"</h1>
                <div id="login-widget" data-locale=locale></div>
            </div>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let settings = use_context::<PortalSettings>().expect("PortalSettings not provided");
    let session = use_auth();

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    let outcome = Memo::new(move |_| {
        let location = ctx.location.get();
        let prefs = StoredPreferences::load(&BrowserStorage);
        ctx.brands.with(|brands| {
            session.with(|store| {
                Navigator::new(&settings, brands, &prefs, store).navigate(&location)
            })
        })
    });

    Effect::new(move |_| {
        let outcome = outcome.get();
        if outcome.settles_logout() {
            settle_logout(session);
        }
        if let NavigationOutcome::Redirect(target) = outcome {
            ctx.redirect(&target);
        }
    });

    move || match outcome.get() {
        NavigationOutcome::Render {
            route,
            page,
            nav,
            active,
        } => {
            let header_route = route.clone();
            view! {
                <Shell
                    header=move || view! { <TopHeader route=header_route.clone() /> }.into_any()
                    left=move || view! { <Sidebar nav=nav.clone() active=active.clone() /> }.into_any()
                    center=move || view! { <PageOutlet route=route.clone() page=page.clone() /> }.into_any()
                />
            }
            .into_any()
        }
        NavigationOutcome::Login(params) => view! { <LoginScreen params=params /> }.into_any(),
        NavigationOutcome::Redirecting | NavigationOutcome::Redirect(_) => {
            view! { <div class="redirecting">"Redirecting…"</div> }.into_any()
        }
    }
}
