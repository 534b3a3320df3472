//! TopHeader component - portal top bar.
//!
//! Contains:
//! - Sidebar toggle
//! - Brand and locale switchers
//! - User info and logout

use contracts::shared::settings::PortalSettings;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::policy::AccessPolicy;
use crate::routes::resolver::{PathResolver, RouteDescriptor};
use crate::shared::catalog::LocaleCatalog;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::storage::{BrowserStorage, StoredPreferences};

#[component]
pub fn TopHeader(route: RouteDescriptor) -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let settings = use_context::<PortalSettings>().expect("PortalSettings not provided");
    let session = use_auth();

    let settings = StoredValue::new(settings);
    let route = StoredValue::new(route);

    let brand_options = move || {
        ctx.brands.with(|brands| {
            brands
                .brands()
                .iter()
                .map(|b| (b.code.clone(), b.display_name.clone()))
                .collect::<Vec<_>>()
        })
    };
    let locale_options = move || {
        let brand = route.with_value(|r| r.brand.clone());
        ctx.brands.with(|brands| {
            settings.with_value(|settings| {
                LocaleCatalog::from_brands(brands, settings)
                    .locales_for(&brand)
                    .iter()
                    .map(|l| (l.code.clone(), l.native_name.clone()))
                    .collect::<Vec<_>>()
            })
        })
    };

    let switch_to = move |brand: Option<String>, locale: Option<String>| {
        let target = ctx.brands.with(|brands| {
            settings.with_value(|settings| {
                let locales = LocaleCatalog::from_brands(brands, settings);
                let resolver = PathResolver::new(settings, brands, &locales);
                route.with_value(|route| match (brand, locale) {
                    (Some(brand), _) => resolver.switch_brand(route, &brand),
                    (None, Some(locale)) => resolver.switch_locale(route, &locale),
                    (None, None) => resolver.canonical_redirect(route),
                })
            })
        });
        ctx.navigate(&target);
    };

    let logout = move |_| {
        let location = ctx.location.get_untracked();
        let login_url = settings.with_value(|settings| {
            let prefs = StoredPreferences::load(&BrowserStorage);
            let policy = AccessPolicy::new(settings, &prefs, &location);
            route.with_value(|route| policy.login_url(route))
        });
        do_logout(session, || ctx.redirect(&login_url));
    };

    let current_brand = route.with_value(|r| r.brand.clone());
    let current_locale = route.with_value(|r| r.locale.clone());

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title="Toggle navigation"
                >
                    {icon("panel-left")}
                </button>
                <select
                    class="top-header__select"
                    on:change=move |ev| switch_to(Some(event_target_value(&ev)), None)
                >
                    {move || brand_options().into_iter().map(|(code, name)| {
                        let selected = code == current_brand;
                        view! { <option value=code selected=selected>{name}</option> }
                    }).collect_view()}
                </select>
            </div>

            <div class="top-header__actions">
                <select
                    class="top-header__select"
                    on:change=move |ev| switch_to(None, Some(event_target_value(&ev)))
                >
                    {move || locale_options().into_iter().map(|(code, name)| {
                        let selected = code == current_locale;
                        view! { <option value=code selected=selected>{name}</option> }
                    }).collect_view()}
                </select>

                <div class="top-header__user">
                    <span>
                        {move || session.with(|store| {
                            store.current()
                                .identity()
                                .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
                                .unwrap_or_else(|| "Guest".to_string())
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
