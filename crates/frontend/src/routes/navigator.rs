//! One navigation: resolve the path, authorize it, build the menu.
//!
//! The three stages always run in this order; each consumes the previous
//! stage's output.

use contracts::shared::settings::PortalSettings;
use serde::Deserialize;

use super::pages::{is_login_path, Page};
use super::policy::{AccessLevel, AccessPolicy, Location, RedirectDecision, Render};
use super::resolver::{PathResolver, RouteDescriptor};
use crate::layout::left::menu::{active_key, project, NavItem};
use crate::shared::catalog::{BrandCatalog, LocaleCatalog};
use crate::system::auth::session::SessionStore;
use crate::system::auth::storage::StoredPreferences;

/// Query of the login page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(rename = "returnUrl", default)]
    pub return_url: Option<String>,
}

impl LoginParams {
    pub fn from_query(query: &str) -> Self {
        serde_qs::from_str(query).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed login query '{}': {}", query, e);
            Self::default()
        })
    }

    /// In-app path to return to after sign-in; absolute URLs are refused
    pub fn safe_return_url(&self) -> Option<&str> {
        self.return_url
            .as_deref()
            .filter(|url| url.starts_with('/') && !url.starts_with("//"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Render {
        route: RouteDescriptor,
        page: Page,
        nav: Vec<NavItem>,
        active: Option<String>,
    },
    Login(LoginParams),
    /// Logout is settling; show a neutral placeholder
    Redirecting,
    Redirect(String),
}

impl NavigationOutcome {
    /// A pending logout is over once the visitor reaches the login page
    pub fn settles_logout(&self) -> bool {
        matches!(self, NavigationOutcome::Login(_))
    }
}

pub struct Navigator<'a> {
    settings: &'a PortalSettings,
    brands: &'a BrandCatalog,
    locales: LocaleCatalog,
    prefs: &'a StoredPreferences,
    session: &'a SessionStore,
}

impl<'a> Navigator<'a> {
    pub fn new(
        settings: &'a PortalSettings,
        brands: &'a BrandCatalog,
        prefs: &'a StoredPreferences,
        session: &'a SessionStore,
    ) -> Self {
        Self {
            settings,
            brands,
            locales: LocaleCatalog::from_brands(brands, settings),
            prefs,
            session,
        }
    }

    pub fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(self.settings, self.brands, &self.locales)
            .with_default_redirect(self.prefs.default_redirect.as_deref())
    }

    pub fn navigate(&self, location: &Location) -> NavigationOutcome {
        if is_login_path(&location.path, self.settings) {
            return NavigationOutcome::Login(LoginParams::from_query(&location.query));
        }

        let resolver = self.resolver();
        if let Some(target) = resolver.redirect_target(&location.path) {
            log::debug!("Completing '{}' → '{}'", location.path, target);
            return NavigationOutcome::Redirect(target);
        }

        let route = resolver.resolve(&location.path);
        if let Some(target) = self.unsupported_route_target(&resolver, &route) {
            if target != resolver.canonical_redirect(&route) {
                log::debug!("Unsupported route {:?} → '{}'", route, target);
                return NavigationOutcome::Redirect(target);
            }
            log::warn!("No supported route for {:?}; rendering as is", route);
        }

        let page = Page::from_path(&location.path)
            .unwrap_or_else(|| Page::from_slug(&self.settings.default_page, None));

        let policy = AccessPolicy::new(self.settings, self.prefs, location)
            .with_logout_in_progress(self.session.is_logout_in_progress());

        match policy.authorize(&route, page.requires_admin(), self.session.current()) {
            RedirectDecision::RedirectTo(target) => {
                log::info!(
                    "Access to '{}' as {:?} redirected to '{}'",
                    location.path,
                    AccessLevel::of(self.session.current()),
                    target
                );
                NavigationOutcome::Redirect(target)
            }
            RedirectDecision::Allow(Render::Redirecting) => NavigationOutcome::Redirecting,
            RedirectDecision::Allow(Render::Page) => {
                let nav = self
                    .brands
                    .brand(&route.brand)
                    .map(|brand| project(brand, &route.locale))
                    .unwrap_or_default();
                let active = active_key(&nav, &route);
                NavigationOutcome::Render {
                    route,
                    page,
                    nav,
                    active,
                }
            }
        }
    }

    /// Unknown brand or a locale the brand does not offer, once brands are loaded
    fn unsupported_route_target(
        &self,
        resolver: &PathResolver<'_>,
        route: &RouteDescriptor,
    ) -> Option<String> {
        if self.brands.is_empty() {
            return None;
        }
        if !self.brands.is_known(&route.brand) {
            let landing = RouteDescriptor {
                page: None,
                ..route.clone()
            };
            return Some(resolver.switch_brand(&landing, &self.settings.fallback_brand));
        }
        if !self.locales.supports(&route.brand, &route.locale) {
            return Some(resolver.switch_locale(route, &route.locale));
        }
        None
    }
}
