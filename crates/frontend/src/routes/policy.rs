//! Route authorization
//!
//! Each navigation is judged afresh against the current session. The
//! authentication check always runs before the admin check, so an anonymous
//! visitor asking for an admin page is sent to login.

use contracts::shared::settings::PortalSettings;

use super::pages::is_login_path;
use super::resolver::{path_segments, RouteDescriptor};
use crate::shared::fallback::Fallback;
use crate::system::auth::session::SessionState;
use crate::system::auth::storage::StoredPreferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Anonymous,
    AuthenticatedNonAdmin,
    AuthenticatedAdmin,
}

impl AccessLevel {
    pub fn of(session: &SessionState) -> Self {
        match (session.is_authenticated(), session.is_admin()) {
            (false, _) => AccessLevel::Anonymous,
            (true, false) => AccessLevel::AuthenticatedNonAdmin,
            (true, true) => AccessLevel::AuthenticatedAdmin,
        }
    }
}

/// What to show when access is granted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Page,
    /// Neutral placeholder shown while a logout settles
    Redirecting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    Allow(Render),
    RedirectTo(String),
}

impl RedirectDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RedirectDecision::Allow(_))
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            RedirectDecision::RedirectTo(target) => Some(target.as_str()),
            RedirectDecision::Allow(_) => None,
        }
    }
}

/// Path and query of the page being visited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Query string without the leading `?`
    pub query: String,
}

impl Location {
    pub fn new(path: &str, query: &str) -> Self {
        Self {
            path: path.to_string(),
            query: query.trim_start_matches('?').to_string(),
        }
    }

    /// Split `path?query`; a fragment is dropped
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        match href.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(href, ""),
        }
    }

    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

pub struct AccessPolicy<'a> {
    settings: &'a PortalSettings,
    prefs: &'a StoredPreferences,
    location: &'a Location,
    logout_in_progress: bool,
}

impl<'a> AccessPolicy<'a> {
    pub fn new(
        settings: &'a PortalSettings,
        prefs: &'a StoredPreferences,
        location: &'a Location,
    ) -> Self {
        Self {
            settings,
            prefs,
            location,
            logout_in_progress: false,
        }
    }

    pub fn with_logout_in_progress(mut self, logout_in_progress: bool) -> Self {
        self.logout_in_progress = logout_in_progress;
        self
    }

    pub fn authorize(
        &self,
        route: &RouteDescriptor,
        requires_admin: bool,
        session: &SessionState,
    ) -> RedirectDecision {
        let requires_auth = !is_login_path(&self.location.path, self.settings);
        let level = AccessLevel::of(session);

        if requires_auth && level == AccessLevel::Anonymous {
            if self.logout_in_progress {
                return RedirectDecision::Allow(Render::Redirecting);
            }
            return RedirectDecision::RedirectTo(self.login_url(route));
        }

        if requires_admin && level != AccessLevel::AuthenticatedAdmin {
            return RedirectDecision::RedirectTo(self.admin_fallback());
        }

        RedirectDecision::Allow(Render::Page)
    }

    /// `/{tenant}/Login?theme={brand}&locale={locale}&returnUrl={current}`
    pub fn login_url(&self, route: &RouteDescriptor) -> String {
        format!(
            "/{}/{}?theme={}&locale={}&returnUrl={}",
            self.tenant(),
            self.settings.login_page,
            urlencoding::encode(&route.brand),
            urlencoding::encode(&route.locale),
            urlencoding::encode(&self.location.path_and_query()),
        )
    }

    /// Stored tenant, else the capitalized brand segment, else the literal default
    pub fn tenant(&self) -> String {
        let segments = path_segments(&self.location.path);
        // bound so the chain drops before `segments`
        let tenant = Fallback::new()
            .provider("stored tenant", || self.prefs.tenant.clone())
            .provider("brand segment", || segments.get(1).map(|b| capitalize(b)))
            .resolve_or(self.settings.fallback_tenant.clone());
        tenant
    }

    /// Stored admin redirect, else the category page of the current brand, else the global default
    pub fn admin_fallback(&self) -> String {
        let segments = path_segments(&self.location.path);
        // bound so the chain drops before `segments`
        let target = Fallback::new()
            .provider("stored admin redirect", || {
                self.prefs.default_admin_redirect.clone()
            })
            .provider("current brand", || match segments.as_slice() {
                [locale, brand, ..] => Some(format!(
                    "/{}/{}/{}",
                    locale, brand, self.settings.default_page
                )),
                _ => None,
            })
            .resolve_or(self.settings.admin_fallback_path.clone());
        target
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
