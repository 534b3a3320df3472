//! URL path → `{locale, brand, page}` resolution
//!
//! Paths have the shape `/{locale}/{brand}/{page}[/...]`. Shorter paths are
//! completed from the catalogs and portal settings; unknown codes in a full
//! path are passed through untouched for the policy layer to judge.

use contracts::shared::settings::PortalSettings;

use crate::shared::catalog::{BrandCatalog, LocaleCatalog};
use crate::shared::fallback::Fallback;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub locale: String,
    pub brand: String,
    /// Absent when the path stopped before the page segment
    pub page: Option<String>,
}

impl RouteDescriptor {
    pub fn new(locale: &str, brand: &str, page: Option<&str>) -> Self {
        Self {
            locale: locale.to_string(),
            brand: brand.to_string(),
            page: page.map(str::to_string),
        }
    }

    /// `/{locale}/{brand}/{page}`, using `default_page` when no page was given
    pub fn canonical_redirect(&self, default_page: &str) -> String {
        format!(
            "/{}/{}/{}",
            self.locale,
            self.brand,
            self.page.as_deref().unwrap_or(default_page)
        )
    }
}

/// Non-empty `/`-separated segments of a path; query and fragment are ignored
pub fn path_segments(raw: &str) -> Vec<&str> {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

pub struct PathResolver<'a> {
    settings: &'a PortalSettings,
    brands: &'a BrandCatalog,
    locales: &'a LocaleCatalog,
    default_redirect: Option<&'a str>,
}

impl<'a> PathResolver<'a> {
    pub fn new(
        settings: &'a PortalSettings,
        brands: &'a BrandCatalog,
        locales: &'a LocaleCatalog,
    ) -> Self {
        Self {
            settings,
            brands,
            locales,
            default_redirect: None,
        }
    }

    /// Destination remembered by the login flow for bare URLs
    pub fn with_default_redirect(mut self, default_redirect: Option<&'a str>) -> Self {
        self.default_redirect = default_redirect.filter(|r| !r.is_empty());
        self
    }

    pub fn resolve(&self, raw_path: &str) -> RouteDescriptor {
        let segments = path_segments(raw_path);

        if let [locale, brand, page, ..] = segments.as_slice() {
            return RouteDescriptor::new(locale, brand, Some(*page));
        }

        if segments.is_empty() {
            if let Some(route) = self.remembered_route() {
                return route;
            }
        }

        self.complete(&segments)
    }

    /// Where an incomplete path should be sent; `None` for full paths
    pub fn redirect_target(&self, raw_path: &str) -> Option<String> {
        let segments = path_segments(raw_path);
        if segments.len() >= 3 {
            return None;
        }

        let target = Fallback::new()
            .provider("stored default redirect", || {
                segments
                    .is_empty()
                    .then(|| self.default_redirect.map(str::to_string))
                    .flatten()
            })
            .provider("completed path", || {
                Some(self.canonical_redirect(&self.complete(&segments)))
            })
            .resolve_or(self.settings.admin_fallback_path.clone());

        Some(target)
    }

    pub fn canonical_redirect(&self, route: &RouteDescriptor) -> String {
        route.canonical_redirect(&self.settings.default_page)
    }

    /// Same page in another locale of the current brand
    pub fn switch_locale(&self, route: &RouteDescriptor, locale: &str) -> String {
        let locale = if self.locales.supports(&route.brand, locale) {
            locale
        } else {
            log::debug!("Locale '{}' not offered by '{}'", locale, route.brand);
            self.locales.default_locale(&route.brand).code.as_str()
        };
        self.canonical_redirect(&RouteDescriptor {
            locale: locale.to_string(),
            ..route.clone()
        })
    }

    /// Same page under another brand, keeping the locale when the brand offers it
    pub fn switch_brand(&self, route: &RouteDescriptor, brand: &str) -> String {
        let brand = if self.brands.is_known(brand) {
            brand
        } else {
            self.fallback_brand()
        };
        let locale = if self.locales.supports(brand, &route.locale) {
            route.locale.clone()
        } else {
            self.locales.default_locale(brand).code.clone()
        };
        self.canonical_redirect(&RouteDescriptor {
            locale,
            brand: brand.to_string(),
            page: route.page.clone(),
        })
    }

    fn remembered_route(&self) -> Option<RouteDescriptor> {
        let stored = self.default_redirect?;
        match path_segments(stored).as_slice() {
            [locale, brand, page, ..] => Some(RouteDescriptor::new(locale, brand, Some(*page))),
            _ => None,
        }
    }

    /// Configured fallback brand, or the first loaded brand when the
    /// snapshot lacks it
    fn fallback_brand(&self) -> &'a str {
        self.brands.fallback_code(&self.settings.fallback_brand)
    }

    fn complete(&self, segments: &[&str]) -> RouteDescriptor {
        let fallback_brand = self.fallback_brand();

        let brand = segments
            .get(1)
            .copied()
            .filter(|code| self.brands.is_known(code))
            .unwrap_or(fallback_brand);
        let locale = segments
            .first()
            .copied()
            .filter(|code| self.locales.is_known(code))
            .unwrap_or(self.locales.default_locale(fallback_brand).code.as_str());

        RouteDescriptor::new(locale, brand, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::brand::{BrandDescriptor, LocaleDescriptor};

    struct Fixture {
        settings: PortalSettings,
        brands: BrandCatalog,
        locales: LocaleCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            let settings = PortalSettings::default();
            let brands = BrandCatalog::new(vec![
                BrandDescriptor::new("kendo", "Kendo").with_locales(vec![
                    LocaleDescriptor::new("en_GB", "English (UK)", "English", "en-GB"),
                    LocaleDescriptor::new("zh_CN", "Chinese", "中文", "zh-CN"),
                ]),
                BrandDescriptor::new("acme", "Acme").with_locales(vec![LocaleDescriptor::new(
                    "fr_FR", "French", "Français", "fr-FR",
                )]),
            ]);
            let locales = LocaleCatalog::from_brands(&brands, &settings);
            Self {
                settings,
                brands,
                locales,
            }
        }

        fn resolver(&self) -> PathResolver<'_> {
            PathResolver::new(&self.settings, &self.brands, &self.locales)
        }
    }

    #[test]
    fn test_full_path_resolves_verbatim() {
        let fx = Fixture::new();
        assert_eq!(
            fx.resolver().resolve("/zh_CN/kendo/medias"),
            RouteDescriptor::new("zh_CN", "kendo", Some("medias"))
        );
        assert_eq!(
            fx.resolver().resolve("/xx_XX/nobrand/whatever/extra"),
            RouteDescriptor::new("xx_XX", "nobrand", Some("whatever"))
        );
    }

    #[test]
    fn test_root_falls_back_to_defaults() {
        let fx = Fixture::new();
        let resolver = fx.resolver();
        let route = resolver.resolve("/");
        assert_eq!(route, RouteDescriptor::new("en_GB", "kendo", None));
        assert_eq!(resolver.canonical_redirect(&route), "/en_GB/kendo/category");
        assert_eq!(
            resolver.redirect_target("/").as_deref(),
            Some("/en_GB/kendo/category")
        );
    }

    #[test]
    fn test_short_paths_never_lack_brand_or_locale() {
        let fx = Fixture::new();
        let resolver = fx.resolver();
        for path in ["", "/", "//", "/zh_CN", "/de_DE", "/fr_FR/acme", "/en_GB/unknown", "/a/b"] {
            let route = resolver.resolve(path);
            assert!(!route.locale.is_empty(), "{}", path);
            assert!(!route.brand.is_empty(), "{}", path);
            assert_eq!(route.page, None, "{}", path);
        }
    }

    #[test]
    fn test_short_path_keeps_known_segments() {
        let fx = Fixture::new();
        let resolver = fx.resolver();
        assert_eq!(
            resolver.resolve("/fr_FR/acme"),
            RouteDescriptor::new("fr_FR", "acme", None)
        );
        assert_eq!(
            resolver.resolve("/de_DE/nowhere"),
            RouteDescriptor::new("en_GB", "kendo", None)
        );
        assert_eq!(
            resolver.redirect_target("/zh_CN").as_deref(),
            Some("/zh_CN/kendo/category")
        );
    }

    #[test]
    fn test_full_paths_round_trip() {
        let fx = Fixture::new();
        let resolver = fx.resolver();
        for path in ["/zh_CN/kendo/medias", "/xx/yy/zz", "en_GB/acme/admin/users?x=1"] {
            let route = resolver.resolve(path);
            let again = resolver.resolve(&resolver.canonical_redirect(&route));
            assert_eq!(route, again, "{}", path);
            assert_eq!(resolver.redirect_target(path), None);
        }
    }

    #[test]
    fn test_stored_default_redirect_wins_for_bare_url() {
        let fx = Fixture::new();
        let resolver = fx.resolver().with_default_redirect(Some("/fr_FR/acme/home"));

        assert_eq!(
            resolver.resolve("/"),
            RouteDescriptor::new("fr_FR", "acme", Some("home"))
        );
        assert_eq!(resolver.redirect_target("/").as_deref(), Some("/fr_FR/acme/home"));
        // Only bare URLs consult the stored destination
        assert_eq!(
            resolver.redirect_target("/zh_CN").as_deref(),
            Some("/zh_CN/kendo/category")
        );
    }

    #[test]
    fn test_stored_default_redirect_is_taken_verbatim() {
        let fx = Fixture::new();
        let resolver = fx.resolver().with_default_redirect(Some("welcome"));
        assert_eq!(resolver.redirect_target("").as_deref(), Some("welcome"));
        assert_eq!(resolver.resolve(""), RouteDescriptor::new("en_GB", "kendo", None));

        let resolver = fx.resolver().with_default_redirect(Some(""));
        assert_eq!(
            resolver.redirect_target("/").as_deref(),
            Some("/en_GB/kendo/category")
        );
    }

    #[test]
    fn test_completion_uses_loaded_brand_when_fallback_is_missing() {
        let settings = PortalSettings::default();
        let brands = BrandCatalog::new(vec![BrandDescriptor::new("acme", "Acme")
            .with_locales(vec![LocaleDescriptor::new("fr_FR", "French", "Français", "fr-FR")])]);
        let locales = LocaleCatalog::from_brands(&brands, &settings);
        let resolver = PathResolver::new(&settings, &brands, &locales);

        assert_eq!(resolver.redirect_target("/").as_deref(), Some("/fr_FR/acme/category"));
        let route = RouteDescriptor::new("fr_FR", "ghost", Some("home"));
        assert_eq!(resolver.switch_brand(&route, "kendo"), "/fr_FR/acme/home");
    }

    #[test]
    fn test_switch_locale_and_brand() {
        let fx = Fixture::new();
        let resolver = fx.resolver();
        let route = RouteDescriptor::new("en_GB", "kendo", Some("videos"));

        assert_eq!(resolver.switch_locale(&route, "zh_CN"), "/zh_CN/kendo/videos");
        assert_eq!(resolver.switch_locale(&route, "fr_FR"), "/en_GB/kendo/videos");
        assert_eq!(resolver.switch_brand(&route, "acme"), "/fr_FR/acme/videos");
        assert_eq!(resolver.switch_brand(&route, "ghost"), "/en_GB/kendo/videos");
    }
}
