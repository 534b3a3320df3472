use super::BrandCatalog;
use contracts::domain::brand::LocaleDescriptor;
use contracts::shared::settings::PortalSettings;
use std::collections::HashMap;

/// Supported locales per brand.
///
/// Never fails: a brand without registered locales is served the fallback
/// locale from the portal settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCatalog {
    by_brand: HashMap<String, Vec<LocaleDescriptor>>,
    fallback: Vec<LocaleDescriptor>,
}

impl LocaleCatalog {
    pub fn new(settings: &PortalSettings) -> Self {
        let fallback = LocaleDescriptor::new(
            &settings.fallback_locale,
            &settings.fallback_locale_name,
            &settings.fallback_locale_name,
            &settings.fallback_locale.replace('_', "-"),
        );
        Self {
            by_brand: HashMap::new(),
            fallback: vec![fallback],
        }
    }

    /// Derive the registry from a brand snapshot
    pub fn from_brands(brands: &BrandCatalog, settings: &PortalSettings) -> Self {
        let mut catalog = Self::new(settings);
        for brand in brands.brands() {
            catalog.register(&brand.code, brand.locales.clone());
        }
        catalog
    }

    pub fn register(&mut self, brand: &str, locales: Vec<LocaleDescriptor>) {
        if locales.is_empty() {
            self.by_brand.remove(brand);
        } else {
            self.by_brand.insert(brand.to_string(), locales);
        }
    }

    pub fn locales_for(&self, brand: &str) -> &[LocaleDescriptor] {
        self.by_brand
            .get(brand)
            .map(Vec::as_slice)
            .unwrap_or(self.fallback.as_slice())
    }

    pub fn default_locale(&self, brand: &str) -> &LocaleDescriptor {
        &self.locales_for(brand)[0]
    }

    pub fn supports(&self, brand: &str, locale: &str) -> bool {
        self.locales_for(brand).iter().any(|l| l.code == locale)
    }

    /// Locale code registered for any brand, or the fallback locale
    pub fn is_known(&self, locale: &str) -> bool {
        self.fallback[0].code == locale
            || self
                .by_brand
                .values()
                .any(|locales| locales.iter().any(|l| l.code == locale))
    }
}
