use contracts::domain::brand::{BrandCatalogPayload, BrandDescriptor};
use std::collections::{HashMap, HashSet};

/// Immutable snapshot of the brand configuration.
///
/// The loader builds a new snapshot on every refresh and swaps it in with
/// [`BrandCatalog::replace`]; a snapshot is never patched in place, so one
/// brand's menu and locales always come from the same fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandCatalog {
    brands: Vec<BrandDescriptor>,
    index: HashMap<String, usize>,
}

impl BrandCatalog {
    pub fn new(brands: Vec<BrandDescriptor>) -> Self {
        let mut kept = Vec::with_capacity(brands.len());
        let mut index = HashMap::new();

        for mut brand in brands {
            if brand.code.is_empty() {
                log::warn!("Skipping brand without code: '{}'", brand.display_name);
                continue;
            }
            if index.contains_key(&brand.code) {
                log::warn!("Duplicate brand '{}' ignored", brand.code);
                continue;
            }

            let mut seen = HashSet::new();
            brand.locales.retain(|locale| {
                let fresh = seen.insert(locale.code.clone());
                if !fresh {
                    log::warn!("Duplicate locale '{}' in brand '{}'", locale.code, brand.code);
                }
                fresh
            });

            index.insert(brand.code.clone(), kept.len());
            kept.push(brand);
        }

        Self {
            brands: kept,
            index,
        }
    }

    pub fn from_payload(payload: BrandCatalogPayload) -> Self {
        Self::new(payload.brands)
    }

    pub fn brands(&self) -> &[BrandDescriptor] {
        &self.brands
    }

    pub fn brand(&self, code: &str) -> Option<&BrandDescriptor> {
        self.index.get(code).map(|&i| &self.brands[i])
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// `preferred` when this snapshot has it (or nothing is loaded yet),
    /// else the first brand of the snapshot
    pub fn fallback_code<'a>(&'a self, preferred: &'a str) -> &'a str {
        if self.is_known(preferred) {
            return preferred;
        }
        match self.brands.first() {
            Some(first) => {
                log::debug!("Fallback brand '{}' not loaded; using '{}'", preferred, first.code);
                first.code.as_str()
            }
            None => preferred,
        }
    }

    /// No snapshot loaded yet
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Swap in a freshly fetched snapshot
    pub fn replace(&mut self, next: BrandCatalog) {
        *self = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::brand::{LocaleDescriptor, MenuEntry};

    fn locale(code: &str) -> LocaleDescriptor {
        LocaleDescriptor::new(code, code, code, code)
    }

    #[test]
    fn test_lookup_by_code() {
        let catalog = BrandCatalog::new(vec![
            BrandDescriptor::new("kendo", "Kendo"),
            BrandDescriptor::new("acme", "Acme"),
        ]);

        assert_eq!(catalog.brands().len(), 2);
        assert_eq!(catalog.brand("acme").map(|b| b.display_name.as_str()), Some("Acme"));
        assert!(catalog.brand("unknown").is_none());
        assert!(catalog.is_known("kendo"));
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let catalog = BrandCatalog::new(vec![
            BrandDescriptor::new("kendo", "First")
                .with_locales(vec![locale("en_GB"), locale("fr_FR"), locale("en_GB")]),
            BrandDescriptor::new("kendo", "Second"),
            BrandDescriptor::new("", "Nameless"),
        ]);

        let brand = catalog.brand("kendo").unwrap();
        assert_eq!(brand.display_name, "First");
        let codes: Vec<_> = brand.locales.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en_GB", "fr_FR"]);
        assert_eq!(catalog.brands().len(), 1);
    }

    #[test]
    fn test_replace_discards_previous_snapshot() {
        let mut catalog = BrandCatalog::new(vec![BrandDescriptor::new("kendo", "Kendo")
            .with_menu(vec![MenuEntry::new("Old", "old", "/old")])]);

        catalog.replace(BrandCatalog::new(vec![BrandDescriptor::new("acme", "Acme")]));

        assert!(catalog.brand("kendo").is_none());
        assert!(catalog.is_known("acme"));
    }

    #[test]
    fn test_from_payload() {
        let payload = BrandCatalogPayload::from_json(
            r#"{"brands": [{"code": "kendo", "displayName": "Kendo"}]}"#,
        )
        .unwrap();
        assert!(BrandCatalog::from_payload(payload).is_known("kendo"));
        assert!(BrandCatalog::default().is_empty());
    }

    #[test]
    fn test_fallback_code_prefers_loaded_brand() {
        let catalog = BrandCatalog::new(vec![
            BrandDescriptor::new("acme", "Acme"),
            BrandDescriptor::new("globex", "Globex"),
        ]);
        assert_eq!(catalog.fallback_code("globex"), "globex");
        assert_eq!(catalog.fallback_code("kendo"), "acme");
        assert_eq!(BrandCatalog::default().fallback_code("kendo"), "kendo");
    }
}
