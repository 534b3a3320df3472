//! Brand catalog payloads
//!
//! Shape of the per-brand configuration the portal receives from the brand
//! service: supported locales and the navigation menu of each brand.

use serde::{Deserialize, Deserializer, Serialize};

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Locale
// ============================================================================

/// Language/region supported by a brand, e.g. `en_GB`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDescriptor {
    pub code: String,

    #[serde(rename = "displayName", default, deserialize_with = "string_or_empty")]
    pub display_name: String,

    #[serde(rename = "nativeName", default, deserialize_with = "string_or_empty")]
    pub native_name: String,

    #[serde(rename = "isoCode", default, deserialize_with = "string_or_empty")]
    pub iso_code: String,
}

impl LocaleDescriptor {
    pub fn new(code: &str, display_name: &str, native_name: &str, iso_code: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            native_name: native_name.to_string(),
            iso_code: iso_code.to_string(),
        }
    }
}

// ============================================================================
// Menu
// ============================================================================

/// Raw navigation entry as configured for a brand.
///
/// `path` is the page slug without locale/brand prefix (`/products`).
/// Missing or `null` strings decode as empty so a malformed entry can be
/// dropped later instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub label: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub key: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub path: String,

    #[serde(default)]
    pub order: Option<i64>,

    #[serde(rename = "subMenus", default)]
    pub sub_menus: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn new(label: &str, key: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            path: path.to_string(),
            order: None,
            sub_menus: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_sub_menus(mut self, sub_menus: Vec<MenuEntry>) -> Self {
        self.sub_menus = sub_menus;
        self
    }

    /// Entry can be rendered and navigated to
    pub fn is_valid(&self) -> bool {
        !self.label.is_empty() && !self.key.is_empty() && !self.path.is_empty()
    }
}

// ============================================================================
// Brand
// ============================================================================

/// Brand configuration unit: logo/theme owner with its own locales and menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDescriptor {
    pub code: String,

    #[serde(rename = "displayName", default, deserialize_with = "string_or_empty")]
    pub display_name: String,

    #[serde(default)]
    pub locales: Vec<LocaleDescriptor>,

    #[serde(rename = "menuEntries", default)]
    pub menu_entries: Vec<MenuEntry>,
}

impl BrandDescriptor {
    pub fn new(code: &str, display_name: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            locales: Vec::new(),
            menu_entries: Vec::new(),
        }
    }

    pub fn with_locales(mut self, locales: Vec<LocaleDescriptor>) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_menu(mut self, menu_entries: Vec<MenuEntry>) -> Self {
        self.menu_entries = menu_entries;
        self
    }
}

/// Document returned by the brand service for one catalog refresh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandCatalogPayload {
    #[serde(default)]
    pub brands: Vec<BrandDescriptor>,
}

impl BrandCatalogPayload {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_decodes_camel_case_fields() {
        let json = r#"{
            "brands": [{
                "code": "kendo",
                "displayName": "Kendo",
                "locales": [
                    {"code": "en_GB", "displayName": "English (UK)", "nativeName": "English", "isoCode": "en-GB"}
                ],
                "menuEntries": [
                    {"label": "Products", "key": "products", "path": "/products", "order": 2,
                     "subMenus": [{"label": "Videos", "key": "videos", "path": "/videos"}]}
                ]
            }]
        }"#;

        let payload = BrandCatalogPayload::from_json(json).unwrap();
        let brand = &payload.brands[0];
        assert_eq!(brand.display_name, "Kendo");
        assert_eq!(brand.locales[0].iso_code, "en-GB");
        assert_eq!(brand.menu_entries[0].order, Some(2));
        assert_eq!(brand.menu_entries[0].sub_menus[0].key, "videos");
        assert_eq!(brand.menu_entries[0].sub_menus[0].order, None);
    }

    #[test]
    fn test_null_menu_fields_decode_as_invalid_entry() {
        let json = r#"{"label": null, "key": "k"}"#;
        let entry: MenuEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.label, "");
        assert_eq!(entry.path, "");
        assert!(!entry.is_valid());
    }

    #[test]
    fn test_menu_entry_validity() {
        assert!(MenuEntry::new("X", "k", "/x").is_valid());
        assert!(!MenuEntry::new("X", "", "/x").is_valid());
        assert!(!MenuEntry::new("", "k", "/x").is_valid());
        assert!(!MenuEntry::new("X", "k", "").is_valid());
    }

    #[test]
    fn test_malformed_payload_is_error() {
        assert!(BrandCatalogPayload::from_json("not json").is_err());
    }
}
