use serde::{Deserialize, Serialize};

/// Portal-wide fallbacks used whenever a request or the stored state does not
/// say otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// Brand used when the path carries no known brand
    pub fallback_brand: String,
    /// Locale served when a brand has no registered locales
    pub fallback_locale: String,
    pub fallback_locale_name: String,
    /// Page used to complete an incomplete path
    pub default_page: String,
    /// Tenant segment of the login URL when nothing better is known
    pub fallback_tenant: String,
    /// Page segment of the login URL (`/{tenant}/{login_page}`)
    pub login_page: String,
    /// Last resort when an admin page is denied
    pub admin_fallback_path: String,
}

/// Default settings embedded in the bundle
pub const DEFAULT_SETTINGS: &str = r#"{
    "fallback_brand": "kendo",
    "fallback_locale": "en_GB",
    "fallback_locale_name": "English (UK)",
    "default_page": "category",
    "fallback_tenant": "Kendo",
    "login_page": "Login",
    "admin_fallback_path": "/en/kendo/category"
}"#;

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            fallback_brand: "kendo".to_string(),
            fallback_locale: "en_GB".to_string(),
            fallback_locale_name: "English (UK)".to_string(),
            default_page: "category".to_string(),
            fallback_tenant: "Kendo".to_string(),
            login_page: "Login".to_string(),
            admin_fallback_path: "/en/kendo/category".to_string(),
        }
    }
}

impl PortalSettings {
    /// Parse a settings document; fields it omits keep their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_settings_match_defaults() {
        let settings = PortalSettings::from_json(DEFAULT_SETTINGS).unwrap();
        assert_eq!(settings, PortalSettings::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = PortalSettings::from_json(r#"{"fallback_brand": "acme"}"#).unwrap();
        assert_eq!(settings.fallback_brand, "acme");
        assert_eq!(settings.default_page, "category");
        assert_eq!(settings.admin_fallback_path, "/en/kendo/category");
    }
}
