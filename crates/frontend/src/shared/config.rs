use contracts::shared::settings::{PortalSettings, DEFAULT_SETTINGS};

/// Load portal settings.
///
/// Search order:
/// 1. `override_json`, when the host page supplies one
/// 2. The embedded default settings
pub fn load_settings(override_json: Option<&str>) -> PortalSettings {
    if let Some(json) = override_json {
        match PortalSettings::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded portal settings override");
                return settings;
            }
            Err(e) => log::warn!("Ignoring invalid portal settings override: {}", e),
        }
    }

    PortalSettings::from_json(DEFAULT_SETTINGS).unwrap_or_default()
}

/// Settings document the host page may inline as `window.__PORTAL_SETTINGS__`
pub fn host_settings_json() -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &"__PORTAL_SETTINGS__".into())
        .ok()?
        .as_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_load() {
        let settings = load_settings(None);
        assert_eq!(settings.fallback_brand, "kendo");
        assert_eq!(settings.fallback_locale, "en_GB");
    }

    #[test]
    fn test_override_applies() {
        let settings = load_settings(Some(r#"{"fallback_tenant": "Acme"}"#));
        assert_eq!(settings.fallback_tenant, "Acme");
        assert_eq!(settings.fallback_brand, "kendo");
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let settings = load_settings(Some("{not json"));
        assert_eq!(settings, PortalSettings::default());
    }
}
