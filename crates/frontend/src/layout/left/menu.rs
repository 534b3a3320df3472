//! Brand menu → locale-qualified navigation
//!
//! Menu entries come from the brand service and may be incomplete; entries
//! missing a label, key or path are dropped here and never reach the sidebar.

use contracts::domain::brand::{BrandDescriptor, MenuEntry};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::routes::resolver::RouteDescriptor;

pub const DEFAULT_ICON: &str = "menu";

static MENU_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("home", "home"),
        ("category", "category"),
        ("products", "inventory"),
        ("medias", "perm_media"),
        ("accessory", "extension"),
        ("accessories", "extension"),
        ("videos", "video_library"),
        ("brand-book", "menu_book"),
        ("after-sales-service", "support_agent"),
        ("training", "school"),
        ("admin", "admin_panel_settings"),
    ])
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub key: String,
    /// Full in-app path, `/{locale}/{brand}/{page}`
    pub path: String,
    pub icon: &'static str,
    pub order: i64,
    pub children: Vec<NavItem>,
}

pub fn icon_for(key: &str) -> &'static str {
    MENU_ICONS.get(key).copied().unwrap_or(DEFAULT_ICON)
}

/// Navigation for `brand` in `locale`, sorted by `order`.
///
/// Entries without an explicit order take their 1-based position among the
/// valid entries. Sub-menus are projected one level deep.
pub fn project(brand: &BrandDescriptor, locale: &str) -> Vec<NavItem> {
    project_level(&brand.menu_entries, locale, &brand.code, true)
}

fn project_level(entries: &[MenuEntry], locale: &str, brand: &str, nested: bool) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = entries
        .iter()
        .filter(|entry| {
            if !entry.is_valid() {
                log::debug!("Dropping menu entry '{}' of brand '{}'", entry.key, brand);
            }
            entry.is_valid()
        })
        .enumerate()
        .map(|(position, entry)| NavItem {
            label: entry.label.clone(),
            key: entry.key.clone(),
            path: qualified_path(locale, brand, &entry.path),
            icon: icon_for(&entry.key),
            order: entry.order.unwrap_or(position as i64 + 1),
            children: if nested {
                project_level(&entry.sub_menus, locale, brand, false)
            } else {
                Vec::new()
            },
        })
        .collect();

    // stable: equal orders keep their input position
    items.sort_by_key(|item| item.order);
    items
}

fn qualified_path(locale: &str, brand: &str, page_path: &str) -> String {
    if page_path.starts_with('/') {
        format!("/{}/{}{}", locale, brand, page_path)
    } else {
        format!("/{}/{}/{}", locale, brand, page_path)
    }
}

/// Key of the item (or sub-item) pointing at the current route
pub fn active_key(nav: &[NavItem], route: &RouteDescriptor) -> Option<String> {
    let page = route.page.as_deref()?;
    let current = format!("/{}/{}/{}", route.locale, route.brand, page);

    nav.iter().find_map(|item| {
        item.children
            .iter()
            .find(|child| child.path == current)
            .or_else(|| (item.path == current).then_some(item))
            .map(|hit| hit.key.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand(entries: Vec<MenuEntry>) -> BrandDescriptor {
        BrandDescriptor::new("kendo", "Kendo").with_menu(entries)
    }

    fn keys(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let nav = project(
            &brand(vec![
                MenuEntry::new("X", "", "/x"),
                MenuEntry::new("X", "k", "/x"),
                MenuEntry::new("", "l", "/l"),
                MenuEntry::new("Y", "y", ""),
            ]),
            "en_GB",
        );

        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].key, "k");
        assert_eq!(nav[0].path, "/en_GB/kendo/x");
    }

    #[test]
    fn test_sorted_by_explicit_order() {
        let nav = project(
            &brand(vec![
                MenuEntry::new("C", "c", "/c").with_order(3),
                MenuEntry::new("A", "a", "/a").with_order(1),
                MenuEntry::new("B", "b", "/b").with_order(2),
            ]),
            "en_GB",
        );
        assert_eq!(keys(&nav), vec!["a", "b", "c"]);
        assert_eq!(nav.iter().map(|i| i.order).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_order_uses_filtered_position() {
        let nav = project(
            &brand(vec![
                MenuEntry::new("Bad", "", "/bad"),
                MenuEntry::new("First", "first", "/first"),
                MenuEntry::new("Second", "second", "/second"),
                MenuEntry::new("Early", "early", "/early").with_order(1),
            ]),
            "zh_CN",
        );

        // first → 1, second → 2, early → 1 (ties keep input order)
        assert_eq!(keys(&nav), vec!["first", "early", "second"]);
        assert_eq!(nav[0].order, 1);
        assert_eq!(nav[2].order, 2);
    }

    #[test]
    fn test_icons_default_to_menu() {
        let nav = project(
            &brand(vec![
                MenuEntry::new("Videos", "videos", "/videos"),
                MenuEntry::new("Promo", "promo", "/promo"),
            ]),
            "en_GB",
        );
        assert_eq!(nav[0].icon, "video_library");
        assert_eq!(nav[1].icon, "menu");
    }

    #[test]
    fn test_sub_menus_projected_one_level() {
        let nested = MenuEntry::new("Deep", "deep", "/deep");
        let nav = project(
            &brand(vec![MenuEntry::new("Media", "medias", "/medias").with_sub_menus(vec![
                MenuEntry::new("Clips", "videos", "/videos")
                    .with_order(2)
                    .with_sub_menus(vec![nested]),
                MenuEntry::new("", "broken", "/broken"),
                MenuEntry::new("Books", "brand-book", "brand-book").with_order(1),
            ])]),
            "fr_FR",
        );

        let children = &nav[0].children;
        assert_eq!(keys(children), vec!["brand-book", "videos"]);
        assert_eq!(children[0].path, "/fr_FR/kendo/brand-book");
        assert_eq!(children[1].path, "/fr_FR/kendo/videos");
        assert!(children[1].children.is_empty());
    }

    #[test]
    fn test_empty_menu_projects_to_nothing() {
        assert!(project(&brand(vec![]), "en_GB").is_empty());
        assert!(project(&brand(vec![MenuEntry::default()]), "en_GB").is_empty());
    }

    #[test]
    fn test_active_key_matches_route() {
        let nav = project(
            &brand(vec![
                MenuEntry::new("Home", "home", "/home"),
                MenuEntry::new("Media", "medias", "/medias")
                    .with_sub_menus(vec![MenuEntry::new("Videos", "videos", "/videos")]),
            ]),
            "en_GB",
        );

        let route = |page: Option<&str>| RouteDescriptor::new("en_GB", "kendo", page);
        assert_eq!(active_key(&nav, &route(Some("home"))).as_deref(), Some("home"));
        assert_eq!(active_key(&nav, &route(Some("videos"))).as_deref(), Some("videos"));
        assert_eq!(active_key(&nav, &route(Some("training"))), None);
        assert_eq!(active_key(&nav, &route(None)), None);
    }
}
