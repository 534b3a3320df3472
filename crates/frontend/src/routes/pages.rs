use contracts::shared::settings::PortalSettings;

use super::resolver::path_segments;

/// Pages the portal knows how to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Category,
    Home,
    Products,
    Medias,
    Accessory,
    Videos,
    BrandBook,
    Accessories,
    AfterSalesService,
    Training,
    /// Admin area with its optional sub-page (`admin/users`)
    Admin(Option<String>),
    /// Well-formed slug without a matching screen
    Unknown(String),
}

impl Page {
    pub fn from_slug(slug: &str, sub_page: Option<&str>) -> Self {
        match slug {
            "category" => Page::Category,
            "home" => Page::Home,
            "products" => Page::Products,
            "medias" => Page::Medias,
            "accessory" => Page::Accessory,
            "videos" => Page::Videos,
            "brand-book" => Page::BrandBook,
            "accessories" => Page::Accessories,
            "after-sales-service" => Page::AfterSalesService,
            "training" => Page::Training,
            "admin" => Page::Admin(sub_page.map(str::to_string)),
            other => Page::Unknown(other.to_string()),
        }
    }

    /// Page addressed by a full path; `None` when the path has no page segment
    pub fn from_path(raw_path: &str) -> Option<Self> {
        let segments = path_segments(raw_path);
        let slug = segments.get(2)?;
        Some(Self::from_slug(slug, segments.get(3).copied()))
    }

    pub fn slug(&self) -> &str {
        match self {
            Page::Category => "category",
            Page::Home => "home",
            Page::Products => "products",
            Page::Medias => "medias",
            Page::Accessory => "accessory",
            Page::Videos => "videos",
            Page::BrandBook => "brand-book",
            Page::Accessories => "accessories",
            Page::AfterSalesService => "after-sales-service",
            Page::Training => "training",
            Page::Admin(_) => "admin",
            Page::Unknown(slug) => slug,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Category => "Categories",
            Page::Home => "Home",
            Page::Products => "Products",
            Page::Medias => "Media library",
            Page::Accessory => "Accessory",
            Page::Videos => "Videos",
            Page::BrandBook => "Brand book",
            Page::Accessories => "Accessories",
            Page::AfterSalesService => "After-sales service",
            Page::Training => "Training",
            Page::Admin(_) => "Administration",
            Page::Unknown(_) => "Page not found",
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Page::Admin(_))
    }
}

/// `/{tenant}/{login_page}`: the only page open to anonymous visitors
pub fn is_login_path(raw_path: &str, settings: &PortalSettings) -> bool {
    match path_segments(raw_path).as_slice() {
        [_tenant, page] => page.eq_ignore_ascii_case(&settings.login_page),
        _ => false,
    }
}
