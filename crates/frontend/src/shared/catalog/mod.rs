//! Brand and locale registries consulted by route resolution

pub mod brand_catalog;
pub mod locale_catalog;

pub use brand_catalog::BrandCatalog;
pub use locale_catalog::LocaleCatalog;
