pub mod catalog;
pub mod config;
pub mod fallback;
pub mod icons;
