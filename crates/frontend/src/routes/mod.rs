pub mod navigator;
pub mod pages;
pub mod policy;
pub mod resolver;
pub mod routes;
