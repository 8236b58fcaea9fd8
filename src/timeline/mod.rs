pub mod cache;
pub mod locator;
