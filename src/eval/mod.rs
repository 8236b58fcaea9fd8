pub mod applicator;
pub mod opts;
pub mod resolver;
