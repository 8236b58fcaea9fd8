pub mod actor;
pub mod document;
pub mod stage;
