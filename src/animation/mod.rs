pub mod chain;
pub mod ease;
pub mod interp;
pub mod value;
