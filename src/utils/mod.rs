pub mod extract;
pub mod validation;
