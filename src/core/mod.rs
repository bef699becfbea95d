pub mod field;
pub mod validation;

pub use field::{Field, FormData, FormErrors, TouchedFields};
