pub mod focus;
pub mod form;

pub use focus::{FocusState, FocusTarget};
pub use form::{FormState, Phase, SubmitOutcome};
