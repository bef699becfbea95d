pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod runtime;
pub mod sink;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod view;

pub use app::FormApp;
pub use config::FormConfig;
pub use crate::core::{Field, FormData, FormErrors, TouchedFields};
pub use error::{AppError, ConfigError, SubmissionError};
pub use runtime::{FormController, FormEvent};
pub use sink::{LogSink, RecordingSink, SubmissionSink};
pub use state::{FormState, Phase};
pub use view::RenderModel;
