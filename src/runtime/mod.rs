pub mod command;
pub mod controller;
pub mod effect;
pub mod event;
pub mod key_bindings;
pub mod reducer;
pub mod runner;
pub mod scheduler;

pub use controller::FormController;
pub use effect::Effect;
pub use event::FormEvent;
pub use reducer::Reducer;
pub use runner::Runtime;
