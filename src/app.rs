use std::time::{Duration, Instant};

use crate::config::FormConfig;
use crate::runtime::command::Command;
use crate::runtime::controller::FormController;
use crate::runtime::event::FormEvent;
use crate::runtime::key_bindings::KeyBindings;
use crate::sink::SubmissionSink;
use crate::state::focus::{FocusState, FocusTarget};
use crate::terminal::KeyEvent;
use crate::ui::renderer::{RenderFrame, Renderer};
use crate::view::render_model_to_json;

/// Terminal-facing shell around a [`FormController`]: turns keys into
/// form events and keeps track of which input has focus.
pub struct FormApp<S: SubmissionSink> {
    controller: FormController<S>,
    focus: FocusState,
    key_bindings: KeyBindings,
    title: String,
    focus_moved: bool,
    should_exit: bool,
}

impl<S: SubmissionSink> FormApp<S> {
    pub fn new(config: &FormConfig, sink: S) -> Self {
        Self {
            controller: FormController::with_sink(config, sink),
            focus: FocusState::default(),
            key_bindings: KeyBindings::new(),
            title: config.title.clone(),
            focus_moved: false,
            should_exit: false,
        }
    }

    pub fn controller(&self) -> &FormController<S> {
        &self.controller
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let command = self.key_bindings.resolve(key);
        self.process_command(command, now);
    }

    pub fn process_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Exit => {
                self.should_exit = true;
                self.controller.teardown();
            }
            Command::Submit => self.controller.dispatch_at(FormEvent::Submit, now),
            Command::NextFocus => {
                let left = self.focus.next();
                self.focus_moved = true;
                self.blur_target(left, now);
            }
            Command::PrevFocus => {
                let left = self.focus.prev();
                self.focus_moved = true;
                self.blur_target(left, now);
            }
            Command::InsertChar(ch) => {
                self.edit_focused(now, |value| value.push(ch));
            }
            Command::DeleteBackward => {
                self.edit_focused(now, |value| {
                    value.pop();
                });
            }
            Command::Noop => {}
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(now)
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.controller.poll_timeout(now, default_timeout)
    }

    pub fn take_render_request(&mut self) -> bool {
        let focus_moved = std::mem::take(&mut self.focus_moved);
        self.controller.take_render_request() || focus_moved
    }

    pub fn render(&self) -> RenderFrame {
        Renderer::render(&self.controller.render_model(), &self.focus, &self.title)
    }

    /// The current render model as JSON, for `--dump-json`.
    pub fn snapshot_json(&self) -> serde_json::Value {
        render_model_to_json(&self.controller.render_model())
    }

    fn blur_target(&mut self, target: FocusTarget, now: Instant) {
        if let Some(field) = target.field() {
            self.controller.dispatch_at(FormEvent::blur(field), now);
        }
    }

    fn edit_focused(&mut self, now: Instant, edit: impl FnOnce(&mut String)) {
        let Some(field) = self.focus.focused_field() else {
            return;
        };
        let mut value = self.controller.state().values().get(field).to_string();
        edit(&mut value);
        self.controller
            .dispatch_at(FormEvent::change(field, value), now);
    }
}

#[cfg(test)]
mod tests {
    use super::FormApp;
    use crate::config::FormConfig;
    use crate::core::Field;
    use crate::runtime::command::Command;
    use crate::sink::RecordingSink;
    use crate::terminal::{KeyCode, KeyEvent};
    use std::time::{Duration, Instant};

    fn type_text(app: &mut FormApp<RecordingSink>, text: &str, now: Instant) {
        for ch in text.chars() {
            app.handle_key(KeyEvent::plain(KeyCode::Char(ch)), now);
        }
    }

    #[test]
    fn tab_blurs_the_field_being_left() {
        let mut app = FormApp::new(&FormConfig::default(), RecordingSink::new());
        let now = Instant::now();

        app.handle_key(KeyEvent::plain(KeyCode::Tab), now);
        let state = app.controller().state();
        assert!(state.touched().get(Field::FirstName));
        assert_eq!(
            state.visible_error(Field::FirstName),
            Some("First name is required")
        );
        assert_eq!(app.focus().focused_field(), Some(Field::LastName));
    }

    #[test]
    fn typing_and_backspace_edit_the_focused_field() {
        let mut app = FormApp::new(&FormConfig::default(), RecordingSink::new());
        let now = Instant::now();

        type_text(&mut app, "Janex", now);
        app.handle_key(KeyEvent::plain(KeyCode::Backspace), now);
        assert_eq!(app.controller().state().values().first_name, "Jane");
    }

    #[test]
    fn keyboard_flow_submits_and_resets() {
        let sink = RecordingSink::new();
        let mut app = FormApp::new(&FormConfig::default(), sink.clone());
        let start = Instant::now();

        type_text(&mut app, "Jane", start);
        app.process_command(Command::NextFocus, start);
        type_text(&mut app, "Doe", start);
        app.process_command(Command::NextFocus, start);
        type_text(&mut app, "jane@doe.com", start);
        app.handle_key(KeyEvent::plain(KeyCode::Enter), start);

        assert_eq!(sink.count(), 1);
        assert!(app.tick(start + Duration::from_millis(500)));
        assert!(app.controller().state().is_submitted());

        app.tick(start + Duration::from_millis(3500));
        assert!(app.controller().state().values().is_empty());
    }

    #[test]
    fn snapshot_json_reflects_typed_values_and_errors() {
        let mut app = FormApp::new(&FormConfig::default(), RecordingSink::new());
        let now = Instant::now();

        type_text(&mut app, "Jane", now);
        app.process_command(Command::NextFocus, now);
        app.process_command(Command::NextFocus, now);

        let json = app.snapshot_json();
        assert_eq!(json["fields"][0]["value"], "Jane");
        assert_eq!(json["fields"][1]["error"], "Last name is required");
        assert_eq!(json["submit"]["label"], "Submit");
    }

    #[test]
    fn exit_tears_down_controller() {
        let mut app = FormApp::new(&FormConfig::default(), RecordingSink::new());
        app.handle_key(KeyEvent::plain(KeyCode::Esc), Instant::now());
        assert!(app.should_exit());
        assert!(app.controller().is_torn_down());
    }
}
