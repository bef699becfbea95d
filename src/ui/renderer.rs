use crate::core::Field;
use crate::state::focus::{FocusState, FocusTarget};
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::view::RenderModel;
use unicode_width::UnicodeWidthStr;

const INPUT_INDENT: &str = "  ";
const FOCUS_MARKER: &str = "> ";
const HELP_TEXT: &str = "Tab/Shift-Tab move · Enter submit · Esc quit";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl RenderFrame {
    fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    fn row(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }
}

pub struct Renderer;

impl Renderer {
    pub fn render(model: &RenderModel, focus: &FocusState, title: &str) -> RenderFrame {
        let mut frame = RenderFrame::default();

        frame.push(vec![Span::styled(title, Style::new().color(Color::Cyan).bold())]);
        frame.push(vec![Span::styled(
            "Please fill in your information below",
            Style::new().color(Color::DarkGrey),
        )]);
        frame.push(vec![]);

        if let Some(message) = model.success_message() {
            frame.push(vec![Span::styled(
                format!("✓ {message}"),
                Style::new().color(Color::Green),
            )]);
            frame.push(vec![]);
        }
        if let Some(error) = model.form_error.as_deref() {
            frame.push(vec![Span::styled(error, Style::new().color(Color::Red))]);
            frame.push(vec![]);
        }

        for field in Field::ALL {
            let focused = focus.current() == FocusTarget::Field(field);
            render_field(&mut frame, model, field, focused);
        }

        frame.push(vec![]);
        let submit_focused = focus.current() == FocusTarget::SubmitButton;
        let submit_style = if !model.submit_enabled() {
            Style::new().color(Color::DarkGrey)
        } else if submit_focused {
            Style::new().color(Color::Cyan).bold()
        } else {
            Style::new().color(Color::White)
        };
        let marker = if submit_focused { FOCUS_MARKER } else { INPUT_INDENT };
        frame.push(vec![
            Span::new(marker),
            Span::styled(format!("[ {} ]", model.submit_label()), submit_style),
        ]);

        frame.push(vec![]);
        frame.push(vec![Span::styled(
            HELP_TEXT,
            Style::new().color(Color::DarkGrey),
        )]);

        frame
    }
}

fn render_field(frame: &mut RenderFrame, model: &RenderModel, field: Field, focused: bool) {
    let error = model.error_for(field);

    frame.push(vec![
        Span::styled(field.label(), Style::new().bold()),
        Span::styled(" *", Style::new().color(Color::Red)),
    ]);

    let value = model.values.get(field);
    let marker = if focused { FOCUS_MARKER } else { INPUT_INDENT };
    let mut line = vec![Span::new(marker)];
    if value.is_empty() {
        line.push(Span::styled(
            field.placeholder(),
            Style::new().color(Color::DarkGrey),
        ));
    } else {
        let style = if error.is_some() {
            Style::new().color(Color::Red)
        } else {
            Style::new()
        };
        line.push(Span::styled(value, style));
    }

    if focused {
        let col = UnicodeWidthStr::width(marker) + UnicodeWidthStr::width(value);
        frame.cursor = Some(CursorPos {
            col: col.min(u16::MAX as usize) as u16,
            row: frame.row(),
        });
    }
    frame.push(line);

    if let Some(message) = error {
        frame.push(vec![Span::styled(
            format!("{INPUT_INDENT}{message}"),
            Style::new().color(Color::Red),
        )]);
    }
}
