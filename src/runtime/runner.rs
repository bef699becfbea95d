use crate::app::FormApp;
use crate::sink::SubmissionSink;
use crate::terminal::{Terminal, TerminalEvent};
use std::io;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(120);

pub struct Runtime<S: SubmissionSink> {
    app: FormApp<S>,
    terminal: Terminal,
}

impl<S: SubmissionSink> Runtime<S> {
    pub fn new(app: FormApp<S>, terminal: Terminal) -> Self {
        Self { app, terminal }
    }

    pub fn app(&self) -> &FormApp<S> {
        &self.app
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.app.should_exit() {
                let now = Instant::now();
                if self.app.tick(now) {
                    self.render()?;
                }

                let timeout = self.app.poll_timeout(Instant::now(), IDLE_POLL);
                let event = self.terminal.poll_event(timeout)?;
                self.dispatch_terminal_event(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn dispatch_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                self.app.handle_key(key, Instant::now());
                if self.app.take_render_request() {
                    self.render()?;
                }
                Ok(())
            }
            TerminalEvent::Tick => Ok(()),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.app.render();
        self.terminal.render_frame(&frame)
    }
}
