use crate::config::FormConfig;
use crate::core::Field;
use crate::runtime::effect::Effect;
use crate::runtime::event::FormEvent;
use crate::runtime::reducer::Reducer;
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::sink::{LogSink, SubmissionSink};
use crate::state::form::FormState;
use crate::view::RenderModel;
use std::time::{Duration, Instant};
use tracing::debug;

/// Owns the form state, its timers and the submission sink.
///
/// Timers live in the controller's [`Scheduler`] and only fire through
/// [`FormController::tick`]. Dropping the controller disarms them.
pub struct FormController<S: SubmissionSink = LogSink> {
    state: FormState,
    scheduler: Scheduler,
    sink: S,
    render_requested: bool,
    torn_down: bool,
}

impl FormController<LogSink> {
    pub fn new(config: &FormConfig) -> Self {
        Self::with_sink(config, LogSink)
    }
}

impl<S: SubmissionSink> FormController<S> {
    pub fn with_sink(config: &FormConfig, sink: S) -> Self {
        Self {
            state: FormState::new(config),
            scheduler: Scheduler::new(),
            sink,
            render_requested: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn render_model(&self) -> RenderModel {
        RenderModel::from_state(&self.state)
    }

    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch_at(FormEvent::change(field, value), Instant::now());
    }

    pub fn blur(&mut self, field: Field) {
        self.dispatch_at(FormEvent::blur(field), Instant::now());
    }

    pub fn submit(&mut self) {
        self.dispatch_at(FormEvent::Submit, Instant::now());
    }

    /// Runs one event through the reducer with `now` as the scheduling clock.
    pub fn dispatch_at(&mut self, event: FormEvent, now: Instant) {
        if self.torn_down {
            debug!(?event, "event after teardown ignored");
            return;
        }
        let effects = Reducer::reduce(&mut self.state, event);
        self.apply_effects(effects, now);
    }

    /// Fires every timer due at `now`. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        for event in self.scheduler.drain_ready(now) {
            self.dispatch_at(event, now);
        }
        self.take_render_request()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn has_pending_timers(&self) -> bool {
        self.scheduler.pending() > 0
    }

    /// Disarms all timers. Later events and ticks are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler
            .schedule(SchedulerCommand::CancelAll, Instant::now());
        self.torn_down = true;
        debug!("form controller torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::Schedule(cmd) => {
                    self.scheduler.schedule(cmd, now);
                }
                Effect::ReportSubmission(snapshot) => {
                    if let Err(error) = self.sink.submit(&snapshot) {
                        self.state.fail_submission(&error);
                        for cmd in self.state.take_pending_scheduler_commands() {
                            self.scheduler.schedule(cmd, now);
                        }
                        self.render_requested = true;
                    }
                }
                Effect::RequestRender => {
                    self.render_requested = true;
                }
            }
        }
    }
}

impl<S: SubmissionSink> Drop for FormController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
