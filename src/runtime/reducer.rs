use crate::runtime::effect::Effect;
use crate::runtime::event::FormEvent;
use crate::state::form::{FormState, SubmitOutcome};

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut FormState, event: FormEvent) -> Vec<Effect> {
        let mut effects = match event {
            FormEvent::Change { field, value } => {
                state.handle_change(field, value);
                vec![Effect::RequestRender]
            }
            FormEvent::Blur { field } => {
                state.handle_blur(field);
                vec![Effect::RequestRender]
            }
            FormEvent::Submit => match state.handle_submit() {
                SubmitOutcome::Proceed(snapshot) => {
                    vec![Effect::ReportSubmission(snapshot), Effect::RequestRender]
                }
                SubmitOutcome::Invalid => vec![Effect::RequestRender],
                SubmitOutcome::Busy => vec![],
            },
            FormEvent::SubmissionTimerFired => {
                if state.complete_submission() {
                    vec![Effect::RequestRender]
                } else {
                    vec![]
                }
            }
            FormEvent::ResetTimerFired => {
                state.reset();
                vec![Effect::RequestRender]
            }
        };

        // Timers go first so a failing report can cancel the one it armed.
        let mut ordered: Vec<Effect> = state
            .take_pending_scheduler_commands()
            .into_iter()
            .map(Effect::Schedule)
            .collect();
        ordered.append(&mut effects);

        ordered
    }
}
