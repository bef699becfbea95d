use crate::core::FormData;
use crate::runtime::scheduler::SchedulerCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Schedule(SchedulerCommand),
    /// Hand the validated snapshot to the submission sink.
    ReportSubmission(FormData),
    RequestRender,
}
