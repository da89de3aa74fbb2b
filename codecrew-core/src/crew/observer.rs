//! Progress callbacks for crew execution

use crate::Error;

use super::{CrewOutput, TaskOutput};

/// Handler for crew progress events
///
/// Every method has a no-op default so handlers override only what they need.
pub trait CrewObserver: Send {
    /// Called once before the first task runs
    fn on_kickoff(&mut self, _total_tasks: usize) {}

    /// Called before a task is sent to the model
    fn on_task_start(&mut self, _index: usize, _role: &str) {}

    /// Called when a task returns output
    fn on_task_complete(&mut self, _index: usize, _output: &TaskOutput) {}

    /// Called when a task fails
    fn on_task_failed(&mut self, _index: usize, _role: &str, _error: &Error) {}

    /// Called once after the run produced an output
    fn on_finish(&mut self, _output: &CrewOutput) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CrewObserver for NoopObserver {}
