//! Crew orchestration
//!
//! A crew is a set of agents plus the tasks assigned to them. `kickoff` runs
//! the tasks sequentially, one model call per task, optionally passing the
//! outputs of earlier tasks to later ones, and combines the results.

mod observer;
mod output;
mod process;
mod task;

pub use observer::{CrewObserver, NoopObserver};
pub use output::CrewOutput;
pub use process::{FailurePolicy, Process};
pub use task::{create_task, Task, TaskFailure, TaskOutput};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::{Error, Result};

use output::{combine, TaskResult};

/// Agents and the tasks assigned to them
#[derive(Debug, Clone)]
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
    share_context: bool,
    failure_policy: FailurePolicy,
}

impl Crew {
    /// Create a crew with sequential, context-sharing, fail-fast execution
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Self {
        Self {
            agents,
            tasks,
            process: Process::default(),
            share_context: true,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Set the scheduling process
    pub fn with_process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    /// Pass earlier outputs to later tasks
    pub fn with_share_context(mut self, share: bool) -> Self {
        self.share_context = share;
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// The crew's agents
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The crew's tasks, in execution order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The failure policy in effect
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Check that the crew can run
    ///
    /// There must be at least one task and every task's agent must be a
    /// member of the crew.
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(Error::Crew("crew has no tasks".to_string()));
        }

        for task in &self.tasks {
            let role = task.agent().role();
            if !self.agents.iter().any(|a| a.role() == role) {
                return Err(Error::Crew(format!(
                    "task is assigned to '{}', which is not a member of the crew",
                    role
                )));
            }
        }

        Ok(())
    }

    /// Run every task and return the combined output
    pub async fn kickoff(&self) -> Result<CrewOutput> {
        self.kickoff_with(&mut NoopObserver).await
    }

    /// Run every task, reporting progress to `observer`
    pub async fn kickoff_with<O: CrewObserver>(&self, observer: &mut O) -> Result<CrewOutput> {
        self.validate()?;

        let model = self
            .tasks
            .first()
            .map(|t| t.agent().llm().model().to_string())
            .unwrap_or_default();

        info!(
            tasks = self.tasks.len(),
            process = ?self.process,
            policy = %self.failure_policy,
            model = %model,
            "Crew kickoff"
        );

        let started_at = Utc::now();
        observer.on_kickoff(self.tasks.len());

        let results = match self.process {
            Process::Sequential => self.run_sequential(observer).await?,
        };

        let output = self.finish(results, model, started_at)?;

        info!(
            completed = output.tasks.len(),
            failed = output.failures.len(),
            tokens = output.token_usage().total_tokens,
            "Crew finished"
        );

        observer.on_finish(&output);
        Ok(output)
    }

    async fn run_sequential<O: CrewObserver>(&self, observer: &mut O) -> Result<Vec<TaskResult>> {
        let mut results = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = task.agent();
            let role = agent.role().to_string();

            let prior: Vec<(String, String)> = if self.share_context {
                results
                    .iter()
                    .filter_map(|r| match r {
                        TaskResult::Done(o) => Some((o.role.clone(), o.raw.clone())),
                        TaskResult::Failed(_) => None,
                    })
                    .collect()
            } else {
                Vec::new()
            };

            debug!(index, role = %role, context = prior.len(), "Running task");
            observer.on_task_start(index, &role);

            let system = agent.system_prompt();
            let prompt = task.prompt(&prior);

            match agent.llm().complete(&system, &prompt).await {
                Ok(completion) => {
                    let output = TaskOutput {
                        role,
                        description: task.description().to_string(),
                        raw: completion.text,
                        usage: completion.usage,
                    };
                    observer.on_task_complete(index, &output);
                    results.push(TaskResult::Done(output));
                }
                Err(err) => {
                    warn!(index, role = %role, error = %err, "Task failed");
                    observer.on_task_failed(index, &role, &err);

                    match self.failure_policy {
                        FailurePolicy::FailFast => return Err(err),
                        FailurePolicy::Partial => results.push(TaskResult::Failed(TaskFailure {
                            role,
                            reason: err.to_string(),
                        })),
                    }
                }
            }
        }

        Ok(results)
    }

    fn finish(
        &self,
        results: Vec<TaskResult>,
        model: String,
        started_at: chrono::DateTime<Utc>,
    ) -> Result<CrewOutput> {
        let raw = combine(&results);

        let mut tasks = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                TaskResult::Done(output) => tasks.push(output),
                TaskResult::Failed(failure) => failures.push(failure),
            }
        }

        if tasks.is_empty() {
            let first = failures
                .first()
                .map(|f| format!("{}: {}", f.role, f.reason))
                .unwrap_or_default();
            return Err(Error::Crew(format!(
                "all {} review tasks failed (first error - {})",
                failures.len(),
                first
            )));
        }

        Ok(CrewOutput {
            raw,
            tasks,
            failures,
            model,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
