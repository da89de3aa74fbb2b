//! Review tasks and their results

use serde::{Deserialize, Serialize};

use crate::agent::{render, Agent, PromptContext, Template};
use crate::llm::TokenUsage;

/// One unit of delegated review work
#[derive(Debug, Clone)]
pub struct Task {
    agent: Agent,
    description: String,
    expected_output: String,
}

impl Task {
    /// The agent assigned to this task
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Instruction text, including the code under review
    pub fn description(&self) -> &str {
        &self.description
    }

    /// What a good answer looks like
    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    /// Render the user prompt, with `(role, output)` pairs from earlier tasks
    pub fn prompt(&self, prior_outputs: &[(String, String)]) -> String {
        let context = PromptContext::new()
            .with_task(&self.description, &self.expected_output)
            .with_prior_outputs(prior_outputs);
        render(Template::Task, &context)
    }
}

/// Create a task for the specified agent
pub fn create_task(
    agent: Agent,
    description: impl Into<String>,
    expected_output: impl Into<String>,
) -> Task {
    Task {
        agent,
        description: description.into(),
        expected_output: expected_output.into(),
    }
}

/// The result of one completed task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Role of the agent that did the work
    pub role: String,
    /// The task description
    pub description: String,
    /// Model output, verbatim
    pub raw: String,
    /// Token usage, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// A task that failed under the partial failure policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    /// Role of the agent whose task failed
    pub role: String,
    /// Why it failed
    pub reason: String,
}
