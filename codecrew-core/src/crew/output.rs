//! Combined crew output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::llm::TokenUsage;
use crate::Result;

use super::{TaskFailure, TaskOutput};

/// Everything a crew run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewOutput {
    /// All task outputs combined under per-role headings
    pub raw: String,
    /// Successful task outputs, in task order
    pub tasks: Vec<TaskOutput>,
    /// Failed tasks (partial failure policy only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<TaskFailure>,
    /// Model identifier used for the run
    pub model: String,
    /// When the first task started
    pub started_at: DateTime<Utc>,
    /// When the last task finished
    pub finished_at: DateTime<Utc>,
}

impl CrewOutput {
    /// Whether every task succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Sum of the token usage reported by the provider
    pub fn token_usage(&self) -> TokenUsage {
        self.tasks
            .iter()
            .filter_map(|t| t.usage)
            .fold(TokenUsage::default(), |acc, u| TokenUsage {
                prompt_tokens: acc.prompt_tokens.saturating_add(u.prompt_tokens),
                completion_tokens: acc.completion_tokens.saturating_add(u.completion_tokens),
                total_tokens: acc.total_tokens.saturating_add(u.total_tokens),
            })
    }

    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Pretty-printed JSON rendering of the whole run
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Per-task outcome, in task order
#[derive(Debug, Clone)]
pub(crate) enum TaskResult {
    Done(TaskOutput),
    Failed(TaskFailure),
}

/// Join task results under `## <role>` headings
pub(crate) fn combine(results: &[TaskResult]) -> String {
    results
        .iter()
        .map(|result| match result {
            TaskResult::Done(output) => format!("## {}\n\n{}", output.role, output.raw.trim()),
            TaskResult::Failed(failure) => {
                format!("## {}\n\n_review failed: {}_", failure.role, failure.reason)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
