//! Code review entry point
//!
//! Builds one agent per roster entry over a single shared model client, one
//! task per agent embedding the submitted code, and hands the set to a crew.

use std::sync::Arc;

use tracing::info;

use crate::agent::{create_agent, Agent, ROSTER};
use crate::config::CrewConfig;
use crate::crew::{create_task, Crew, CrewObserver, CrewOutput, FailurePolicy, NoopObserver, Task};
use crate::llm::Llm;
use crate::Result;

use super::ReviewRequest;

/// The result of a code review run
pub type ReviewOutcome = CrewOutput;

/// Options for a review run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOptions {
    /// Pass earlier reviews to later reviewers
    pub share_context: bool,
    /// What to do when one reviewer fails
    pub failure_policy: FailurePolicy,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self::from(&CrewConfig::default())
    }
}

impl From<&CrewConfig> for ReviewOptions {
    fn from(config: &CrewConfig) -> Self {
        Self {
            share_context: config.share_context,
            failure_policy: config.failure_policy,
        }
    }
}

impl ReviewOptions {
    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Build the four reviewer agents, all sharing `llm`
pub fn build_agents(llm: &Arc<Llm>) -> Vec<Agent> {
    ROSTER
        .iter()
        .map(|spec| create_agent(spec.role, spec.goal, spec.backstory, Arc::clone(llm)))
        .collect()
}

/// Build one review task per agent for `request`
///
/// `agents` must come from [`build_agents`], in roster order.
pub fn build_tasks(agents: &[Agent], request: &ReviewRequest) -> Vec<Task> {
    ROSTER
        .iter()
        .zip(agents)
        .map(|(spec, agent)| {
            create_task(
                agent.clone(),
                spec.describe(request.code()),
                spec.expected_output,
            )
        })
        .collect()
}

/// Assemble the review crew for `request`
pub fn build_review_crew(request: &ReviewRequest, llm: Arc<Llm>, options: ReviewOptions) -> Crew {
    let agents = build_agents(&llm);
    let tasks = build_tasks(&agents, request);

    Crew::new(agents, tasks)
        .with_share_context(options.share_context)
        .with_failure_policy(options.failure_policy)
}

/// Run the full code review for `request`
pub async fn run_code_review(
    request: &ReviewRequest,
    llm: Arc<Llm>,
    options: ReviewOptions,
) -> Result<ReviewOutcome> {
    run_code_review_with(request, llm, options, &mut NoopObserver).await
}

/// Run the full code review, reporting progress to `observer`
pub async fn run_code_review_with<O: CrewObserver>(
    request: &ReviewRequest,
    llm: Arc<Llm>,
    options: ReviewOptions,
    observer: &mut O,
) -> Result<ReviewOutcome> {
    info!(
        lines = request.line_count(),
        model = %llm.model(),
        "Starting code review"
    );

    let crew = build_review_crew(request, llm, options);
    crew.kickoff_with(observer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::roles;
    use crate::llm::testing::{llm_over, ScriptedBackend};
    use std::collections::HashSet;

    const SAMPLES: &[&str] = &[
        "def f(): pass",
        "fn main() {\n    let x = 1;\n}",
        "SELECT * FROM users WHERE id = '{{id}}';",
        "x",
    ];

    #[test]
    fn test_four_tasks_each_embedding_the_code() {
        for code in SAMPLES {
            let llm = llm_over(ScriptedBackend::echoing());
            let request = ReviewRequest::new(code).unwrap();
            let crew = build_review_crew(&request, llm, ReviewOptions::default());

            assert_eq!(crew.tasks().len(), 4);
            for task in crew.tasks() {
                assert!(task.description().contains(code));
                assert!(task.prompt(&[]).contains(code));
            }
        }
    }

    #[test]
    fn test_roles_are_fixed() {
        let expected: HashSet<&str> = [
            "Syntax Stylist",
            "Bug Hunter",
            "Security Analyst",
            "Refactoring Advisor",
        ]
        .into_iter()
        .collect();

        for code in SAMPLES {
            let llm = llm_over(ScriptedBackend::echoing());
            let request = ReviewRequest::new(code).unwrap();
            let crew = build_review_crew(&request, llm, ReviewOptions::default());

            let roles: HashSet<&str> = crew.agents().iter().map(|a| a.role()).collect();
            assert_eq!(roles, expected);
            assert_eq!(crew.agents().len(), 4);
        }
        assert_eq!(roles().count(), 4);
    }

    #[test]
    fn test_all_agents_share_one_model_client() {
        let llm = llm_over(ScriptedBackend::echoing());
        let request = ReviewRequest::new("x = 1").unwrap();
        let crew = build_review_crew(&request, llm.clone(), ReviewOptions::default());

        for task in crew.tasks() {
            assert!(Arc::ptr_eq(task.agent().llm(), &llm));
        }
        for agent in crew.agents() {
            assert!(Arc::ptr_eq(agent.llm(), &llm));
        }
    }

    #[test]
    fn test_task_descriptions() {
        let llm = llm_over(ScriptedBackend::echoing());
        let request = ReviewRequest::new("def f(): pass").unwrap();
        let crew = build_review_crew(&request, llm, ReviewOptions::default());

        let descriptions: Vec<&str> = crew.tasks().iter().map(|t| t.description()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Review this code for syntax and style:\n\ndef f(): pass",
                "Review this code for bugs and errors:\n\ndef f(): pass",
                "Review this code for security issues:\n\ndef f(): pass",
                "Suggest refactorings for this code:\n\ndef f(): pass",
            ]
        );
        assert_eq!(
            crew.tasks()[1].expected_output(),
            "A list of bugs or logical issues, and where they occur."
        );
    }

    #[tokio::test]
    async fn test_end_to_end_review() {
        let backend = ScriptedBackend::echoing();
        let llm = llm_over(backend.clone());

        let request = ReviewRequest::new("def f(): pass").unwrap();
        let outcome = run_code_review(&request, llm, ReviewOptions::default())
            .await
            .unwrap();

        assert_eq!(backend.call_count(), 4);
        let requests = backend.requests();
        assert!(requests[0]
            .prompt
            .contains("Review this code for syntax and style:\n\ndef f(): pass"));
        assert!(requests[3]
            .prompt
            .contains("Suggest refactorings for this code:\n\ndef f(): pass"));

        assert_eq!(outcome.tasks.len(), 4);
        assert!(outcome.raw.contains("## Syntax Stylist"));
        assert!(outcome.raw.contains("## Refactoring Advisor"));
        assert!(outcome
            .raw
            .contains("reviewed by: You are Security Analyst."));
    }

    #[test]
    fn test_options_from_config() {
        let config = CrewConfig {
            share_context: false,
            failure_policy: FailurePolicy::Partial,
        };
        let options = ReviewOptions::from(&config);
        assert!(!options.share_context);
        assert_eq!(options.failure_policy, FailurePolicy::Partial);

        let options = ReviewOptions::default();
        assert!(options.share_context);
        assert_eq!(options.failure_policy, FailurePolicy::FailFast);
    }
}
