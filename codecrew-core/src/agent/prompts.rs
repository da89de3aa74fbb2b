//! Agent prompt templates
//!
//! This module provides embedded prompt templates for agents and their tasks.
//! Templates use `{{VARIABLE}}` placeholders that can be rendered with context.

use std::collections::HashMap;

/// Embedded system prompt template framing an agent's persona
const AGENT_PROMPT: &str = include_str!("prompts/agent.md");
/// Embedded user prompt template carrying a task
const TASK_PROMPT: &str = include_str!("prompts/task.md");

/// Which embedded template to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// The agent persona (system instruction)
    Agent,
    /// A task assigned to an agent (user prompt)
    Task,
}

/// Get the raw prompt template
pub fn get_template(template: Template) -> &'static str {
    match template {
        Template::Agent => AGENT_PROMPT,
        Template::Task => TASK_PROMPT,
    }
}

/// Context for rendering a prompt template
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Variable substitutions
    variables: HashMap<String, String>,
}

impl PromptContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set a variable value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the agent persona
    pub fn with_persona(
        self,
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        self.with("ROLE", role)
            .with("GOAL", goal)
            .with("BACKSTORY", backstory)
    }

    /// Set the task description and expected output
    pub fn with_task(self, description: impl Into<String>, expected: impl Into<String>) -> Self {
        self.with("DESCRIPTION", description)
            .with("EXPECTED_OUTPUT", expected)
    }

    /// Set the outputs of earlier tasks
    pub fn with_prior_outputs(self, outputs: &[(String, String)]) -> Self {
        let context = if outputs.is_empty() {
            String::new()
        } else {
            let body = outputs
                .iter()
                .map(|(role, text)| format!("### {}\n{}", role, text))
                .collect::<Vec<_>>()
                .join("\n\n");
            format!(
                "\nThis is the context you're working with (reviews already done by your crew):\n{}\n",
                body
            )
        };
        self.with("CONTEXT", context)
    }
}

/// Render a prompt template with the given context
pub fn render(template: Template, context: &PromptContext) -> String {
    render_template(get_template(template), context)
}

/// Render a template string with variable substitution
///
/// Substitution is a single pass over the template, so placeholder-like text
/// inside substituted values (e.g. `{{NAME}}` in reviewed code) is left as is.
/// Unset uppercase placeholders become "(not specified)".
fn render_template(template: &str, context: &PromptContext) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after[..end];
        match context.variables.get(key) {
            Some(value) => result.push_str(value),
            None if !key.is_empty()
                && key.chars().all(|c| c.is_ascii_uppercase() || c == '_') =>
            {
                result.push_str("(not specified)")
            }
            None => {
                result.push_str("{{");
                result.push_str(key);
                result.push_str("}}");
            }
        }

        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}
