//! Reviewer agents
//!
//! An agent is a fixed persona (role, goal, backstory) bound to the model
//! client shared by the whole crew.

use std::sync::Arc;

use crate::agent::{render, PromptContext, Template};
use crate::llm::Llm;

/// A reviewer persona bound to a shared model client
#[derive(Debug, Clone)]
pub struct Agent {
    role: String,
    goal: String,
    backstory: String,
    llm: Arc<Llm>,
}

impl Agent {
    /// The agent's role (e.g. "Bug Hunter")
    pub fn role(&self) -> &str {
        &self.role
    }

    /// What the agent is trying to achieve
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Persona background
    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    /// The model client this agent talks to
    pub fn llm(&self) -> &Arc<Llm> {
        &self.llm
    }

    /// Render the system instruction for this persona
    pub fn system_prompt(&self) -> String {
        let context = PromptContext::new().with_persona(&self.role, &self.goal, &self.backstory);
        render(Template::Agent, &context)
    }
}

/// Create an agent with the specified role, goal, backstory and model client
pub fn create_agent(
    role: impl Into<String>,
    goal: impl Into<String>,
    backstory: impl Into<String>,
    llm: Arc<Llm>,
) -> Agent {
    Agent {
        role: role.into(),
        goal: goal.into(),
        backstory: backstory.into(),
        llm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    fn llm() -> Arc<Llm> {
        Arc::new(Llm::from_config_with_key(&ModelConfig::default(), "AIza-test").unwrap())
    }

    #[test]
    fn test_create_agent() {
        let llm = llm();
        let agent = create_agent(
            "Security Analyst",
            "Identify security vulnerabilities or bad practices",
            "You know OWASP and scan code for security risks.",
            llm.clone(),
        );

        assert_eq!(agent.role(), "Security Analyst");
        assert_eq!(agent.goal(), "Identify security vulnerabilities or bad practices");
        assert!(agent.backstory().contains("OWASP"));
        assert!(Arc::ptr_eq(agent.llm(), &llm));
    }

    #[test]
    fn test_system_prompt() {
        let agent = create_agent("Syntax Stylist", "Enforce style", "You are strict.", llm());
        let prompt = agent.system_prompt();
        assert!(prompt.contains("You are Syntax Stylist. You are strict."));
        assert!(prompt.contains("Your personal goal is: Enforce style"));
    }
}
