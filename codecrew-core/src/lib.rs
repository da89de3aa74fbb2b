//! codecrew core - multi-agent code review over a hosted LLM
//!
//! Four fixed reviewer personas (style, bugs, security, refactoring) share
//! one model client. Each gets a task embedding the submitted code; a crew
//! runs the tasks and combines the answers.

pub mod agent;
pub mod config;
pub mod crew;
pub mod error;
pub mod llm;
pub mod review;
pub mod secrets;

pub use agent::{create_agent, Agent, ReviewerSpec, ROSTER};
pub use config::{Config, CrewConfig, ModelConfig, ServerConfig};
pub use crew::{create_task, Crew, CrewObserver, CrewOutput, FailurePolicy, Task, TaskOutput};
pub use error::{Error, Result};
pub use llm::{Llm, ModelBackend, ModelId, Provider};
pub use review::{run_code_review, ReviewOptions, ReviewOutcome, ReviewRequest};
pub use secrets::Secrets;
