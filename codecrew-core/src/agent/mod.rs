//! Agent module for reviewer personas and their prompts

mod persona;
mod prompts;
mod roster;

pub use persona::{create_agent, Agent};
pub use prompts::{get_template, render, PromptContext, Template};
pub use roster::{roles, ReviewerSpec, ROSTER};
