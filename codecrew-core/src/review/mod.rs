//! Review module for the four-perspective code review
//!
//! This module turns submitted code into a crew of four reviewers (style,
//! bugs, security, refactoring) and runs it.

pub mod request;
pub mod reviewer;

pub use request::ReviewRequest;
pub use reviewer::{
    build_agents, build_review_crew, build_tasks, run_code_review, run_code_review_with,
    ReviewOptions, ReviewOutcome,
};
