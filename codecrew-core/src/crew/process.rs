//! Execution options for a crew

use serde::{Deserialize, Serialize};
use std::fmt;

/// How tasks are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Process {
    /// Run tasks one after another in declaration order
    #[default]
    Sequential,
}

/// What happens to a run when one task fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort on the first failure and discard every output
    #[default]
    FailFast,
    /// Record failures and keep going; fail only if every task failed
    Partial,
}

impl FailurePolicy {
    /// Get the short name for this policy
    pub fn name(&self) -> &'static str {
        match self {
            FailurePolicy::FailFast => "fail-fast",
            FailurePolicy::Partial => "partial",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" | "strict" => Ok(FailurePolicy::FailFast),
            "partial" => Ok(FailurePolicy::Partial),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Process::default(), Process::Sequential);
        assert_eq!(FailurePolicy::default(), FailurePolicy::FailFast);
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!(
            "fail-fast".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::FailFast
        );
        assert_eq!(
            "Partial".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::Partial
        );
        assert!("sometimes".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_failure_policy_serde() {
        let json = serde_json::to_string(&FailurePolicy::FailFast).unwrap();
        assert_eq!(json, "\"fail-fast\"");
        let parsed: FailurePolicy = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(parsed, FailurePolicy::Partial);
    }
}
