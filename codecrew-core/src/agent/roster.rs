//! The fixed reviewer roster
//!
//! Four review perspectives, each a row of persona text plus the task
//! instruction and expected output used to build its review task.

/// One row of the reviewer roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewerSpec {
    /// Agent role
    pub role: &'static str,
    /// Agent goal
    pub goal: &'static str,
    /// Agent backstory
    pub backstory: &'static str,
    /// Task instruction, followed by the code in the task description
    pub instruction: &'static str,
    /// What a good answer looks like
    pub expected_output: &'static str,
}

impl ReviewerSpec {
    /// Build the task description for `code`
    pub fn describe(&self, code: &str) -> String {
        format!("{}:\n\n{}", self.instruction, code)
    }
}

/// The reviewers run on every submission, in execution order
pub static ROSTER: [ReviewerSpec; 4] = [
    ReviewerSpec {
        role: "Syntax Stylist",
        goal: "Enforce clean code style and formatting",
        backstory: "You are a strict code style reviewer using standard guidelines.",
        instruction: "Review this code for syntax and style",
        expected_output:
            "A clear explanation of any syntax/style issues, following standard guidelines.",
    },
    ReviewerSpec {
        role: "Bug Hunter",
        goal: "Find logical or runtime errors in the code",
        backstory: "You analyze flow and catch potential bugs or poor logic.",
        instruction: "Review this code for bugs and errors",
        expected_output: "A list of bugs or logical issues, and where they occur.",
    },
    ReviewerSpec {
        role: "Security Analyst",
        goal: "Identify security vulnerabilities or bad practices",
        backstory: "You know OWASP and scan code for security risks.",
        instruction: "Review this code for security issues",
        expected_output: "Any security vulnerabilities in the code and suggestions to fix them.",
    },
    ReviewerSpec {
        role: "Refactoring Advisor",
        goal: "Improve the code with clean, modular suggestions",
        backstory: "You help developers make cleaner and more maintainable code.",
        instruction: "Suggest refactorings for this code",
        expected_output:
            "Refactoring suggestions to improve code readability, reusability, or efficiency.",
    },
];

/// Roles of every reviewer in the roster
pub fn roles() -> impl Iterator<Item = &'static str> {
    ROSTER.iter().map(|spec| spec.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_roles() {
        let roles: Vec<_> = roles().collect();
        assert_eq!(
            roles,
            vec![
                "Syntax Stylist",
                "Bug Hunter",
                "Security Analyst",
                "Refactoring Advisor"
            ]
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            ROSTER[0].describe("def f(): pass"),
            "Review this code for syntax and style:\n\ndef f(): pass"
        );
        assert_eq!(
            ROSTER[3].describe("x = 1"),
            "Suggest refactorings for this code:\n\nx = 1"
        );
    }

    #[test]
    fn test_roster_fields_non_empty() {
        for spec in &ROSTER {
            assert!(!spec.role.is_empty());
            assert!(!spec.goal.is_empty());
            assert!(!spec.backstory.is_empty());
            assert!(!spec.instruction.is_empty());
            assert!(!spec.expected_output.is_empty());
        }
    }
}
