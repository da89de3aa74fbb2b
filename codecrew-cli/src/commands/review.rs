//! Review command - run the four reviewers over a file or stdin

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use codecrew_core::{
    review::run_code_review_with, Config, CrewObserver, CrewOutput, Error, FailurePolicy, Llm,
    ReviewOptions, ReviewRequest, Secrets, TaskOutput, ROSTER,
};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// File to review (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the review tasks without contacting the model
    #[arg(long)]
    pub dry_run: bool,

    /// Keep going when a reviewer fails
    #[arg(long)]
    pub partial: bool,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        // Credential first: nothing is built without it
        let llm = if self.dry_run {
            None
        } else {
            let secrets = Secrets::load()?;
            Some(Arc::new(Llm::from_config(&config.model, &secrets)?))
        };

        let code = read_input(self.file.as_deref())?;
        let request = match ReviewRequest::new(&code) {
            Ok(request) => request,
            Err(Error::EmptyInput) => {
                eprintln!("⚠️  {}", Error::EmptyInput);
                anyhow::bail!("nothing to review");
            }
            Err(e) => return Err(e.into()),
        };

        if verbose {
            tracing::info!(
                lines = request.line_count(),
                model = %config.model.model,
                "Starting review"
            );
        }

        let Some(llm) = llm else {
            print_dry_run(&request);
            return Ok(());
        };

        let mut options = ReviewOptions::from(&config.crew);
        if self.partial {
            options = options.with_failure_policy(FailurePolicy::Partial);
        }

        let mut progress = StderrProgress::default();
        let outcome = run_code_review_with(&request, llm, options, &mut progress).await?;

        if self.json {
            println!("{}", outcome.to_json()?);
        } else {
            println!("{}", outcome);
        }

        if !outcome.is_complete() {
            eprintln!(
                "{} of {} reviews failed",
                outcome.failures.len(),
                outcome.failures.len() + outcome.tasks.len()
            );
        }

        Ok(())
    }
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e)),
        _ => {
            let mut code = String::new();
            std::io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}

fn print_dry_run(request: &ReviewRequest) {
    println!("[Dry run] Would run {} reviews:", ROSTER.len());
    for spec in &ROSTER {
        println!();
        println!("## {}", spec.role);
        println!("{}", spec.describe(request.code()));
    }
}

/// Progress lines on stderr so stdout stays clean for the result
#[derive(Debug, Default)]
struct StderrProgress {
    total: usize,
}

impl StderrProgress {
    fn line(&self, index: usize, role: &str, status: &str) -> String {
        format!("[{}/{}] {}: {}", index + 1, self.total, role, status)
    }
}

impl CrewObserver for StderrProgress {
    fn on_kickoff(&mut self, total_tasks: usize) {
        self.total = total_tasks;
        eprintln!("Running {} reviewers...", total_tasks);
    }

    fn on_task_start(&mut self, index: usize, role: &str) {
        eprintln!("{}", self.line(index, role, "reviewing"));
    }

    fn on_task_complete(&mut self, index: usize, output: &TaskOutput) {
        eprintln!("{}", self.line(index, &output.role, "done"));
    }

    fn on_task_failed(&mut self, index: usize, role: &str, error: &Error) {
        eprintln!("{}", self.line(index, role, &format!("failed ({})", error)));
    }

    fn on_finish(&mut self, output: &CrewOutput) {
        let usage = output.token_usage();
        eprintln!(
            "Finished in {}s ({} tokens)",
            output.duration().num_seconds(),
            usage.total_tokens
        );
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "def f(): pass").unwrap();

        let code = read_input(Some(file.path())).unwrap();
        assert_eq!(code, "def f(): pass\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/review.py"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/review.py"));
    }

    #[test]
    fn test_progress_line() {
        let mut progress = StderrProgress::default();
        progress.on_kickoff(4);
        assert_eq!(
            progress.line(2, "Security Analyst", "done"),
            "[3/4] Security Analyst: done"
        );
    }
}
