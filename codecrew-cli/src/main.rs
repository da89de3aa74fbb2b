//! codecrew CLI - four-perspective code review from the command line
//!
//! Reviews a file or stdin directly, or serves the local review page.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codecrew_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ReviewArgs, SecretsArgs, ServeArgs};

/// codecrew: multi-agent code review
#[derive(Parser, Debug)]
#[command(name = "codecrew")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use, as provider/model (overrides config and env)
    #[arg(long, global = true, env = "CODECREW_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review code from a file or stdin
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Serve the review page locally
    Serve(ServeArgs),

    /// Show current configuration
    Config,

    /// Manage API keys
    Secrets(SecretsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials and CODECREW_* overrides may live in a .env file
    let env_files = load_env_files(&env_file_candidates());

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
        for path in &env_files {
            tracing::info!(path = %path.display(), "Loaded environment file");
        }
    }

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        println!("codecrew - multi-agent code review");
        println!();
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Version => {
            println!("codecrew {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Secrets(args) => {
            args.execute().await?;
        }
        Commands::Review(args) => {
            let config = load_config(cli.model, cli.verbose)?;
            args.execute(cli.verbose, &config).await?;
        }
        Commands::Serve(args) => {
            let config = load_config(cli.model, cli.verbose)?;
            args.execute(cli.verbose, &config).await?;
        }
        Commands::Config => {
            print_config(&load_config(cli.model, cli.verbose)?);
        }
    }

    Ok(())
}

/// `.env` in the working directory, then `~/.config/codecrew/.env`
fn env_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("codecrew").join(".env"));
    }
    paths
}

/// Load every existing file in `paths`, returning the ones loaded
///
/// Variables already set in the environment are left alone, and earlier
/// files win over later ones.
fn load_env_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| path.is_file())
        .filter(|path| dotenvy::from_path(path).is_ok())
        .cloned()
        .collect()
}

fn load_config(model: Option<String>, verbose: bool) -> anyhow::Result<Config> {
    // Load configuration with overrides
    let config = Config::load_with_overrides(model)?;

    if verbose {
        tracing::info!(
            model = %config.model.model,
            share_context = config.crew.share_context,
            failure_policy = %config.crew.failure_policy,
            "Configuration loaded"
        );
    }

    Ok(config)
}

fn print_config(config: &Config) {
    println!("codecrew Configuration");
    println!("======================");
    println!();
    println!("Model Settings:");
    println!("  model: {}", config.model.model);
    println!(
        "  base_url: {}",
        config.model.base_url.as_deref().unwrap_or("(provider default)")
    );
    match config.model.temperature {
        Some(t) => println!("  temperature: {}", t),
        None => println!("  temperature: (provider default)"),
    }
    println!("  timeout: {}s", config.model.timeout.as_secs());
    println!();
    println!("Crew Settings:");
    println!("  share_context: {}", config.crew.share_context);
    println!("  failure_policy: {}", config.crew.failure_policy);
    println!();
    println!("Server Settings:");
    println!("  address: {}", config.server.bind_address());
    println!();
    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
    if let Some(path) = Secrets::default_secrets_path() {
        println!("Secrets file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - run `codecrew secrets init`)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn test_version_ignores_broken_config() {
        // An empty model id fails validation
        assert!(run(parse(&["codecrew", "--model", "", "version"])).await.is_ok());
        assert!(run(parse(&["codecrew", "--model", "", "secrets", "path"]))
            .await
            .is_ok());
        assert!(run(parse(&["codecrew", "--model", "", "config"])).await.is_err());
    }

    #[test]
    fn test_load_env_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.env");
        let second = dir.path().join("second.env");
        let missing = dir.path().join("missing.env");

        let mut file = std::fs::File::create(&first).unwrap();
        writeln!(file, "CODECREW_DOTENV_TEST_KEY=from-first").unwrap();
        writeln!(file, "CODECREW_DOTENV_TEST_SET=from-file").unwrap();
        let mut file = std::fs::File::create(&second).unwrap();
        writeln!(file, "CODECREW_DOTENV_TEST_KEY=from-second").unwrap();

        std::env::set_var("CODECREW_DOTENV_TEST_SET", "from-env");

        let loaded = load_env_files(&[first.clone(), missing, second.clone()]);

        assert_eq!(loaded, vec![first, second]);
        assert_eq!(
            std::env::var("CODECREW_DOTENV_TEST_KEY").unwrap(),
            "from-first"
        );
        assert_eq!(
            std::env::var("CODECREW_DOTENV_TEST_SET").unwrap(),
            "from-env"
        );
    }

    #[test]
    fn test_env_file_candidates_start_local() {
        let candidates = env_file_candidates();
        assert_eq!(candidates[0], PathBuf::from(".env"));
    }
}
