//! Serve command - host the review page locally

use std::sync::Arc;

use clap::Args;
use codecrew_core::{Config, Llm, ReviewOptions, Secrets};
use codecrew_web::AppState;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let secrets = Secrets::load()?;
        let llm = Arc::new(Llm::from_config(&config.model, &secrets)?);

        let mut server = config.server.clone();
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }

        if verbose {
            tracing::info!(
                address = %server.bind_address(),
                model = %llm.model(),
                backend = llm.backend_name(),
                "Starting review server"
            );
        }

        println!("codecrew review page: http://{}", server.bind_address());
        println!("Press Ctrl-C to stop");

        let state = AppState::new(llm, ReviewOptions::from(&config.crew));
        codecrew_web::serve(&server, state).await?;

        Ok(())
    }
}
