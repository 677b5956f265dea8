//! sitesmoke CLI - deployment smoke tests for the Industry Documents Library
//!
//! Usage:
//!   sitesmoke                       Run the scenario set headless, sequentially
//!   sitesmoke --headed              Show the browser while running
//!   sitesmoke --base-url <URL>      Target a different deployment
//!   sitesmoke -n 4                  Run up to four scenarios in parallel
//!
//! Exit status: 0 when every scenario passes, 1 when any scenario fails,
//! 2 when the harness itself fails to start.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sitesmoke_browser::ChromeEngine;
use sitesmoke_core::{RunSummary, SmokeConfig};
use sitesmoke_runner::Runner;

mod scenarios;

#[derive(Parser)]
#[command(name = "sitesmoke")]
#[command(author, version, about = "Browser smoke tests for the IDL website")]
struct Cli {
    /// Base URL of the deployment under test
    #[arg(long)]
    base_url: Option<String>,

    /// Show the browser instead of running headless
    #[arg(long)]
    headed: bool,

    /// Number of scenarios to run in parallel
    #[arg(short = 'n', long)]
    concurrency: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Overlay CLI flags on the environment-derived configuration
    fn apply_to(&self, mut config: SmokeConfig) -> SmokeConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if self.headed {
            config.headless = false;
        }
        if let Some(n) = self.concurrency {
            config.concurrency = n;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let code = match run(cli).await {
        Ok(summary) => {
            if summary.success() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("sitesmoke: {:#}", e);
            2
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let config = cli.apply_to(SmokeConfig::from_env()?);
    config.validate()?;

    let registry = scenarios::registry(&config)?;
    let runner = Runner::new(ChromeEngine::new(), config);
    Ok(runner.run(&registry).await)
}
