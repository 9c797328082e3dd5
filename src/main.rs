//! autocommit - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autocommit::{
    Assistant, CommitRequest, Config, DisabledAssistant, GitCli, OllamaAssistant, Workflow,
    WorkflowError,
};

/// Sync, stage, commit with a conventional-commit message, and push.
#[derive(Parser, Debug)]
#[command(name = "autocommit")]
#[command(about = "Sync, stage, commit with a conventional-commit message, and push")]
#[command(version)]
struct Cli {
    /// Optional commit type (fix, feat, chore, docs, style, refactor, test, major)
    /// followed by the commit message. Without a message, one is generated by
    /// the local AI service or built from the changed file names.
    #[arg(value_name = "TYPE_AND_MESSAGE", trailing_var_arg = true)]
    words: Vec<String>,

    /// Remote to sync and push with (defaults to the branch upstream)
    #[arg(long)]
    remote: Option<String>,

    /// Branch to sync and push (defaults to the branch upstream)
    #[arg(long)]
    branch: Option<String>,

    /// Model used for AI commit messages
    #[arg(long)]
    model: Option<String>,

    /// Never use the AI service for commit messages
    #[arg(long)]
    no_ai: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<WorkflowError>()
                .map_or(1, WorkflowError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if cli.remote.is_some() {
        config.remote = cli.remote;
    }
    if cli.branch.is_some() {
        config.branch = cli.branch;
    }
    if let Some(model) = cli.model {
        config.assistant.model = model;
    }

    let workdir = std::env::current_dir().context("Could not determine current directory")?;
    let vcs = GitCli::new(workdir, config.remote, config.branch);

    let assistant: Box<dyn Assistant> = if cli.no_ai {
        Box::new(DisabledAssistant)
    } else {
        Box::new(OllamaAssistant::new(config.assistant))
    };

    let request = CommitRequest::from_words(&cli.words);

    Workflow::new(&vcs, assistant.as_ref(), &config.rules)
        .run(&request)
        .await?;

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "autocommit=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
