//! CLI entrypoint for circle-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use relay_application::RunRelayUseCase;
use relay_infrastructure::{
    ConfigLoader, HttpAgentInvoker, JsonlTranscriptLogger, RunSetup, SetupStore,
    TransportRegistry,
};
use relay_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleObserver, OutputFormat, ProgressReporter, SetupCommand,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Setup management never needs a run
    if let Some(Command::Setup { action }) = cli.command {
        return handle_setup_command(action);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    // Resolve the setup: explicit file first, then the named store
    let setup: RunSetup = if let Some(path) = &cli.setup_file {
        SetupStore::load_path(path)
            .with_context(|| format!("failed to load setup file {}", path.display()))?
    } else if let Some(name) = &cli.setup {
        SetupStore::open_default()?
            .load(name)
            .with_context(|| format!("failed to load setup '{name}'"))?
    } else {
        bail!("a setup is required: pass --setup <name> or --setup-file <path>");
    };

    // CLI flags override the saved setup
    let mut input = setup.into_input(config.credential_map());
    if let Some(prompt) = cli.prompt {
        input.prompt = prompt;
    }
    if let Some(rounds) = cli.rounds {
        input.rounds = rounds.max(1);
    }
    if let Some(context) = cli.shared_context {
        input.shared_context = Some(context);
    }

    info!(
        circles = input.circles.len(),
        rounds = input.rounds,
        "starting circle-relay"
    );

    // === Dependency Injection ===
    let registry = TransportRegistry::with_base_urls(&config.base_urls());
    let invoker = Arc::new(HttpAgentInvoker::new(registry));
    let mut use_case = RunRelayUseCase::new(invoker);

    if let Some(path) = &cli.transcript {
        match JsonlTranscriptLogger::new(path) {
            Some(logger) => {
                use_case = use_case.with_transcript_logger(Arc::new(logger));
            }
            None => warn!("transcript logging disabled: {} is not writable", path.display()),
        }
    }

    // Execute with the observer matching the chosen output style
    let result = if cli.quiet {
        use_case.execute(input).await?
    } else if cli.live {
        use_case
            .execute_with_observer(input, Arc::new(ConsoleObserver))
            .await?
    } else {
        let reporter = Arc::new(ProgressReporter::new());
        let result = use_case
            .execute_with_observer(input, reporter.clone())
            .await?;
        reporter.finish();
        result
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Verdict => ConsoleFormatter::format_verdict_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{output}");

    Ok(())
}

fn handle_setup_command(action: SetupCommand) -> Result<()> {
    let store = SetupStore::open_default()?;
    match action {
        SetupCommand::Save { name, from } => {
            let setup = SetupStore::load_path(&from)
                .with_context(|| format!("failed to read setup file {}", from.display()))?;
            let path = store.save(&name, &setup)?;
            println!("Saved setup '{name}' to {}", path.display());
        }
        SetupCommand::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No saved setups.");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        SetupCommand::Delete { name } => {
            store.delete(&name)?;
            println!("Deleted setup '{name}'.");
        }
    }
    Ok(())
}
