//! CLI entrypoint for Tag Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tag_quorum_application::AnalyzeTagsInput;
use tag_quorum_domain::{EngineMode, OutputFormat, SubjectProfile, profile_from_plain_tags};
use tag_quorum_infrastructure::{ConfigLoader, EngineBootstrap, FileConfig};
use tag_quorum_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging: RUST_LOG wins unless -v was given
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    info!("Starting Tag Quorum");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut config);

    for warning in config.ensure_valid()? {
        warn!("{}", warning);
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let profile = load_profile(&cli)?;

    // === Dependency Injection ===
    let setup = EngineBootstrap::resolve(&config);

    let mut input = AnalyzeTagsInput::new(profile);
    if let Some(max_tags) = cli.max_tags {
        input = input.with_max_tags(max_tags);
    }

    // Execute with or without progress reporting
    let result = if cli.quiet || format == OutputFormat::Json {
        setup.use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        setup
            .use_case
            .execute_with_progress(input, &progress)
            .await?
    };

    println!("{}", ConsoleFormatter::render(&result, format));

    Ok(())
}

/// Command-line flags take precedence over every config source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(mode) = cli.mode {
        config.engine.mode = EngineMode::from(mode).to_string();
    }
    if cli.moderated {
        config.engine.moderated_consensus = true;
    }
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(path) = &cli.trace_file {
        config.logging.trace_file = Some(path.clone());
    }
}

/// Build the subject profile from exactly one of: plain tags, profile file
fn load_profile(cli: &Cli) -> Result<SubjectProfile> {
    match (&cli.profile, cli.tags.is_empty()) {
        (Some(path), true) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid profile JSON in {}", path.display()))
        }
        (None, false) => Ok(profile_from_plain_tags(&cli.tags, cli.subject_id.clone())),
        (Some(_), false) => bail!("Give either plain tags or --profile, not both."),
        (None, true) => bail!("No tags given. Pass tag names or --profile <file.json>."),
    }
}
