//! pin-state - Replay actions through the Pinboard application state

use anyhow::{Context, Result};
use clap::Parser;
use libpinboard::logging::LoggingConfig;
use libpinboard::repository::{
    InMemoryNotesRepository, InMemoryPostsRepository, PreferencesStore, StaticConnectivity,
};
use libpinboard::{Action, Collaborators, Config, Content, PinboardError, PinboardService};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

mod render;

#[derive(Parser, Debug)]
#[command(name = "pin-state")]
#[command(version, about = "Replay actions through the Pinboard application state")]
#[command(long_about = r#"Replay a stream of actions through the Pinboard application state and
print the screen state after each one.

Actions are read one JSON object per line. Blank lines and lines starting
with '#' are skipped.

EXAMPLES:
    # Log in, open the tag list and come back
    printf '%s\n' \
        '{"user": "user_logged_in"}' \
        '{"navigation": "view_tags"}' \
        '{"navigation": "navigate_back"}' | pin-state

    # Replay a recorded session as JSON lines
    pin-state session.jsonl --format json | jq -r '.content.content'

    # See what happens without network access
    pin-state session.jsonl --offline

ACTION FORMAT:
    {"navigation": "view_notes"}
    {"navigation": {"view_category": "unread"}}
    {"post": {"refresh": {"force": true}}}
    {"search": {"set_term": "rust"}}
    {"tag": {"posts_for_tag": {"name": "rust"}}}

OUTPUT FORMATS:
    text - One line per action: step, action and a summary of the new screen (default)
    json - One JSON object per line with the step, action and full screen state

ENVIRONMENT:
    PINBOARD_CONFIG      - Configuration file path
    PINBOARD_LOG_FORMAT  - Log format on stderr: text, json or pretty
    PINBOARD_LOG_LEVEL   - Log filter, e.g. libpinboard=debug
    RUST_LOG             - Replaces the log filter entirely

EXIT CODES:
    0 - Success
    1 - Error (configuration, I/O, collaborator failure)
    2 - Authentication failed
    3 - Invalid input (malformed action)
"#)]
struct Cli {
    /// File with one JSON action per line (reads stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json"])]
    format: String,

    /// Configuration file (defaults to PINBOARD_CONFIG or the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report no network connectivity to the handlers
    #[arg(long)]
    offline: bool,

    /// Also print the content before the first action
    #[arg(long)]
    initial: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// One printed state change
#[derive(Serialize)]
struct Step<'a> {
    step: usize,
    action: &'a str,
    content: &'a Content,
    history: Vec<&'static str>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {:#}", error);
        let code = error
            .downcast_ref::<PinboardError>()
            .map_or(1, PinboardError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };

    let mut logging = LoggingConfig::from(&config.logging).with_env_overrides();
    logging.verbose = cli.verbose;
    logging.init();

    tracing::debug!(offline = cli.offline, "pin-state started");

    let collaborators = Collaborators {
        posts: Arc::new(InMemoryPostsRepository::new()),
        notes: Arc::new(InMemoryNotesRepository::default()),
        user: Arc::new(PreferencesStore::new(config.preferences.clone())),
        connectivity: Arc::new(StaticConnectivity::new(!cli.offline)),
    };
    let service = PinboardService::new(collaborators, tokio::runtime::Handle::current());

    let input = read_input(cli.input.as_ref())?;

    if cli.initial {
        print_step(&cli.format, 0, "Initial", &service.app_state().content())?;
    }

    let mut step = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let action: Action = serde_json::from_str(line).map_err(|e| {
            PinboardError::InvalidInput(format!("line {}: {}", index + 1, e))
        })?;
        let name = action.name();

        step += 1;
        let content = service.run_action(action).await?;
        print_step(&cli.format, step, name, &content)?;
    }

    tracing::debug!(steps = step, "Replay finished");
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read actions from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read actions from stdin")?;
            Ok(buffer)
        }
    }
}

fn print_step(format: &str, step: usize, action: &str, content: &Content) -> Result<()> {
    match format {
        "json" => {
            let json = serde_json::to_string(&Step {
                step,
                action,
                content,
                history: content.history(),
            })?;
            println!("{}", json);
        }
        _ => {
            println!("{:>3} {:<18} -> {}", step, action, render::describe(content));
        }
    }
    Ok(())
}
