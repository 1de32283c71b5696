mod config_commands;
mod input;
mod score_commands;
mod sweep_commands;

use std::path::{Path, PathBuf};

use {
    clap::{Parser, Subcommand},
    emofuse_config::EmofuseConfig,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "emofuse",
    about = "Sentiment for chat messages from emoji, text and images",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (skips discovery of ./emofuse.toml and ~/.config/emofuse/).
    #[arg(long, global = true, env = "EMOFUSE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split messages into emoji, image reference and residual text.
    Segment {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Show how each emoji in the input is scored.
    Emoji {
        input: String,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fuse and smooth pre-computed scores, one JSON report per input line.
    Score {
        /// JSON lines (`message`, `text_score`, `image_score`) or plain
        /// messages. Reads stdin when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Search for the emoji weight with the best accuracy on labelled data.
    Sweep {
        /// JSON lines with `message`, `label` (0 or 1) and optional scores.
        #[arg(short, long)]
        input: PathBuf,
        /// Grid spacing between candidate weights.
        #[arg(long, default_value_t = emofuse_fusion::sweep::DEFAULT_STEP)]
        step: f32,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Load the config named on the command line, or discover one.
fn load_config(path: Option<&Path>) -> anyhow::Result<EmofuseConfig> {
    match path {
        Some(path) => emofuse_config::load_config(path),
        None => Ok(emofuse_config::discover_and_load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "emofuse starting");

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Segment { messages } => score_commands::segment(&messages),
        Commands::Emoji { input, json } => {
            let config = load_config(config_path)?;
            score_commands::emoji(&config, &input, json)
        },
        Commands::Score { input } => {
            let config = load_config(config_path)?;
            score_commands::score(&config, input.as_deref()).await
        },
        Commands::Sweep { input, step, json } => {
            let config = load_config(config_path)?;
            sweep_commands::sweep(&config, &input, step, json)
        },
        Commands::Config { action } => config_commands::handle_config(action, config_path).await,
    }
}
