mod build_commands;
mod remote_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "skillets",
    version,
    about = "Discover and assemble PAN-OS configuration skillets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom config directory (overrides default ~/.config/skillets/).
    #[arg(long, global = true, env = "SKILLETS_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a skillet collection from a local directory tree.
    Build {
        /// Root of the skillet tree.
        path: PathBuf,
        /// Collection name (defaults to the directory name).
        #[arg(long)]
        name: Option<String>,
        /// Print the collection as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search the hosted index for skillet repositories.
    Search {
        /// Repository topic (overrides config).
        #[arg(long)]
        topic: Option<String>,
        /// Repository owner (overrides config).
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Clone a skillet repository into the store.
    Clone(remote_commands::CloneArgs),
    /// List the remote branches of a local checkout.
    Branches {
        path: PathBuf,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "skillets starting");

    if let Some(ref dir) = cli.config_dir {
        skillets_config::set_config_dir(dir.clone());
    }
    let config = skillets_config::discover_and_load();

    match cli.command {
        Commands::Build { path, name, json } => {
            build_commands::handle_build(&path, name.as_deref(), json)
        },
        Commands::Search { topic, user, json } => {
            remote_commands::handle_search(&config, topic, user, json).await
        },
        Commands::Clone(args) => remote_commands::handle_clone(&config, args).await,
        Commands::Branches { path } => remote_commands::handle_branches(&path).await,
    }
}
