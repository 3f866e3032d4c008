use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use termpanel::config::Config;

/// Toggleable terminal panel with file-type aware REPLs
#[derive(Parser, Debug)]
#[command(name = "termpanel", version, about)]
struct Args {
    /// Path to a JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// File type of the current buffer, used by terminal.REPL
    #[arg(long, value_name = "FILETYPE")]
    filetype: Option<String>,

    /// Where to write logs (the terminal owns stdout)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the JSON schema of the config file and exit
    #[arg(long)]
    print_config_schema: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config_schema {
        let schema = serde_json::to_string_pretty(&Config::json_schema())?;
        println!("{}", schema);
        return Ok(());
    }

    let log_file = args
        .log_file
        .unwrap_or_else(|| std::env::temp_dir().join("termpanel.log"));
    init_tracing(&log_file)?;

    let config = Config::load(args.config.as_deref())?;
    tracing::info!("Starting termpanel (terminal name '{}')", config.terminal.name);

    // Handlers run one at a time, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(termpanel::app::run(config, args.filetype))
}

fn init_tracing(path: &std::path::Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
