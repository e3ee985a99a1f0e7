use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use walogs_cli::chooser::StdinFolderChooser;
use walogs_cli::{Shell, commands, readline};
use walogs_core::{ClientContext, Platform, WindowTracker, create_bridge};
use walogs_types::WindowGeometry;

const LOG_DIR_ENV: &str = "WALOGS_LOG_DIR";
const LOG_FILE_PREFIX: &str = "walogs.log";

#[derive(Parser)]
#[command(version, about = "wowarenalogs terminal client")]
struct Cli {
    /// Run without native capabilities (in-memory config, no folder picker)
    #[arg(long, global = true)]
    headless: bool,

    /// Also write logs to a daily file under $WALOGS_LOG_DIR or the data dir
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Damage, healing and hp of one unit, second by second
    Timeline {
        #[arg(short, long)]
        combat: String,
        #[arg(short, long)]
        unit: Option<String>,
        /// Seconds into the combat
        #[arg(long)]
        from: Option<i64>,
        #[arg(long)]
        to: Option<i64>,
        #[arg(long)]
        anonymize: bool,
    },
    Report {
        #[arg(short, long)]
        combat: String,
        #[arg(short, long)]
        tab: Option<String>,
        #[arg(short, long)]
        player: Option<String>,
        #[arg(long)]
        anonymize: bool,
    },
    Dispels {
        #[arg(short, long)]
        combat: String,
        #[arg(short, long)]
        expanded: bool,
        #[arg(long)]
        anonymize: bool,
    },
    /// Competitive comp win rates
    Stats {
        #[arg(short, long, default_value = "3v3")]
        bracket: String,
        #[arg(short, long, default_value = "total")]
        sort: String,
        /// Ignore the cached feed
        #[arg(long)]
        reload: bool,
    },
    Config,
    SetWowDir {
        #[arg(short, long)]
        path: String,
    },
    SelectWowDir,
    ClearWowDir,
    Installations {
        /// Look in the usual install locations when no directory is set
        #[arg(long)]
        detect: bool,
    },
    OpenUrl {
        url: String,
    },
    /// Report the host window geometry, picked up by save-window-pos
    SetWindow {
        #[arg(short, long, allow_negative_numbers = true)]
        x: i32,
        #[arg(short, long, allow_negative_numbers = true)]
        y: i32,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long)]
        maximized: bool,
    },
    SaveWindowPos,
    Debug,
    Exit,
}

fn default_log_dir() -> Option<PathBuf> {
    std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::data_local_dir().map(|d| d.join("wowarenalogs").join("logs")))
}

fn init_logging(to_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // A configured log dir implies file logging
    let dir = if to_file || std::env::var_os(LOG_DIR_ENV).is_some() {
        default_log_dir()
    } else {
        None
    };

    if let Some(dir) = dir
        && std::fs::create_dir_all(&dir).is_ok()
    {
        let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
        let (file, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file.and(std::io::stderr))
            .init();
        return Some(guard);
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    None
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_file);

    let platform = if cli.headless {
        Platform::Browser
    } else {
        Platform::Desktop
    };
    let window = WindowTracker::new();
    let bridge = create_bridge(platform, Box::new(StdinFolderChooser), window.clone())
        .map_err(|e| e.to_string())?;
    let shell = Shell::new(ClientContext::new(bridge), window);

    if let Some(command) = cli.command {
        run(command, &shell).await?;
        return Ok(());
    }

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &shell).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

async fn respond(line: &str, shell: &Shell) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "walogs".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(command) => run(command, shell).await,
        None => Ok(false),
    }
}

/// Execute one command. Returns `true` when the shell should exit.
async fn run(command: Commands, shell: &Shell) -> Result<bool, String> {
    match command {
        Commands::Timeline { combat, unit, from, to, anonymize } => {
            commands::timeline(shell, &combat, unit.as_deref(), from, to, anonymize)?
        }
        Commands::Report { combat, tab, player, anonymize } => {
            commands::report(&combat, tab.as_deref(), player.as_deref(), anonymize)?
        }
        Commands::Dispels { combat, expanded, anonymize } => {
            commands::dispels(&combat, expanded, anonymize)?
        }
        Commands::Stats { bracket, sort, reload } => {
            commands::stats(shell, &bracket, &sort, reload).await?
        }
        Commands::Config => commands::show_config(shell)?,
        Commands::SetWowDir { path } => commands::set_wow_dir(shell, &path)?,
        Commands::SelectWowDir => commands::select_wow_dir(shell)?,
        Commands::ClearWowDir => commands::clear_wow_dir(shell)?,
        Commands::Installations { detect } => commands::installations(shell, detect)?,
        Commands::OpenUrl { url } => commands::open_url(shell, &url)?,
        Commands::SetWindow { x, y, width, height, maximized } => {
            commands::set_window(shell, WindowGeometry { x, y, width, height, maximized })?
        }
        Commands::SaveWindowPos => commands::save_window_pos(shell)?,
        Commands::Debug => commands::debug(shell)?,
        Commands::Exit => {
            commands::exit();
            return Ok(true);
        }
    }
    Ok(false)
}
