//! Binary entrypoint for the gridventure CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`
//! - `play [--session <id>]` - play interactively, resuming `<id>` or starting a new session
//! - `show --session <id>` - print a session's narrative log
//! - `reset --session <id>` - restart a session from the seed world
//!
//! See the library crate docs for module-level details: `gridventure::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use gridventure::adventure::Action;
use gridventure::config::Config;
use gridventure::console::{parse_command, Command, COMMAND_HINT};
use gridventure::logutil::escape_log;
use gridventure::session::AdventureService;
use gridventure::storage::{open_store, SnapshotStore};
use gridventure::validation::new_session_id;

#[derive(Parser)]
#[command(name = "gridventure")]
#[command(about = "A session-backed text adventure on a 5x5 grid")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Play interactively
    Play {
        /// Session to resume; a new id is generated when omitted
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Print the stored narrative log of a session
    Show {
        #[arg(short, long)]
        session: String,
    },
    /// Restart a session from the beginning
    Reset {
        #[arg(short, long)]
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config, so there is nothing to load yet
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    let config = match cli.command {
        Commands::Init => Config::default(),
        _ => resolve_config(&cli.config, pre_config).await?,
    };

    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote default configuration to {}", cli.config);
        }
        Commands::Play { session } => {
            let service = open_service(&config)?;
            let session_id = session.unwrap_or_else(new_session_id);
            info!(
                "Starting gridventure v{} session {}",
                env!("CARGO_PKG_VERSION"),
                escape_log(&session_id)
            );
            play(&service, &session_id).await?;
        }
        Commands::Show { session } => match open_service(&config)?.narrative(&session)? {
            Some(lines) => print_lines(&lines),
            None => return Err(anyhow!("no stored session named {}", session)),
        },
        Commands::Reset { session } => {
            let lines = open_service(&config)?.perform(&session, Action::Reset)?;
            print_lines(&lines);
        }
    }
    Ok(())
}

/// Use the config loaded for logging, or load again so the error reaches the user.
async fn resolve_config(path: &str, pre_config: Option<Config>) -> Result<Config> {
    match pre_config {
        Some(config) => Ok(config),
        None => Config::load(path).await,
    }
}

fn open_service(config: &Config) -> Result<AdventureService<Box<dyn SnapshotStore>>> {
    let store = open_store(config.game.store, &config.game.data_dir)?;
    info!("Using {:?} store under {}", config.game.store, config.game.data_dir);
    Ok(AdventureService::new(store))
}

async fn play<S: SnapshotStore>(service: &AdventureService<S>, session_id: &str) -> Result<()> {
    println!("Session: {}", session_id);
    print_lines(&service.enter(session_id)?);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Action(action)) => match service.perform(session_id, action) {
                Ok(out) => print_lines(&out),
                Err(e) => {
                    warn!("session {}: {}", escape_log(session_id), e);
                    println!("Something went wrong saving your progress: {}", e);
                }
            },
            Err(e) => {
                log::debug!("{}", escape_log(&e.to_string()));
                println!("{}", COMMAND_HINT);
            }
        }
    }
    println!("Your progress is saved. Resume with: gridventure play --session {}", session_id);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config; without -v the config level applies
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty && record.level() <= log::Level::Warn {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
