//! Command-line interface parsing and handling
//!
//! Parses arguments, loads configuration, opens the store, and dispatches to
//! the chat UI or one of the maintenance subcommands.

pub mod config_keys;
pub mod export;


use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::client::{GenerateClient, ResponseSource};
use crate::cli::config_keys::{set_config_value, unset_config_value, SettingError};
use crate::cli::export::{format_settings, format_transcript, ExportFormat};
use crate::core::app::App;
use crate::core::config::Config;
use crate::core::persistence::{FileStore, Persistence};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "multichat", version)]
#[command(about = "A terminal chat client for multi-model text generation APIs")]
#[command(
    long_about = "multichat is a full-screen terminal chat client. Each message is sent to a \
text-generation API together with the selected model, temperature and top-p; the reply is \
added to a transcript that is kept between sessions.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt/Shift+Enter   Insert a newline\n\
  F2                Open or close the settings panel\n\
  Ctrl+T            Switch between light and dark mode\n\
  Ctrl+D            Delete all chats (asks for confirmation)\n\
  PageUp/PageDown   Scroll the transcript (mouse wheel works too)\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Endpoint to send messages to (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep transcript and settings in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Write diagnostic logs to this file (filter with RUST_LOG)
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Print the stored model, temperature, top-p and theme
    Settings,
    /// Print the stored transcript
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },
    /// Delete the stored transcript and settings
    Reset,
    /// Print the configuration
    Config,
    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set (several words are joined; `models` takes a list)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn config_path(args: &Args) -> Result<PathBuf, Box<dyn Error>> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::default_path()?),
    }
}

/// Config file values with command-line overrides applied.
pub fn resolve_config(args: &Args, config_path: &Path) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::load_from_path(config_path)?;
    if let Some(url) = &args.api_url {
        config.api_url = Some(url.clone());
    }
    Ok(config)
}

pub fn open_persistence(config: &Config, ephemeral: bool) -> Result<Persistence, Box<dyn Error>> {
    if ephemeral {
        return Ok(Persistence::in_memory());
    }
    let path = config.storage_path()?;
    info!(storage = %path.display(), "opening store");
    Ok(Persistence::new(FileStore::open(path)?))
}

fn report_setting_result(result: Result<String, SettingError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let config_path = config_path(&args)?;
    let config = resolve_config(&args, &config_path)?;

    match args.command.as_ref().unwrap_or(&Commands::Chat) {
        Commands::Chat => {
            let persistence = open_persistence(&config, args.ephemeral)?;
            let app = App::new(persistence, config.models(), config.response_delay())?;
            let client = GenerateClient::new(config.api_url(), config.request_timeout())?;
            info!(api_url = client.api_url(), "starting chat");
            let source: Arc<dyn ResponseSource> = Arc::new(client);
            if let Err(err) = run_chat(app, source).await {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Settings => {
            let persistence = open_persistence(&config, args.ephemeral)?;
            print!("{}", format_settings(&persistence.load_settings()?));
            Ok(())
        }
        Commands::Export { format } => {
            let persistence = open_persistence(&config, args.ephemeral)?;
            match persistence.load()? {
                Some(transcript) => println!("{}", format_transcript(&transcript, *format)?),
                None => eprintln!("No saved chats."),
            }
            Ok(())
        }
        Commands::Reset => {
            let mut persistence = open_persistence(&config, args.ephemeral)?;
            persistence.clear()?;
            println!("✅ Deleted stored chats and settings");
            Ok(())
        }
        Commands::Config => {
            config.print_all(&config_path);
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load_from_path(&config_path)?;
            let result = set_config_value(&mut config, key, value);
            if result.is_ok() {
                config.save_to_path(&config_path)?;
            }
            report_setting_result(result);
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load_from_path(&config_path)?;
            let result = unset_config_value(&mut config, key);
            if result.is_ok() {
                config.save_to_path(&config_path)?;
            }
            report_setting_result(result);
            Ok(())
        }
    }
}
