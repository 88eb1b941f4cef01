use std::{path::PathBuf, sync::Arc};

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tunethatname::{
    cli, config, error,
    types::{Characteristic, PkceToken, SongPreferences},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Build a playlist from contact names
    Create(CreateOptions),

    /// Save the last playlist to Spotify
    Save(SaveOptions),

    /// Show or change default playlist size and preferences
    Preferences(PreferencesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CreateOptions {
    /// Number of songs (defaults to the saved playlist size)
    #[clap(long)]
    pub size: Option<usize>,

    /// Song characteristic(s): popular, positive, negative, energetic, chill
    #[clap(
        long,
        value_parser = utils::parse_characteristic,
        value_delimiter = ',',
        action = ArgAction::Append
    )]
    pub prefer: Vec<Characteristic>,

    /// Search for these names instead of reading contacts; can be repeated
    #[clap(long = "name", action = ArgAction::Append)]
    pub names: Vec<String>,

    /// Contacts file (JSON), overrides TTN_CONTACTS_FILE
    #[clap(long)]
    pub contacts: Option<PathBuf>,

    /// Save the playlist to Spotify under this title right away
    #[clap(long)]
    pub save: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SaveOptions {
    /// Playlist title on Spotify
    #[clap(long, default_value = "Tune That Name")]
    pub title: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PreferencesOptions {
    /// Default number of songs
    #[clap(long)]
    pub size: Option<usize>,

    /// Default song characteristic(s); replaces the saved set
    #[clap(
        long,
        value_parser = utils::parse_characteristic,
        value_delimiter = ',',
        action = ArgAction::Append
    )]
    pub prefer: Vec<Characteristic>,

    /// Remove all saved characteristics
    #[clap(long, conflicts_with = "prefer")]
    pub clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tunethatname=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Create(opt) => {
            let preferences =
                (!opt.prefer.is_empty()).then(|| SongPreferences::new(opt.prefer));
            cli::create(opt.size, preferences, opt.names, opt.contacts, opt.save).await
        }
        Command::Save(opt) => cli::save(opt.title).await,
        Command::Preferences(opt) => {
            let preferences =
                (!opt.prefer.is_empty()).then(|| SongPreferences::new(opt.prefer));
            cli::preferences(opt.size, preferences, opt.clear).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
