use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, catalog, config, tracker};
use moviemax_config::{Config, PathManager};
use std::path::{Path, PathBuf};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviemax")]
#[command(about = "MovieMAX - Browse movies and web series, keep a watchlist, track what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file (defaults to config.toml in the MovieMAX config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Catalog file, overriding catalog.path from the config
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr (browse logs to the MovieMAX log directory by default)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog in Movies and Web Series sections
    Home,
    /// List catalog entries, optionally filtered
    #[command(long_about = "List catalog entries. Filters combine: --type narrows by movie or series (\"series\" also matches \"Web Series\"), --category matches the category exactly and --genre matches one of the genres exactly (both ignoring case), --search matches part of the title. Without filters every entry is listed.")]
    List {
        /// Entry type to keep (movie, series, web series)
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<String>,

        /// Category to keep
        #[arg(long)]
        category: Option<String>,

        /// Genre to keep
        #[arg(long)]
        genre: Option<String>,

        /// Text to look for in titles
        #[arg(long)]
        search: Option<String>,
    },
    /// Show every detail of one title
    Show {
        title: String,
    },
    /// Open a title's trailer in the default browser
    Trailer {
        title: String,
    },
    /// Browse the catalog interactively with a session watchlist
    #[command(long_about = "Start an interactive session: switch between views, search, filter by category or genre, toggle titles on your watchlist and open trailers. The watchlist lives for the session only.")]
    Browse,
    /// Manage the persistent watched-list
    #[command(long_about = "Manage the tracker list stored in tracker.path (movies.json by default). Every change is written to disk immediately; if the write fails the change is not applied.")]
    Tracker {
        /// Tracker file, overriding tracker.path from the config
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        #[command(subcommand)]
        cmd: Option<TrackerCommands>,
    },
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum TrackerCommands {
    /// List tracked titles
    List,
    /// Track a new title
    Add {
        title: String,

        /// Optional note shown next to the title
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Remove the first entry with this title
    Delete {
        title: String,
    },
    /// Mark the first entry with this title as watched
    Watched {
        title: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let path_manager = PathManager::default();

    let log_file = log_destination(cli.log_file.clone(), &cli.command, &path_manager);
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.clone().unwrap_or_else(|| path_manager.config_file());

    run_command(cli.command, &config_path, cli.catalog, &output)
}

/// Where logs go: `--log-file` if given, the log directory for an interactive
/// session whose screen would be garbled by stderr output, stderr otherwise
fn log_destination(explicit: Option<PathBuf>, command: &Commands, paths: &PathManager) -> Option<PathBuf> {
    explicit.or_else(|| matches!(command, Commands::Browse).then(|| paths.log_file()))
}

fn run_command(
    command: Commands,
    config_path: &Path,
    catalog_override: Option<PathBuf>,
    output: &output::Output,
) -> color_eyre::Result<()> {
    // The config command handles its own file so a broken config can still be shown or replaced
    if let Commands::Config { cmd } = command {
        return config::run_config(cmd.unwrap_or(ConfigCommands::Show), config_path, output);
    }

    let mut config = Config::load_or_default(config_path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    if let Some(catalog_path) = catalog_override {
        config.catalog.path = catalog_path;
    }

    match command {
        Commands::Home => catalog::run_home(&config, output),
        Commands::List { media_type, category, genre, search } => {
            let filters = catalog::ListFilters { media_type, category, genre, search };
            catalog::run_list(&config, filters, output)
        }
        Commands::Show { title } => catalog::run_show(&config, &title, output),
        Commands::Trailer { title } => catalog::run_trailer(&config, &title, output),
        Commands::Browse => browse::run_browse(&config, output),
        Commands::Tracker { file, cmd } => {
            let path = file.unwrap_or_else(|| config.tracker.path.clone());
            tracker::run_tracker(cmd.unwrap_or(TrackerCommands::List), &path, output)
        }
        Commands::Config { cmd } => config::run_config(cmd.unwrap_or(ConfigCommands::Show), config_path, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_destination() {
        let paths = PathManager::from_base("/tmp/mm");
        assert_eq!(
            log_destination(None, &Commands::Browse, &paths),
            Some(PathBuf::from("/tmp/mm/logs/moviemax.log"))
        );
        assert_eq!(log_destination(None, &Commands::Home, &paths), None);
        assert_eq!(
            log_destination(Some(PathBuf::from("run.log")), &Commands::Home, &paths),
            Some(PathBuf::from("run.log"))
        );
    }

    #[test]
    fn test_cli_parses_list_filters() {
        let cli = Cli::try_parse_from(["moviemax", "list", "--type", "series", "--genre", "Crime"]).unwrap();
        match cli.command {
            Commands::List { media_type, category, genre, search } => {
                assert_eq!(media_type.as_deref(), Some("series"));
                assert_eq!(genre.as_deref(), Some("Crime"));
                assert!(category.is_none());
                assert!(search.is_none());
            }
            _ => panic!("expected list"),
        }
    }
}
