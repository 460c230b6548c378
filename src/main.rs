use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use spravka::config::{self, AppConfig};
use spravka::glossary::Glossary;
use spravka::logging::{self, LogTarget};
use spravka::output;
use spravka::search::{self, SearchMode};
use spravka::view::View;
use std::path::PathBuf;
use std::process::ExitCode;
use termcolor::ColorChoice;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "spravka")]
#[command(about = "Terminal reference browser for a usability glossary")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial query for the interactive browser
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Search mode the interactive browser starts in
    #[arg(short, long)]
    mode: Option<SearchMode>,

    /// Load topics from a JSON glossary file instead of the built-in set
    #[arg(short, long, global = true)]
    glossary: Option<PathBuf>,

    /// Config file to read (defaults to the app data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List topic titles in order
    List {
        #[command(flatten)]
        format: OutputArgs,
    },
    /// Show one topic by its exact title
    Show {
        /// Topic title
        title: String,

        #[command(flatten)]
        format: OutputArgs,
    },
    /// Character search: every topic whose title or body contains the query
    Search {
        /// Search query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[command(flatten)]
        format: OutputArgs,
    },
    /// Exact-phrase search: the first topic whose body contains the phrase
    Find {
        /// Phrase to look for
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,

        #[command(flatten)]
        format: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Never,
    Auto,
    Always,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Never => ColorChoice::Never,
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.command.is_some() {
        logging::init(LogTarget::Stderr, "warn")?;
    } else {
        logging::init(LogTarget::File(config::get_log_path()?), "info")?;
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    debug!(?config, "loaded config");

    let glossary = match cli.glossary.as_ref().or(config.glossary.as_ref()) {
        Some(path) => {
            info!(path = %path.display(), "loading glossary file");
            Glossary::load_from_file(path)?
        }
        None => Glossary::builtin(),
    };

    match cli.command {
        Some(Commands::List { format }) => {
            if format.json {
                serde_json::to_writer_pretty(std::io::stdout(), glossary.topics())?;
                println!();
            } else {
                output::print_titles(&glossary, format.color.into())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Show { title, format }) => {
            match search::select_topic(&glossary, &title) {
                Some(view) => {
                    emit(&view, &format)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("spravka: no topic titled \"{}\"", title);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Some(Commands::Search { query, format }) => {
            let view = search::incremental_search(&glossary, &query.join(" "));
            emit(&view, &format)?;
            Ok(exit_status(&view))
        }
        Some(Commands::Find { phrase, format }) => {
            let view = search::phrase_search(&glossary, &phrase.join(" "));
            emit(&view, &format)?;
            Ok(exit_status(&view))
        }
        None => {
            let mode = cli.mode.unwrap_or(config.default_mode);
            let initial_query = (!cli.query.is_empty()).then(|| cli.query.join(" "));
            run_interactive(glossary, mode, initial_query)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn emit(view: &View, format: &OutputArgs) -> Result<()> {
    if format.json {
        output::print_json(view)?;
    } else {
        output::print_view(view, format.color.into())?;
    }
    Ok(())
}

/// Exit status 1 when a search produced nothing to highlight, like grep
fn exit_status(view: &View) -> ExitCode {
    if view.has_matches() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(feature = "interactive")]
fn run_interactive(
    glossary: Glossary,
    mode: SearchMode,
    initial_query: Option<String>,
) -> Result<()> {
    spravka::tui::run(glossary, mode, initial_query)
}

#[cfg(not(feature = "interactive"))]
fn run_interactive(
    _glossary: Glossary,
    _mode: SearchMode,
    _initial_query: Option<String>,
) -> Result<()> {
    anyhow::bail!("spravka was built without the interactive feature; use a subcommand")
}
