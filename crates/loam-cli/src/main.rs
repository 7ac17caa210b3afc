//! Loam CLI - Command-line interface for the Loam pocket notebook
//!
//! Quick capture from the terminal with minimal friction.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use loam_core::export::ExportFormat;

mod commands;
mod error;

use commands::add::run_add;
use commands::common::{resolve_data_dir, Services};
use commands::delete::run_delete;
use commands::edit::run_edit;
use commands::export::run_export;
use commands::favorite::run_favorite;
use commands::list::run_list;
use commands::search::run_search;
use commands::storage::{run_storage_check, run_storage_reset, run_storage_set, run_storage_show};
use error::CliError;

#[derive(Parser)]
#[command(name = "loam")]
#[command(about = "Capture notes from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Optional path to the data directory
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Quick capture: loam "my note here"
    #[arg(trailing_var_arg = true)]
    note: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note content
        content: Vec<String>,
        /// Optional note title
        #[arg(short, long)]
        title: Option<String>,
        /// Tag the note (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// List recent notes
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Show only favorites
        #[arg(long)]
        favorites: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search notes
    Search {
        /// Search query
        query: String,
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// Replace tags (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Option<Vec<String>>,
    },
    /// Toggle a note's favorite flag
    #[command(alias = "fav")]
    Favorite {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Delete an existing note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Export notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormatArg::Json)]
        format: ExportFormatArg,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Manage the storage location
    Storage {
        #[command(subcommand)]
        command: StorageCommands,
    },
}

#[derive(Subcommand)]
enum StorageCommands {
    /// Show the active storage location
    Show,
    /// Switch to a custom directory
    Set {
        /// Target directory
        path: PathBuf,
    },
    /// Revert to the application-private default
    Reset,
    /// Validate a directory without switching
    Check {
        /// Directory to probe
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ExportFormatArg {
    Json,
    Markdown,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(format: ExportFormatArg) -> Self {
        match format {
            ExportFormatArg::Json => Self::Json,
            ExportFormatArg::Markdown => Self::Markdown,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("loam=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    let services = Services::open(&data_dir);

    match cli.command {
        Some(Commands::Add {
            content,
            title,
            tags,
        }) => run_add(title, &content, tags, &services).await?,
        Some(Commands::List {
            limit,
            favorites,
            json,
        }) => run_list(limit, favorites, json, &services).await?,
        Some(Commands::Search { query, limit, json }) => {
            run_search(&query, limit, json, &services).await?;
        }
        Some(Commands::Edit {
            id,
            title,
            content,
            tags,
        }) => run_edit(&id, title, content, tags, &services).await?,
        Some(Commands::Favorite { id }) => run_favorite(&id, &services).await?,
        Some(Commands::Delete { id }) => run_delete(&id, &services).await?,
        Some(Commands::Export { format, output }) => {
            run_export(format.into(), output.as_deref(), &services).await?;
        }
        Some(Commands::Storage { command }) => match command {
            StorageCommands::Show => run_storage_show(&services).await?,
            StorageCommands::Set { path } => run_storage_set(&path, &services).await?,
            StorageCommands::Reset => run_storage_reset(&services).await?,
            StorageCommands::Check { path } => run_storage_check(&path).await?,
        },
        None => {
            // Quick capture mode: loam "my note"
            if cli.note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(None, &cli.note, Vec::new(), &services).await?;
            }
        }
    }

    Ok(())
}
