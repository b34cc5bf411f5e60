use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{
    get_styles, print_banner, print_book_details, print_books_table, print_error,
    print_key_value, print_success, print_warning,
};
use library_catalog::config::{AppConfig, CliConfig, FileConfig, PersistenceBackend};
use library_catalog::{BookStatus, CatalogError, CatalogStore};

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::FileHistory,
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

const PROMPT: &str = "library> ";

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Catalog file. Defaults to library_catalog.db (library_catalog.json with
    /// the json backend) in the working directory.
    #[clap(value_parser = parse_path)]
    pub path: Option<PathBuf>,

    /// Storage format of the catalog file, inferred from its extension when omitted.
    #[clap(long, value_enum)]
    pub backend: Option<PersistenceBackend>,

    /// Path to TOML config file. Values in the file override command line arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Adds a book. Quote values containing spaces.
    Add {
        id: String,
        title: String,
        author: String,
        #[clap(long)]
        genre: Option<String>,
        /// "available" or "checked-out".
        #[clap(long, default_value = "available")]
        status: BookStatus,
    },

    /// Shows the book with the given id, or the first one with the given title.
    /// Case insensitive.
    Find { key: String },

    /// Changes fields of an existing book, omitted fields keep their value.
    /// An empty genre ("") clears it.
    Update {
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        author: Option<String>,
        #[clap(long)]
        genre: Option<String>,
        #[clap(long)]
        status: Option<BookStatus>,
    },

    /// Removes the book with the given id.
    Delete { id: String },

    /// Shows every book, ordered by id.
    List,

    /// Discards in-memory state and loads the catalog file again.
    Reload,

    /// Shows where the catalog is stored.
    Where,

    /// Closes the CLI. Every change is already saved when it is made.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn describe_error(err: &CatalogError) -> String {
    match err {
        CatalogError::Validation(_) => format!("{}", err),
        CatalogError::NotFound { .. } => "Book not found.".to_string(),
        CatalogError::Io(_) | CatalogError::Format(_) => {
            format!("{} Your last change was not applied.", err)
        }
    }
}

fn report(result: Result<(), CatalogError>, success: &str) {
    match result {
        Ok(()) => print_success(success),
        Err(err) => print_error(&describe_error(&err)),
    }
}

fn update_book(
    store: &mut CatalogStore,
    id: &str,
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
    status: Option<BookStatus>,
) -> Result<(), CatalogError> {
    let current = match store.get(id.trim()) {
        Some(book) => book.clone(),
        None => return Err(CatalogError::NotFound { id: id.trim().to_string() }),
    };
    let genre = match genre {
        Some(genre) => Some(genre),
        None => current.genre,
    };
    store.update(
        &current.id,
        title.as_deref().unwrap_or(&current.title),
        author.as_deref().unwrap_or(&current.author),
        genre.as_deref(),
        status.unwrap_or(current.status),
    )
}

fn execute_command(line: String, store: &mut CatalogStore) -> CommandExecutionResult {
    let mut parts = match shlex::split(&line) {
        Some(parts) => parts,
        None => return CommandExecutionResult::Error("Unbalanced quotes.".to_string()),
    };
    if parts.is_empty() {
        return CommandExecutionResult::Ok;
    }
    parts.insert(0, "".to_owned());

    match InnerCli::try_parse_from(parts) {
        Ok(cli) => match cli.command {
            InnerCommand::Add {
                id,
                title,
                author,
                genre,
                status,
            } => report(
                store.add(&id, &title, &author, genre.as_deref(), status),
                "Book added successfully!",
            ),
            InnerCommand::Find { key } => match store.find(&key) {
                Some(book) => print_book_details(book),
                None => print_error("Book not found."),
            },
            InnerCommand::Update {
                id,
                title,
                author,
                genre,
                status,
            } => report(
                update_book(store, &id, title, author, genre, status),
                "Book updated successfully!",
            ),
            InnerCommand::Delete { id } => {
                report(store.delete(&id), "Book deleted successfully!")
            }
            InnerCommand::List => print_books_table(&store.snapshot()),
            InnerCommand::Reload => {
                store.reload();
                print_success(&format!("Loaded {} book(s).", store.len()));
            }
            InnerCommand::Where => {
                print_key_value("Catalog file", &store.location().display().to_string())
            }
            InnerCommand::Exit => return CommandExecutionResult::Exit,
        },
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Logs go to stderr so they never interleave with tables on stdout.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        catalog_path: cli_args.path,
        backend: cli_args.backend,
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;
    info!(
        "Using {:?} catalog at {:?}",
        app_config.backend, app_config.catalog_path
    );

    let mut store = app_config.open_store();

    print_banner();
    print_key_value("Catalog file", &store.location().display().to_string());
    print_key_value("Books", &store.len().to_string());
    if store.loaded_from_fallback() {
        print_warning(
            "The catalog file could not be read. It is left untouched until the first change, which replaces it.",
        );
    }
    println!();
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &mut store) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    Ok(())
}
