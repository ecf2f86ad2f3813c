use anyhow::Context;
use clap::Parser;
use serde::de::DeserializeOwned;
use shelf_suggest::config::Config;
use shelf_suggest::console::ConsoleSurface;
use shelf_suggest::core::{AutocompleteController, Book, Candidate, Username};
use shelf_suggest::shell::{self, Command, Reply, Session};
use shelf_suggest::source::Location;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Book and username suggestions for the share form, driven from stdin.
#[derive(Debug, Parser)]
#[command(name = "shelf-suggest")]
struct Cli {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Book source (JSON file or URL); overrides the config.
    #[arg(long)]
    books: Option<String>,
    /// Username source (JSON file or URL); overrides the config.
    #[arg(long)]
    users: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = cli
        .config
        .as_ref()
        .map(Config::load_with_fallback)
        .unwrap_or_default();
    if let Some(books) = cli.books {
        config.books.source = Some(books);
    }
    if let Some(users) = cli.users {
        config.users.source = Some(users);
    }

    let mut books =
        AutocompleteController::new(config.books.options::<Book>().context("book input")?);
    let mut users =
        AutocompleteController::new(config.users.options::<Username>().context("username input")?);
    books.subscribe(ConsoleSurface::new("book", io::stdout()));
    users.subscribe(ConsoleSurface::new("user", io::stdout()));

    load(&mut books, config.books.location());
    load(&mut users, config.users.location());

    let mut session = Session::new(books, users);
    println!("{}", shell::HELP);
    event_loop(&mut session)
}

fn load<C>(controller: &mut AutocompleteController<C>, location: Option<Location>)
where
    C: Candidate + DeserializeOwned + 'static,
{
    match location {
        Some(location) => {
            let source = location.into_source::<C>();
            controller.load_from(source.as_ref());
        }
        None => tracing::info!(kind = C::KIND, "no candidate source configured"),
    }
}

fn event_loop(session: &mut Session) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match Command::parse(&line) {
            Ok(Some(command)) => match session.apply(command) {
                Reply::Nothing => {}
                Reply::Message(text) => println!("{text}"),
                Reply::Quit => break,
            },
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
