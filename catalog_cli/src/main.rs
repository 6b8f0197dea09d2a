#![forbid(unsafe_code)]

mod render;
mod session;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use catalog_core::{
    data::UserId,
    view::{TransactionError, ViewEvent},
    Catalog, CatalogPage, FixtureError, FixtureStore,
};
use clap::Parser;
use render::RenderOptions;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse the product catalog")]
#[command(after_help = "Environment:\n  CATALOG_FIXTURES  Fixture directory\n  RUST_LOG          Log filter")]
struct Cli {
    /// Directory holding users.json, products.json and categories.json.
    /// Defaults to the bundled fixtures.
    #[arg(long, env = "CATALOG_FIXTURES")]
    fixtures: Option<PathBuf>,
    /// Initial contents of the search box.
    #[arg(long)]
    search: Option<String>,
    /// Click the tab of the user with this id.
    #[arg(long)]
    user: Option<u64>,
    /// Print the view state and rows as JSON instead of a table.
    #[arg(long, default_value_t = false, conflicts_with = "interactive")]
    json: bool,
    /// Read searches and commands from stdin, redrawing after each one.
    #[arg(long, short, default_value_t = false)]
    interactive: bool,
    /// Highlight owner names with ANSI colors.
    #[arg(long, default_value_t = false)]
    color: bool,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error("Unable to apply event {index}: {source}")]
    Event {
        #[source]
        source: TransactionError,
        index: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "catalog failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let fixtures = match &cli.fixtures {
        Some(dir) => {
            info!(dir = %dir.display(), "loading fixtures");
            FixtureStore::load_dir(dir)?
        }
        None => FixtureStore::bundled(),
    };
    let mut page = CatalogPage::new(Catalog::new(fixtures));

    let events = initial_events(&cli);
    page.dispatch_all(events).map_err(|(source, index)| CliError::Event { source, index })?;

    let options = RenderOptions { color: cli.color };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.interactive {
        session::run_session(&mut page, io::stdin().lock(), &mut out, options)?;
    } else if cli.json {
        render::render_json(&mut out, &page)?;
    } else {
        render::render_page(&mut out, &page, options)?;
    }
    out.flush()?;
    Ok(())
}

fn initial_events(cli: &Cli) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    if let Some(search) = &cli.search {
        events.push(ViewEvent::SearchChanged(search.clone()));
    }
    if let Some(id) = cli.user {
        events.push(ViewEvent::UserTabSelected(UserId(id)));
    }
    events
}
