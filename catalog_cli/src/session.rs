use std::io::{BufRead, Write};

use catalog_core::{data::UserId, view::ViewEvent, CatalogPage};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    render::{render_page, RenderOptions},
    CliError,
};

/// A line typed in an interactive session.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    Event(ViewEvent),
    Undo,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command `{0}`.")]
    UnknownCommand(String),
    #[error("`{0}` is not a user id.")]
    InvalidUserId(String),
}

/// Lines starting with `:` are commands; any other line replaces the search.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Event(ViewEvent::SearchChanged(line.to_string())));
    };

    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("clear"), None) => Ok(Command::Event(ViewEvent::FiltersCleared)),
        (Some("undo"), None) => Ok(Command::Undo),
        (Some("quit" | "q"), None) => Ok(Command::Quit),
        (Some("user"), Some(id)) => id
            .parse()
            .map(|id| Command::Event(ViewEvent::UserTabSelected(UserId(id))))
            .map_err(|_| ParseError::InvalidUserId(id.to_string())),
        _ => Err(ParseError::UnknownCommand(line.to_string())),
    }
}

/// Reads commands from `input` until it ends or `:quit` is entered, redrawing
/// the page to `out` after every change.
pub fn run_session(
    page: &mut CatalogPage,
    input: impl BufRead,
    out: &mut impl Write,
    options: RenderOptions,
) -> Result<(), CliError> {
    render_page(out, page, options)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        debug!(?command, "session command");

        match command {
            Command::Quit => break,
            Command::Undo => {
                if page.undo().is_none() {
                    writeln!(out, "Nothing to undo.")?;
                    continue;
                }
            }
            Command::Event(event) => {
                if let Err(err) = page.dispatch(event) {
                    warn!(%err, "rejected view event");
                    writeln!(out, "{err}")?;
                    continue;
                }
            }
        }
        writeln!(out)?;
        render_page(out, page, options)?;
    }
    Ok(())
}
