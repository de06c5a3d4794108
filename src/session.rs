//! Interactive gallery session.
//!
//! Reads user actions line by line, applies them to a [`Gallery`], lets the
//! [`Dispatcher`] settle the resulting requests, and hands the settled
//! gallery to a snapshot callback (the CLI writes the HTML page there).
//!
//! Several actions can share a line, separated by `;`. They are all applied
//! before anything is fetched, which is how rapid paging looks to the
//! gallery: `next; next; next` issues three listing requests at once.
//!
//! ```text
//! search water lilies
//! next; next
//! more 16568
//! click content
//! close
//! quit
//! ```

use crate::gallery::Gallery;
use crate::modal::ModalTarget;
use crate::output;
use crate::runtime::Dispatcher;
use crate::source::ArtSource;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid argument for '{command}': {value}")]
    InvalidArgument { command: &'static str, value: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Previous,
    More(u64),
    Close,
    Click(ModalTarget),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <text>        Search the collection (empty text returns to browsing)
  next | prev          Move one page forward or back
  more <id>            Open the detail view for a card
  close                Close the detail view
  click background     Click the overlay outside the detail content
  click content        Click inside the detail content
  show                 Print the current cards
  help                 Show this help
  quit                 Leave the session
Separate commands with ';' to issue them before any response arrives.";

pub fn parse_command(input: &str) -> Result<Command, SessionError> {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "next" | "n" => Ok(Command::Next),
        "prev" | "previous" | "p" => Ok(Command::Previous),
        "more" | "m" => {
            if rest.is_empty() {
                return Err(SessionError::MissingArgument {
                    command: "more",
                    expected: "an artwork id",
                });
            }
            rest.parse()
                .map(Command::More)
                .map_err(|_| SessionError::InvalidArgument {
                    command: "more",
                    value: rest.to_string(),
                })
        }
        "close" | "x" => Ok(Command::Close),
        "click" => match rest.to_ascii_lowercase().as_str() {
            "background" | "bg" => Ok(Command::Click(ModalTarget::Background)),
            "content" => Ok(Command::Click(ModalTarget::Content)),
            "close" => Ok(Command::Click(ModalTarget::CloseButton)),
            "" => Err(SessionError::MissingArgument {
                command: "click",
                expected: "background, content or close",
            }),
            other => Err(SessionError::InvalidArgument {
                command: "click",
                value: other.to_string(),
            }),
        },
        "show" | "ls" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(SessionError::UnknownCommand(word.to_string())),
    }
}

/// Parse a `;`-separated line. Blank segments are skipped.
pub fn parse_line(line: &str) -> Result<Vec<Command>, SessionError> {
    line.split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_command)
        .collect()
}

/// What the caller should do after [`apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command. Returns lines to print for the user.
pub fn apply(gallery: &mut Gallery, command: &Command) -> (Flow, Vec<String>) {
    let mut lines = Vec::new();
    match command {
        Command::Search(text) => gallery.search(text),
        Command::Next => gallery.next_page(),
        Command::Previous => gallery.previous_page(),
        Command::More(id) => {
            if !gallery.show_card_details(*id) {
                lines.push(format!("No card with id {id} on this page"));
            }
        }
        Command::Close => gallery.close_details(),
        Command::Click(target) => gallery.click_modal(*target),
        Command::Show => lines.extend(output::format_listing(gallery)),
        Command::Help => lines.extend(HELP.lines().map(str::to_string)),
        Command::Quit => return (Flow::Quit, lines),
    }
    (Flow::Continue, lines)
}

/// Run a session until `quit` or end of input.
///
/// The gallery is started (initial listing) before the first prompt. After
/// every line that changed something, `snapshot` receives the settled gallery.
pub fn run<S, R, W, F>(
    dispatcher: &Dispatcher<S>,
    gallery: &mut Gallery,
    input: R,
    mut out: W,
    mut snapshot: F,
) -> Result<(), SessionError>
where
    S: ArtSource,
    R: BufRead,
    W: Write,
    F: FnMut(&Gallery) -> io::Result<()>,
{
    gallery.start();
    dispatcher.settle(gallery);
    snapshot(gallery)?;
    print_lines(&mut out, output::format_status(gallery))?;

    for line in input.lines() {
        let line = line?;
        let commands = match parse_line(&line) {
            Ok(commands) => commands,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        let mut quit = false;
        let mut touched = false;
        for command in &commands {
            let (flow, lines) = apply(gallery, command);
            print_lines(&mut out, lines)?;
            if flow == Flow::Quit {
                quit = true;
                break;
            }
            touched |= !matches!(command, Command::Show | Command::Help);
        }

        if touched {
            let stats = dispatcher.settle(gallery);
            if stats.failures > 0 {
                writeln!(out, "{} request(s) failed, see log", stats.failures)?;
            }
            snapshot(gallery)?;
            print_lines(&mut out, output::format_status(gallery))?;
        }
        if quit {
            break;
        }
    }
    Ok(())
}

fn print_lines<W: Write>(out: &mut W, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
