// src/cli/shell.rs
use crate::application::{BookmarkClient, RefreshOutcome};
use crate::cli::bookmark_commands::{get_ids, parse_id};
use crate::cli::display::{write_bookmark_detail, write_bookmarks, write_json};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::bookmark::BookmarkId;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::di::ServiceContainer;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use tracing::{debug, instrument};

const PROMPT: &str = "bmclient> ";

const HELP: &str = "\
list                  reload and show all bookmarks
set <field> <value>   set a draft field
unset <field>         remove a draft field
draft                 show the draft
clear                 empty the draft
save                  submit the draft as a new bookmark
delete <ids>          delete bookmarks (comma separated ids)
show <id>             show one bookmark
help                  this text
quit                  leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Empty,
    List,
    Set { field: String, value: String },
    Unset(String),
    Draft,
    Clear,
    Save,
    Delete(Vec<BookmarkId>),
    Show(BookmarkId),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> CliResult<Self> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        let parsed = match command {
            "" => ShellCommand::Empty,
            "list" | "ls" => ShellCommand::List,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| CliError::InvalidInput("usage: set <field> <value>".into()))?;
                ShellCommand::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "unset" if !rest.is_empty() => ShellCommand::Unset(rest.to_string()),
            "unset" => return Err(CliError::InvalidInput("usage: unset <field>".into())),
            "draft" => ShellCommand::Draft,
            "clear" => ShellCommand::Clear,
            "save" => ShellCommand::Save,
            "delete" | "rm" => ShellCommand::Delete(get_ids(rest)?),
            "show" => ShellCommand::Show(parse_id(rest)?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(CliError::InvalidInput(format!(
                    "unknown command {:?}, try 'help'",
                    other
                )))
            }
        };
        Ok(parsed)
    }
}

fn note_stale<W: Write>(out: &mut W, outcome: RefreshOutcome) -> io::Result<()> {
    if outcome == RefreshOutcome::Stale {
        writeln!(out, "(list not updated: a newer refresh already arrived)")?;
    }
    Ok(())
}

/// Run one command against the client. Returns `false` when the session should end.
///
/// A failing command leaves the client usable; the caller reports the error
/// and reads the next line.
#[instrument(skip(client, settings, out), level = "debug")]
pub async fn execute<R: BookmarkRepository, W: Write>(
    client: &BookmarkClient<R>,
    command: ShellCommand,
    settings: &Settings,
    out: &mut W,
) -> CliResult<bool> {
    let color = settings.display.color;
    match command {
        ShellCommand::Empty => {}
        ShellCommand::List => {
            let outcome = client.refresh().await?;
            note_stale(out, outcome)?;
            write_bookmarks(out, &client.bookmarks(), &settings.display.fields, color)?;
        }
        ShellCommand::Set { field, value } => client.set_draft_field(field, value),
        ShellCommand::Unset(field) => {
            if client.remove_draft_field(&field).is_none() {
                writeln!(out, "draft has no field {:?}", field)?;
            }
        }
        ShellCommand::Draft => write_json(out, &client.draft())?,
        ShellCommand::Clear => client.clear_draft(),
        ShellCommand::Save => {
            let outcome = client.create().await?;
            writeln!(out, "Saved.")?;
            note_stale(out, outcome)?;
            write_bookmarks(out, &client.bookmarks(), &settings.display.fields, color)?;
        }
        ShellCommand::Delete(ids) => {
            let mut last_error = None;
            for id in ids {
                match client.remove(&id).await {
                    Ok(outcome) => {
                        writeln!(out, "Deleted {}", id)?;
                        note_stale(out, outcome)?;
                    }
                    Err(e) => {
                        writeln!(out, "Error deleting {}: {}", id, e)?;
                        last_error = Some(e);
                    }
                }
            }
            write_bookmarks(out, &client.bookmarks(), &settings.display.fields, color)?;
            if let Some(e) = last_error {
                return Err(e.into());
            }
        }
        ShellCommand::Show(id) => {
            let bookmark = client.fetch(&id).await?;
            write_bookmark_detail(out, &bookmark, color)?;
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Interactive session holding a single client for its whole lifetime.
pub async fn run(services: &ServiceContainer, settings: &Settings) -> CliResult<()> {
    let client = services.client.as_ref();
    let mut editor = DefaultEditor::new()?;

    // initial load, same as opening the page
    if let Err(e) = execute(client, ShellCommand::List, settings, &mut io::stdout()).await {
        eprintln!("{}", format!("Could not load bookmarks: {}", e).red());
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                let result = match ShellCommand::parse(&line) {
                    Ok(command) => execute(client, command, settings, &mut io::stdout()).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("Shell closed by user");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
