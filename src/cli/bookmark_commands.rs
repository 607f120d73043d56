// src/cli/bookmark_commands.rs
use crate::application::RefreshOutcome;
use crate::cli::display::{write_bookmark_detail, write_bookmarks, write_json};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::bookmark::{BookmarkId, DraftBookmark};
use crate::infrastructure::di::ServiceContainer;
use std::io::{self, Write};
use tracing::{debug, instrument, warn};

/// Parse a comma separated list of ids
pub fn get_ids(ids: &str) -> CliResult<Vec<BookmarkId>> {
    ids.split(',')
        .map(|s| {
            s.parse::<BookmarkId>()
                .map_err(|_| CliError::InvalidIdFormat(format!("Invalid ID format: {}", ids)))
        })
        .collect()
}

pub fn parse_id(id: &str) -> CliResult<BookmarkId> {
    id.parse::<BookmarkId>()
        .map_err(|_| CliError::InvalidIdFormat(format!("Invalid ID format: {:?}", id)))
}

/// Split `key=value`; the value may itself contain `=`.
pub fn parse_field_assignment(assignment: &str) -> CliResult<(String, String)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidInput(format!(
            "expected KEY=VALUE, got {:?}",
            assignment
        ))),
    }
}

/// Compose a draft from command line options.
///
/// `from_json` is the starting point; `--title`/`--url` and then each
/// `--field` are applied on top, later assignments winning.
pub fn build_draft(
    fields: &[String],
    title: Option<&str>,
    url: Option<&str>,
    from_json: Option<&str>,
) -> CliResult<DraftBookmark> {
    let mut draft = match from_json {
        Some(text) => DraftBookmark::from_json(text)?,
        None => DraftBookmark::new(),
    };
    if let Some(title) = title {
        draft.set("title", title);
    }
    if let Some(url) = url {
        draft.set("url", url);
    }
    for assignment in fields {
        let (key, value) = parse_field_assignment(assignment)?;
        draft.set(key, value);
    }
    Ok(draft)
}

fn report_outcome(outcome: RefreshOutcome) {
    if outcome == RefreshOutcome::Stale {
        warn!("Bookmark list may be out of date: a newer refresh was already applied");
    }
}

#[instrument(skip(services, settings))]
pub async fn list(services: &ServiceContainer, settings: &Settings, is_json: bool) -> CliResult<()> {
    let client = &services.client;
    report_outcome(client.refresh().await?);

    let bookmarks = client.bookmarks();
    let mut out = io::stdout().lock();
    if is_json {
        write_json(&mut out, &bookmarks)?;
    } else {
        write_bookmarks(
            &mut out,
            &bookmarks,
            &settings.display.fields,
            settings.display.color,
        )?;
    }
    Ok(())
}

#[instrument(skip(services, draft))]
pub async fn add(services: &ServiceContainer, draft: DraftBookmark) -> CliResult<()> {
    let client = &services.client;
    client.replace_draft(draft);

    if let Err(e) = client.submit().await {
        let kept = client.draft();
        if !kept.is_empty() {
            // the draft survives a failed create; show it so it can be resubmitted
            eprintln!("Draft not submitted:");
            write_json(&mut io::stderr().lock(), &kept)?;
        }
        return Err(e.into());
    }

    match client.refresh().await {
        Ok(outcome) => {
            report_outcome(outcome);
            println!(
                "Bookmark created ({} bookmarks on server)",
                client.bookmarks().len()
            );
            Ok(())
        }
        Err(e) => {
            // do not resubmit: the service already has it
            eprintln!("Bookmark created, but the list could not be reloaded");
            Err(e.into())
        }
    }
}

#[instrument(skip(services, fields))]
pub async fn update(services: &ServiceContainer, id: &str, fields: DraftBookmark) -> CliResult<()> {
    let id = parse_id(id)?;
    if fields.is_empty() {
        return Err(CliError::InvalidInput(
            "nothing to update, give --title, --url or --field".to_string(),
        ));
    }
    report_outcome(services.client.update(&id, &fields).await?);
    println!("Updated bookmark with ID {}", id);
    Ok(())
}

/// Delete each id in turn; every successful delete refreshes the list.
///
/// All ids are attempted. The last failure is returned so a service error
/// still exits as one.
#[instrument(skip(services))]
pub async fn delete(services: &ServiceContainer, ids: &str) -> CliResult<()> {
    let id_list = get_ids(ids)?;
    let mut failed = Vec::new();
    let mut last_error = None;

    for id in id_list {
        match services.client.remove(&id).await {
            Ok(outcome) => {
                report_outcome(outcome);
                println!("Deleted bookmark with ID {}", id);
            }
            Err(e) => {
                eprintln!("Error deleting bookmark with ID {}: {}", id, e);
                failed.push(id.to_string());
                last_error = Some(e);
            }
        }
    }

    match last_error {
        None => Ok(()),
        Some(e) => {
            debug!("Could not delete: {}", failed.join(","));
            Err(CliError::Application(e))
        }
    }
}

#[instrument(skip(services, settings))]
pub async fn show(
    services: &ServiceContainer,
    settings: &Settings,
    id: &str,
    is_json: bool,
) -> CliResult<()> {
    let id = parse_id(id)?;
    let bookmark = services.client.fetch(&id).await?;
    let mut out = io::stdout().lock();
    if is_json {
        write_json(&mut out, &bookmark)?;
    } else {
        write_bookmark_detail(&mut out, &bookmark, settings.display.color)?;
    }
    out.flush()?;
    Ok(())
}

#[instrument(skip(services))]
pub async fn open(services: &ServiceContainer, id: &str) -> CliResult<()> {
    let id = parse_id(id)?;
    let bookmark = services.client.fetch(&id).await?;
    let url = bookmark
        .url()
        .ok_or_else(|| CliError::InvalidInput(format!("bookmark {} has no url", id)))?;

    debug!("Opening {}", url);
    open::that(url)
        .map_err(|e| CliError::CommandFailed(format!("Failed to open {}: {}", url, e)))?;
    Ok(())
}
