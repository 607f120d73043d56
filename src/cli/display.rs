// src/cli/display.rs

use crate::domain::bookmark::Bookmark;
use crossterm::style::Stylize;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Render a field value for the terminal: strings unquoted, missing/null as empty.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One line per bookmark with the configured fields; the first field is highlighted.
pub fn write_bookmarks<W: Write>(
    out: &mut W,
    bookmarks: &[Bookmark],
    fields: &[String],
    color: bool,
) -> io::Result<()> {
    if bookmarks.is_empty() {
        writeln!(out, "No bookmarks")?;
        return Ok(());
    }

    for bookmark in bookmarks {
        let mut columns = fields
            .iter()
            .map(|field| format_value(bookmark.field(field)));

        let head = columns.next().unwrap_or_default();
        let rest: Vec<String> = columns.filter(|c| !c.is_empty()).collect();

        if color {
            write!(out, "{}", head.yellow())?;
        } else {
            write!(out, "{}", head)?;
        }
        if rest.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, ": {}", rest.join("  "))?;
        }
    }
    Ok(())
}

/// All fields of a single bookmark, `key: value` per line.
pub fn write_bookmark_detail<W: Write>(
    out: &mut W,
    bookmark: &Bookmark,
    color: bool,
) -> io::Result<()> {
    for (key, value) in bookmark.fields() {
        let rendered = format_value(Some(value));
        if color {
            writeln!(out, "{}: {}", key.as_str().green(), rendered)?;
        } else {
            writeln!(out, "{}: {}", key, rendered)?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
