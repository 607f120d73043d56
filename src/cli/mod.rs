// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::bookmark_commands::build_draft;
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use std::io;

pub mod args;
pub mod bookmark_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod shell;

/// Dispatch a parsed command line to its handler.
pub async fn execute_command(
    cli: Cli,
    services: &ServiceContainer,
    settings: &Settings,
) -> CliResult<()> {
    match cli.command {
        Some(Commands::List { is_json }) => bookmark_commands::list(services, settings, is_json).await,
        Some(Commands::Add {
            fields,
            title,
            url,
            from_json,
        }) => {
            let draft = build_draft(
                &fields,
                title.as_deref(),
                url.as_deref(),
                from_json.as_deref(),
            )?;
            bookmark_commands::add(services, draft).await
        }
        Some(Commands::Update {
            id,
            fields,
            title,
            url,
        }) => {
            let changes = build_draft(&fields, title.as_deref(), url.as_deref(), None)?;
            bookmark_commands::update(services, &id, changes).await
        }
        Some(Commands::Delete { ids }) => bookmark_commands::delete(services, &ids).await,
        Some(Commands::Show { id, is_json }) => {
            bookmark_commands::show(services, settings, &id, is_json).await
        }
        Some(Commands::Open { id }) => bookmark_commands::open(services, &id).await,
        Some(Commands::Shell) => shell::run(services, settings).await,
        Some(Commands::Completion { shell }) => handle_completion(&shell),
        None => Ok(()),
    }
}

pub fn handle_completion(shell: &str) -> CliResult<()> {
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for bmclient");
            eprintln!("# To use, run: eval \"$(bmclient completion bash)\"");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for bmclient");
            eprintln!("# To use, run: bmclient completion zsh > ~/.zfunc/_bmclient");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for bmclient");
            eprintln!("# To use, run: bmclient completion fish | source");
        }
        _ => {}
    }

    completion::generate_completion(shell, &mut io::stdout()).map_err(|e| {
        error::CliError::CommandFailed(format!("Failed to generate completion script: {}", e))
    })
}
