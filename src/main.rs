// src/main.rs
use bmclient::cli::args::{Cli, Commands};
use bmclient::cli::error::CliError;
use bmclient::config::{generate_default_config, load_settings};
use bmclient::exitcode;
use bmclient::infrastructure::di::ServiceContainer;
use clap::Parser;
use crossterm::style::Stylize;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug, cli.no_color);

    if cli.generate_config {
        println!("{}", generate_default_config());
        return;
    }

    // completion needs neither settings nor a reachable service
    if let Some(Commands::Completion { shell }) = cli.command.as_ref() {
        if let Err(e) = bmclient::cli::handle_completion(shell) {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
        return;
    }

    let mut settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Failed to load settings: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
    };
    if let Some(base_url) = cli.base_url.clone() {
        debug!("Using base URL from command line: {}", base_url);
        settings.base_url = base_url;
    }
    if cli.no_color {
        settings.display.color = false;
    }

    let services = match ServiceContainer::new(&settings) {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}: {}", "Failed to create service container".red(), e);
            std::process::exit(exitcode::USAGE);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Failed to create async runtime: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
    };

    let result = runtime.block_on(bmclient::cli::execute_command(cli, &services, &settings));
    if let Err(e) = result {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(exit_code_for(&e));
    }
}

fn exit_code_for(error: &CliError) -> i32 {
    if error.is_service_failure() {
        exitcode::UNAVAILABLE
    } else {
        exitcode::USAGE
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["reqwest", "mio", "want", "hyper_util", "rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // stderr only, stdout carries command output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
