// src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use linkshelf::cli::args::Cli;
use linkshelf::cli::error::CliError;
use linkshelf::config::load_settings;
use linkshelf::exitcode;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    // human output goes to stderr, stdout carries ids, tokens and json for downstream processes
    let cli = Cli::parse();
    let no_color = cli.no_color;

    setup_logging(cli.debug, no_color);

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Failed to load settings: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
    };
    debug!("Using database at {}", settings.db_url);

    let code = match linkshelf::cli::execute_command(cli, &settings) {
        Ok(()) => exitcode::SUCCESS,
        Err(e) => report(&e, no_color),
    };
    std::process::exit(code);
}

fn report(err: &CliError, no_color: bool) -> i32 {
    let message = format!("Error: {}", err);
    if no_color {
        eprintln!("{}", message);
    } else {
        eprintln!("{}", message.red());
    }

    if err.is_auth_failure() {
        exitcode::NOPERM
    } else {
        exitcode::USAGE
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
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

    let noisy_modules = ["hyper", "hyper_util", "mio", "h2", "tower", "r2d2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

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
