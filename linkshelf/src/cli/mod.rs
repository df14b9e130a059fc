// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::bookmark_commands::UpdateArgs;
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use std::io;

pub mod args;
pub mod bookmark_commands;
pub mod completion;
pub mod display;
pub mod error;
pub mod session_commands;

fn services(settings: &Settings) -> CliResult<ServiceContainer> {
    ServiceContainer::new(settings)
        .map_err(|e| CliError::from(e).context("Failed to create service container"))
}

/// Dispatches the parsed command line; the database is only opened by commands that use it.
pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }

    let token = cli.token.as_deref();
    match cli.command {
        Some(Commands::Serve { ref bind }) => {
            let bind = bind.as_deref().unwrap_or(&settings.server.bind);
            bookmark_commands::serve(services(settings)?, bind)
        }
        Some(Commands::CreateDb { ref path }) => bookmark_commands::create_db(path),
        Some(Commands::Session { command }) => {
            session_commands::execute(command, &services(settings)?)
        }
        Some(Commands::Add {
            url,
            title,
            favorite,
        }) => bookmark_commands::add(&services(settings)?, token, url, title, favorite),
        Some(Commands::List { favorites, is_json }) => bookmark_commands::list(
            &services(settings)?,
            token,
            favorites,
            is_json,
            cli.no_color,
        ),
        Some(Commands::Update {
            ref id,
            title,
            url,
            favorite,
            no_favorite,
        }) => {
            let favorite = match (favorite, no_favorite) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let args = UpdateArgs {
                title,
                url,
                favorite,
            };
            bookmark_commands::update(&services(settings)?, token, id, args)
        }
        Some(Commands::Favorite { ref id }) => {
            bookmark_commands::favorite(&services(settings)?, token, id)
        }
        Some(Commands::Completion { ref shell }) => handle_completion(shell),
        None => Ok(()),
    }
}

fn handle_completion(shell: &str) -> CliResult<()> {
    match shell.to_lowercase().as_str() {
        "bash" => eprintln!("# To use: eval \"$(linkshelf completion bash)\""),
        "zsh" => eprintln!("# To use: linkshelf completion zsh > ~/.zfunc/_linkshelf"),
        "fish" => eprintln!(
            "# To use: linkshelf completion fish > ~/.config/fish/completions/linkshelf.fish"
        ),
        _ => {}
    }

    completion::generate_completion(shell, &mut io::stdout())
        .map_err(|e| CliError::CommandFailed(format!("Failed to generate completion: {}", e)))
}
