// src/cli/bookmark_commands.rs
use crate::api::{self, AppState};
use crate::application::error::ApplicationError;
use crate::cli::display::{show_bookmarks, show_bookmarks_json};
use crate::cli::error::{CliError, CliResult};
use crate::domain::bookmark::{Bookmark, CreateBookmarkInput};
use crate::domain::session::RequestContext;
use crate::infrastructure::di::ServiceContainer;
use crossterm::style::Stylize;
use std::net::SocketAddr;
use tokio::runtime::Runtime;
use tracing::{debug, info, instrument};

/// Field values for `update`; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub title: Option<String>,
    pub url: Option<String>,
    pub favorite: Option<bool>,
}

fn context(services: &ServiceContainer, token: Option<&str>) -> CliResult<RequestContext> {
    Ok(services.session_service.context_for(token)?)
}

/// Like `context` but fails early instead of resolving to an anonymous caller
fn authenticated_context(
    services: &ServiceContainer,
    token: Option<&str>,
) -> CliResult<RequestContext> {
    let ctx = context(services, token)?;
    if !ctx.is_authenticated() {
        return Err(ApplicationError::Unauthenticated.into());
    }
    Ok(ctx)
}

/// Looks up one of the caller's bookmarks
fn find_own(
    services: &ServiceContainer,
    ctx: &RequestContext,
    id: &str,
) -> CliResult<Bookmark> {
    services
        .bookmark_service
        .list_bookmarks(ctx)?
        .into_iter()
        .find(|bm| bm.id == id)
        .ok_or_else(|| CliError::CommandFailed(format!("No bookmark with id {}", id)))
}

#[instrument(skip(services, token))]
pub fn add(
    services: &ServiceContainer,
    token: Option<&str>,
    url: String,
    title: String,
    favorite: bool,
) -> CliResult<()> {
    let ctx = context(services, token)?;
    let input = CreateBookmarkInput::new(title, url).with_favorite(favorite);

    let bookmark = services.bookmark_service.create_bookmark(&ctx, input)?;

    // id on stdout for scripting
    println!("{}", bookmark.id);
    eprintln!("{}", format!("Added: {}", bookmark.title).green());
    Ok(())
}

#[instrument(skip(services, token))]
pub fn list(
    services: &ServiceContainer,
    token: Option<&str>,
    favorites: bool,
    is_json: bool,
    no_color: bool,
) -> CliResult<()> {
    let ctx = context(services, token)?;
    let mut bookmarks = services.bookmark_service.list_bookmarks(&ctx)?;
    if favorites {
        bookmarks.retain(|bm| bm.favorite);
    }
    debug!("Listing {} bookmarks", bookmarks.len());

    if is_json {
        show_bookmarks_json(&bookmarks)?;
    } else {
        show_bookmarks(&bookmarks, no_color)?;
    }
    Ok(())
}

#[instrument(skip(services, token))]
pub fn update(
    services: &ServiceContainer,
    token: Option<&str>,
    id: &str,
    args: UpdateArgs,
) -> CliResult<()> {
    let ctx = authenticated_context(services, token)?;

    let mut record = find_own(services, &ctx, id)?.to_record();
    if let Some(title) = args.title {
        record.title = title;
    }
    if let Some(url) = args.url {
        record.url = url;
    }
    if let Some(favorite) = args.favorite {
        record.favorite = favorite;
    }

    let updated = services.bookmark_service.update_bookmark(&ctx, record)?;
    eprintln!("{}", format!("Updated: {}", updated.title).green());
    Ok(())
}

/// Flips the favorite flag and reports the new state
#[instrument(skip(services, token))]
pub fn favorite(services: &ServiceContainer, token: Option<&str>, id: &str) -> CliResult<()> {
    let ctx = authenticated_context(services, token)?;
    let mut record = find_own(services, &ctx, id)?.to_record();
    record.favorite = !record.favorite;

    let updated = services.bookmark_service.update_bookmark(&ctx, record)?;
    if updated.favorite {
        eprintln!("{}", format!("Favorite: {}", updated.title).green());
    } else {
        eprintln!("{}", format!("No longer favorite: {}", updated.title).yellow());
    }
    Ok(())
}

#[instrument]
pub fn create_db(path: &str) -> CliResult<()> {
    ServiceContainer::create_db(path)?;
    eprintln!("Database created at: {}", path);
    Ok(())
}

#[instrument(skip(services))]
pub fn serve(services: ServiceContainer, bind: &str) -> CliResult<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| CliError::InvalidInput(format!("bind address '{}': {}", bind, e)))?;

    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    info!(%addr, "Starting HTTP server");
    eprintln!("Listening on http://{}", addr);
    rt.block_on(api::serve(addr, api::router(AppState::new(services))))?;
    Ok(())
}
