// src/cli/display.rs

use crate::domain::bookmark::Bookmark;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const FAVORITE_MARK: &str = "*";

pub fn color_choice(no_color: bool) -> ColorChoice {
    if no_color || !io::stderr().is_terminal() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// Numbered listing: title (green) with id, url (yellow) on the next line
pub fn write_bookmarks<W: WriteColor>(out: &mut W, bookmarks: &[Bookmark]) -> io::Result<()> {
    let first_col_width = bookmarks.len().to_string().len();

    for (i, bm) in bookmarks.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:first_col_width$}. {}", i + 1, bm.title)?;

        if bm.favorite {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
            write!(out, " {}", FAVORITE_MARK)?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
        writeln!(out, " [{}]", bm.id)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "{:first_col_width$}  {}", "", bm.url)?;

        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn show_bookmarks(bookmarks: &[Bookmark], no_color: bool) -> io::Result<()> {
    if bookmarks.is_empty() {
        eprintln!("No bookmarks to display");
        return Ok(());
    }
    let mut stderr = StandardStream::stderr(color_choice(no_color));
    write_bookmarks(&mut stderr, bookmarks)
}

pub fn show_bookmarks_json(bookmarks: &[Bookmark]) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(bookmarks)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkBuilder;
    use termcolor::Buffer;

    #[test]
    fn given_bookmarks_when_write_then_titles_urls_and_favorite_mark_listed() {
        let bookmarks = vec![
            BookmarkBuilder::default()
                .id("id-1")
                .user_id("u")
                .title("Rust")
                .url("https://www.rust-lang.org/")
                .favorite(true)
                .build()
                .unwrap(),
            BookmarkBuilder::default()
                .id("id-2")
                .user_id("u")
                .title("Docs")
                .url("https://docs.rs")
                .build()
                .unwrap(),
        ];
        let mut buffer = Buffer::no_color();

        write_bookmarks(&mut buffer, &bookmarks).unwrap();

        let out = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(out.contains("1. Rust * [id-1]"));
        assert!(out.contains("2. Docs [id-2]"));
        assert!(out.contains("   https://docs.rs"));
    }
}
