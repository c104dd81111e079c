//! Markdown handling for seeded pages.
//!
//! A seed file is YAML front matter followed by a markdown body. The front matter is
//! deserialised into whatever type the caller asks for (the seeder uses
//! [`PageFrontMatter`](crate::parser::model::PageFrontMatter)); the body is rendered to the
//! HTML stored on the page. Seeds link to each other by file name, so rendering takes a
//! rewrite function that turns those links into the public page paths.

use anyhow::{Result, anyhow};
use gray_matter::{Matter, engine::YAML};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use serde::de::DeserializeOwned;

/// Splits `source` into its front matter and the markdown after it.
///
/// A file without front matter yields `M::default()` and the whole file as the body.
/// `origin` only names the file in the error.
pub fn split_front_matter<M>(source: &str, origin: &str) -> Result<(M, String)>
where
    M: DeserializeOwned + Default,
{
    let parsed = Matter::<YAML>::new()
        .parse::<M>(source)
        .map_err(|e| anyhow!("Failed to parse front matter in {origin}: {e}"))?;

    Ok((parsed.data.unwrap_or_default(), parsed.content))
}

/// Markdown features pages may use, in line with what the Forem editor accepts.
fn page_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Renders a page body to HTML, passing every link destination through `rewrite`.
///
/// Image sources are left alone; only anchors point at other pages.
pub fn render_page_markdown<F>(markdown: &str, mut rewrite: F) -> Result<String>
where
    F: FnMut(&str) -> String,
{
    let events = Parser::new_ext(markdown, page_options()).map(|event| match event {
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::from(rewrite(&dest_url)),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    Ok(out)
}

/// Renders markdown that is already stored on a page, links untouched.
pub fn render_stored_markdown(markdown: &str) -> Result<String> {
    render_page_markdown(markdown, str::to_string)
}
