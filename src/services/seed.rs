use crate::database::{NavigationLinkRepository, PageRepository};
use crate::domain::page::validate_slug;
use crate::domain::{NavigationLink, Page, PageTemplate};
use crate::error::StoreError;
use crate::io::{ContentReader, verify_relative_path};
use crate::parser::markdown::{render_page_markdown, split_front_matter};
use crate::parser::model::PageFrontMatter;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use xxhash_rust::xxh3::xxh3_64;

pub const PAGES_DIR: &str = "pages";
pub const NAVIGATION_LINKS_FILE: &str = "navigation_links.json";

/// What a seed run did. Validation failures land in `warnings`; anything else aborts the run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub pages_written: Vec<String>,
    pub pages_unchanged: Vec<String>,
    pub links_written: usize,
    pub warnings: Vec<String>,
}

// a seed file read and parsed once, before anything is written
struct PageDraft {
    filename: String,
    frontmatter: PageFrontMatter,
    slug: String,
    title: String,
    template: PageTemplate,
    body: String,
    content_hash: String,
}

impl PageDraft {
    fn public_path(&self) -> String {
        if self.frontmatter.is_top_level_path.unwrap_or(false) {
            format!("/{}", self.slug)
        } else {
            format!("/page/{}", self.slug)
        }
    }
}

enum SeedOutcome {
    Written(String),
    Unchanged(String),
}

pub struct SeedService {
    pages: Arc<dyn PageRepository>,
    navigation: Arc<dyn NavigationLinkRepository>,
    reader: Box<dyn ContentReader>,
    content_dir: PathBuf,
}

impl SeedService {
    pub fn new(
        pages: Arc<dyn PageRepository>,
        navigation: Arc<dyn NavigationLinkRepository>,
        reader: Box<dyn ContentReader>,
        content_dir: PathBuf,
    ) -> Self {
        Self {
            pages,
            navigation,
            reader,
            content_dir,
        }
    }

    /// Upserts every page seed and navigation link under the content directory.
    pub async fn seed_all(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        self.seed_pages(&mut report).await?;
        self.seed_navigation_links(&mut report).await?;

        info!(
            written = report.pages_written.len(),
            unchanged = report.pages_unchanged.len(),
            links = report.links_written,
            warnings = report.warnings.len(),
            "seeding complete"
        );
        Ok(report)
    }

    pub async fn seed_pages(&self, report: &mut SeedReport) -> Result<()> {
        let pages_dir = self.content_dir.join(PAGES_DIR);
        let files = self
            .reader
            .list_files(&pages_dir, "md")
            .await
            .context("Failed to list page seeds")?;

        // 1. discovery pass: read and parse every seed
        let mut drafts = Vec::new();
        for path in &files {
            match self.discover_page_draft(&pages_dir, path).await {
                Ok(draft) => drafts.push(draft),
                Err(e) => record_failure(e, report)?,
            }
        }

        // 2. a slug claimed twice in one scope is ambiguous, so neither claim is seeded
        let drafts = reject_collisions(drafts, report);

        // 3. map seed filenames to public paths so seeds can link to each other by filename
        let manifest: HashMap<String, String> = drafts
            .iter()
            .map(|draft| (draft.filename.clone(), draft.public_path()))
            .collect();

        // 4. ingestion pass
        for draft in drafts {
            let filename = draft.filename.clone();
            match self.ingest(draft, &pages_dir, &manifest).await {
                Ok(SeedOutcome::Written(slug)) => {
                    info!(slug = %slug, file = %filename, "seeded page");
                    report.pages_written.push(slug);
                }
                Ok(SeedOutcome::Unchanged(slug)) => report.pages_unchanged.push(slug),
                Err(e) => record_failure(e.context(format!("seeding {filename}")), report)?,
            }
        }

        Ok(())
    }

    pub async fn seed_navigation_links(&self, report: &mut SeedReport) -> Result<()> {
        let path = self.content_dir.join(NAVIGATION_LINKS_FILE);
        if !self.reader.exists(&path).await {
            info!(path = %path.display(), "no navigation links to seed");
            return Ok(());
        }

        let raw = self.reader.read_to_string(&path).await?;
        let links: Vec<NavigationLink> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        for link in links {
            match self.navigation.upsert_by_identity(&link).await {
                Ok(stored) => {
                    info!(name = %stored.name, url = %stored.url, "seeded navigation link");
                    report.links_written += 1;
                }
                Err(e) => record_failure(
                    anyhow::Error::new(e).context(format!("navigation link '{}'", link.name)),
                    report,
                )?,
            }
        }

        Ok(())
    }

    async fn discover_page_draft(&self, pages_dir: &Path, path: &Path) -> Result<PageDraft> {
        let relative_path = path
            .strip_prefix(pages_dir)
            .with_context(|| format!("Seed {} is outside of {}", path.display(), pages_dir.display()))?;
        let filename = relative_path.to_string_lossy().replace('\\', "/");

        let raw_markdown = self.reader.read_to_string(path).await?;
        let (frontmatter, body) = split_front_matter::<PageFrontMatter>(&raw_markdown, &filename)?;

        let slug = frontmatter
            .slug
            .clone()
            .unwrap_or_else(|| generate_default_slug(relative_path));
        validate_slug(&slug)?;

        let title = frontmatter
            .title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| StoreError::validation(format!("{filename} has no title")))?;

        let template = frontmatter
            .template
            .as_deref()
            .map(str::parse::<PageTemplate>)
            .transpose()?
            .unwrap_or_default();

        let content_hash = format!("{:016x}", xxh3_64(raw_markdown.as_bytes()));

        Ok(PageDraft {
            filename,
            frontmatter,
            slug,
            title,
            template,
            body,
            content_hash,
        })
    }

    // find-or-initialize by (slug, subforem), overwrite, persist
    async fn ingest(
        &self,
        draft: PageDraft,
        pages_dir: &Path,
        manifest: &HashMap<String, String>,
    ) -> Result<SeedOutcome> {
        let subforem_id = draft.frontmatter.subforem_id;
        let existing = self.pages.find_page(&draft.slug, subforem_id).await?;

        if let Some(page) = &existing
            && page.content_hash.as_deref() == Some(draft.content_hash.as_str())
        {
            return Ok(SeedOutcome::Unchanged(draft.slug));
        }

        let mut page = existing.unwrap_or_else(|| Page::new(&draft.slug, &draft.title));
        page.title = draft.title.clone();
        page.description = draft.frontmatter.description.clone().unwrap_or_default();
        page.template = draft.template;
        page.is_top_level_path = draft.frontmatter.is_top_level_path.unwrap_or(false);
        page.landing_page = draft.frontmatter.landing_page.unwrap_or(false);
        page.subforem_id = subforem_id;
        page.content_hash = Some(draft.content_hash.clone());

        match draft.template {
            PageTemplate::Contained => {
                let html = render_page_markdown(&draft.body, |link| {
                    resolve_seed_link(pages_dir, &draft.filename, link, manifest)
                })?;
                page.body_markdown = Some(draft.body.clone());
                page.body_html = Some(html);
                page.body_json = None;
            }
            PageTemplate::Txt => {
                page.body_markdown = None;
                page.body_html = Some(draft.body.trim().to_string());
                page.body_json = None;
            }
            PageTemplate::Json => {
                let json = draft
                    .frontmatter
                    .body_json
                    .clone()
                    .unwrap_or_else(|| draft.body.trim().to_string());
                page.body_markdown = None;
                page.body_html = None;
                page.body_json = Some(json);
            }
        }

        let stored = self.pages.save_page(&page).await?;
        Ok(SeedOutcome::Written(stored.slug))
    }
}

fn record_failure(err: anyhow::Error, report: &mut SeedReport) -> Result<()> {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Validation(_)) => {
            warn!("skipping invalid seed: {err:#}");
            report.warnings.push(format!("{err:#}"));
            Ok(())
        }
        _ => Err(err),
    }
}

fn reject_collisions(drafts: Vec<PageDraft>, report: &mut SeedReport) -> Vec<PageDraft> {
    let mut claims: HashMap<(String, Option<i64>), Vec<String>> = HashMap::new();
    for draft in &drafts {
        claims
            .entry((draft.slug.clone(), draft.frontmatter.subforem_id))
            .or_default()
            .push(draft.filename.clone());
    }

    drafts
        .into_iter()
        .filter(|draft| {
            let key = (draft.slug.clone(), draft.frontmatter.subforem_id);
            match claims.get(&key) {
                Some(files) if files.len() > 1 => {
                    let message = format!(
                        "slug '{}' claimed by several seeds ({}); {} skipped",
                        draft.slug,
                        files.join(", "),
                        draft.filename
                    );
                    warn!("{message}");
                    report.warnings.push(message);
                    false
                }
                _ => true,
            }
        })
        .collect()
}

// "guides/getting-started.md" seeds the slug "guides/getting-started"
fn generate_default_slug(relative_path: &Path) -> String {
    relative_path
        .with_extension("")
        .to_string_lossy()
        .replace('\\', "/")
}

// links to sibling seed files become the public path of the page they seed
fn resolve_seed_link(
    pages_dir: &Path,
    filename: &str,
    link: &str,
    manifest: &HashMap<String, String>,
) -> String {
    let (target, fragment) = match link.split_once('#') {
        Some((target, fragment)) => (target, Some(fragment)),
        None => (link, None),
    };

    if !target.ends_with(".md") || target.contains("://") || target.starts_with('/') {
        return link.to_string();
    }

    let Ok(resolved) = verify_relative_path(pages_dir, Path::new(filename), Path::new(target)) else {
        return link.to_string();
    };
    let key = resolved.to_string_lossy().replace('\\', "/");

    match (manifest.get(&key), fragment) {
        (Some(path), Some(fragment)) => format!("{path}#{fragment}"),
        (Some(path), None) => path.clone(),
        (None, _) => link.to_string(),
    }
}
