use crate::config::AppConfig;
use crate::database::{PageRepository, SubforemRepository};
use crate::domain::{MAX_SLUG_SEGMENTS, Page, PageTemplate};
use crate::error::PageError;
use crate::services::context::RequestContext;
use crate::services::redirect::Redirect;
use std::sync::Arc;
use tracing::{debug, info};

const PAGE_PREFIX: &str = "page";
const TXT_SUFFIX: &str = ".txt";

/// Where a page must be reachable from for the request to match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScope {
    /// `/<slug>`: only pages flagged `is_top_level_path`.
    TopLevel,
    /// `/page/<slug>`: any page.
    Prefixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Html,
    /// The path ended in `.txt`.
    Txt,
}

/// A request path broken down into what the page store is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub slug: String,
    pub scope: PageScope,
    pub format: RequestFormat,
}

impl PageRequest {
    /// Parses a request path such as `/about`, `/page/a/b` or `/robots-ish.txt`.
    ///
    /// Structurally invalid paths (empty inner segments, more than [`MAX_SLUG_SEGMENTS`]
    /// slug segments) fail with [`PageError::Routing`] before any lookup happens.
    pub fn parse(path: &str) -> Result<Self, PageError> {
        let trimmed = path.trim_start_matches('/');
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err(PageError::not_found(path));
        }

        let mut segments: Vec<&str> = trimmed.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PageError::routing(path));
        }

        let scope = if segments[0] == PAGE_PREFIX {
            segments.remove(0);
            PageScope::Prefixed
        } else {
            PageScope::TopLevel
        };

        if segments.is_empty() {
            return Err(PageError::not_found(path));
        }
        if segments.len() > MAX_SLUG_SEGMENTS {
            return Err(PageError::routing(path));
        }

        let mut format = RequestFormat::Html;
        let last = segments.len() - 1;
        let last_segment: &str = segments[last];
        if let Some(stem) = last_segment.strip_suffix(TXT_SUFFIX)
            && !stem.is_empty()
        {
            segments[last] = stem;
            format = RequestFormat::Txt;
        }

        Ok(Self {
            slug: segments.join("/"),
            scope,
            format,
        })
    }
}

/// Outcome of resolving a path against the page store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Box<Page>),
    Redirect(Redirect),
}

pub struct PageResolver {
    pages: Arc<dyn PageRepository>,
    subforems: Arc<dyn SubforemRepository>,
    config: Arc<AppConfig>,
}

impl PageResolver {
    pub fn new(
        pages: Arc<dyn PageRepository>,
        subforems: Arc<dyn SubforemRepository>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            pages,
            subforems,
            config,
        }
    }

    /// Resolves a request target such as `/about` or `/page/faq?ref=home`. The query plays no
    /// part in the lookup but is carried over into a cross-tenant redirect.
    pub async fn resolve(
        &self,
        target: &str,
        ctx: &RequestContext,
    ) -> Result<Resolution, PageError> {
        let path = target.split_once('?').map_or(target, |(path, _)| path);
        let request = PageRequest::parse(path)?;
        let top_level_only = request.scope == PageScope::TopLevel;

        let page = self
            .pages
            .lookup_page(&request.slug, ctx.subforem_id, top_level_only)
            .await?
            .ok_or_else(|| {
                debug!(slug = %request.slug, top_level_only, "no page matches");
                PageError::not_found(&request.slug)
            })?;

        if let Some(redirect) = self.redirect_if_different_subforem(&page, target, ctx).await? {
            return Ok(Resolution::Redirect(redirect));
        }

        if request.format == RequestFormat::Txt && page.template != PageTemplate::Txt {
            return Err(PageError::not_found(format!("{}.txt", request.slug)));
        }

        Ok(Resolution::Render(Box::new(page)))
    }

    /// The landing page in scope for the request, if one is marked.
    pub async fn landing_page(&self, ctx: &RequestContext) -> Result<Option<Page>, PageError> {
        Ok(self.pages.find_landing_page(ctx.subforem_id).await?)
    }

    // only enforced when both the request's tenant and the page's tenant are known and differ
    async fn redirect_if_different_subforem(
        &self,
        page: &Page,
        target: &str,
        ctx: &RequestContext,
    ) -> Result<Option<Redirect>, PageError> {
        let (Some(requested), Some(owner)) = (ctx.subforem_id, page.subforem_id) else {
            return Ok(None);
        };
        if requested == owner {
            return Ok(None);
        }

        let Some(subforem) = self.subforems.find_subforem(owner).await? else {
            return Ok(None);
        };

        let location = format!("{}{}{}", self.config.app_protocol, subforem.domain, target);
        info!(slug = %page.slug, from = requested, to = owner, "redirecting to owning subforem");
        Ok(Some(Redirect::Permanent(location)))
    }
}
