use crate::config::AppConfig;
use crate::database::ArticleRepository;
use crate::domain::Article;
use crate::error::{PageError, StoreResult};
use crate::services::redirect::{NOTIFICATIONS_PATH, Redirect, same_origin_path};
use std::sync::Arc;
use tracing::{info, warn};

/// Fixed slugs that redirect to the most recent matching thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedRedirect {
    Welcome,
    Challenge,
    Checkin,
}

impl NamedRedirect {
    pub const ALL: [NamedRedirect; 3] = [Self::Welcome, Self::Challenge, Self::Checkin];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|named| named.slug() == slug)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Challenge => "challenge",
            Self::Checkin => "checkin",
        }
    }
}

enum ThreadQuery<'a> {
    Tagged(&'a str),
    AuthoredBy(&'a str),
}

/// Locates the latest thread for a [`NamedRedirect`] and turns it into a same-origin redirect.
pub struct ThreadRedirector {
    articles: Arc<dyn ArticleRepository>,
    config: Arc<AppConfig>,
}

impl ThreadRedirector {
    pub fn new(articles: Arc<dyn ArticleRepository>, config: Arc<AppConfig>) -> Self {
        Self { articles, config }
    }

    fn query_for(&self, named: NamedRedirect) -> ThreadQuery<'_> {
        match named {
            NamedRedirect::Welcome => ThreadQuery::Tagged("welcome"),
            NamedRedirect::Challenge => ThreadQuery::Tagged("challenge"),
            NamedRedirect::Checkin => ThreadQuery::AuthoredBy(&self.config.checkin_username),
        }
    }

    /// Most recently published article matching the redirect, if any.
    pub async fn locate(&self, named: NamedRedirect) -> StoreResult<Option<Article>> {
        match self.query_for(named) {
            ThreadQuery::Tagged(tag) => self.articles.latest_published_tagged(tag).await,
            ThreadQuery::AuthoredBy(username) => self.articles.latest_published_by(username).await,
        }
    }

    pub async fn redirect_for(&self, named: NamedRedirect) -> Result<Redirect, PageError> {
        let candidate = self.locate(named).await?;
        Ok(Redirect::Found(self.sanitize(named, candidate)))
    }

    // every named redirect passes through here; stored paths are never used verbatim
    fn sanitize(&self, named: NamedRedirect, candidate: Option<Article>) -> String {
        let Some(article) = candidate else {
            info!(redirect = named.slug(), "no thread found, sending to notifications");
            return NOTIFICATIONS_PATH.to_string();
        };

        match same_origin_path(&self.config.base_url, &article.path) {
            Some(path) => path,
            None => {
                warn!(
                    redirect = named.slug(),
                    article = article.id,
                    "article path is not a usable redirect target"
                );
                NOTIFICATIONS_PATH.to_string()
            }
        }
    }
}
