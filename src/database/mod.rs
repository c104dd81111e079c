use crate::domain::{Article, NavigationLink, Page, Subforem};
use crate::error::StoreResult;
use async_trait::async_trait;

pub mod model;
pub mod sqlite;

// repositories are shared between request handlers, so they must be Send + Sync.
// sqlx::Pool is thread safe; db specific implementations live in "sqlite.rs"
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Exact lookup within one scope; `None` is the global scope.
    async fn find_page(&self, slug: &str, subforem_id: Option<i64>) -> StoreResult<Option<Page>>;

    /// Lookup across scopes, preferring the given subforem, then global pages, then any other.
    /// With `top_level_only`, pages not served at `/<slug>` are never candidates.
    async fn lookup_page(
        &self,
        slug: &str,
        preferred_subforem: Option<i64>,
        top_level_only: bool,
    ) -> StoreResult<Option<Page>>;

    async fn find_landing_page(&self, subforem_id: Option<i64>) -> StoreResult<Option<Page>>;
    async fn get_all_pages(&self) -> StoreResult<Vec<Page>>;

    /// Inserts a page without an id, updates one with an id. Returns the stored row.
    async fn save_page(&self, page: &Page) -> StoreResult<Page>;
}

#[async_trait]
pub trait NavigationLinkRepository: Send + Sync {
    /// Idempotent on `(url, name)`: a second call updates instead of duplicating.
    async fn upsert_by_identity(&self, link: &NavigationLink) -> StoreResult<NavigationLink>;

    /// All links ordered by section, then ascending position.
    async fn all_links(&self) -> StoreResult<Vec<NavigationLink>>;
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn latest_published_tagged(&self, tag: &str) -> StoreResult<Option<Article>>;
    async fn latest_published_by(&self, username: &str) -> StoreResult<Option<Article>>;
    async fn recent_published(&self, limit: u32) -> StoreResult<Vec<Article>>;
    async fn count_published(&self) -> StoreResult<i64>;
    async fn count_published_tagged(&self, tag: &str) -> StoreResult<i64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count_registered(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait SubforemRepository: Send + Sync {
    async fn find_subforem(&self, id: i64) -> StoreResult<Option<Subforem>>;
    async fn find_subforem_by_domain(&self, domain: &str) -> StoreResult<Option<Subforem>>;
}
