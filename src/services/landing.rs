use crate::database::{ArticleRepository, UserRepository};
use crate::domain::Article;
use crate::error::StoreResult;
use serde::Serialize;
use std::sync::Arc;

/// How many recent articles the landing page features.
pub const FEATURED_ARTICLE_LIMIT: u32 = 6;

/// Tag that marks an article as a project showcase.
pub const SHOWCASE_TAG: &str = "showcase";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityStats {
    pub members: i64,
    pub posts: i64,
    pub projects: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingPage {
    pub stats: CommunityStats,
    pub featured: Vec<Article>,
}

pub struct LandingService {
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
}

impl LandingService {
    pub fn new(articles: Arc<dyn ArticleRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { articles, users }
    }

    pub async fn load(&self) -> StoreResult<LandingPage> {
        let stats = CommunityStats {
            members: self.users.count_registered().await?,
            posts: self.articles.count_published().await?,
            projects: self.articles.count_published_tagged(SHOWCASE_TAG).await?,
        };
        let featured = self.articles.recent_published(FEATURED_ARTICLE_LIMIT).await?;

        Ok(LandingPage { stats, featured })
    }
}
