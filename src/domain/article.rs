use chrono::NaiveDateTime;
use serde::Serialize;

/// A published thread. Authored elsewhere; this service only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Stored path of the article. Not trusted as a redirect target until sanitised.
    pub path: String,
    pub description: String,
    pub user_id: i64,
    pub tags: Vec<String>,
    pub published: bool,
    pub published_at: Option<NaiveDateTime>,
}

impl Article {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
