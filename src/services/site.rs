use crate::config::AppConfig;

/// Built-in pages served from compiled templates rather than the page store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPage {
    Privacy,
    Terms,
    Security,
    CodeOfConduct,
    Contact,
    CommunityModeration,
    TagModeration,
    PostAJob,
}

impl StaticPage {
    pub const ALL: [StaticPage; 8] = [
        Self::Privacy,
        Self::Terms,
        Self::Security,
        Self::CodeOfConduct,
        Self::Contact,
        Self::CommunityModeration,
        Self::TagModeration,
        Self::PostAJob,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Privacy => "/privacy",
            Self::Terms => "/terms",
            Self::Security => "/security",
            Self::CodeOfConduct => "/code-of-conduct",
            Self::Contact => "/contact",
            Self::CommunityModeration => "/community-moderation",
            Self::TagModeration => "/tag-moderation",
            Self::PostAJob => "/page/post-a-job",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Privacy => "static/privacy.html",
            Self::Terms => "static/terms.html",
            Self::Security => "static/security.html",
            Self::CodeOfConduct => "static/code_of_conduct.html",
            Self::Contact => "static/contact.html",
            Self::CommunityModeration => "static/community_moderation.html",
            Self::TagModeration => "static/tag_moderation.html",
            Self::PostAJob => "static/post_a_job.html",
        }
    }
}

pub fn robots_txt(config: &AppConfig) -> String {
    format!(
        "# See https://www.robotstxt.org/robotstxt.html for documentation on how to use the robots.txt file\n\
         User-agent: *\n\
         Disallow: /search\n\
         Disallow: /report-abuse\n\
         \n\
         Sitemap: {}\n",
        config.url_for("/sitemap-index.xml")
    )
}
