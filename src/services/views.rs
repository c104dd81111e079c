use crate::config::AppConfig;
use crate::database::NavigationLinkRepository;
use crate::domain::{NavigationLink, NavigationSection};
use crate::error::PageError;
use minijinja::{Environment, Value, context};
use std::sync::Arc;

// templates are compiled into the binary; names ending in .html are auto-escaped
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("page.html", include_str!("../../templates/page.html")),
    ("landing.html", include_str!("../../templates/landing.html")),
    ("report_abuse.html", include_str!("../../templates/report_abuse.html")),
    ("static/privacy.html", include_str!("../../templates/static/privacy.html")),
    ("static/terms.html", include_str!("../../templates/static/terms.html")),
    ("static/security.html", include_str!("../../templates/static/security.html")),
    (
        "static/code_of_conduct.html",
        include_str!("../../templates/static/code_of_conduct.html"),
    ),
    ("static/contact.html", include_str!("../../templates/static/contact.html")),
    (
        "static/community_moderation.html",
        include_str!("../../templates/static/community_moderation.html"),
    ),
    (
        "static/tag_moderation.html",
        include_str!("../../templates/static/tag_moderation.html"),
    ),
    ("static/post_a_job.html", include_str!("../../templates/static/post_a_job.html")),
];

/// Renders HTML views inside the site chrome (navigation, footer, icons).
pub struct Views {
    env: Environment<'static>,
    navigation: Arc<dyn NavigationLinkRepository>,
    config: Arc<AppConfig>,
}

impl Views {
    pub fn new(
        navigation: Arc<dyn NavigationLinkRepository>,
        config: Arc<AppConfig>,
    ) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self {
            env,
            navigation,
            config,
        })
    }

    pub async fn render(&self, template: &str, ctx: Value) -> Result<String, PageError> {
        let site = self.site_context().await?;
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(context! { site => site, ..ctx })?)
    }

    async fn site_context(&self) -> Result<Value, PageError> {
        // visitors are never signed in as far as this service is concerned
        let (primary, footer): (Vec<NavigationLink>, Vec<NavigationLink>) = self
            .navigation
            .all_links()
            .await?
            .into_iter()
            .filter(|link| link.display_to.visible_to(false))
            .partition(|link| link.section == NavigationSection::Default);

        Ok(context! {
            community_name => &self.config.community_name,
            twitter_handle => &self.config.twitter_handle,
            base_url => self.config.url_for(""),
            primary_links => primary,
            footer_links => footer,
        })
    }
}
