use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub app_protocol: String,
    pub app_domain: String,
    pub base_url: Url,
    pub community_name: String,
    pub twitter_handle: String,
    pub content_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub seed_on_boot: bool,
    pub checkin_username: String,
    pub api_docs_url: String,
    pub landing_cache_max_age: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("Failed to determine DATABASE_URL from environment variables")?;

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(15);

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let app_protocol =
            std::env::var("APP_PROTOCOL").unwrap_or_else(|_| "https://".to_string());
        let app_domain =
            std::env::var("APP_DOMAIN").unwrap_or_else(|_| "vibecoding.community".to_string());
        let base_url = base_url(&app_protocol, &app_domain)?;

        let community_name = std::env::var("COMMUNITY_NAME")
            .unwrap_or_else(|_| "Vibecoding Community".to_string());
        let twitter_handle =
            std::env::var("TWITTER_HANDLE").unwrap_or_else(|_| "vibecoding".to_string());

        let content_dir = std::fs::canonicalize(
            std::env::var("CONTENT_DIR").unwrap_or_else(|_| "./content".to_string()),
        )
        .context("Failed to resolve CONTENT_DIR to an absolute path. Does the directory exist?")?;

        let assets_dir = PathBuf::from(
            std::env::var("ASSETS_DIR").unwrap_or_else(|_| "./assets/images".to_string()),
        );

        let seed_on_boot = std::env::var("SEED_ON_BOOT").unwrap_or_else(|_| "true".to_string())
            == "true";

        let checkin_username =
            std::env::var("CHECKIN_USERNAME").unwrap_or_else(|_| "codenewbiestaff".to_string());

        let api_docs_url = std::env::var("API_DOCS_URL")
            .unwrap_or_else(|_| "https://developers.forem.com/api".to_string());

        let landing_cache_max_age = std::env::var("LANDING_CACHE_MAX_AGE")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            app_protocol,
            app_domain,
            base_url,
            community_name,
            twitter_handle,
            content_dir,
            assets_dir,
            seed_on_boot,
            checkin_username,
            api_docs_url,
            landing_cache_max_age,
        })
    }

    /// Absolute URL for a path on this app's own domain.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}{}", self.app_protocol, self.app_domain, path)
    }
}

pub fn base_url(protocol: &str, domain: &str) -> Result<Url> {
    Url::parse(&format!("{}{}/", protocol, domain))
        .with_context(|| format!("APP_PROTOCOL/APP_DOMAIN do not form a valid URL: {protocol}{domain}"))
}
