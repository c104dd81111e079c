use crate::config::AppConfig;
use crate::database::{
    ArticleRepository, NavigationLinkRepository, PageRepository, SubforemRepository,
    UserRepository,
};
use crate::services::landing::LandingService;
use crate::services::render::PageRenderer;
use crate::services::resolver::PageResolver;
use crate::services::threads::ThreadRedirector;
use crate::services::views::Views;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod database;
pub mod domain;
pub mod error;
pub mod favicons;
mod features;
pub mod io;
pub mod logging;
pub mod parser;
pub mod services;

#[cfg(test)]
mod tests;

/// Everything a request handler needs, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub resolver: Arc<PageResolver>,
    pub renderer: Arc<PageRenderer>,
    pub threads: Arc<ThreadRedirector>,
    pub landing: Arc<LandingService>,
    pub views: Arc<Views>,
    pub subforems: Arc<dyn SubforemRepository>,
}

impl AppState {
    /// Wires every service onto one store that implements all repositories.
    pub fn new<S>(store: Arc<S>, config: Arc<AppConfig>) -> Result<Self, minijinja::Error>
    where
        S: PageRepository
            + NavigationLinkRepository
            + ArticleRepository
            + UserRepository
            + SubforemRepository
            + 'static,
    {
        let views = Arc::new(Views::new(store.clone(), config.clone())?);

        Ok(Self {
            resolver: Arc::new(PageResolver::new(
                store.clone(),
                store.clone(),
                config.clone(),
            )),
            renderer: Arc::new(PageRenderer::new(views.clone())),
            threads: Arc::new(ThreadRedirector::new(store.clone(), config.clone())),
            landing: Arc::new(LandingService::new(store.clone(), store.clone())),
            views,
            subforems: store,
            config,
        })
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(features::landing::landing_handler))
        .merge(features::redirects::redirects_router())
        .merge(features::site::site_router())
        .nest_service("/assets", ServeDir::new(&state.config.assets_dir))
        .fallback(features::pages::page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
