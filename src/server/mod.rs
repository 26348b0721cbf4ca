//! HTTP API
//!
//! A thin axum layer over the crawler. Each scrape request builds its own
//! [`CrawlWalker`] and reads the format example afresh; nothing is shared
//! between requests except the page loader and summarizer clients.

mod errors;
mod handlers;

pub use errors::ApiError;

use crate::config::Config;
use crate::crawler::{CrawlWalker, FetchTimings, PageFetcher, PageLoader};
use crate::summarizer::TextSummarizer;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub loader: Arc<dyn PageLoader>,
    pub summarizer: Arc<dyn TextSummarizer>,
}

impl AppState {
    pub fn new(
        config: Config,
        loader: Arc<dyn PageLoader>,
        summarizer: Arc<dyn TextSummarizer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            loader,
            summarizer,
        }
    }

    /// A walker for one request; API crawls do not write the summary log
    pub fn walker(&self, format_example: String) -> CrawlWalker {
        let fetcher = PageFetcher::new(
            self.loader.clone(),
            FetchTimings::from(&self.config.browser),
        );
        CrawlWalker::new(fetcher, self.summarizer.clone(), format_example)
    }
}

/// Creates the application router
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/summaries", get(handlers::summaries))
        .route("/scrape", post(handlers::scrape))
        .route("/scrape-single-module", post(handlers::scrape_single_module))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves the API until the process exits
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(&state.config.server.bind_address).await?;
    tracing::info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, routes(state)).await
}
