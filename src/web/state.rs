use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::services::profile_list_service::ProfileListController;
use crate::services::random_user_service::{ProfileSource, RandomUserClient};

/// Router state.
///
/// There is one controller per process, so every client shares the same
/// filters, page and results: a filter set in one tab moves what another tab's
/// pagination links point at. Fine for the local single-user setup this binds
/// to by default.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ProfileListController>,
    pub render_wait: Duration,
}

impl AppState {
    pub fn new(source: Arc<dyn ProfileSource>, config: &AppConfig) -> Self {
        let controller = ProfileListController::new(source)
            .with_results_per_page(config.results_per_page)
            .with_seed(config.seed.clone());

        Self {
            controller: Arc::new(controller),
            render_wait: config.render_wait,
        }
    }

    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let client = RandomUserClient::new(&config.api_url, config.request_timeout)?;
        Ok(Self::new(Arc::new(client), config))
    }
}
