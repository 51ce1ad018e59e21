use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::models::DEFAULT_RESULTS_PER_PAGE;
use crate::services::random_user_service::{DEFAULT_API_URL, DEFAULT_SEED};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub seed: String,
    pub results_per_page: u32,
    pub request_timeout: Duration,
    pub render_wait: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: try_load("PORT", 3000),
            api_url: env::var("RANDOM_USER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            seed: env::var("RANDOM_USER_SEED").unwrap_or_else(|_| DEFAULT_SEED.to_string()),
            results_per_page: try_load("RESULTS_PER_PAGE", DEFAULT_RESULTS_PER_PAGE).max(1),
            request_timeout: Duration::from_secs(try_load("RANDOM_USER_TIMEOUT_SECS", 10)),
            render_wait: Duration::from_millis(try_load("RENDER_WAIT_MS", 3000)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_url: DEFAULT_API_URL.to_string(),
            seed: DEFAULT_SEED.to_string(),
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            request_timeout: Duration::from_secs(10),
            render_wait: Duration::from_millis(3000),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }
    }
}
