use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::{
    Gender, Nationality, RandomUserResponse, UserRecord, DEFAULT_RESULTS_PER_PAGE,
};

pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";
pub const DEFAULT_SEED: &str = "humanshuffle123";

/// Parameters of one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: u32,
    pub results: u32,
    pub gender: Option<Gender>,
    pub nationality: Option<Nationality>,
    pub seed: Option<String>,
}

impl FetchRequest {
    pub fn new(page: u32) -> Self {
        Self {
            page,
            results: DEFAULT_RESULTS_PER_PAGE,
            gender: None,
            nationality: None,
            seed: None,
        }
    }

    /// The seed is only sent while neither gender nor nationality is filtered,
    /// so unfiltered browsing is reproducible and filtered browsing is not.
    pub fn effective_seed(&self) -> Option<&str> {
        if self.gender.is_none() && self.nationality.is_none() {
            Some(self.seed.as_deref().unwrap_or(DEFAULT_SEED))
        } else {
            None
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("results", self.results.to_string()),
        ];
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.as_str().to_string()));
        }
        if let Some(nat) = self.nationality {
            pairs.push(("nat", nat.as_str().to_string()));
        }
        if let Some(seed) = self.effective_seed() {
            pairs.push(("seed", seed.to_string()));
        }
        pairs
    }
}

/// Anything that can produce one page of profiles.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_page(&self, request: &FetchRequest) -> Result<Vec<UserRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct RandomUserClient {
    client: reqwest::Client,
    base_url: String,
}

impl RandomUserClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Exactly one GET per call. No retry, no caching.
    pub async fn fetch_users(&self, request: &FetchRequest) -> Result<Vec<UserRecord>, FetchError> {
        let query = request.query_pairs();
        debug!(url = %self.base_url, ?query, "random user request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                warn!("Random user upstream unreachable: {}", e);
                FetchError::network(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Random user upstream non-OK: {}", status);
            return Err(FetchError::Network(format!("HTTP {}", status)));
        }

        let bytes = resp.bytes().await.map_err(|e| {
            warn!("Random user upstream body read failed: {}", e);
            FetchError::network(e)
        })?;

        let parsed: RandomUserResponse = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Random user upstream JSON parse failed: {}", e);
            FetchError::parse(e)
        })?;

        if let Some(info) = parsed.info.as_ref() {
            debug!(seed = ?info.seed, page = ?info.page, results = ?info.results, "random user response info");
        }

        Ok(parsed.into_records())
    }
}

#[async_trait]
impl ProfileSource for RandomUserClient {
    async fn fetch_page(&self, request: &FetchRequest) -> Result<Vec<UserRecord>, FetchError> {
        self.fetch_users(request).await
    }
}
