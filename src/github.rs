use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

const API_BASE: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = "toplangs";
const CALL_TIMEOUT: Duration = Duration::from_secs(10);
// Upstream fan-out cap for per-repo language fetches.
const MAX_IN_FLIGHT: usize = 8;

/// The subset of a repository descriptor the aggregation needs.
#[derive(Debug, Deserialize)]
pub struct Repo {
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    pub languages_url: String,
}

impl Repo {
    pub fn eligible(&self) -> bool {
        !self.fork && !self.archived
    }
}

#[derive(Clone)]
pub struct GithubClient {
    token: Option<Arc<String>>,
    api_base: String,
    http: Client,
}

impl GithubClient {
    /// Create a REST client. The token is optional; without one requests go
    /// out anonymously and hit the lower unauthenticated rate limit.
    pub fn new(token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(CALL_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            token: token.map(Arc::new),
            api_base: API_BASE.to_string(),
            http,
        })
    }

    /// Create a client using the GITHUB_TOKEN env variable when set.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("GITHUB_TOKEN").ok())
    }

    /// Point the client at a different API root. Tests use this to stand up
    /// a local stub in place of the real API.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.get(url).header("Accept", ACCEPT);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }
        req
    }

    /// List up to 100 repositories owned by `username` (first page only).
    pub async fn list_repos(&self, username: &str) -> Result<Vec<Repo>> {
        let url = format!(
            "{}/users/{username}/repos?per_page=100&type=owner",
            self.api_base
        );

        let resp = self
            .get(&url)
            .send()
            .await
            .context("Network error listing repositories")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Repository listing returned HTTP {}", status.as_u16());
        }

        resp.json()
            .await
            .context("Failed to deserialize repository listing")
    }

    /// Fetch one repository's language byte map from its `languages_url`.
    pub async fn repo_languages(&self, languages_url: &str) -> Result<IndexMap<String, u64>> {
        let resp = self
            .get(languages_url)
            .send()
            .await
            .context("Network error fetching repository languages")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Language fetch returned HTTP {}", status.as_u16());
        }

        resp.json()
            .await
            .context("Failed to deserialize language byte map")
    }

    /// Sum language bytes across all eligible (non-fork, non-archived)
    /// repositories owned by `username`.
    ///
    /// A listing failure fails the whole aggregation. A single repository's
    /// language fetch failing only drops that repository from the totals.
    /// Per-repo fetches run concurrently but fold in listing order, so the
    /// first-seen order of languages in the result is deterministic.
    pub async fn language_totals(&self, username: &str) -> Result<IndexMap<String, u64>> {
        let repos = self.list_repos(username).await?;
        let limiter = Arc::new(Semaphore::new(MAX_IN_FLIGHT));

        let mut fetches = Vec::new();
        for repo in repos.into_iter().filter(Repo::eligible) {
            let client = self.clone();
            let limiter = limiter.clone();
            let url = repo.languages_url;
            let task_url = url.clone();

            let task = tokio::spawn(async move {
                let _permit = limiter
                    .acquire_owned()
                    .await
                    .context("Fan-out limiter closed")?;
                client.repo_languages(&task_url).await
            });
            fetches.push((url, task));
        }

        let mut totals = IndexMap::new();
        for (url, task) in fetches {
            match task.await {
                Ok(Ok(langs)) => accumulate(&mut totals, langs),
                Ok(Err(e)) => {
                    tracing::warn!(%url, error = %format!("{e:#}"), "skipping repository languages");
                }
                Err(e) => {
                    tracing::warn!(%url, error = %e, "language fetch task panicked");
                }
            }
        }

        tracing::debug!(%username, languages = totals.len(), "aggregation complete");
        Ok(totals)
    }
}

fn accumulate(totals: &mut IndexMap<String, u64>, langs: IndexMap<String, u64>) {
    for (lang, bytes) in langs {
        *totals.entry(lang).or_insert(0) += bytes;
    }
}
