//! Request parsing and the end-to-end chart handler.
//!
//! The hosting runtime owns the server loop; it hands this module a raw
//! query string and writes out whatever [`Response`] comes back.

use crate::github::GithubClient;
use crate::rank;
use crate::svg;
use crate::theme::Theme;

pub const DEFAULT_LANGS_COUNT: usize = 5;
pub const DEFAULT_THEME: &str = "dracula";

/// Parsed request parameters. Read-only after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartParams {
    pub username: String,
    pub langs_count: usize,
    pub theme: String,
}

impl ChartParams {
    /// Parse `key=value` pairs from a raw query string. Unknown keys are
    /// ignored; a missing or unparsable `langs_count` keeps the default.
    ///
    /// Values are taken verbatim, with no percent-decoding. GitHub
    /// usernames and theme names never need encoding; an encoded value
    /// simply won't match (an encoded theme falls back to the default).
    pub fn from_query(query: &str) -> Self {
        let mut username = String::new();
        let mut langs_count = DEFAULT_LANGS_COUNT;
        let mut theme = DEFAULT_THEME.to_string();

        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "username" => username = value.to_string(),
                "langs_count" => {
                    if let Ok(n) = value.parse() {
                        langs_count = n;
                    }
                }
                "theme" if !value.is_empty() => theme = value.to_string(),
                _ => {}
            }
        }

        Self {
            username,
            langs_count,
            theme,
        }
    }
}

/// Minimal response surface for the hosting runtime to write out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
    pub body: String,
}

impl Response {
    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            cache_control: None,
            body: body.to_string(),
        }
    }

    fn svg(body: String) -> Self {
        Self {
            status: 200,
            content_type: "image/svg+xml",
            cache_control: Some("no-store, max-age=0"),
            body,
        }
    }
}

/// Aggregate, rank, and render one chart request.
///
/// An empty username is rejected before any network call. A repository
/// listing failure surfaces as a generic 500; per-repository fetch failures
/// never surface (they only degrade the totals).
pub async fn handle(client: &GithubClient, params: &ChartParams) -> Response {
    if params.username.is_empty() {
        return Response::text(400, "Username required");
    }

    let totals = match client.language_totals(&params.username).await {
        Ok(totals) => totals,
        Err(e) => {
            tracing::error!(
                username = %params.username,
                error = %format!("{e:#}"),
                "aggregation failed"
            );
            return Response::text(500, "GitHub API error");
        }
    };

    let ranked = rank::rank(&totals, params.langs_count);
    let chart = svg::render(&ranked, Theme::named(&params.theme));
    Response::svg(chart.svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_apply() {
        let params = ChartParams::from_query("username=octocat");
        assert_eq!(params.username, "octocat");
        assert_eq!(params.langs_count, 5);
        assert_eq!(params.theme, "dracula");
    }

    #[test]
    fn query_overrides_apply() {
        let params = ChartParams::from_query("username=octocat&langs_count=3&theme=light");
        assert_eq!(params.langs_count, 3);
        assert_eq!(params.theme, "light");
    }

    #[test]
    fn values_are_taken_verbatim() {
        let params = ChartParams::from_query("username=octocat&theme=dra%63ula");
        assert_eq!(params.theme, "dra%63ula");
    }

    #[test]
    fn unparsable_count_keeps_default() {
        let params = ChartParams::from_query("username=octocat&langs_count=lots");
        assert_eq!(params.langs_count, 5);
    }

    #[tokio::test]
    async fn missing_username_is_rejected_without_network() {
        let client = GithubClient::new(None).unwrap();
        let resp = handle(&client, &ChartParams::from_query("theme=light")).await;
        assert_eq!(resp.status, 400);
        assert_eq!(resp.content_type, "text/plain");
        assert_eq!(resp.body, "Username required");
        assert_eq!(resp.cache_control, None);
    }

    #[tokio::test]
    async fn listing_failure_maps_to_generic_error() {
        // Bind then drop a listener so the listing fetch hits a closed port.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = GithubClient::new(None).unwrap().with_api_base(base);
        let resp = handle(&client, &ChartParams::from_query("username=octocat")).await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.content_type, "text/plain");
        assert_eq!(resp.body, "GitHub API error");
        assert!(!resp.body.contains("<svg"));
    }

    #[tokio::test]
    async fn empty_username_is_rejected() {
        let client = GithubClient::new(None).unwrap();
        let resp = handle(&client, &ChartParams::from_query("username=")).await;
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body, "Username required");
    }
}
