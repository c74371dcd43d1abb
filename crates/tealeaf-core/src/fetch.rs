//! User profile lookups over HTTP.
//!
//! Components never perform I/O.  They return
//! [`Effect::FetchUser`](crate::Effect::FetchUser) and the
//! [`Program`](crate::Program) hands the request to a [`Fetcher`].  The
//! default fetcher, [`HttpFetcher`], talks to the GitHub users API:
//!
//! - `GET {base_url}/users/{login}` with a `User-Agent` header
//! - a 10 second request timeout enforced by the HTTP client
//! - 404 becomes [`FetchError::NotFound`], any other non-200 [`FetchError::Status`]
//!
//! Tests substitute their own [`Fetcher`] or point [`FetchConfig::base_url`]
//! at a mock server.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default base URL of the user API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` header; the GitHub API rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "tealeaf";

/// A remote user's public profile.
///
/// Text fields the API reports as `null` decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blog: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bio: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub public_gists: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html_url: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a lookup failed.
///
/// Carried inside [`Event::Fetched`](crate::Event::Fetched), so it is `Clone`
/// and holds rendered messages rather than the underlying error values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The API answered 404.
    #[error("user '{0}' not found")]
    NotFound(String),

    /// The API answered with an unexpected status.
    #[error("API error: status code {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or other transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not a valid profile.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The fetcher could not be built from its configuration.
    #[error("invalid fetch configuration: {0}")]
    Config(String),
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL, e.g. `https://api.github.com`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Default settings with a different base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Executes user lookups on behalf of the runtime.
///
/// The returned future is spawned onto the tokio runtime, so it must not
/// borrow from `self`.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch_user(&self, login: &str) -> BoxFuture<'static, Result<UserProfile, FetchError>>;
}

/// [`Fetcher`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    ///
    /// Fails if the base URL does not parse or cannot carry a path.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::Config(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/users/{login}`, with `login` percent-encoded as one segment.
    fn user_url(&self, login: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users").push(login);
        }
        url
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_user(&self, login: &str) -> BoxFuture<'static, Result<UserProfile, FetchError>> {
        let client = self.client.clone();
        let url = self.user_url(login);
        let login = login.to_string();

        Box::pin(async move {
            debug!(%url, "Fetching user profile");

            let response = client.get(url).send().await.map_err(transport_error)?;
            let status = response.status();

            match status {
                StatusCode::OK => {}
                StatusCode::NOT_FOUND => {
                    warn!(login = %login, "User not found");
                    return Err(FetchError::NotFound(login));
                }
                other => {
                    warn!(login = %login, status = other.as_u16(), "Unexpected API status");
                    return Err(FetchError::Status(other.as_u16()));
                }
            }

            let body = response.text().await.map_err(transport_error)?;
            let profile: UserProfile =
                serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

            info!(login = %profile.login, "Fetched user profile");
            Ok(profile)
        })
    }
}

fn transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        warn!("User fetch timed out");
        FetchError::Timeout
    } else {
        warn!(error = %error, "User fetch failed");
        FetchError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn octocat_json() -> serde_json::Value {
        serde_json::json!({
            "login": "octocat",
            "name": "The Octocat",
            "company": null,
            "blog": "https://github.blog",
            "location": "San Francisco",
            "email": null,
            "bio": null,
            "public_repos": 8,
            "public_gists": 8,
            "followers": 9000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z",
            "updated_at": "2024-01-22T12:00:00Z",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat"
        })
    }

    fn fetcher_for(server: &MockServer) -> HttpFetcher {
        HttpFetcher::new(&FetchConfig::with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn profile_decodes_nulls_as_empty() {
        let profile: UserProfile = serde_json::from_value(octocat_json()).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.name, "The Octocat");
        assert_eq!(profile.company, "");
        assert_eq!(profile.bio, "");
        assert_eq!(profile.followers, 9000);
        assert_eq!(profile.created_at.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    }

    #[test]
    fn default_config_targets_github() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, "https://api.github.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "tealeaf");
    }

    #[test]
    fn user_url_appends_segments() {
        let fetcher =
            HttpFetcher::new(&FetchConfig::with_base_url("http://localhost:9999/api/")).unwrap();
        assert_eq!(
            fetcher.user_url("octocat").as_str(),
            "http://localhost:9999/api/users/octocat"
        );
        assert_eq!(
            fetcher.user_url("a/b").as_str(),
            "http://localhost:9999/api/users/a%2Fb"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpFetcher::new(&FetchConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            FetchError::NotFound("ghost".into()).to_string(),
            "user 'ghost' not found"
        );
        assert_eq!(
            FetchError::Status(500).to_string(),
            "API error: status code 500"
        );
    }

    #[tokio::test]
    async fn fetch_success_returns_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header("user-agent", "tealeaf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(octocat_json()))
            .expect(1)
            .mount(&server)
            .await;

        let profile = fetcher_for(&server).fetch_user("octocat").await.unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, 8);
    }

    #[tokio::test]
    async fn fetch_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_user("ghost").await.unwrap_err();
        assert_eq!(err, FetchError::NotFound("ghost".into()));
    }

    #[tokio::test]
    async fn fetch_other_status_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_user("octocat").await.unwrap_err();
        assert_eq!(err, FetchError::Status(403));
    }

    #[tokio::test]
    async fn fetch_bad_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = fetcher_for(&server).fetch_user("octocat").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(octocat_json())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = FetchConfig {
            timeout: Duration::from_millis(50),
            ..FetchConfig::with_base_url(server.uri())
        };
        let err = HttpFetcher::new(&config)
            .unwrap()
            .fetch_user("octocat")
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn fetch_unreachable_is_network_error() {
        // Nothing listens on port 9 of localhost.
        let fetcher =
            HttpFetcher::new(&FetchConfig::with_base_url("http://127.0.0.1:9")).unwrap();
        let err = fetcher.fetch_user("octocat").await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_) | FetchError::Timeout));
    }
}
