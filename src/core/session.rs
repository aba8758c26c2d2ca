use crate::config::UpstreamConfig;
use crate::core::token::{cookie_value, extract_form_token, TOKEN_FIELD, XSRF_COOKIE};
use crate::domain::model::{Token, TokenSource};
use crate::domain::ports::DomainLookup;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Laravel's "Page Expired" status.
pub const TOKEN_EXPIRED_STATUS: u16 = 419;
const INVALID_MARKER: &str = "invalid";

/// Why a search response was taken as a token expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirySignal {
    Status419,
    /// Heuristic: any body mentioning "invalid", case-insensitive.
    InvalidMarker,
}

pub fn detect_expiry(status: StatusCode, body: &str) -> Option<ExpirySignal> {
    if status.as_u16() == TOKEN_EXPIRED_STATUS {
        Some(ExpirySignal::Status419)
    } else if body.to_lowercase().contains(INVALID_MARKER) {
        Some(ExpirySignal::InvalidMarker)
    } else {
        None
    }
}

/// Form fields for one search call. `_token` is left out when there is no token.
pub fn search_form(token: Option<&Token>, domain: &str) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("draw", "5".to_string()),
        ("start", "0".to_string()),
        ("length", "50".to_string()),
    ];
    if let Some(token) = token {
        form.push((TOKEN_FIELD, token.as_str().to_string()));
    }
    form.push(("domains[]", domain.to_string()));
    form.push(("buttons", "true".to_string()));
    form
}

/// Cookie-carrying client context for one batch.
///
/// Each session owns its own cookie jar; nothing is shared between batches.
pub struct UpstreamSession {
    client: Client,
    jar: Arc<Jar>,
    homepage: Url,
    search: Url,
    token: Option<Token>,
}

impl UpstreamSession {
    pub fn open(config: &UpstreamConfig) -> Result<Self> {
        let homepage = config.homepage_url()?;
        let search = config.search_url()?;

        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(Arc::clone(&jar));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            client: builder.build()?,
            jar,
            homepage,
            search,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<Token>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// GET the homepage and pull a token from the `_token` field, else the `XSRF-TOKEN` cookie.
    ///
    /// `Ok(None)` when neither is present. Cookies from the homepage stay in the jar.
    pub async fn acquire_token(&self) -> Result<Option<Token>> {
        tracing::debug!("🔑 Fetching token from {}", self.homepage);
        let response = self.client.get(self.homepage.clone()).send().await?;
        tracing::debug!("🔑 Homepage response status: {}", response.status());

        let html = response.text().await?;
        if let Some(token) = extract_form_token(&html) {
            tracing::debug!("🔑 Token found ({:?})", TokenSource::FormField);
            return Ok(Some(token));
        }

        let from_cookie = self
            .jar
            .cookies(&self.homepage)
            .and_then(|header| header.to_str().ok().and_then(|h| cookie_value(h, XSRF_COOKIE)));

        match &from_cookie {
            Some(_) => tracing::debug!("🔑 Token found ({:?})", TokenSource::Cookie),
            None => tracing::warn!("🔶 No token on the homepage, continuing without one"),
        }
        Ok(from_cookie)
    }

    /// Replace the current token with a freshly acquired one.
    pub async fn refresh_token(&mut self) -> Result<()> {
        self.token = self.acquire_token().await?;
        Ok(())
    }

    /// Search one domain, refreshing the token and resending once on expiry.
    ///
    /// Returns the parsed JSON body of the last attempt, or `None` on
    /// transport failure or a non-JSON body.
    pub async fn query(&mut self, domain: &str) -> Option<Value> {
        let (status, body) = match self.post_search(domain).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("❌ {}: search request failed: {}", domain, e);
                return None;
            }
        };

        let (status, body) = match detect_expiry(status, &body) {
            None => (status, body),
            Some(signal) => {
                match signal {
                    ExpirySignal::Status419 => tracing::warn!(
                        "🔁 {}: token rejected with HTTP {}, refreshing",
                        domain,
                        TOKEN_EXPIRED_STATUS
                    ),
                    ExpirySignal::InvalidMarker => tracing::warn!(
                        "🔁 {}: response body mentions '{}' (status {}), assuming expired token",
                        domain,
                        INVALID_MARKER,
                        status
                    ),
                }

                if let Err(e) = self.refresh_token().await {
                    tracing::warn!("❌ {}: token refresh failed: {}", domain, e);
                    return None;
                }

                match self.post_search(domain).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::warn!("❌ {}: search retry failed: {}", domain, e);
                        return None;
                    }
                }
            }
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    "❌ {}: response is not JSON (status {}): {}",
                    domain,
                    status,
                    e
                );
                None
            }
        }
    }

    async fn post_search(&self, domain: &str) -> Result<(StatusCode, String)> {
        let form = search_form(self.token.as_ref(), domain);
        tracing::debug!("📡 {}: POST {}", domain, self.search);

        let response = self
            .client
            .post(self.search.clone())
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("📡 {}: search response status: {}", domain, status);
        Ok((status, body))
    }
}

#[async_trait]
impl DomainLookup for UpstreamSession {
    async fn lookup(&mut self, domain: &str) -> Option<Value> {
        self.query(domain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_expiry_signals() {
        assert_eq!(
            detect_expiry(StatusCode::from_u16(419).unwrap(), ""),
            Some(ExpirySignal::Status419)
        );
        assert_eq!(
            detect_expiry(StatusCode::OK, r#"{"message":"CSRF token INVALID"}"#),
            Some(ExpirySignal::InvalidMarker)
        );
        assert_eq!(detect_expiry(StatusCode::OK, r#"{"sellers":[]}"#), None);
        assert_eq!(detect_expiry(StatusCode::INTERNAL_SERVER_ERROR, "oops"), None);
    }

    #[test]
    fn test_status_wins_over_body_marker() {
        assert_eq!(
            detect_expiry(StatusCode::from_u16(419).unwrap(), "invalid"),
            Some(ExpirySignal::Status419)
        );
    }

    #[test]
    fn test_search_form_fields_in_order() {
        let token = Token::new("tok");
        let form = search_form(Some(&token), "example.com");
        let keys: Vec<&str> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["draw", "start", "length", "_token", "domains[]", "buttons"]
        );
        assert_eq!(form[3].1, "tok");
        assert_eq!(form[4].1, "example.com");
        assert_eq!(form[5].1, "true");
    }

    #[test]
    fn test_search_form_without_token() {
        let form = search_form(None, "example.com");
        assert!(form.iter().all(|(k, _)| *k != "_token"));
        assert_eq!(form.len(), 5);
    }

    #[test]
    fn test_open_rejects_bad_base_url() {
        assert!(UpstreamSession::open(&UpstreamConfig::new("not a url")).is_err());
    }
}
