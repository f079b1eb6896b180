//! # Fetch Engine
//!
//! Issues a single GET, validates the HTTP status, and decodes the body
//! either into a caller-declared type or as UTF-8 text. Every failure is
//! classified as a [`FetchError`] and returned as a value.
//!
//! Dropping the returned future abandons the in-flight request without
//! producing an outcome.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::FetchError;
use crate::report::{Reporter, TracingReporter};
use crate::transport::{TransportPolicy, select_session};

/// The result of one fetch.
pub type FetchOutcome<T> = Result<T, FetchError>;

/// Fetches and decodes remote resources.
#[derive(Clone, Debug)]
pub struct Fetcher<R = TracingReporter> {
    /// Certificate validation policy, read once at the start of each call.
    pub policy: TransportPolicy,

    session: Client,
    reporter: R,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(TracingReporter)
    }
}

impl<R: Reporter> Fetcher<R> {
    /// Create a fetcher using a default session and the standard trust
    /// policy.
    pub fn new(reporter: R) -> Self {
        Self {
            policy: TransportPolicy::default(),
            session: Client::new(),
            reporter,
        }
    }

    /// Replace the default session.
    #[must_use]
    pub fn with_session(mut self, session: Client) -> Self {
        self.session = session;
        self
    }

    /// Set the certificate validation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TransportPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch `url` on the default session and decode the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the resource could not be
    /// fetched or decoded.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> FetchOutcome<T> {
        self.fetch_with(&self.session, url).await
    }

    /// Fetch `url` on `session` and decode the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the resource could not be
    /// fetched or decoded.
    #[instrument(level = "debug", skip(self, session))]
    pub async fn fetch_with<T: DeserializeOwned>(
        &self, session: &Client, url: &Url,
    ) -> FetchOutcome<T> {
        let (status, body) = self.get(session, url).await?;

        tracing::debug!("fetch::decode");
        match serde_json::from_slice::<T>(&body) {
            Ok(value) => {
                self.reporter.info(&format!("fetched {url}: status {status}"));
                Ok(value)
            }
            Err(e) => {
                self.reporter.debug(&format!("unable to decode response from {url}: {e}"));
                Err(FetchError::DecodingError(Box::new(e)))
            }
        }
    }

    /// Fetch `url` on the default session and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the resource could not be
    /// fetched, or [`FetchError::DecodingError`] when the body is not
    /// valid UTF-8.
    pub async fn fetch_text(&self, url: &Url) -> FetchOutcome<String> {
        self.fetch_text_with(&self.session, url).await
    }

    /// Fetch `url` on `session` and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the resource could not be
    /// fetched, or [`FetchError::DecodingError`] when the body is not
    /// valid UTF-8.
    #[instrument(level = "debug", skip(self, session))]
    pub async fn fetch_text_with(&self, session: &Client, url: &Url) -> FetchOutcome<String> {
        let (status, body) = self.get(session, url).await?;

        tracing::debug!("fetch_text::decode");
        match String::from_utf8(body) {
            Ok(text) => {
                self.reporter.info(&format!("fetched {url}: status {status}"));
                Ok(text)
            }
            Err(e) => {
                let description = format!(
                    "response body is not valid UTF-8 (invalid sequence at byte {})",
                    e.utf8_error().valid_up_to()
                );
                self.reporter.debug(&format!("unable to decode response from {url}: {description}"));
                Err(FetchError::DecodingError(description.into()))
            }
        }
    }

    // Issue the request and read the body of a successful response. The
    // body of an unsuccessful response is never read.
    async fn get(&self, session: &Client, url: &Url) -> FetchOutcome<(u16, Vec<u8>)> {
        tracing::debug!("fetch::get");

        let client = match select_session(self.policy, session).into_client() {
            Ok(client) => client,
            Err(e) => {
                self.reporter.debug(&format!("unable to create session for {url}: {e}"));
                return Err(FetchError::NetworkError(e));
            }
        };

        let response = match client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                self.reporter.debug(&format!("request to {url} failed: {e}"));
                return Err(FetchError::NetworkError(e));
            }
        };

        let status = response.status().as_u16();
        if !is_success(status) {
            self.reporter.debug(&format!("request to {url} returned status {status}"));
            return Err(FetchError::InvalidStatusCode {
                url: url.clone(),
                status,
            });
        }

        match response.bytes().await {
            Ok(bytes) => Ok((status, bytes.to_vec())),
            Err(e) => {
                self.reporter.debug(&format!("unable to read response from {url}: {e}"));
                Err(FetchError::InvalidResponse)
            }
        }
    }
}

const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(0, false)]
    #[case(199, false)]
    #[case(300, false)]
    #[case(404, false)]
    #[case(500, false)]
    fn success_range(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(is_success(status), expected);
    }

    #[test]
    fn builder() {
        let fetcher = Fetcher::default().with_policy(TransportPolicy::trust_any());
        assert!(fetcher.policy.trust_any_signature);
    }
}
