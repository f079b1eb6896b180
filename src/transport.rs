//! # Transport Selection
//!
//! Chooses the HTTP session a fetch runs on. Certificate-trust bypass lives
//! only here: it is applied to a freshly built session scoped to one call
//! and never to a session supplied by the caller.

use std::borrow::Cow;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// How server certificates are validated.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransportPolicy {
    /// Accept any server certificate, including self-signed ones.
    pub trust_any_signature: bool,
}

impl TransportPolicy {
    /// Validate certificates against the platform trust store.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            trust_any_signature: false,
        }
    }

    /// Accept any server certificate.
    #[must_use]
    pub const fn trust_any() -> Self {
        Self {
            trust_any_signature: true,
        }
    }
}

/// The session selected for a single fetch.
#[derive(Debug)]
pub enum Session<'a> {
    /// The caller's session, used unchanged.
    Default(&'a Client),

    /// A session built for this call that accepts any certificate.
    TrustAny(Client),

    /// The trust-any session could not be built. Surfaces as a network
    /// error once the request is issued.
    Unavailable(reqwest::Error),
}

impl<'a> Session<'a> {
    /// Resolve the session into a client for issuing the request.
    ///
    /// # Errors
    ///
    /// Returns the construction error when the session is
    /// [`Session::Unavailable`].
    pub fn into_client(self) -> Result<Cow<'a, Client>, reqwest::Error> {
        match self {
            Self::Default(client) => Ok(Cow::Borrowed(client)),
            Self::TrustAny(client) => Ok(Cow::Owned(client)),
            Self::Unavailable(e) => Err(e),
        }
    }
}

/// Select the session to use for one fetch.
///
/// Performs no I/O and cannot fail.
#[must_use]
pub fn select_session(policy: TransportPolicy, default: &Client) -> Session<'_> {
    if !policy.trust_any_signature {
        return Session::Default(default);
    }

    tracing::debug!("transport::trust_any");
    match Client::builder().danger_accept_invalid_certs(true).build() {
        Ok(client) => Session::TrustAny(client),
        Err(e) => Session::Unavailable(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_borrows_default() {
        let client = Client::new();
        let Session::Default(selected) = select_session(TransportPolicy::standard(), &client)
        else {
            panic!("expected default session");
        };
        assert!(std::ptr::eq(selected, &client));
    }

    #[test]
    fn standard_is_not_copied() {
        let client = Client::new();
        let selected = select_session(TransportPolicy::default(), &client);
        let resolved = selected.into_client().expect("should resolve");
        assert!(matches!(resolved, Cow::Borrowed(_)));
    }

    #[test]
    fn trust_any_builds_scoped_session() {
        let client = Client::new();
        let selected = select_session(TransportPolicy::trust_any(), &client);
        assert!(matches!(selected, Session::TrustAny(_)));

        let resolved = selected.into_client().expect("should resolve");
        assert!(matches!(resolved, Cow::Owned(_)));
    }

    #[test]
    fn policy_config() {
        let policy: TransportPolicy = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(policy, TransportPolicy::standard());

        let policy: TransportPolicy =
            serde_json::from_str(r#"{"trust_any_signature": true}"#).expect("should deserialize");
        assert_eq!(policy, TransportPolicy::trust_any());
    }
}
