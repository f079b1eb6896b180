//! # `OpenID4VP` Errors
//!
//! Errors raised while resolving an Authorization Request. Each error
//! displays as an `OpenID` error object so it can be returned to the
//! Verifier unchanged.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::error::FetchError;

/// `OpenID` error codes for Verifiable Presentations.
#[derive(Error, Debug, Deserialize)]
pub enum Error {
    /// The request is missing a required parameter, includes an unsupported
    /// parameter value, repeats a parameter, or is otherwise malformed.
    InvalidRequest(String),

    /// The `response_type` of the request is absent or not one of the
    /// supported values. Carries the offending value.
    UnsupportedResponseType(String),

    /// The Request Object passed by value in the `request` parameter could
    /// not be parsed.
    InvalidRequestObject(String),

    /// The `request_uri` returned a Request Object that could not be
    /// parsed.
    InvalidRequestUriObject(String),

    /// The Presentation Definition URL cannot be reached.
    InvalidPresentationDefinitionUri(String),

    /// The Presentation Definition URL can be reached, but the specified
    /// `presentation_definition` cannot be found at the URL.
    InvalidPresentationDefinitionReference(String),

    /// The wallet encountered an unexpected condition that prevented it from
    /// fulfilling the request.
    ServerError(String),
}

/// Error response for `OpenID` for Verifiable Presentations.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct OidError {
    /// Error code.
    pub error: String,

    /// Error description.
    pub error_description: String,
}

impl Error {
    /// The `OpenID` error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::UnsupportedResponseType(_) => "unsupported_response_type",
            Self::InvalidRequestObject(_) => "invalid_request_object",
            Self::InvalidRequestUriObject(_) => "invalid_request_uri_object",
            Self::InvalidPresentationDefinitionUri(_) => "invalid_presentation_definition_uri",
            Self::InvalidPresentationDefinitionReference(_) => {
                "invalid_presentation_definition_reference"
            }
            Self::ServerError(_) => "server_error",
        }
    }

    /// The human-readable error description.
    #[must_use]
    pub fn error_description(&self) -> &str {
        match self {
            Self::InvalidRequest(desc)
            | Self::UnsupportedResponseType(desc)
            | Self::InvalidRequestObject(desc)
            | Self::InvalidRequestUriObject(desc)
            | Self::InvalidPresentationDefinitionUri(desc)
            | Self::InvalidPresentationDefinitionReference(desc)
            | Self::ServerError(desc) => desc,
        }
    }

    /// The error as an `OpenID` error response.
    #[must_use]
    pub fn to_oid_error(&self) -> OidError {
        OidError {
            error: self.code().to_string(),
            error_description: self.error_description().to_string(),
        }
    }

    /// Transform error to `OpenID` compatible json format.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.to_oid_error()).unwrap_or_default()
    }

    /// Map a failure fetching a Presentation Definition by reference.
    #[must_use]
    pub fn presentation_definition(err: &FetchError) -> Self {
        match err {
            FetchError::DecodingError(_) => {
                Self::InvalidPresentationDefinitionReference(err.to_string())
            }
            _ => Self::InvalidPresentationDefinitionUri(err.to_string()),
        }
    }
}

// Displays as the `OpenID` error object.
impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.to_oid_error()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_oid_error().serialize(serializer)
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Self::InvalidRequest(format!("issue fetching request object: {err}"))
    }
}
