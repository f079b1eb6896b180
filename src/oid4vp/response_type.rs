//! # Response Type
//!
//! Validates the `response_type` parameter of an Authorization Request
//! against the values a wallet supports.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::oid4vp::request::UnvalidatedRequest;
use crate::oid4vp::{Error, Result};

// Placeholder reported when the request carries no response type.
const UNKNOWN: &str = "unknown";

/// The type of response expected from the Wallet (as Authorization Server).
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ResponseType {
    /// A VP Token is returned in an Authorization Response.
    #[serde(rename = "vp_token")]
    VpToken,

    /// A Self-Issued ID Token is returned in an Authorization Response.
    #[serde(rename = "id_token")]
    IdToken,

    /// A VP Token and a Self-Issued ID Token are returned in an Authorization
    /// Response (if `scope` is set to "openid").
    #[serde(rename = "vp_token id_token")]
    VpTokenIdToken,

    /// A VP Token is returned in a Token Response.
    #[serde(rename = "code")]
    Code,
}

impl ResponseType {
    /// The wire value of the response type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VpToken => "vp_token",
            Self::IdToken => "id_token",
            Self::VpTokenIdToken => "vp_token id_token",
            Self::Code => "code",
        }
    }

    /// Extract and validate `response_type` from a generic key-value
    /// document, such as a decoded JWT payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedResponseType`] carrying the offending value,
    /// or "unknown" when the value is absent, empty, or not a string.
    pub fn from_document(document: &Map<String, Value>) -> Result<Self> {
        validate(document.get("response_type").and_then(Value::as_str))
    }

    /// Extract and validate `response_type` from an unvalidated request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedResponseType`] carrying the offending value,
    /// or "unknown" when the value is absent or empty.
    pub fn from_request(request: &UnvalidatedRequest) -> Result<Self> {
        validate(request.response_type.as_deref())
    }
}

impl FromStr for ResponseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vp_token" => Ok(Self::VpToken),
            "id_token" => Ok(Self::IdToken),
            "vp_token id_token" => Ok(Self::VpTokenIdToken),
            "code" => Ok(Self::Code),
            "" => Err(Error::UnsupportedResponseType(UNKNOWN.into())),
            other => Err(Error::UnsupportedResponseType(other.into())),
        }
    }
}

impl Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate(raw: Option<&str>) -> Result<ResponseType> {
    raw.unwrap_or_default().parse()
}
