//! # Authorization Request Resolution
//!
//! An Authorization Request reaches the wallet either by value, as URL query
//! parameters, or by reference, as a `request_uri` the wallet dereferences to
//! obtain a JWT-secured Request Object. Resolution fetches the Request Object
//! when needed, validates the `response_type`, and dereferences a
//! `presentation_definition_uri`.
//!
//! Request Object signatures are not verified here. The resolved request
//! carries the raw values so the caller can authenticate the Verifier.

use base64ct::{Base64UrlUnpadded, Encoding};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::parse_url;
use crate::fetch::Fetcher;
use crate::oid4vp::presentation::PresentationDefinition;
use crate::oid4vp::response_type::ResponseType;
use crate::oid4vp::{Error, Result};
use crate::report::Reporter;

// Query parameters carrying JSON objects rather than strings.
const JSON_PARAMS: [&str; 2] = ["presentation_definition", "client_metadata"];

/// An Authorization Request as received, before any parameter has been
/// validated.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UnvalidatedRequest {
    /// The type of response expected from the Wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,

    /// The Verifier's Client Identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// How the Wallet should interpret `client_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id_scheme: Option<String>,

    /// Binds the presentation to the Authorization Request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Client state returned with the Authorization Response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Scope values, possibly aliasing a Presentation Definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// How the Authorization Response is returned, e.g. "`direct_post`".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mode: Option<String>,

    /// Where to post the Authorization Response in "`direct_post`" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_uri: Option<String>,

    /// Where to redirect the Authorization Response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    /// Presentation Definition passed by value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_definition: Option<PresentationDefinition>,

    /// Presentation Definition passed by reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_definition_uri: Option<String>,

    /// Verifier metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_metadata: Option<Value>,

    /// Request Object passed by value as a JWT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,

    /// Location of a Request Object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_uri: Option<String>,
}

impl UnvalidatedRequest {
    /// Build a request from the query parameters of an Authorization Request
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a JSON-valued parameter cannot
    /// be parsed or a parameter has the wrong shape.
    pub fn from_url(url: &Url) -> Result<Self> {
        let mut params = Map::new();
        for (key, value) in url.query_pairs() {
            let value = if JSON_PARAMS.contains(&key.as_ref()) {
                serde_json::from_str(&value)
                    .map_err(|e| Error::InvalidRequest(format!("invalid {key}: {e}")))?
            } else {
                Value::String(value.into_owned())
            };
            params.insert(key.into_owned(), value);
        }

        serde_json::from_value(Value::Object(params))
            .map_err(|e| Error::InvalidRequest(format!("invalid authorization request: {e}")))
    }
}

/// An Authorization Request with its Request Object and Presentation
/// Definition resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// The validated response type.
    pub response_type: ResponseType,

    /// The Presentation Definition, whether passed by value or by reference.
    pub presentation_definition: Option<PresentationDefinition>,

    /// The request parameters the resolution was based on.
    pub request: UnvalidatedRequest,
}

/// Resolve an Authorization Request.
///
/// # Errors
///
/// Returns an `OpenID4VP` error when the Request Object cannot be fetched or
/// parsed, the response type is unsupported, or the Presentation Definition
/// cannot be resolved.
#[instrument(level = "debug", skip(fetcher))]
pub async fn resolve<R: Reporter>(
    fetcher: &Fetcher<R>, request: UnvalidatedRequest,
) -> Result<ResolvedRequest> {
    let request = request_object(fetcher, request).await?;
    let response_type = ResponseType::from_request(&request)?;
    let presentation_definition = presentation_definition(fetcher, &request).await?;

    Ok(ResolvedRequest {
        response_type,
        presentation_definition,
        request,
    })
}

// Replace the request with its Request Object, if it has one.
async fn request_object<R: Reporter>(
    fetcher: &Fetcher<R>, request: UnvalidatedRequest,
) -> Result<UnvalidatedRequest> {
    if let Some(uri) = &request.request_uri {
        tracing::debug!("resolve::request_uri");
        let url = parse_url(uri)?;
        let jwt = fetcher.fetch_text(&url).await?;
        return decode_jwt(&jwt).map_err(Error::InvalidRequestUriObject);
    }
    if let Some(jwt) = &request.request {
        tracing::debug!("resolve::request");
        return decode_request_object(jwt);
    }
    Ok(request)
}

async fn presentation_definition<R: Reporter>(
    fetcher: &Fetcher<R>, request: &UnvalidatedRequest,
) -> Result<Option<PresentationDefinition>> {
    match (&request.presentation_definition, &request.presentation_definition_uri) {
        (Some(_), Some(_)) => Err(Error::InvalidRequest(
            "presentation_definition and presentation_definition_uri are mutually exclusive".into(),
        )),
        (Some(pd), None) => Ok(Some(pd.clone())),
        (None, Some(uri)) => {
            tracing::debug!("resolve::presentation_definition_uri");
            let url = parse_url(uri).map_err(|e| Error::presentation_definition(&e))?;
            let pd = fetcher
                .fetch::<PresentationDefinition>(&url)
                .await
                .map_err(|e| Error::presentation_definition(&e))?;
            Ok(Some(pd))
        }
        (None, None) => Ok(None),
    }
}

/// Decode the claims of a compact JWT Request Object without verifying its
/// signature.
///
/// # Errors
///
/// Returns [`Error::InvalidRequestObject`] when the value is not a compact
/// JWT or its payload is not a JSON request.
pub fn decode_request_object(jwt: &str) -> Result<UnvalidatedRequest> {
    decode_jwt(jwt).map_err(Error::InvalidRequestObject)
}

fn decode_jwt(jwt: &str) -> std::result::Result<UnvalidatedRequest, String> {
    let parts: Vec<&str> = jwt.trim().split('.').collect();
    let [_, payload, _] = parts.as_slice() else {
        return Err("request object is not a compact JWT".into());
    };
    let decoded = Base64UrlUnpadded::decode_vec(payload)
        .map_err(|e| format!("issue decoding payload: {e}"))?;
    serde_json::from_slice(&decoded).map_err(|e| format!("issue parsing payload: {e}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn jwt(claims: &Value) -> String {
        let header = Base64UrlUnpadded::encode_string(br#"{"alg":"ES256K","typ":"oauth-authz-req+jwt"}"#);
        let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn decode_compact_jwt() {
        let token = jwt(&json!({
            "response_type": "vp_token",
            "client_id": "https://verifier.example/post",
            "nonce": "n-0S6_WzA2Mj",
        }));
        let request = decode_request_object(&format!("{token}\n")).expect("should decode");
        assert_eq!(request.response_type.as_deref(), Some("vp_token"));
        assert_eq!(request.nonce.as_deref(), Some("n-0S6_WzA2Mj"));
    }

    #[test]
    fn decode_not_jwt() {
        let err = decode_request_object("not-a-jwt").expect_err("should fail");
        assert!(matches!(err, Error::InvalidRequestObject(_)));

        let err = decode_request_object("a.!!!.c").expect_err("should fail");
        assert!(matches!(err, Error::InvalidRequestObject(msg) if msg.contains("decoding")));

        let payload = Base64UrlUnpadded::encode_string(b"[1, 2]");
        let err = decode_request_object(&format!("a.{payload}.c")).expect_err("should fail");
        assert!(matches!(err, Error::InvalidRequestObject(msg) if msg.contains("parsing")));
    }

    #[test]
    fn from_url() {
        let pd = json!({"id": "pd-1", "input_descriptors": []});
        let mut url = Url::parse("openid4vp://authorize").unwrap();
        url.query_pairs_mut()
            .append_pair("response_type", "vp_token")
            .append_pair("client_id", "https://verifier.example")
            .append_pair("presentation_definition", &pd.to_string());

        let request = UnvalidatedRequest::from_url(&url).expect("should parse");
        assert_eq!(request.response_type.as_deref(), Some("vp_token"));
        assert_eq!(request.presentation_definition.map(|pd| pd.id), Some("pd-1".into()));
    }

    #[test]
    fn from_url_bad_json() {
        let url = Url::parse("openid4vp://authorize?presentation_definition=%7Bnope").unwrap();
        let err = UnvalidatedRequest::from_url(&url).expect_err("should fail");
        assert!(matches!(err, Error::InvalidRequest(msg) if msg.contains("presentation_definition")));
    }
}
