//! # `OpenID` for Verifiable Presentations
//!
//! Wallet-side handling of an [OpenID4VP] Authorization Request: resolving a
//! request passed by reference, validating its response type, and fetching a
//! Presentation Definition passed by reference.
//!
//! [OpenID4VP]: https://openid.net/specs/openid-4-verifiable-presentations-1_0.html

mod error;
pub mod presentation;
pub mod request;
pub mod response_type;

pub use self::error::{Error, OidError};
pub use self::presentation::{InputDescriptor, PresentationDefinition};
pub use self::request::{ResolvedRequest, UnvalidatedRequest, decode_request_object, resolve};
pub use self::response_type::ResponseType;

/// Result type for `OpenID4VP` request handling.
pub type Result<T, E = Error> = std::result::Result<T, E>;
