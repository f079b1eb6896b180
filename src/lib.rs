//! # Remote Resource Fetching
//!
//! A single-shot fetch-and-decode primitive for `OpenID` wallets retrieving
//! Authorization Request Objects and Presentation Definitions over HTTP.
//!
//! A [`Fetcher`] issues one GET per call, validates the HTTP status, and
//! decodes the body either into any [`serde::de::DeserializeOwned`] type or
//! as UTF-8 text. Failures are classified into [`FetchError`] and returned as
//! values.
//!
//! # Self-signed certificates
//!
//! Interoperability test deployments commonly serve self-signed
//! certificates. Setting [`TransportPolicy::trust_any_signature`] makes each
//! call run on a freshly built session that accepts any certificate. The
//! caller's own session is never modified.
//!
//! # Example
//!
//! ```rust,no_run
//! use credibil_fetch::{Fetcher, PresentationDefinition, parse_url};
//!
//! # async fn run() -> Result<(), credibil_fetch::FetchError> {
//! let fetcher = Fetcher::default();
//! let url = parse_url("https://verifier.example/presentation-definition/1")?;
//! let pd: PresentationDefinition = fetcher.fetch(&url).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod fetch;
pub mod oid4vp;
mod report;
mod transport;

pub use reqwest::{Client, Url};

pub use crate::error::{DecodeCause, FetchError, parse_url};
pub use crate::fetch::{FetchOutcome, Fetcher};
pub use crate::oid4vp::PresentationDefinition;
pub use crate::report::{Reporter, TracingReporter};
pub use crate::transport::{Session, TransportPolicy, select_session};
