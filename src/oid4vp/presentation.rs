//! # Presentation Definition
//!
//! The subset of [Presentation Exchange] a wallet needs to resolve before
//! matching credentials. Constraints and formats are kept as raw JSON and
//! interpreted by the credential matcher.
//!
//! [Presentation Exchange]: https://identity.foundation/presentation-exchange/spec/v2.0.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Presentation Definition is used by a Verifier to articulate proofs
/// required.
///
/// <https://identity.foundation/presentation-exchange/spec/v2.0.0/#presentation-definition>
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PresentationDefinition {
    /// A unique ID for the desired context.
    pub id: String,

    /// Input Descriptors describe the information a Verifier requires from the
    /// Holder.
    pub input_descriptors: Vec<InputDescriptor>,

    /// If present, a human-friendly, distinctive designation for the
    /// Presentation Definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// If present, it MUST describe the purpose for which the Presentation
    /// Definition is being used for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Registered Claim Format Designations the Verifier can process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
}

/// Input Descriptors describe the information a Verifier requires from the
/// Holder.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct InputDescriptor {
    /// An identifier that does not conflict with the id of any other Input
    /// Descriptor in the same Presentation Definition.
    pub id: String,

    /// If set, it SHOULD be a human-friendly name that describes what the
    /// target schema represents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// If present, its value MUST describe the purpose for which the Claim's
    /// data is being requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Constrains submission of this input to a subset of the top-level
    /// formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,

    /// Contraints on data values.
    pub constraints: Value,
}
