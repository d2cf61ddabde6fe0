//! Error types for attribute marshalling and table name resolution.
//!
//! Every failure in this crate is surfaced synchronously to the immediate
//! caller. Conversion is deterministic, so nothing here is worth retrying,
//! and a parse failure is never replaced with a null or empty default.

use thiserror::Error;

/// Result type alias for marshalling and naming operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while marshalling attributes or resolving table names.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Decode text does not match any declared enumeration member.
    #[error("unknown enumeration member {member:?}")]
    UnknownEnumMember {
        /// The text that matched no member name.
        member: String,
    },

    /// A date or date-time attribute did not parse under its declared format.
    #[error("malformed timestamp {text:?}")]
    MalformedTimestamp {
        /// The text that failed to parse.
        text: String,
        /// The underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// A collection attribute failed JSON encoding or decoding.
    #[error("malformed collection attribute")]
    MalformedCollectionAttribute {
        /// The underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// A document attribute failed JSON encoding or decoding.
    #[error("malformed document attribute")]
    MalformedDocumentAttribute {
        /// The underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// The stored attribute is not the kind the codec handles.
    #[error("expected a {expected} attribute")]
    WrongAttributeKind {
        /// The attribute kind the codec expected to find.
        expected: &'static str,
    },

    /// An empty string set cannot be written to the store; callers must go
    /// through the null-safe encoding, which maps emptiness to absence.
    #[error("empty string sets must be encoded as absent attributes")]
    EmptyStringSet,

    /// A table identity declares no logical name.
    #[error("table identity declares no logical name")]
    MissingLogicalName,

    /// A key attribute has no value at persist or load time.
    #[error("missing value for key attribute {attribute:?}")]
    MissingKeyValue {
        /// The key attribute with no value.
        attribute: String,
    },

    /// A range key value was supplied for a table that declares none.
    #[error("table {table:?} declares no range key")]
    UndeclaredRangeKey {
        /// The logical name of the table.
        table: String,
    },

    /// The same (entity, attribute) pair was registered twice.
    #[error("codec for {entity}.{attribute} already registered")]
    DuplicateCodec {
        /// The entity type the codec was registered for.
        entity: &'static str,
        /// The attribute name the codec was registered for.
        attribute: String,
    },

    /// No codec is registered for the (entity, attribute) pair.
    #[error("no codec registered for {entity}.{attribute}")]
    MissingCodec {
        /// The entity type the lookup was made for.
        entity: &'static str,
        /// The attribute name the lookup was made for.
        attribute: String,
    },

    /// A value of the wrong type was passed through the registry.
    #[error("value type mismatch, expected {expected}")]
    ValueTypeMismatch {
        /// The value type the registered codec handles.
        expected: &'static str,
    },

    /// The environment name matches no known deployment environment.
    #[error("unknown environment {name:?}")]
    UnknownEnvironment {
        /// The name that matched no environment.
        name: String,
    },

    /// An attribute value failed serde-level conversion.
    #[error("attribute serialization failed")]
    Serialization {
        /// The underlying conversion failure.
        #[from]
        source: serde_dynamo::Error,
    },
}
