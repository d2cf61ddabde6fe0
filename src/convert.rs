//! Codecs between domain values and store-native attributes.
//!
//! Every codec is stateless or immutable after construction, performs no
//! I/O, and is safe for unbounded concurrent use. Encoding and decoding obey
//! the round-trip law: decoding an encoded value yields a value semantically
//! equal to the original. Codecs that canonicalize their text form (the
//! date-time codecs) round-trip to semantic equality rather than textual
//! identity of the intermediate representation.

/// Generic list and map codecs, plus the native string-set codec.
pub mod collection;

/// Single nested JSON document codec.
pub mod document;

/// Enumeration codec keyed by canonical member name.
pub mod enumeration;

/// Calendar-date and date-time codecs.
pub mod time;

use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::{Serialize, de::DeserializeOwned};
use std::marker;

/// Bidirectional codec between a domain value and its store-native attribute.
///
/// The store does not distinguish an empty attribute from an absent one, so
/// optional fields travel through [`encode_opt`](AttributeCodec::encode_opt)
/// and [`decode_opt`](AttributeCodec::decode_opt): absent values stay absent
/// instead of raising an error. A codec may redefine what absence means for
/// its value type (see [`collection::StringSetCodec`]).
pub trait AttributeCodec {
    /// The domain value this codec accepts.
    type Value;

    /// Convert a value into its store-native attribute.
    fn encode(&self, value: &Self::Value) -> Result<types::AttributeValue>;

    /// Convert a store-native attribute back into a value.
    fn decode(&self, attribute: &types::AttributeValue) -> Result<Self::Value>;

    /// Null-safe encoding: an absent value encodes to an absent attribute.
    fn encode_opt(&self, value: Option<&Self::Value>) -> Result<Option<types::AttributeValue>> {
        value.map(|value| self.encode(value)).transpose()
    }

    /// Null-safe decoding: an absent attribute decodes to an absent value.
    fn decode_opt(
        &self,
        attribute: Option<&types::AttributeValue>,
    ) -> Result<Option<Self::Value>> {
        attribute.map(|attribute| self.decode(attribute)).transpose()
    }
}

pub(crate) fn expect_string(attribute: &types::AttributeValue) -> Result<&str> {
    match attribute {
        types::AttributeValue::S(text) => Ok(text),
        _ => Err(Error::WrongAttributeKind { expected: "string" }),
    }
}

/// Codec for values whose store-native representation needs no custom text
/// format (plain strings, numbers, booleans).
///
/// Delegates to `serde_dynamo`, which picks the natural DynamoDB attribute
/// kind for the value.
///
/// ```rust
/// use dynamodb_marshal::convert::{AttributeCodec, PassthroughCodec};
///
/// let codec = PassthroughCodec::<u64>::new();
/// let attribute = codec.encode(&42).unwrap();
/// assert_eq!(codec.decode(&attribute).unwrap(), 42);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughCodec<T> {
    value_type: marker::PhantomData<fn() -> T>,
}

impl<T> PassthroughCodec<T> {
    /// Create a pass-through codec for `T`.
    pub fn new() -> Self {
        Self {
            value_type: marker::PhantomData,
        }
    }
}

impl<T> AttributeCodec for PassthroughCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn encode(&self, value: &T) -> Result<types::AttributeValue> {
        Ok(serde_dynamo::to_attribute_value(value)?)
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<T> {
        Ok(serde_dynamo::from_attribute_value(attribute.clone())?)
    }
}
