use crate::convert::{self, AttributeCodec};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::{Serialize, de::DeserializeOwned};
use std::marker;

/// Codec for unit-variant enumerations, stored by canonical member name.
///
/// The concrete enumeration type is fixed when the codec is constructed; the
/// decode side needs it to resolve member names. The canonical name is the
/// serde name, so `#[serde(rename_all = ...)]` and per-variant renames apply.
/// Decoding is an exact, case-sensitive lookup and fails with
/// [`Error::UnknownEnumMember`] on any text that names no member.
///
/// ```rust
/// use dynamodb_marshal::convert::{AttributeCodec, enumeration::EnumCodec};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum SharingScope {
///     NoSharing,
///     SponsorsAndPartners,
///     AllQualifiedResearchers,
/// }
///
/// let codec = EnumCodec::<SharingScope>::new();
/// let attribute = codec.encode(&SharingScope::NoSharing).unwrap();
/// assert_eq!(codec.decode(&attribute).unwrap(), SharingScope::NoSharing);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumCodec<T> {
    member_type: marker::PhantomData<fn() -> T>,
}

impl<T> EnumCodec<T> {
    /// Create a codec for the enumeration `T`.
    pub fn new() -> Self {
        Self {
            member_type: marker::PhantomData,
        }
    }
}

impl<T> AttributeCodec for EnumCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn encode(&self, value: &T) -> Result<types::AttributeValue> {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::String(member)) => Ok(types::AttributeValue::S(member)),
            _ => Err(Error::ValueTypeMismatch {
                expected: "unit-variant enumeration",
            }),
        }
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<T> {
        let member = convert::expect_string(attribute)?;
        serde_json::from_value(serde_json::Value::String(member.to_string())).map_err(|_| {
            Error::UnknownEnumMember {
                member: member.to_string(),
            }
        })
    }
}
