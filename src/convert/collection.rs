use crate::convert::{self, AttributeCodec};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::{Serialize, de::DeserializeOwned};
use std::{collections, marker};

/// Codec for ordered lists of structured elements, stored as one JSON array
/// text attribute.
///
/// The element type is fixed when the codec is constructed and carried by the
/// type parameter; decoding rebuilds concrete elements from it rather than
/// inferring anything from the serialized text. Construct one codec per
/// distinct list shape and reuse it.
///
/// An empty list round-trips as `"[]"`, a present attribute.
///
/// ```rust
/// use dynamodb_marshal::convert::{AttributeCodec, collection::JsonListCodec};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// struct SchemaReference {
///     id: String,
///     revision: u32,
/// }
///
/// let codec = JsonListCodec::<SchemaReference>::new();
/// let references = vec![SchemaReference { id: "abc".to_string(), revision: 2 }];
/// let attribute = codec.encode(&references).unwrap();
/// assert_eq!(codec.decode(&attribute).unwrap(), references);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonListCodec<T> {
    element_type: marker::PhantomData<fn() -> T>,
}

impl<T> JsonListCodec<T> {
    /// Create a codec for lists of `T`.
    pub fn new() -> Self {
        Self {
            element_type: marker::PhantomData,
        }
    }
}

impl<T> AttributeCodec for JsonListCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = Vec<T>;

    fn encode(&self, value: &Vec<T>) -> Result<types::AttributeValue> {
        let text = serde_json::to_string(value)
            .map_err(|source| Error::MalformedCollectionAttribute { source })?;
        Ok(types::AttributeValue::S(text))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<Vec<T>> {
        let text = convert::expect_string(attribute)?;
        serde_json::from_str(text).map_err(|source| Error::MalformedCollectionAttribute { source })
    }
}

/// Codec for string-keyed mappings of structured values, stored as one JSON
/// object text attribute.
///
/// Keys are always plain text; the value type is fixed at construction, like
/// [`JsonListCodec`]. An empty map round-trips as `"{}"`, a present
/// attribute.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonMapCodec<T> {
    value_type: marker::PhantomData<fn() -> T>,
}

impl<T> JsonMapCodec<T> {
    /// Create a codec for string-keyed maps of `T`.
    pub fn new() -> Self {
        Self {
            value_type: marker::PhantomData,
        }
    }
}

impl<T> AttributeCodec for JsonMapCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = collections::BTreeMap<String, T>;

    fn encode(&self, value: &Self::Value) -> Result<types::AttributeValue> {
        let text = serde_json::to_string(value)
            .map_err(|source| Error::MalformedCollectionAttribute { source })?;
        Ok(types::AttributeValue::S(text))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<Self::Value> {
        let text = convert::expect_string(attribute)?;
        serde_json::from_str(text).map_err(|source| Error::MalformedCollectionAttribute { source })
    }
}

/// Codec for sets of plain strings, stored as a native DynamoDB string set.
///
/// The store rejects empty string sets, so the null-safe encoding maps an
/// empty set to an absent attribute, and an absent attribute decodes back to
/// an empty set rather than to an absent value. Going through
/// [`encode`](AttributeCodec::encode) with an empty set is an error; the
/// store-access layer is expected to use the null-safe path.
///
/// ```rust
/// use dynamodb_marshal::convert::{AttributeCodec, collection::StringSetCodec};
/// use std::collections::BTreeSet;
///
/// let empty = BTreeSet::new();
/// assert_eq!(StringSetCodec.encode_opt(Some(&empty)).unwrap(), None);
/// assert_eq!(StringSetCodec.decode_opt(None).unwrap(), Some(empty));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StringSetCodec;

impl AttributeCodec for StringSetCodec {
    type Value = collections::BTreeSet<String>;

    fn encode(&self, value: &Self::Value) -> Result<types::AttributeValue> {
        if value.is_empty() {
            return Err(Error::EmptyStringSet);
        }
        Ok(types::AttributeValue::Ss(value.iter().cloned().collect()))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<Self::Value> {
        match attribute {
            types::AttributeValue::Ss(members) => Ok(members.iter().cloned().collect()),
            _ => Err(Error::WrongAttributeKind {
                expected: "string set",
            }),
        }
    }

    fn encode_opt(&self, value: Option<&Self::Value>) -> Result<Option<types::AttributeValue>> {
        match value {
            None => Ok(None),
            Some(value) if value.is_empty() => Ok(None),
            Some(value) => Ok(Some(self.encode(value)?)),
        }
    }

    fn decode_opt(
        &self,
        attribute: Option<&types::AttributeValue>,
    ) -> Result<Option<Self::Value>> {
        match attribute {
            None => Ok(Some(collections::BTreeSet::new())),
            Some(attribute) => Ok(Some(self.decode(attribute)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct SchemaReference {
        id: String,
        revision: u32,
    }

    fn reference(id: &str, revision: u32) -> SchemaReference {
        SchemaReference {
            id: id.to_string(),
            revision,
        }
    }

    #[rstest]
    #[case::empty(vec![], "[]")]
    #[case::single(
        vec![reference("schema-a", 1)],
        r#"[{"id":"schema-a","revision":1}]"#
    )]
    #[case::several(
        vec![reference("schema-a", 1), reference("schema-b", 2), reference("schema-c", 7)],
        r#"[{"id":"schema-a","revision":1},{"id":"schema-b","revision":2},{"id":"schema-c","revision":7}]"#
    )]
    fn test_list_round_trip(#[case] references: Vec<SchemaReference>, #[case] expected: &str) {
        let codec = JsonListCodec::<SchemaReference>::new();
        let attribute = codec.encode(&references).unwrap();
        assert_eq!(attribute, types::AttributeValue::S(expected.to_string()));
        assert_eq!(codec.decode(&attribute).unwrap(), references);
    }

    #[rstest]
    fn test_list_preserves_order() {
        let codec = JsonListCodec::<SchemaReference>::new();
        let references = vec![
            reference("zzz", 9),
            reference("aaa", 1),
            reference("mmm", 5),
        ];
        let attribute = codec.encode(&references).unwrap();
        assert_eq!(codec.decode(&attribute).unwrap(), references);
    }

    #[rstest]
    #[case::not_json("{not json")]
    #[case::wrong_shape(r#"{"id":"schema-a","revision":1}"#)]
    #[case::wrong_element_shape(r#"[{"id":"schema-a"}]"#)]
    fn test_list_decode_malformed(#[case] text: &str) {
        let codec = JsonListCodec::<SchemaReference>::new();
        let attribute = types::AttributeValue::S(text.to_string());
        let error = codec.decode(&attribute).unwrap_err();
        assert!(matches!(error, Error::MalformedCollectionAttribute { .. }));
    }

    #[rstest]
    fn test_list_decode_rejects_non_string_attribute() {
        let codec = JsonListCodec::<SchemaReference>::new();
        let attribute = types::AttributeValue::N("1".to_string());
        let error = codec.decode(&attribute).unwrap_err();
        assert!(matches!(error, Error::WrongAttributeKind { .. }));
    }

    #[rstest]
    #[case::empty(collections::BTreeMap::new(), "{}")]
    #[case::populated(
        collections::BTreeMap::from([
            ("first".to_string(), reference("schema-a", 1)),
            ("second".to_string(), reference("schema-b", 2)),
        ]),
        r#"{"first":{"id":"schema-a","revision":1},"second":{"id":"schema-b","revision":2}}"#
    )]
    fn test_map_round_trip(
        #[case] map: collections::BTreeMap<String, SchemaReference>,
        #[case] expected: &str,
    ) {
        let codec = JsonMapCodec::<SchemaReference>::new();
        let attribute = codec.encode(&map).unwrap();
        assert_eq!(attribute, types::AttributeValue::S(expected.to_string()));
        assert_eq!(codec.decode(&attribute).unwrap(), map);
    }

    #[rstest]
    fn test_map_decode_malformed() {
        let codec = JsonMapCodec::<SchemaReference>::new();
        let attribute = types::AttributeValue::S("{not json".to_string());
        let error = codec.decode(&attribute).unwrap_err();
        assert!(matches!(error, Error::MalformedCollectionAttribute { .. }));
    }

    #[rstest]
    fn test_string_set_round_trip() {
        let set: collections::BTreeSet<String> =
            ["tag-b".to_string(), "tag-a".to_string()].into_iter().collect();
        let attribute = StringSetCodec.encode(&set).unwrap();
        assert_eq!(
            attribute,
            types::AttributeValue::Ss(vec!["tag-a".to_string(), "tag-b".to_string()])
        );
        assert_eq!(StringSetCodec.decode(&attribute).unwrap(), set);
    }

    #[rstest]
    fn test_string_set_empty_encodes_as_absent() {
        let empty = collections::BTreeSet::new();
        assert_eq!(StringSetCodec.encode_opt(Some(&empty)).unwrap(), None);
        assert_eq!(StringSetCodec.encode_opt(None).unwrap(), None);
        assert!(matches!(
            StringSetCodec.encode(&empty).unwrap_err(),
            Error::EmptyStringSet
        ));
    }

    #[rstest]
    fn test_string_set_absent_decodes_as_empty() {
        assert_eq!(
            StringSetCodec.decode_opt(None).unwrap(),
            Some(collections::BTreeSet::new())
        );
    }

    #[rstest]
    fn test_string_set_decode_rejects_other_kinds() {
        let attribute = types::AttributeValue::S("tag-a".to_string());
        let error = StringSetCodec.decode(&attribute).unwrap_err();
        assert!(matches!(error, Error::WrongAttributeKind { .. }));
    }
}
