use crate::convert::{self, AttributeCodec};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::{Serialize, de::DeserializeOwned};
use std::marker;

/// Codec for a single structured, tree-shaped value, stored as one JSON text
/// attribute.
///
/// Unlike the collection codecs there is no separate element type to carry:
/// the value's own type describes its shape. Encoding failures propagate as
/// [`Error::MalformedDocumentAttribute`]; they are never swallowed into an
/// empty string.
///
/// ```rust
/// use dynamodb_marshal::convert::{AttributeCodec, document::JsonDocumentCodec};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// struct ClientData {
///     theme: String,
///     onboarded: bool,
/// }
///
/// let codec = JsonDocumentCodec::<ClientData>::new();
/// let data = ClientData { theme: "dark".to_string(), onboarded: true };
/// let attribute = codec.encode(&data).unwrap();
/// assert_eq!(codec.decode(&attribute).unwrap(), data);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDocumentCodec<T> {
    document_type: marker::PhantomData<fn() -> T>,
}

impl<T> JsonDocumentCodec<T> {
    /// Create a codec for documents of type `T`.
    pub fn new() -> Self {
        Self {
            document_type: marker::PhantomData,
        }
    }
}

impl<T> AttributeCodec for JsonDocumentCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn encode(&self, value: &T) -> Result<types::AttributeValue> {
        let text = serde_json::to_string(value)
            .map_err(|source| Error::MalformedDocumentAttribute { source })?;
        Ok(types::AttributeValue::S(text))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<T> {
        let text = convert::expect_string(attribute)?;
        serde_json::from_str(text).map_err(|source| Error::MalformedDocumentAttribute { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde::Deserialize;
    use std::collections;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct ClientData {
        theme: String,
        onboarded: bool,
        progress: collections::BTreeMap<String, u32>,
    }

    fn client_data() -> ClientData {
        ClientData {
            theme: "dark".to_string(),
            onboarded: true,
            progress: collections::BTreeMap::from([
                ("intro".to_string(), 3),
                ("survey".to_string(), 1),
            ]),
        }
    }

    #[rstest]
    fn test_document_round_trip() {
        let codec = JsonDocumentCodec::<ClientData>::new();
        let data = client_data();
        let attribute = codec.encode(&data).unwrap();
        assert_eq!(
            attribute,
            types::AttributeValue::S(
                r#"{"theme":"dark","onboarded":true,"progress":{"intro":3,"survey":1}}"#
                    .to_string()
            )
        );
        assert_eq!(codec.decode(&attribute).unwrap(), data);
    }

    #[rstest]
    fn test_free_form_document_round_trip() {
        let codec = JsonDocumentCodec::<serde_json::Value>::new();
        let document = serde_json::json!({
            "nested": { "values": [1, 2, 3] },
            "label": "free-form",
        });
        let attribute = codec.encode(&document).unwrap();
        assert_eq!(codec.decode(&attribute).unwrap(), document);
    }

    #[rstest]
    #[case::not_json("{not json")]
    #[case::wrong_shape(r#"["a", "b"]"#)]
    fn test_document_decode_malformed(#[case] text: &str) {
        let codec = JsonDocumentCodec::<ClientData>::new();
        let attribute = types::AttributeValue::S(text.to_string());
        let error = codec.decode(&attribute).unwrap_err();
        assert!(matches!(error, Error::MalformedDocumentAttribute { .. }));
    }

    #[rstest]
    fn test_document_decode_rejects_non_string_attribute() {
        let codec = JsonDocumentCodec::<ClientData>::new();
        let attribute = types::AttributeValue::Bool(true);
        let error = codec.decode(&attribute).unwrap_err();
        assert!(matches!(error, Error::WrongAttributeKind { .. }));
    }

    #[rstest]
    fn test_null_safety() {
        let codec = JsonDocumentCodec::<ClientData>::new();
        assert_eq!(codec.encode_opt(None).unwrap(), None);
        assert!(codec.decode_opt(None).unwrap().is_none());
    }
}
