//! Table identity and primary-key marshalling.
//!
//! Each persisted entity type declares a [`TableIdentity`]: its logical table
//! name and the attribute names of its primary key. Key values are paired
//! with the identity at persist or load time and marshalled into the
//! store-native key map, with the non-null key invariant enforced up front.

use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

/// The environment-independent identity a persisted entity type declares.
///
/// ```rust
/// use dynamodb_marshal::table::TableIdentity;
///
/// let identity = TableIdentity {
///     logical_name: "NotificationTopicSubscription".to_string(),
///     hash_key: "healthCode".to_string(),
///     range_key: Some("topicGuid".to_string()),
/// };
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct TableIdentity {
    /// Logical, environment-independent table name.
    pub logical_name: String,
    /// Attribute name of the hash key.
    pub hash_key: String,
    /// Attribute name of the range key, for tables with composite keys.
    pub range_key: Option<String>,
}

/// Concrete primary-key values for one item, paired with the identity that
/// declares them.
///
/// The hash key value is required whenever an item is persisted or loaded,
/// and the range key value exactly when the identity declares a range key.
///
/// ```rust
/// use dynamodb_marshal::table::{KeyValues, TableIdentity};
///
/// let identity = TableIdentity {
///     logical_name: "Upload".to_string(),
///     hash_key: "uploadId".to_string(),
///     range_key: None,
/// };
/// let key_values = KeyValues {
///     identity: &identity,
///     hash_value: Some("abc-123".to_string()),
///     range_value: None,
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValues<'a, T> {
    /// The identity the values belong to.
    pub identity: &'a TableIdentity,
    /// The hash key value.
    pub hash_value: Option<T>,
    /// The range key value.
    pub range_value: Option<T>,
}

impl<T: Serialize> TryFrom<KeyValues<'_, T>> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(key_values: KeyValues<'_, T>) -> Result<Self> {
        let identity = key_values.identity;
        let hash_value = key_values.hash_value.ok_or_else(|| Error::MissingKeyValue {
            attribute: identity.hash_key.clone(),
        })?;
        let mut keys = Self::from([(identity.hash_key.clone(), to_attribute_value(hash_value)?)]);
        match (&identity.range_key, key_values.range_value) {
            (Some(range_key), Some(range_value)) => {
                keys.insert(range_key.clone(), to_attribute_value(range_value)?);
            }
            (Some(range_key), None) => {
                return Err(Error::MissingKeyValue {
                    attribute: range_key.clone(),
                });
            }
            (None, Some(_)) => {
                return Err(Error::UndeclaredRangeKey {
                    table: identity.logical_name.clone(),
                });
            }
            (None, None) => {}
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn simple_identity() -> TableIdentity {
        TableIdentity {
            logical_name: "Upload".to_string(),
            hash_key: "uploadId".to_string(),
            range_key: None,
        }
    }

    fn composite_identity() -> TableIdentity {
        TableIdentity {
            logical_name: "NotificationTopicSubscription".to_string(),
            hash_key: "healthCode".to_string(),
            range_key: Some("topicGuid".to_string()),
        }
    }

    #[rstest]
    fn test_hash_only_key_map() {
        let identity = simple_identity();
        let key_values = KeyValues {
            identity: &identity,
            hash_value: Some("abc-123".to_string()),
            range_value: None,
        };
        let actual: collections::HashMap<String, types::AttributeValue> =
            key_values.try_into().unwrap();
        let expected = collections::HashMap::from([(
            "uploadId".to_string(),
            types::AttributeValue::S("abc-123".to_string()),
        )]);
        assert_eq!(actual, expected);
    }

    #[rstest]
    fn test_composite_key_map() {
        let identity = composite_identity();
        let key_values = KeyValues {
            identity: &identity,
            hash_value: Some("health-1".to_string()),
            range_value: Some("topic-9".to_string()),
        };
        let actual: collections::HashMap<String, types::AttributeValue> =
            key_values.try_into().unwrap();
        let expected = collections::HashMap::from([
            (
                "healthCode".to_string(),
                types::AttributeValue::S("health-1".to_string()),
            ),
            (
                "topicGuid".to_string(),
                types::AttributeValue::S("topic-9".to_string()),
            ),
        ]);
        assert_eq!(actual, expected);
    }

    #[rstest]
    fn test_missing_hash_value() {
        let identity = simple_identity();
        let key_values: KeyValues<'_, String> = KeyValues {
            identity: &identity,
            hash_value: None,
            range_value: None,
        };
        let error = collections::HashMap::<String, types::AttributeValue>::try_from(key_values)
            .unwrap_err();
        assert!(matches!(error, Error::MissingKeyValue { attribute } if attribute == "uploadId"));
    }

    #[rstest]
    fn test_missing_declared_range_value() {
        let identity = composite_identity();
        let key_values = KeyValues {
            identity: &identity,
            hash_value: Some("health-1".to_string()),
            range_value: None,
        };
        let error = collections::HashMap::<String, types::AttributeValue>::try_from(key_values)
            .unwrap_err();
        assert!(matches!(error, Error::MissingKeyValue { attribute } if attribute == "topicGuid"));
    }

    #[rstest]
    fn test_undeclared_range_value() {
        let identity = simple_identity();
        let key_values = KeyValues {
            identity: &identity,
            hash_value: Some("abc-123".to_string()),
            range_value: Some("extra".to_string()),
        };
        let error = collections::HashMap::<String, types::AttributeValue>::try_from(key_values)
            .unwrap_err();
        assert!(matches!(error, Error::UndeclaredRangeKey { table } if table == "Upload"));
    }
}
