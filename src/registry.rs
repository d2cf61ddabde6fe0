//! Startup-built codec registry keyed by entity type and attribute name.
//!
//! The registry replaces per-field reflection with an explicit table built
//! once at startup: a duplicate registration fails the moment it is made,
//! and a lookup of an unregistered pair fails with a precise error naming
//! the entity and attribute. Once built, the registry is immutable and the
//! store-access layer queries it before every read or write of a converted
//! attribute.
//!
//! Each registered codec keeps its concrete value type behind
//! [`std::any::Any`]; the typed [`encode`](CodecRegistry::encode) and
//! [`decode`](CodecRegistry::decode) entry points recover it and fail with
//! [`Error::ValueTypeMismatch`] if a caller asks for a different type than
//! the one registered.
//!
//! ```rust
//! use dynamodb_marshal::convert::enumeration::EnumCodec;
//! use dynamodb_marshal::convert::time::CalendarDateCodec;
//! use dynamodb_marshal::registry::RegistryBuilder;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum Status {
//!     Active,
//!     Expired,
//! }
//!
//! struct Subscription;
//!
//! # fn main() -> dynamodb_marshal::error::Result<()> {
//! let registry = RegistryBuilder::new()
//!     .register::<Subscription, _>("status", EnumCodec::<Status>::new())?
//!     .register::<Subscription, _>("expiresOn", CalendarDateCodec)?
//!     .build();
//!
//! let attribute = registry.encode::<Subscription, Status>("status", Some(&Status::Active))?;
//! let decoded: Option<Status> = registry.decode::<Subscription, Status>("status", attribute.as_ref())?;
//! assert_eq!(decoded, Some(Status::Active));
//! # Ok(())
//! # }
//! ```

use crate::convert::AttributeCodec;
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::any::{self, Any, TypeId};

trait ErasedCodec: Send + Sync {
    fn encode_opt_any(&self, value: Option<&dyn Any>) -> Result<Option<types::AttributeValue>>;

    fn decode_opt_any(
        &self,
        attribute: Option<&types::AttributeValue>,
    ) -> Result<Option<Box<dyn Any>>>;

    fn value_type_name(&self) -> &'static str;
}

struct CodecEntry<C>(C);

impl<C> ErasedCodec for CodecEntry<C>
where
    C: AttributeCodec + Send + Sync,
    C::Value: Any,
{
    fn encode_opt_any(&self, value: Option<&dyn Any>) -> Result<Option<types::AttributeValue>> {
        let value = value
            .map(|value| {
                value
                    .downcast_ref::<C::Value>()
                    .ok_or(Error::ValueTypeMismatch {
                        expected: any::type_name::<C::Value>(),
                    })
            })
            .transpose()?;
        self.0.encode_opt(value)
    }

    fn decode_opt_any(
        &self,
        attribute: Option<&types::AttributeValue>,
    ) -> Result<Option<Box<dyn Any>>> {
        let value = self.0.decode_opt(attribute)?;
        Ok(value.map(|value| Box::new(value) as Box<dyn Any>))
    }

    fn value_type_name(&self) -> &'static str {
        any::type_name::<C::Value>()
    }
}

type AttributeCodecs = IndexMap<String, Box<dyn ErasedCodec>>;

/// Builder for [`CodecRegistry`]; registrations are validated as they land.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: IndexMap<TypeId, AttributeCodecs>,
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("entities", &self.entries.len())
            .finish()
    }
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `codec` for entity `E`'s `attribute`.
    ///
    /// Registering the same (entity, attribute) pair twice fails immediately
    /// with [`Error::DuplicateCodec`] rather than at first use.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_marshal.register_codec", skip(self, codec), err)
    )]
    pub fn register<E, C>(mut self, attribute: &str, codec: C) -> Result<Self>
    where
        E: Any,
        C: AttributeCodec + Send + Sync + 'static,
        C::Value: Any,
    {
        let codecs = self.entries.entry(TypeId::of::<E>()).or_default();
        if codecs.contains_key(attribute) {
            return Err(Error::DuplicateCodec {
                entity: any::type_name::<E>(),
                attribute: attribute.to_string(),
            });
        }
        codecs.insert(attribute.to_string(), Box::new(CodecEntry(codec)));
        Ok(self)
    }

    /// Finish building; the resulting registry is immutable.
    pub fn build(self) -> CodecRegistry {
        CodecRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable codec table the store-access layer queries per attribute.
///
/// Safe to share across threads for the life of the process.
pub struct CodecRegistry {
    entries: IndexMap<TypeId, AttributeCodecs>,
}

impl CodecRegistry {
    fn entry<E: Any>(&self, attribute: &str) -> Result<&dyn ErasedCodec> {
        self.entries
            .get(&TypeId::of::<E>())
            .and_then(|codecs| codecs.get(attribute))
            .map(|codec| &**codec)
            .ok_or_else(|| Error::MissingCodec {
                entity: any::type_name::<E>(),
                attribute: attribute.to_string(),
            })
    }

    /// Encode `value` through the codec registered for entity `E`'s
    /// `attribute`.
    ///
    /// Absence passes through the codec's null-safe path, so codecs that
    /// redefine absence (the string-set codec) behave the same here as when
    /// called directly.
    pub fn encode<E, V>(
        &self,
        attribute: &str,
        value: Option<&V>,
    ) -> Result<Option<types::AttributeValue>>
    where
        E: Any,
        V: Any,
    {
        self.entry::<E>(attribute)?
            .encode_opt_any(value.map(|value| value as &dyn Any))
    }

    /// Decode a stored attribute through the codec registered for entity
    /// `E`'s `attribute`, recovering the typed value.
    pub fn decode<E, V>(
        &self,
        attribute: &str,
        attribute_value: Option<&types::AttributeValue>,
    ) -> Result<Option<V>>
    where
        E: Any,
        V: Any,
    {
        let entry = self.entry::<E>(attribute)?;
        let expected = entry.value_type_name();
        entry
            .decode_opt_any(attribute_value)?
            .map(|value| {
                value
                    .downcast::<V>()
                    .map(|value| *value)
                    .map_err(|_| Error::ValueTypeMismatch { expected })
            })
            .transpose()
    }

    /// The attribute names registered for entity `E`, in registration order.
    ///
    /// Store-access layers use this to validate their attribute sets eagerly
    /// at startup instead of discovering gaps per call.
    pub fn attributes<E: Any>(&self) -> Vec<&str> {
        self.entries
            .get(&TypeId::of::<E>())
            .map(|codecs| codecs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether a codec is registered for entity `E`'s `attribute`.
    pub fn contains<E: Any>(&self, attribute: &str) -> bool {
        self.entries
            .get(&TypeId::of::<E>())
            .is_some_and(|codecs| codecs.contains_key(attribute))
    }
}
