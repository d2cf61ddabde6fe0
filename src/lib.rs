#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Marshal
//!
//! A type-safe attribute marshalling and table naming layer for Amazon DynamoDB.
//!
//! ## Overview
//!
//! DynamoDB stores every attribute as a flat, schemaless value. Rich domain
//! values (enumerations, calendar dates, zoned timestamps, lists and maps of
//! structured objects, nested documents) need a bidirectional codec between
//! their in-memory shape and the store-native representation. This library
//! provides:
//!
//! - Stateless, lossless codecs for scalars, collections, and documents
//! - A codec registry built once at startup and validated eagerly, so a
//!   store-access layer can dispatch per attribute without reflection
//! - Deterministic physical table naming from a logical name plus the
//!   deployment environment and account qualifier
//!
//! Conversion failures are always returned to the caller; the library never
//! retries a conversion and never substitutes a default for a value that
//! failed to parse.
//!
//! ## Quick Example
//!
//! Register one codec per converted attribute at startup, then let the
//! store-access layer dispatch through the registry:
//!
//! ```rust
//! use dynamodb_marshal::convert::collection::JsonListCodec;
//! use dynamodb_marshal::naming::{Deployment, Environment, TableNameResolver};
//! use dynamodb_marshal::registry::RegistryBuilder;
//! use dynamodb_marshal::table::TableIdentity;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct SurveyReference {
//!     guid: String,
//!     created_on: i64,
//! }
//!
//! struct AppConfig;
//!
//! # fn main() -> dynamodb_marshal::error::Result<()> {
//! let registry = RegistryBuilder::new()
//!     .register::<AppConfig, _>("surveyReferences", JsonListCodec::<SurveyReference>::new())?
//!     .build();
//!
//! let references = vec![SurveyReference {
//!     guid: "abc".to_string(),
//!     created_on: 1_444_338_240_000,
//! }];
//! let attribute =
//!     registry.encode::<AppConfig, Vec<SurveyReference>>("surveyReferences", Some(&references))?;
//! let decoded: Option<Vec<SurveyReference>> =
//!     registry.decode::<AppConfig, Vec<SurveyReference>>("surveyReferences", attribute.as_ref())?;
//! assert_eq!(decoded, Some(references));
//!
//! let resolver = TableNameResolver::new(Deployment {
//!     environment: Environment::Prod,
//!     user: "acct1".to_string(),
//! });
//! let identity = TableIdentity {
//!     logical_name: "AppConfig".to_string(),
//!     hash_key: "studyId".to_string(),
//!     range_key: None,
//! };
//! assert_eq!(resolver.resolve(&identity)?, "prod-acct1-AppConfig");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@convert`] - Codecs between domain values and store-native attributes
//! - [`mod@error`] - The conversion and naming error taxonomy
//! - [`mod@naming`] - Physical table name resolution per deployment
//! - [`mod@registry`] - The startup-built codec registry
//! - [`mod@table`] - Table identity and primary-key marshalling

/// Codecs between domain values and store-native attributes.
pub mod convert;

/// Error types for attribute marshalling and table name resolution.
pub mod error;

/// Deployment-scoped physical table naming.
pub mod naming;

/// Startup-built codec registry keyed by entity type and attribute name.
pub mod registry;

/// Table identity and primary-key marshalling.
pub mod table;
