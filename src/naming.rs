//! Deployment-scoped physical table naming.
//!
//! A domain type declares an environment-independent logical table name; the
//! physical resource name is derived from it on demand by prefixing the
//! deployment environment and account user. The deployment tuple is resolved
//! once at process startup by the caller's configuration layer and passed in
//! explicitly, so resolvers for several environments can coexist in one
//! process (and in one test run).

use crate::error::{Error, Result};
use crate::table;

use std::str;

/// Deployment environment a process runs against.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Environment {
    /// Local developer machine.
    Local,
    /// Shared development deployment.
    Dev,
    /// Pre-production acceptance deployment.
    Uat,
    /// Production deployment.
    Prod,
}

impl Environment {
    /// The lowercase environment name used in physical resource names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Uat => "uat",
            Self::Prod => "prod",
        }
    }
}

impl str::FromStr for Environment {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "uat" => Ok(Self::Uat),
            "prod" => Ok(Self::Prod),
            _ => Err(Error::UnknownEnvironment {
                name: name.to_string(),
            }),
        }
    }
}

/// The environment and account user a process is deployed under.
///
/// Identical deployments always yield identical physical names for a given
/// logical name; distinct deployments never collide because every component
/// is kept, in order, in the derived name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Deployment {
    /// The active deployment environment.
    pub environment: Environment,
    /// The account or developer qualifier separating parallel deployments
    /// within one environment.
    pub user: String,
}

/// Computes physical table names from logical ones.
///
/// Resolution is a pure function of the deployment and the identity; callers
/// may cache the result for the life of the process since the deployment is
/// fixed at startup.
///
/// ```rust
/// use dynamodb_marshal::naming::{Deployment, Environment, TableNameResolver};
/// use dynamodb_marshal::table::TableIdentity;
///
/// let resolver = TableNameResolver::new(Deployment {
///     environment: Environment::Prod,
///     user: "acct1".to_string(),
/// });
/// let identity = TableIdentity {
///     logical_name: "Foo".to_string(),
///     hash_key: "guid".to_string(),
///     range_key: None,
/// };
/// assert_eq!(resolver.resolve(&identity).unwrap(), "prod-acct1-Foo");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableNameResolver {
    deployment: Deployment,
}

impl TableNameResolver {
    /// Create a resolver for the given deployment.
    pub fn new(deployment: Deployment) -> Self {
        Self { deployment }
    }

    /// The deployment this resolver derives names for.
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Prefix the logical table name with `{environment}-` and `{user}-`.
    ///
    /// The logical name passes through byte-for-byte; only the environment
    /// component is lowercased (by construction). An identity with an empty
    /// logical name fails with [`Error::MissingLogicalName`] here, before any
    /// store access is attempted.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_marshal.resolve_table_name", skip(self), err)
    )]
    pub fn resolve(&self, identity: &table::TableIdentity) -> Result<String> {
        if identity.logical_name.is_empty() {
            return Err(Error::MissingLogicalName);
        }
        Ok(format!(
            "{}-{}-{}",
            self.deployment.environment.name(),
            self.deployment.user,
            identity.logical_name
        ))
    }
}
