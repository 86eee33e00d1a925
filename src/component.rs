//! Component source addresses: `[hostname/]namespace/name[//subdir]`.

use std::fmt;
use std::str::FromStr;

use crate::error::RegistrySourceError;
use crate::hostname::{Hostname, HostnameService, RegistryKind};
use crate::package::{parse_registry_source, validate_name, validate_namespace, FromSegments, RegistryPackage, RegistrySource};
use crate::parser::Parser;

/// A package in a component registry.
///
/// Namespace and name keep the case they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentPackage {
    host: Hostname,
    namespace: String,
    name: String,
}

impl ComponentPackage {
    /// The namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl RegistryPackage for ComponentPackage {
    const KIND: RegistryKind = RegistryKind::Component;

    fn host(&self) -> &Hostname {
        &self.host
    }

    fn for_registry_protocol(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

impl FromSegments for ComponentPackage {
    const NAME_SEGMENTS: usize = 2;

    fn from_segments(host: Hostname, names: &[&str]) -> Result<Self, RegistrySourceError> {
        let [namespace, name] = names else {
            return Err(RegistrySourceError::SegmentCount { kind: Self::KIND });
        };
        Ok(Self {
            host,
            namespace: validate_namespace(namespace)?,
            name: validate_name(name, Self::KIND)?,
        })
    }
}

impl fmt::Display for ComponentPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.namespace, self.name)
    }
}

/// A component registry package with an optional subdirectory.
///
/// # Examples
///
/// ```
/// use registry_address::ComponentSource;
///
/// let source = ComponentSource::parse("hashicorp/k8-cluster//examples/foo").unwrap();
/// assert_eq!(source.to_string(), "registry.terraform.io/hashicorp/k8-cluster//examples/foo");
/// assert_eq!(source.for_display(), "hashicorp/k8-cluster//examples/foo");
/// assert_eq!(source.for_registry_protocol(), "hashicorp/k8-cluster");
/// assert_eq!(source.subdir(), Some("examples/foo"));
/// ```
pub type ComponentSource = RegistrySource<ComponentPackage>;

impl RegistrySource<ComponentPackage> {
    /// Parses a component source with the default parser.
    ///
    /// # Errors
    ///
    /// Returns `RegistrySourceError` if the address is malformed.
    pub fn parse(input: &str) -> Result<Self, RegistrySourceError> {
        Parser::new().parse_component_source(input)
    }
}

impl FromStr for RegistrySource<ComponentPackage> {
    type Err = RegistrySourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<H: HostnameService, R> Parser<H, R> {
    /// Parses `[hostname/]namespace/name[//subdir]`.
    ///
    /// # Errors
    ///
    /// Returns `RegistrySourceError` describing the first problem found.
    pub fn parse_component_source(&self, input: &str) -> Result<ComponentSource, RegistrySourceError> {
        parse_registry_source(self.hostnames(), input)
    }
}

/// Parses a component source with the default parser.
///
/// # Errors
///
/// Returns `RegistrySourceError` if the address is malformed.
pub fn parse_component_source(input: &str) -> Result<ComponentSource, RegistrySourceError> {
    Parser::new().parse_component_source(input)
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RegistrySource<ComponentPackage> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
