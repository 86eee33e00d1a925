//! Module registry addresses:
//! `[hostname/]namespace/name/target-system[//subdir]`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ModuleSourceError, RegistrySourceError};
use crate::hostname::{Hostname, HostnameService, RegistryKind};
use crate::module::is_local_path;
use crate::package::{
    parse_registry_source, validate_name, validate_namespace, validate_target_system, FromSegments, RegistryPackage,
    RegistrySource,
};
use crate::parser::Parser;

/// A package in a module registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleRegistryPackage {
    host: Hostname,
    namespace: String,
    name: String,
    target_system: String,
}

impl ModuleRegistryPackage {
    /// The namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The target system, e.g. `aws`.
    #[must_use]
    pub fn target_system(&self) -> &str {
        &self.target_system
    }
}

impl RegistryPackage for ModuleRegistryPackage {
    const KIND: RegistryKind = RegistryKind::Module;

    fn host(&self) -> &Hostname {
        &self.host
    }

    fn for_registry_protocol(&self) -> String {
        format!("{}/{}/{}", self.namespace, self.name, self.target_system)
    }
}

impl FromSegments for ModuleRegistryPackage {
    const NAME_SEGMENTS: usize = 3;

    fn from_segments(host: Hostname, names: &[&str]) -> Result<Self, RegistrySourceError> {
        let [namespace, name, target_system] = names else {
            return Err(RegistrySourceError::SegmentCount { kind: Self::KIND });
        };
        Ok(Self {
            host,
            namespace: validate_namespace(namespace)?,
            name: validate_name(name, Self::KIND)?,
            target_system: validate_target_system(target_system)?,
        })
    }
}

impl fmt::Display for ModuleRegistryPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.host, self.namespace, self.name, self.target_system
        )
    }
}

/// A module registry package with an optional subdirectory.
///
/// # Examples
///
/// ```
/// use registry_address::ModuleRegistrySource;
///
/// let source = ModuleRegistrySource::parse("hashicorp/subnets/cidr//examples").unwrap();
/// assert_eq!(source.to_string(), "registry.terraform.io/hashicorp/subnets/cidr//examples");
/// assert_eq!(source.for_registry_protocol(), "hashicorp/subnets/cidr");
/// ```
pub type ModuleRegistrySource = RegistrySource<ModuleRegistryPackage>;

impl RegistrySource<ModuleRegistryPackage> {
    /// Parses a module registry address with the default parser.
    ///
    /// # Errors
    ///
    /// Returns `ModuleSourceError` for local paths and malformed addresses.
    pub fn parse(input: &str) -> Result<Self, ModuleSourceError> {
        Parser::new().parse_module_registry_source(input)
    }
}

impl FromStr for RegistrySource<ModuleRegistryPackage> {
    type Err = ModuleSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<H: HostnameService, R> Parser<H, R> {
    /// Parses only the registry form of a module source.
    ///
    /// Unlike [`Parser::parse_raw_module_source`], every failure is reported
    /// as the registry error that caused it.
    ///
    /// # Errors
    ///
    /// Returns `ModuleSourceError::LocalAsRegistry` for `./` and `../`
    /// paths, otherwise the wrapped `RegistrySourceError`.
    pub fn parse_module_registry_source(&self, input: &str) -> Result<ModuleRegistrySource, ModuleSourceError> {
        if is_local_path(input) {
            return Err(ModuleSourceError::LocalAsRegistry {
                raw: input.to_string(),
            });
        }
        Ok(parse_registry_source(self.hostnames(), input)?)
    }
}

/// Parses only the registry form of a module source with the default
/// parser.
///
/// # Errors
///
/// Returns `ModuleSourceError` for local paths and malformed addresses.
pub fn parse_module_registry_source(input: &str) -> Result<ModuleRegistrySource, ModuleSourceError> {
    Parser::new().parse_module_registry_source(input)
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RegistrySource<ModuleRegistryPackage> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
