//! Registry packages and the parser shared by component and module registry
//! addresses.

use std::fmt;

use tracing::trace;

use crate::constants::DEFAULT_REGISTRY_HOST;
use crate::error::RegistrySourceError;
use crate::hostname::{validate_hostname, Hostname, HostnameService, RegistryKind};
use crate::identifier::{validate_identifier, IdentifierRole, RuleGeneration};
use crate::subdir::split_subdir;

/// A package within a component or module registry.
pub trait RegistryPackage {
    /// Address family of this package shape.
    const KIND: RegistryKind;

    /// The registry host.
    fn host(&self) -> &Hostname;

    /// The package path sent to the registry API: no host, no subdirectory.
    fn for_registry_protocol(&self) -> String;

    /// Short form for humans: the default registry host is left out.
    fn for_display(&self) -> String {
        if *self.host() == DEFAULT_REGISTRY_HOST {
            self.for_registry_protocol()
        } else {
            format!("{}/{}", self.host().for_display(), self.for_registry_protocol())
        }
    }
}

/// Construction from already-split name segments.
pub(crate) trait FromSegments: RegistryPackage + Sized {
    /// How many segments follow the hostname.
    const NAME_SEGMENTS: usize;

    fn from_segments(host: Hostname, names: &[&str]) -> Result<Self, RegistrySourceError>;
}

/// A registry package plus an optional subdirectory inside it.
///
/// `subdir` is `None` when no subdirectory was given; it is never an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrySource<P> {
    package: P,
    subdir: Option<String>,
}

impl<P: RegistryPackage> RegistrySource<P> {
    /// The package.
    #[must_use]
    pub const fn package(&self) -> &P {
        &self.package
    }

    /// The cleaned subdirectory, if any.
    #[must_use]
    pub fn subdir(&self) -> Option<&str> {
        self.subdir.as_deref()
    }

    /// Short form for humans: the default registry host is left out.
    #[must_use]
    pub fn for_display(&self) -> String {
        let package = self.package.for_display();
        match &self.subdir {
            Some(subdir) => format!("{package}//{subdir}"),
            None => package,
        }
    }

    /// The package path sent to the registry API.
    #[must_use]
    pub fn for_registry_protocol(&self) -> String {
        self.package.for_registry_protocol()
    }
}

impl<P: fmt::Display> fmt::Display for RegistrySource<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)?;
        if let Some(subdir) = &self.subdir {
            write!(f, "//{subdir}")?;
        }
        Ok(())
    }
}

/// Parses `[hostname/]namespace/name[/...][//subdir]` for package `P`.
pub(crate) fn parse_registry_source<P, H>(hostnames: &H, input: &str) -> Result<RegistrySource<P>, RegistrySourceError>
where
    P: FromSegments,
    H: HostnameService + ?Sized,
{
    let kind = P::KIND;
    let (package_part, subdir) = split_subdir(input, kind)?;

    let segments: Vec<&str> = package_part.split('/').collect();
    let names = P::NAME_SEGMENTS;
    if segments.len() != names && segments.len() != names + 1 {
        return Err(RegistrySourceError::SegmentCount { kind });
    }
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(RegistrySourceError::EmptySegment { kind });
    }
    if input.contains('?') {
        return Err(RegistrySourceError::QueryString { kind });
    }

    let (host, name_segments) = if segments.len() == names + 1 {
        let host = validate_hostname(hostnames, segments[0], kind)?;
        (host, &segments[1..])
    } else {
        if segments[0].contains('.') {
            return Err(RegistrySourceError::MissingAfterHost { kind });
        }
        (DEFAULT_REGISTRY_HOST, &segments[..])
    };

    trace!(%host, subdir = subdir.as_deref(), "parsed registry source");

    let package = P::from_segments(host, name_segments)?;
    Ok(RegistrySource { package, subdir })
}

pub(crate) fn validate_namespace(given: &str) -> Result<String, RegistrySourceError> {
    validate_identifier(given, IdentifierRole::PackageNamespace, RuleGeneration::default()).map_err(|_| {
        RegistrySourceError::InvalidNamespace {
            value: given.to_string(),
        }
    })
}

pub(crate) fn validate_name(given: &str, kind: RegistryKind) -> Result<String, RegistrySourceError> {
    let role = match kind {
        RegistryKind::Module => IdentifierRole::ModuleName,
        RegistryKind::Component | RegistryKind::Provider => IdentifierRole::ComponentName,
    };
    validate_identifier(given, role, RuleGeneration::default()).map_err(|_| RegistrySourceError::InvalidName {
        kind,
        value: given.to_string(),
    })
}

pub(crate) fn validate_target_system(given: &str) -> Result<String, RegistrySourceError> {
    validate_identifier(given, IdentifierRole::TargetSystem, RuleGeneration::default()).map_err(|_| {
        RegistrySourceError::InvalidTargetSystem {
            value: given.to_string(),
        }
    })
}

#[cfg(feature = "serde")]
impl<P: fmt::Display> serde::Serialize for RegistrySource<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
