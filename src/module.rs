//! Module source addresses: local paths, registry addresses, and remote
//! sources.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ErrorCategory, HostError, ModuleSourceError, RegistrySourceError};
use crate::hostname::HostnameService;
use crate::module_registry::{ModuleRegistryPackage, ModuleRegistrySource};
use crate::package::parse_registry_source;
use crate::parser::Parser;
use crate::subdir::clean_path;

const LOCAL_PREFIXES: [&str; 2] = ["./", "../"];

pub(crate) fn is_local_path(raw: &str) -> bool {
    let normalized = raw.replace('\\', "/");
    LOCAL_PREFIXES.iter().any(|prefix| normalized.starts_with(prefix))
}

/// A relative filesystem path to a module.
///
/// Always starts with `./` or `../` and uses forward slashes.
///
/// # Examples
///
/// ```
/// use registry_address::LocalSource;
///
/// let local = LocalSource::parse(r".\nope\..\child").unwrap();
/// assert_eq!(local.as_str(), "./child");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalSource(String);

impl LocalSource {
    /// Normalizes a `./` or `../` path.
    ///
    /// # Errors
    ///
    /// Returns `ModuleSourceError::Unsupported` when the input does not start
    /// with a local path prefix.
    pub fn parse(raw: &str) -> Result<Self, ModuleSourceError> {
        if !is_local_path(raw) {
            return Err(ModuleSourceError::Unsupported {
                raw: raw.to_string(),
            });
        }
        Ok(Self::normalize(raw))
    }

    fn normalize(raw: &str) -> Self {
        let cleaned = clean_path(raw);
        let path = match cleaned.as_str() {
            "." => "./".to_string(),
            ".." => "../".to_string(),
            _ if cleaned.starts_with("../") => cleaned,
            _ => format!("./{cleaned}"),
        };
        Self(path)
    }

    /// The normalized path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A module fetched from somewhere other than a registry or the local disk.
///
/// The package text is opaque here; it is whatever the configured
/// [`RemoteSourceParser`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteSource {
    package: String,
    subdir: Option<String>,
}

impl RemoteSource {
    /// Creates a remote source. An empty subdirectory counts as none.
    #[must_use]
    pub fn new(package: impl Into<String>, subdir: Option<String>) -> Self {
        Self {
            package: package.into(),
            subdir: subdir.filter(|s| !s.is_empty()),
        }
    }

    /// The package location.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The subdirectory inside the package, if any.
    #[must_use]
    pub fn subdir(&self) -> Option<&str> {
        self.subdir.as_deref()
    }
}

impl fmt::Display for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.package)?;
        if let Some(subdir) = &self.subdir {
            write!(f, "//{subdir}")?;
        }
        Ok(())
    }
}

/// Recognizer for remote module sources.
///
/// Consulted only after a string turned out to be neither a local path nor
/// a registry address. Closures of type `Fn(&str) -> Option<RemoteSource>`
/// implement this trait.
pub trait RemoteSourceParser {
    /// Returns the remote source `raw` describes, or `None` if it is not one.
    fn parse_remote(&self, raw: &str) -> Option<RemoteSource>;
}

/// A [`RemoteSourceParser`] that recognizes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRemoteSources;

impl RemoteSourceParser for NoRemoteSources {
    fn parse_remote(&self, _raw: &str) -> Option<RemoteSource> {
        None
    }
}

impl<F> RemoteSourceParser for F
where
    F: Fn(&str) -> Option<RemoteSource>,
{
    fn parse_remote(&self, raw: &str) -> Option<RemoteSource> {
        self(raw)
    }
}

/// Where a module comes from.
///
/// # Examples
///
/// ```
/// use registry_address::ModuleSource;
///
/// let local = ModuleSource::parse("./nope/../child").unwrap();
/// assert_eq!(local.to_string(), "./child");
///
/// let registry = ModuleSource::parse("hashicorp/subnets/cidr").unwrap();
/// assert_eq!(registry.for_display(), "hashicorp/subnets/cidr");
///
/// let err = ModuleSource::parse("boop/bloop").unwrap_err();
/// assert_eq!(err.to_string(), r#"unsupported module source "boop/bloop""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleSource {
    /// A path on the local filesystem.
    Local(LocalSource),
    /// A package in a module registry.
    Registry(ModuleRegistrySource),
    /// Anything the remote source recognizer accepted.
    Remote(RemoteSource),
}

impl ModuleSource {
    /// Parses a module source with the default parser, which recognizes no
    /// remote sources.
    ///
    /// The text of a [`ModuleSource::Remote`] value therefore does not parse
    /// back here; use [`Parser::with_remote_parser`] and
    /// [`Parser::parse_raw_module_source`] with the recognizer that produced
    /// it.
    ///
    /// # Errors
    ///
    /// Returns `ModuleSourceError` when no address form matches.
    pub fn parse(raw: &str) -> Result<Self, ModuleSourceError> {
        Parser::new().parse_raw_module_source(raw)
    }

    /// Short form for humans.
    #[must_use]
    pub fn for_display(&self) -> String {
        match self {
            Self::Local(local) => local.to_string(),
            Self::Registry(registry) => registry.for_display(),
            Self::Remote(remote) => remote.to_string(),
        }
    }
}

impl fmt::Display for ModuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(local) => fmt::Display::fmt(local, f),
            Self::Registry(registry) => fmt::Display::fmt(registry, f),
            Self::Remote(remote) => fmt::Display::fmt(remote, f),
        }
    }
}

impl FromStr for ModuleSource {
    type Err = ModuleSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<H: HostnameService, R: RemoteSourceParser> Parser<H, R> {
    /// Classifies and parses a module source.
    ///
    /// Local paths are recognized by their `./` or `../` prefix (either
    /// slash direction). Anything else is tried as a registry address, then
    /// handed to the remote recognizer. A registry failure is reported only
    /// when a field of an otherwise registry-shaped address is invalid or
    /// the host is written in punycode; every other miss is
    /// `unsupported module source`.
    ///
    /// # Errors
    ///
    /// Returns `ModuleSourceError` when no address form matches.
    pub fn parse_raw_module_source(&self, raw: &str) -> Result<ModuleSource, ModuleSourceError> {
        if is_local_path(raw) {
            let local = LocalSource::normalize(raw);
            debug!(source = raw, path = local.as_str(), "module source is a local path");
            return Ok(ModuleSource::Local(local));
        }

        let registry_err = match parse_registry_source::<ModuleRegistryPackage, _>(self.hostnames(), raw) {
            Ok(registry) => return Ok(ModuleSource::Registry(registry)),
            Err(e) => e,
        };

        if let Some(remote) = self.remote().parse_remote(raw) {
            debug!(source = raw, "module source is remote");
            return Ok(ModuleSource::Remote(remote));
        }

        let invalid_part = registry_err.category() == ErrorCategory::Identifier
            || matches!(registry_err, RegistrySourceError::Host(HostError::Punycode { .. }));
        if invalid_part {
            debug!(source = raw, error = %registry_err, "registry-shaped module source has an invalid part");
            return Err(registry_err.into());
        }

        debug!(source = raw, error = %registry_err, "module source matches no known form");
        Err(ModuleSourceError::Unsupported {
            raw: raw.to_string(),
        })
    }
}

/// Parses a module source with the default parser.
///
/// # Errors
///
/// Returns `ModuleSourceError` when no address form matches.
pub fn parse_raw_module_source(raw: &str) -> Result<ModuleSource, ModuleSourceError> {
    Parser::new().parse_raw_module_source(raw)
}

#[cfg(feature = "serde")]
impl serde::Serialize for ModuleSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Deserializes through [`ModuleSource::parse`], so remote sources are
/// rejected as unsupported.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ModuleSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(raw: &str) -> String {
        match parse_raw_module_source(raw).unwrap() {
            ModuleSource::Local(local) => local.to_string(),
            other => panic!("expected a local source for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn local_paths_are_cleaned() {
        assert_eq!(local("./nope/../child"), "./child");
        assert_eq!(local("./nope/../../sibling"), "../sibling");
        assert_eq!(local("../sibling"), "../sibling");
        assert_eq!(local("./child/"), "./child");
    }

    #[test]
    fn windows_style_local_paths() {
        assert_eq!(local(r".\nope\..\child"), "./child");
        assert_eq!(local(r"..\sibling"), "../sibling");
        assert_eq!(local(r"./nope\nope/why\./please\don't"), "./nope/nope/why/please/don't");
    }

    #[test]
    fn bare_dots_keep_their_marker() {
        assert_eq!(local("./"), "./");
        assert_eq!(local("../"), "../");
        assert_eq!(local("./a/.."), "./");
    }

    #[test]
    fn local_round_trip() {
        for raw in ["./child", "../sibling", "./", "../"] {
            assert_eq!(local(&local(raw)), local(raw), "{raw}");
        }
    }

    #[test]
    fn registry_address() {
        let source = parse_raw_module_source("hashicorp/subnets/cidr//examples").unwrap();
        let ModuleSource::Registry(registry) = &source else {
            panic!("expected a registry source, got {source:?}");
        };
        assert_eq!(registry.subdir(), Some("examples"));
        assert_eq!(source.to_string(), "registry.terraform.io/hashicorp/subnets/cidr//examples");
        assert_eq!(source.for_display(), "hashicorp/subnets/cidr//examples");
    }

    #[test]
    fn unsupported_forms() {
        for raw in [
            "boop/bloop",
            "hashicorp/subnets/cidr//../nope",
            "foo/var/baz/qux",
            "git::https://example.com/vpc.git",
            "github.com/hashicorp/subnets/cidr",
        ] {
            let err = parse_raw_module_source(raw).unwrap_err();
            assert_eq!(err.to_string(), format!("unsupported module source {raw:?}"), "{raw}");
            assert_eq!(err.category(), ErrorCategory::Unsupported);
        }
    }

    #[test]
    fn invalid_registry_fields_propagate() {
        let err = parse_raw_module_source("hashicorp/subnets/no-no-no").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Identifier);
        assert_eq!(
            err.to_string(),
            r#"invalid target system "no-no-no": must be between one and 64 ASCII letters or digits"#
        );
    }

    #[test]
    fn punycode_hosts_propagate() {
        for raw in [
            "xn--80akhbyknj4f.com/hashicorp/subnets/cidr",
            "example\u{3002}xn--p1ai/a/b/c",
            "\u{ff58}\u{ff4e}--80akhbyknj4f.com/hashicorp/subnets/cidr",
        ] {
            let err = parse_raw_module_source(raw).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Hostname, "{raw}");
            assert!(err.to_string().ends_with("not in punycode"), "{raw}");
        }
    }

    #[test]
    fn remote_recognizer_is_consulted() {
        let parser = Parser::new().with_remote_parser(|raw: &str| {
            raw.strip_prefix("git::").map(|rest| RemoteSource::new(rest, None))
        });

        let source = parser
            .parse_raw_module_source("git::https://example.com/vpc.git")
            .unwrap();
        assert_eq!(source, ModuleSource::Remote(RemoteSource::new("https://example.com/vpc.git", None)));

        let source = parser.parse_raw_module_source("./child").unwrap();
        assert!(matches!(source, ModuleSource::Local(_)));

        let source = parser.parse_raw_module_source("hashicorp/subnets/cidr").unwrap();
        assert!(matches!(source, ModuleSource::Registry(_)));

        assert!(parser.parse_raw_module_source("boop/bloop").is_err());
    }

    #[test]
    fn remote_text_needs_the_recognizer_to_parse_back() {
        let remote = ModuleSource::Remote(RemoteSource::new("git::https://example.com/vpc.git", None));
        let err = ModuleSource::parse(&remote.to_string()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unsupported);

        let parser = Parser::new().with_remote_parser(|raw: &str| {
            raw.starts_with("git::").then(|| RemoteSource::new(raw, None))
        });
        assert_eq!(parser.parse_raw_module_source(&remote.to_string()).unwrap(), remote);
    }

    #[test]
    fn remote_rendering() {
        let remote = RemoteSource::new("https://example.com/vpc.git", Some("modules/a".to_string()));
        assert_eq!(remote.to_string(), "https://example.com/vpc.git//modules/a");
        assert_eq!(RemoteSource::new("x", Some(String::new())).subdir(), None);
    }

    #[test]
    fn local_source_rejects_non_local() {
        assert!(LocalSource::parse("hashicorp/subnets/cidr").is_err());
    }
}
