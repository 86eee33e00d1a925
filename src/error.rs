//! Error types for address parsing.
//!
//! Every message here is part of the public contract: downstream tooling
//! matches on the text, so wording changes are breaking changes.

use std::fmt::{self, Write as _};

use thiserror::Error;

use crate::hostname::RegistryKind;
use crate::identifier::{REGISTRY_NAME_RULES, TARGET_SYSTEM_RULES};

/// Renders user input in double quotes for error messages.
///
/// Only `"`, `\` and control characters are escaped; every other character,
/// combining marks included, is written as given.
pub(crate) struct Quoted<'a>(&'a str);

pub(crate) fn quoted(text: &str) -> Quoted<'_> {
    Quoted(text)
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\u{7}' => f.write_str("\\a")?,
                '\u{8}' => f.write_str("\\b")?,
                '\u{c}' => f.write_str("\\f")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{b}' => f.write_str("\\v")?,
                c if c.is_control() && c.is_ascii() => write!(f, "\\x{:02x}", u32::from(c))?,
                c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')
    }
}

/// Broad classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wrong segment count, empty segment, or a query string.
    Structural,
    /// Punycode, single-label, reserved, or otherwise unusable hostname.
    Hostname,
    /// A namespace, name, type, or target system breaks the identifier rules.
    Identifier,
    /// A subdirectory climbs above the package root.
    PathEscape,
    /// The input matches none of the recognized address shapes.
    Unsupported,
}

/// Failure reported by a [`HostnameService`](crate::HostnameService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostnameError {
    /// Nothing to normalize.
    #[error("hostname cannot be empty")]
    Empty,
    /// The text after the last colon is not a port number.
    #[error("invalid port {}; must be a number between 0 and 65535", quoted(.port))]
    InvalidPort {
        /// The offending port text
        port: String,
    },
    /// The host is not a valid internationalized domain name.
    #[error("{} is not a valid internationalized domain name", quoted(.host))]
    InvalidDomain {
        /// The offending host text
        host: String,
    },
}

/// Verdict of the hostname validator for a registry address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The hostname is written in ASCII-compatible (punycode) form.
    #[error(
        "invalid {kind} hostname {}; internationalized domain names must be given as direct unicode characters, not in punycode",
        quoted(.raw)
    )]
    Punycode {
        /// Address family being parsed
        kind: RegistryKind,
        /// The hostname as given
        raw: String,
    },
    /// The hostname service refused the input.
    #[error("invalid {kind} hostname {}", quoted(.raw))]
    Invalid {
        /// Address family being parsed
        kind: RegistryKind,
        /// The hostname as given
        raw: String,
        /// What the hostname service reported
        source: HostnameError,
    },
    /// A package hostname without any dot.
    #[error("invalid {kind} hostname: must contain at least one dot")]
    SingleLabel {
        /// Address family being parsed
        kind: RegistryKind,
    },
    /// One of the hosts kept for version control shorthands.
    #[error(
        "can't use {} as a {kind} host, because it's reserved for installing directly from version control repositories",
        quoted(.host)
    )]
    ReservedVcsHost {
        /// Address family being parsed
        kind: RegistryKind,
        /// The normalized host
        host: String,
    },
}

/// Why a single identifier segment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Zero-length segment.
    #[error("must have at least one character")]
    Empty,
    /// Longer than the rule set allows.
    #[error("{description}")]
    TooLong {
        /// Maximum allowed length in characters
        max: usize,
        /// Actual length in characters
        actual: usize,
        /// Rule set description
        description: &'static str,
    },
    /// Contains a dot, usually a pasted filename or hostname.
    #[error("dots are not allowed")]
    Dots,
    /// Two separators in a row, under a rule set that forbids it.
    #[error("cannot use multiple consecutive dashes")]
    ConsecutiveSeparators,
    /// A disallowed character or a leading/trailing separator.
    #[error("{description}")]
    InvalidChars {
        /// Rule set description
        description: &'static str,
    },
    /// Provider type starting with a prefix kept for the built-in provider.
    #[error("must not begin with the reserved prefix {}", quoted(.prefix))]
    ReservedPrefix {
        /// The prefix that matched
        prefix: &'static str,
        /// The type with the prefix removed, when that would be valid
        suggestion: Option<String>,
    },
}

/// A subdirectory that climbs out of its package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subdirectory path {} leads outside of the {noun} package", quoted(.path), noun = .kind.noun())]
pub struct SubdirError {
    /// The subdirectory as written
    pub path: String,
    /// Address family being parsed
    pub kind: RegistryKind,
}

/// Errors for provider source addresses.
///
/// Carries a short stable summary and a human-readable detail, displayed as
/// `summary: detail`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{summary}: {detail}")]
pub struct ParserError {
    category: ErrorCategory,
    summary: &'static str,
    detail: String,
}

impl ParserError {
    pub(crate) fn new(category: ErrorCategory, summary: &'static str, detail: impl Into<String>) -> Self {
        Self {
            category,
            summary,
            detail: detail.into(),
        }
    }

    /// The short, stable category text.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        self.summary
    }

    /// The human-readable explanation.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Broad classification of this failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.category
    }
}

/// Errors for component and module registry source addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrySourceError {
    /// Too few or too many slash-separated segments.
    #[error(
        "a {kind} source address must have either {counts} slash-separated segments",
        counts = .kind.segment_counts()
    )]
    SegmentCount {
        /// Address family being parsed
        kind: RegistryKind,
    },
    /// A segment between two slashes is empty.
    #[error("a {kind} source address must not contain empty segments")]
    EmptySegment {
        /// Address family being parsed
        kind: RegistryKind,
    },
    /// The address carries a `?query` portion.
    #[error("{kind} addresses may not include a query string portion")]
    QueryString {
        /// Address family being parsed
        kind: RegistryKind,
    },
    /// The first segment looks like a hostname but the rest is one segment
    /// short.
    #[error(
        "source address must have {count} more components after the hostname: {parts}",
        count = .kind.name_count(),
        parts = .kind.name_parts()
    )]
    MissingAfterHost {
        /// Address family being parsed
        kind: RegistryKind,
    },
    /// Hostname rejected.
    #[error(transparent)]
    Host(#[from] HostError),
    /// Subdirectory escapes the package.
    #[error(transparent)]
    Subdir(#[from] SubdirError),
    /// Namespace breaks the registry name rules.
    #[error("invalid namespace {}: {rules}", quoted(.value), rules = REGISTRY_NAME_RULES.description())]
    InvalidNamespace {
        /// The namespace as given
        value: String,
    },
    /// Package name breaks the registry name rules.
    #[error(
        "invalid {noun} name {}: {rules}",
        quoted(.value),
        noun = .kind.noun(),
        rules = REGISTRY_NAME_RULES.description()
    )]
    InvalidName {
        /// Address family being parsed
        kind: RegistryKind,
        /// The name as given
        value: String,
    },
    /// Target system breaks its stricter rules.
    #[error(
        "invalid target system {}: {rules}",
        quoted(.value),
        rules = TARGET_SYSTEM_RULES.description()
    )]
    InvalidTargetSystem {
        /// The target system as given
        value: String,
    },
}

impl RegistrySourceError {
    /// Broad classification of this failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::SegmentCount { .. }
            | Self::EmptySegment { .. }
            | Self::QueryString { .. }
            | Self::MissingAfterHost { .. } => ErrorCategory::Structural,
            Self::Host(_) => ErrorCategory::Hostname,
            Self::Subdir(_) => ErrorCategory::PathEscape,
            Self::InvalidNamespace { .. }
            | Self::InvalidName { .. }
            | Self::InvalidTargetSystem { .. } => ErrorCategory::Identifier,
        }
    }
}

/// Errors for module source addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleSourceError {
    /// Not local, not a registry address, and not recognized as remote.
    #[error("unsupported module source {}", quoted(.raw))]
    Unsupported {
        /// The source as given
        raw: String,
    },
    /// A local path handed to the registry-only parser.
    #[error("can't use local directory {} as a module registry address", quoted(.raw))]
    LocalAsRegistry {
        /// The source as given
        raw: String,
    },
    /// Registry-shaped address with an invalid part.
    #[error(transparent)]
    Registry(#[from] RegistrySourceError),
}

impl ModuleSourceError {
    /// Broad classification of this failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Unsupported { .. } | Self::LocalAsRegistry { .. } => ErrorCategory::Unsupported,
            Self::Registry(e) => e.category(),
        }
    }
}
