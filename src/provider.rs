//! Provider addresses: `[hostname/][namespace/]type`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    BUILTIN_PROVIDER_HOST, BUILTIN_PROVIDER_NAMESPACE, DEFAULT_REGISTRY_HOST, LEGACY_NAMESPACE_TEXT,
    UNKNOWN_NAMESPACE_TEXT,
};
use crate::error::{quoted, ErrorCategory, IdentifierError, ParserError};
use crate::hostname::{validate_hostname, Hostname, HostnameService, RegistryKind};
use crate::identifier::{validate_identifier, IdentifierRole, RuleGeneration};
use crate::parser::Parser;

const INVALID_SOURCE: &str = "Invalid provider source string";
const INVALID_TYPE: &str = "Invalid provider type";
const INVALID_NAMESPACE: &str = "Invalid provider namespace";
const INVALID_HOST: &str = "Invalid provider registry host";
const INVALID_FORMAT: &str = "Invalid provider address format";
const UNKNOWN_NAMESPACE: &str = "Unknown provider namespace";
const INVALID_ADDRESS: &str = "Invalid provider address";

const SOURCE_FORMAT_DETAIL: &str = r#"The "source" attribute must be in the format "[hostname/][namespace/]name""#;
const FQN_FORMAT_DETAIL: &str = r#"Expected FQN in the format "hostname/namespace/name""#;

/// The namespace segment of a provider address.
///
/// The two sentinels are distinct variants, so a real namespace can never
/// collide with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// An ordinary registry namespace.
    Named(String),
    /// The address predates namespaces. Written as `-`.
    Legacy,
    /// The address gave only a type, so the namespace is unresolved.
    /// Written as `?`.
    Unknown,
}

impl Namespace {
    /// The namespace as it appears in the canonical address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Legacy => LEGACY_NAMESPACE_TEXT,
            Self::Unknown => UNKNOWN_NAMESPACE_TEXT,
        }
    }

    /// True for an ordinary namespace, false for either sentinel.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::Named(String::new())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Namespace {
    fn from(text: &str) -> Self {
        match text {
            LEGACY_NAMESPACE_TEXT => Self::Legacy,
            UNKNOWN_NAMESPACE_TEXT => Self::Unknown,
            other => Self::Named(other.to_string()),
        }
    }
}

/// A provider address.
///
/// Always fully populated after a successful parse. The [`Default`] value
/// is the zero address, which [`Provider::validate`] rejects.
///
/// # Examples
///
/// ```
/// use registry_address::Provider;
///
/// let aws = Provider::parse("hashicorp/aws").unwrap();
/// assert_eq!(aws.namespace().as_str(), "hashicorp");
/// assert_eq!(aws.type_name(), "aws");
/// assert_eq!(aws.to_string(), "registry.terraform.io/hashicorp/aws");
/// assert_eq!(aws.for_display(), "hashicorp/aws");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Provider {
    hostname: Hostname,
    namespace: Namespace,
    type_name: String,
}

impl Provider {
    /// Parses a provider source string with the default parser.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` if the string is not a valid provider source.
    pub fn parse(input: &str) -> Result<Self, ParserError> {
        Parser::new().parse_provider_source(input)
    }

    /// Builds a provider from parts, validating namespace and type.
    ///
    /// The namespace may be `-` for a legacy address; any other value must
    /// be a valid identifier. Names keep their case, and the type may not
    /// carry the reserved `terraform-` prefix.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` if the namespace or type is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use registry_address::{Provider, DEFAULT_REGISTRY_HOST};
    ///
    /// let p = Provider::new(DEFAULT_REGISTRY_HOST, "hashicorp", "test").unwrap();
    /// assert_eq!(p.to_string(), "registry.terraform.io/hashicorp/test");
    /// assert!(Provider::new(DEFAULT_REGISTRY_HOST, "bad.ns", "test").is_err());
    /// ```
    pub fn new(hostname: Hostname, namespace: &str, type_name: &str) -> Result<Self, ParserError> {
        let generation = RuleGeneration::default();
        let namespace = if namespace == LEGACY_NAMESPACE_TEXT {
            Namespace::Legacy
        } else {
            Namespace::Named(validate_part(namespace, IdentifierRole::ProviderNamespace, generation)?)
        };
        let type_name = validate_part(type_name, IdentifierRole::ProviderType, generation)?;
        Ok(Self {
            hostname,
            namespace,
            type_name,
        })
    }

    /// Assembles a provider without any checks.
    ///
    /// For values coming from somewhere other than the parser; run
    /// [`Provider::validate`] before trusting them.
    #[must_use]
    pub fn unchecked(hostname: Hostname, namespace: Namespace, type_name: impl Into<String>) -> Self {
        Self {
            hostname,
            namespace,
            type_name: type_name.into(),
        }
    }

    /// The registry host.
    #[must_use]
    pub const fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    /// The namespace, possibly a sentinel.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The provider type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// True for the zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self == &Self::default()
    }

    /// True for providers implemented inside the core runtime.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.hostname == BUILTIN_PROVIDER_HOST && self.namespace.as_str() == BUILTIN_PROVIDER_NAMESPACE
    }

    /// True for a legacy address on the default registry.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.hostname == DEFAULT_REGISTRY_HOST && self.namespace == Namespace::Legacy
    }

    /// False when the namespace is the legacy or unknown sentinel.
    #[must_use]
    pub const fn has_known_namespace(&self) -> bool {
        self.namespace.is_known()
    }

    /// Short form for humans: the default registry host is left out.
    #[must_use]
    pub fn for_display(&self) -> String {
        if self.hostname == DEFAULT_REGISTRY_HOST {
            format!("{}/{}", self.namespace, self.type_name)
        } else {
            format!(
                "{}/{}/{}",
                self.hostname.for_display(),
                self.namespace,
                self.type_name
            )
        }
    }

    /// The bare type, for legacy, unknown, and built-in providers only.
    ///
    /// Returns `None` for ordinary namespaced providers, which have no
    /// legacy form.
    #[must_use]
    pub fn legacy_string(&self) -> Option<&str> {
        if self.is_builtin() || !self.namespace.is_known() {
            Some(&self.type_name)
        } else {
            None
        }
    }

    /// Re-checks a provider built by means other than parsing.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` if any field is zero, the namespace is a
    /// sentinel, or a field breaks the current identifier rules.
    pub fn validate(&self) -> Result<(), ParserError> {
        Parser::new().validate_provider(self)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.hostname, self.namespace, self.type_name)
    }
}

impl FromStr for Provider {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<H: HostnameService, R> Parser<H, R> {
    /// Parses `[hostname/][namespace/]type`.
    ///
    /// A lone type gets the default host and the unknown namespace. The
    /// namespaces `-` and `?` are read as the legacy and unknown sentinels
    /// and are only allowed with the default host.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` describing the first problem found.
    ///
    /// # Examples
    ///
    /// ```
    /// use registry_address::{Namespace, Parser};
    ///
    /// let parser = Parser::new();
    /// let p = parser.parse_provider_source("aws").unwrap();
    /// assert_eq!(p.namespace(), &Namespace::Unknown);
    ///
    /// let err = parser.parse_provider_source("example.com/too/many/parts").unwrap_err();
    /// assert_eq!(err.summary(), "Invalid provider source string");
    /// ```
    pub fn parse_provider_source(&self, input: &str) -> Result<Provider, ParserError> {
        let parts = split_source_parts(input)?;
        let generation = self.provider_rules();

        let (host_part, namespace_part, type_part) = match parts.as_slice() {
            [ty] => (None, None, *ty),
            [ns, ty] => (None, Some(*ns), *ty),
            [host, ns, ty] => (Some(*host), Some(*ns), *ty),
            _ => return Err(invalid_source()),
        };

        // A reserved prefix is reported last so the suggestion can carry the
        // host and namespace.
        let type_result = validate_identifier(type_part, IdentifierRole::ProviderType, generation);
        if let Some(e) = type_result
            .as_ref()
            .err()
            .filter(|e| !matches!(e, IdentifierError::ReservedPrefix { .. }))
        {
            return Err(invalid_type(type_part, input, e));
        }

        let namespace = match namespace_part {
            None => Namespace::Unknown,
            Some(LEGACY_NAMESPACE_TEXT) => Namespace::Legacy,
            Some(UNKNOWN_NAMESPACE_TEXT) => Namespace::Unknown,
            Some(given) => Namespace::Named(
                validate_identifier(given, IdentifierRole::ProviderNamespace, generation).map_err(|e| {
                    ParserError::new(
                        ErrorCategory::Identifier,
                        INVALID_NAMESPACE,
                        format!(
                            "Invalid provider namespace {} in source {}: {e}",
                            quoted(given),
                            quoted(input)
                        ),
                    )
                })?,
            ),
        };

        let hostname = match host_part {
            Some(raw) => validate_hostname(self.hostnames(), raw, RegistryKind::Provider).map_err(|_| {
                ParserError::new(
                    ErrorCategory::Hostname,
                    INVALID_HOST,
                    format!(
                        "The host {} given in provider source address {} is not a valid DNS hostname.",
                        quoted(raw),
                        quoted(input)
                    ),
                )
            })?,
            None => DEFAULT_REGISTRY_HOST,
        };

        if !namespace.is_known() && hostname != DEFAULT_REGISTRY_HOST {
            let which = if namespace == Namespace::Legacy {
                "legacy"
            } else {
                "unknown"
            };
            return Err(ParserError::new(
                ErrorCategory::Identifier,
                INVALID_NAMESPACE,
                format!(
                    "The {which} provider namespace {} can be used only with hostname {}.",
                    quoted(namespace.as_str()),
                    self.hostnames().for_display(&DEFAULT_REGISTRY_HOST)
                ),
            ));
        }

        let type_name = match type_result {
            Ok(type_name) => type_name,
            Err(IdentifierError::ReservedPrefix {
                prefix,
                suggestion: Some(suggested),
            }) => {
                let suggested = if namespace_part.is_some() {
                    Provider {
                        hostname,
                        namespace,
                        type_name: suggested,
                    }
                    .for_display()
                } else {
                    suggested
                };
                return Err(ParserError::new(
                    ErrorCategory::Identifier,
                    INVALID_TYPE,
                    format!(
                        "Provider source {} has a type with the prefix {}, which isn't valid. \
                         Although that prefix is often used in the names of version control repositories \
                         for providers, provider source strings should not include it.\n\nDid you mean {}?",
                        quoted(input),
                        quoted(prefix),
                        quoted(&suggested)
                    ),
                ));
            }
            Err(IdentifierError::ReservedPrefix { prefix, suggestion: None }) => {
                return Err(ParserError::new(
                    ErrorCategory::Identifier,
                    INVALID_TYPE,
                    format!(
                        "Provider source {} has a type with the prefix {}, which isn't allowed \
                         because it would be redundant to name a provider with that prefix. If you are the \
                         author of this provider, rename it to not include the prefix.",
                        quoted(input),
                        quoted(prefix)
                    ),
                ));
            }
            Err(e) => return Err(invalid_type(type_part, input, &e)),
        };

        Ok(Provider {
            hostname,
            namespace,
            type_name,
        })
    }

    /// Validates one provider namespace or type segment, returning its
    /// normalized form under the configured rule generation.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError`; its text is the bare reason, such as
    /// `dots are not allowed`.
    pub fn parse_provider_part(&self, given: &str) -> Result<String, IdentifierError> {
        validate_identifier(given, IdentifierRole::ProviderNamespace, self.provider_rules())
    }

    /// Accepts only fully qualified `hostname/namespace/type` addresses with
    /// a known namespace.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` for fewer or more than three segments, any
    /// parse failure, or a sentinel namespace.
    pub fn validate_provider_address(&self, input: &str) -> Result<Provider, ParserError> {
        if input.split('/').count() != 3 {
            return Err(ParserError::new(
                ErrorCategory::Structural,
                INVALID_FORMAT,
                FQN_FORMAT_DETAIL,
            ));
        }

        let provider = self.parse_provider_source(input)?;
        if !provider.has_known_namespace() {
            return Err(unknown_namespace(&provider.namespace));
        }
        Ok(provider)
    }

    /// Re-checks every field of an existing provider.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` if the provider is zero, lacks a hostname, has
    /// a sentinel namespace, or carries an invalid namespace or type.
    pub fn validate_provider(&self, provider: &Provider) -> Result<(), ParserError> {
        if provider.is_zero() {
            return Err(ParserError::new(
                ErrorCategory::Structural,
                INVALID_ADDRESS,
                "The provider address is empty.",
            ));
        }
        if provider.hostname.is_empty() {
            return Err(ParserError::new(
                ErrorCategory::Hostname,
                INVALID_HOST,
                format!("The provider address {provider} has no hostname."),
            ));
        }
        if !provider.has_known_namespace() {
            return Err(unknown_namespace(&provider.namespace));
        }

        let generation = self.provider_rules();
        validate_part(provider.namespace.as_str(), IdentifierRole::ProviderNamespace, generation)?;
        validate_part(&provider.type_name, IdentifierRole::ProviderType, generation)?;
        Ok(())
    }
}

/// Parses a provider source string with the default parser.
///
/// # Errors
///
/// Returns `ParserError` if the string is not a valid provider source.
pub fn parse_provider_source(input: &str) -> Result<Provider, ParserError> {
    Parser::new().parse_provider_source(input)
}

/// Validates one provider namespace or type segment with the default rules.
///
/// # Errors
///
/// Returns `IdentifierError` with the bare reason.
pub fn parse_provider_part(given: &str) -> Result<String, IdentifierError> {
    Parser::new().parse_provider_part(given)
}

/// Accepts only fully qualified provider addresses with a known namespace.
///
/// # Errors
///
/// Returns `ParserError` as [`Parser::validate_provider_address`] does.
pub fn validate_provider_address(input: &str) -> Result<Provider, ParserError> {
    Parser::new().validate_provider_address(input)
}

fn split_source_parts(input: &str) -> Result<Vec<&str>, ParserError> {
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() > 3 || parts.iter().any(|part| part.is_empty()) {
        return Err(invalid_source());
    }
    Ok(parts)
}

fn invalid_source() -> ParserError {
    ParserError::new(ErrorCategory::Structural, INVALID_SOURCE, SOURCE_FORMAT_DETAIL)
}

fn invalid_type(type_part: &str, input: &str, e: &IdentifierError) -> ParserError {
    ParserError::new(
        ErrorCategory::Identifier,
        INVALID_TYPE,
        format!(
            "Invalid provider type {} in source {}: {e}",
            quoted(type_part),
            quoted(input)
        ),
    )
}

fn unknown_namespace(namespace: &Namespace) -> ParserError {
    ParserError::new(
        ErrorCategory::Identifier,
        UNKNOWN_NAMESPACE,
        format!(
            "{} is not a valid provider namespace; specify a namespace explicitly",
            quoted(namespace.as_str())
        ),
    )
}

fn validate_part(given: &str, role: IdentifierRole, generation: RuleGeneration) -> Result<String, ParserError> {
    let (summary, what) = if role == IdentifierRole::ProviderType {
        (INVALID_TYPE, "type")
    } else {
        (INVALID_NAMESPACE, "namespace")
    };
    validate_identifier(given, role, generation).map_err(|e| {
        ParserError::new(
            ErrorCategory::Identifier,
            summary,
            format!("Invalid provider {what} {}: {e}", quoted(given)),
        )
    })
}

#[cfg(feature = "serde")]
impl serde::Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
