//! Registry hostnames and the validator that decides whether a raw string may
//! become one.
//!
//! Unicode normalization and IDNA processing are not done here. They are a
//! capability supplied through [`HostnameService`]; the default
//! implementation, [`IdnaHostnames`], delegates to the `idna` crate.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::constants::RESERVED_VCS_HOSTS;
use crate::error::{HostError, HostnameError};

/// Which address family a hostname is being validated for.
///
/// The kind only changes error wording and whether the stricter package
/// rules (at least one dot, no reserved VCS hosts) apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// Provider registry (`hostname/namespace/type`).
    Provider,
    /// Component registry (`hostname/namespace/name`).
    Component,
    /// Module registry (`hostname/namespace/name/target-system`).
    Module,
}

impl RegistryKind {
    /// The bare noun for this family, e.g. `"module"`.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Component => "component",
            Self::Module => "module",
        }
    }

    pub(crate) const fn segment_counts(self) -> &'static str {
        match self {
            Self::Provider => "one, two, or three",
            Self::Component => "two or three",
            Self::Module => "three or four",
        }
    }

    pub(crate) const fn name_count(self) -> &'static str {
        match self {
            Self::Provider | Self::Component => "two",
            Self::Module => "three",
        }
    }

    pub(crate) const fn name_parts(self) -> &'static str {
        match self {
            Self::Provider => "the namespace and the type",
            Self::Component => "the namespace and the name",
            Self::Module => "the namespace, the name, and the target system",
        }
    }

    /// Whether hostnames of this kind follow the package rules.
    const fn is_package(self) -> bool {
        matches!(self, Self::Component | Self::Module)
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} registry", self.noun())
    }
}

/// A normalized, comparison-ready registry hostname with an optional port.
///
/// Values are produced by a [`HostnameService`] and are considered valid
/// once constructed. The host portion is stored in its lower-case Unicode
/// form, so two hostnames compare equal exactly when they name the same
/// registry.
///
/// # Examples
///
/// ```
/// use registry_address::Hostname;
///
/// let host = Hostname::parse("Example.com:1234").unwrap();
/// assert_eq!(host.host_str(), "example.com");
/// assert_eq!(host.port(), Some(1234));
/// assert_eq!(host.to_string(), "example.com:1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hostname {
    host: Cow<'static, str>,
    port: Option<u16>,
}

impl Hostname {
    /// Creates a hostname from a string that is already in normalized form.
    ///
    /// No validation is performed. This exists for the process-wide host
    /// constants; use [`Hostname::parse`] for untrusted input.
    #[must_use]
    pub const fn from_static(host: &'static str) -> Self {
        Self {
            host: Cow::Borrowed(host),
            port: None,
        }
    }

    /// Parses and normalizes a hostname with the default [`IdnaHostnames`]
    /// service.
    ///
    /// # Errors
    ///
    /// Returns `HostnameError` if the host is empty, is not a valid
    /// internationalized domain name, or carries a malformed port.
    pub fn parse(input: &str) -> Result<Self, HostnameError> {
        IdnaHostnames.normalize(input)
    }

    /// Returns the host portion without the port.
    #[must_use]
    pub fn host_str(&self) -> &str {
        &self.host
    }

    /// Returns the port, if one was given.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// True for the zero value, which names no host at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.host.is_empty()
    }

    /// The form shown to users. Hosts are already kept in Unicode form, so
    /// this is the same text as `Display`.
    #[must_use]
    pub fn for_display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => write!(f, "{}", self.host),
        }
    }
}

impl FromStr for Hostname {
    type Err = HostnameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Hostname normalization capability.
///
/// Implementations own Unicode case-folding and IDNA validation. The
/// address parsers only decide whether a string is allowed to reach the
/// service and what to say when it is rejected.
pub trait HostnameService {
    /// Normalizes a raw `host[:port]` string for comparison.
    ///
    /// # Errors
    ///
    /// Returns `HostnameError` when the input cannot name a host.
    fn normalize(&self, raw: &str) -> Result<Hostname, HostnameError>;

    /// Renders a hostname for humans.
    fn for_display(&self, hostname: &Hostname) -> String {
        hostname.for_display()
    }
}

impl<T: HostnameService + ?Sized> HostnameService for &T {
    fn normalize(&self, raw: &str) -> Result<Hostname, HostnameError> {
        (**self).normalize(raw)
    }

    fn for_display(&self, hostname: &Hostname) -> String {
        (**self).for_display(hostname)
    }
}

/// Registries are reached over HTTPS, so an explicit `:443` names the same
/// host as no port at all.
const DEFAULT_HTTPS_PORT: u16 = 443;

/// The default [`HostnameService`], built on UTS #46 processing from the
/// `idna` crate with STD3 character rules and hyphen checks enabled. The
/// HTTPS port `443` is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdnaHostnames;

impl HostnameService for IdnaHostnames {
    fn normalize(&self, raw: &str) -> Result<Hostname, HostnameError> {
        if raw.is_empty() {
            return Err(HostnameError::Empty);
        }

        let (host, port) = split_port(raw)?;
        if host.is_empty() {
            return Err(HostnameError::Empty);
        }

        let invalid = || HostnameError::InvalidDomain {
            host: host.to_string(),
        };
        let ascii = idna::domain_to_ascii_strict(host).map_err(|_| invalid())?;
        let (unicode, result) = idna::domain_to_unicode(&ascii);
        result.map_err(|_| invalid())?;

        Ok(Hostname {
            host: Cow::Owned(unicode),
            port: port.filter(|&p| p != DEFAULT_HTTPS_PORT),
        })
    }
}

fn split_port(input: &str) -> Result<(&str, Option<u16>), HostnameError> {
    let Some((host, port)) = input.rsplit_once(':') else {
        return Ok((input, None));
    };

    if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
        return Err(HostnameError::InvalidPort {
            port: port.to_string(),
        });
    }
    let port = port.parse::<u16>().map_err(|_| HostnameError::InvalidPort {
        port: port.to_string(),
    })?;

    Ok((host, Some(port)))
}

/// Decides whether `raw` may be used as a registry hostname of the given
/// kind, returning the normalized hostname.
///
/// Punycode labels are always rejected so that addresses stay readable.
/// Package kinds additionally require at least one dot, which keeps the
/// first segment of a shorthand address from being mistaken for a host,
/// and refuse the hosts reserved for version control shorthands.
///
/// # Errors
///
/// Returns `HostError` describing the first rule the input breaks.
pub fn validate_hostname<H>(hostnames: &H, raw: &str, kind: RegistryKind) -> Result<Hostname, HostError>
where
    H: HostnameService + ?Sized,
{
    if has_punycode_label(raw) {
        return Err(HostError::Punycode {
            kind,
            raw: raw.to_string(),
        });
    }

    let hostname = hostnames.normalize(raw).map_err(|source| {
        if raw.contains("--") {
            HostError::Punycode {
                kind,
                raw: raw.to_string(),
            }
        } else {
            HostError::Invalid {
                kind,
                raw: raw.to_string(),
                source,
            }
        }
    })?;

    if kind.is_package() {
        if !hostname.host_str().contains('.') {
            return Err(HostError::SingleLabel { kind });
        }
        if RESERVED_VCS_HOSTS.contains(&hostname.host_str()) {
            return Err(HostError::ReservedVcsHost {
                kind,
                host: hostname.host_str().to_string(),
            });
        }
    }

    Ok(hostname)
}

/// Full stops that UTS #46 treats as label separators.
const LABEL_SEPARATORS: [char; 4] = ['.', '\u{3002}', '\u{ff0e}', '\u{ff61}'];

fn has_punycode_label(raw: &str) -> bool {
    fold_to_ascii(raw)
        .split('.')
        .any(|label| label.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--")))
}

/// Applies the UTS #46 mapping to each non-ASCII character whose mapped
/// form is ASCII, so `ｘｎ--` and the ideographic full stops are seen the way
/// the hostname service will see them. Characters that map outside ASCII
/// become U+FFFD, which can never start an ACE prefix.
fn fold_to_ascii(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii() {
            folded.push(c);
        } else if LABEL_SEPARATORS.contains(&c) {
            folded.push('.');
        } else {
            let mut buf = [0u8; 4];
            match idna::domain_to_ascii(c.encode_utf8(&mut buf)) {
                Ok(mapped) if !mapped.starts_with("xn--") => folded.push_str(&mapped),
                _ => folded.push(char::REPLACEMENT_CHARACTER),
            }
        }
    }
    folded
}

#[cfg(feature = "serde")]
impl serde::Serialize for Hostname {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Hostname {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
