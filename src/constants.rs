//! Process-wide constants for address parsing.

use crate::hostname::Hostname;

/// Registry host implied when an address omits its hostname.
pub const DEFAULT_REGISTRY_HOST: Hostname = Hostname::from_static("registry.terraform.io");

/// Host of providers implemented inside the core runtime.
pub const BUILTIN_PROVIDER_HOST: Hostname = Hostname::from_static("terraform.io");

/// Namespace of providers implemented inside the core runtime.
pub const BUILTIN_PROVIDER_NAMESPACE: &str = "builtin";

/// Text form of the legacy provider namespace.
pub const LEGACY_NAMESPACE_TEXT: &str = "-";

/// Text form of the unknown provider namespace.
pub const UNKNOWN_NAMESPACE_TEXT: &str = "?";

/// Hosts reserved for version control shorthands; never registry hosts.
pub const RESERVED_VCS_HOSTS: [&str; 3] = ["github.com", "bitbucket.org", "gitlab.com"];

/// Maximum length of a registry namespace, name, or target system.
pub const MAX_REGISTRY_IDENTIFIER_LENGTH: usize = 64;

/// Separator between a package address and its subdirectory.
pub const SUBDIR_SEPARATOR: &str = "//";
