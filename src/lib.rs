//! Parser and validator for provider, module, and component source
//! addresses.
//!
//! This crate parses, validates, normalizes, and renders the addresses used
//! to locate shareable infrastructure-as-code packages.
//!
//! # Overview
//!
//! Three address families share one validation core:
//!
//! ```text
//! provider:   [hostname/][namespace/]type
//! module:     ./local/path | [hostname/]namespace/name/target-system[//subdir] | <remote>
//! component:  [hostname/]namespace/name[//subdir]
//! ```
//!
//! Hostnames may be internationalized (given in Unicode, never punycode) and
//! may carry a port. When omitted, the host defaults to
//! [`DEFAULT_REGISTRY_HOST`].
//!
//! # Quick Start
//!
//! ```rust
//! use registry_address::{parse_component_source, parse_provider_source, parse_raw_module_source, ModuleSource};
//!
//! let aws = parse_provider_source("hashicorp/aws").unwrap();
//! assert_eq!(aws.to_string(), "registry.terraform.io/hashicorp/aws");
//! assert_eq!(aws.for_display(), "hashicorp/aws");
//!
//! let cluster = parse_component_source("example.com/HashiCorp/K8-Cluster//examples").unwrap();
//! assert_eq!(cluster.for_registry_protocol(), "HashiCorp/K8-Cluster");
//! assert_eq!(cluster.subdir(), Some("examples"));
//!
//! let module = parse_raw_module_source("./nope/../child").unwrap();
//! assert!(matches!(module, ModuleSource::Local(_)));
//! assert_eq!(module.to_string(), "./child");
//! ```
//!
//! # Configuration
//!
//! The free functions use [`Parser::new`]. Build a [`Parser`] to swap in a
//! different [`HostnameService`], a [`RemoteSourceParser`] for remote module
//! sources, or the [`RuleGeneration::Legacy`] provider identifier rules:
//!
//! ```rust
//! use registry_address::{Parser, RuleGeneration};
//!
//! let parser = Parser::new().with_provider_rules(RuleGeneration::Legacy);
//! assert!(parser.parse_provider_source("hashicorp/bad--type").is_err());
//! ```
//!
//! # Identifier Rules
//!
//! | Field | Letters | Separators | Length |
//! |-------|---------|------------|--------|
//! | Provider namespace/type | Unicode | `-` `_` | 1+ |
//! | Registry namespace/name | ASCII | `-` `_` | 1-64 |
//! | Module target system | ASCII | none | 1-64 |
//!
//! Separators may never lead or trail, and dots are always rejected.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod component;
mod constants;
mod error;
mod hostname;
mod identifier;
mod module;
mod module_registry;
mod package;
mod parser;
pub mod prelude;
mod provider;
mod subdir;

pub use component::{parse_component_source, ComponentPackage, ComponentSource};
pub use constants::{
    BUILTIN_PROVIDER_HOST, BUILTIN_PROVIDER_NAMESPACE, DEFAULT_REGISTRY_HOST, LEGACY_NAMESPACE_TEXT,
    MAX_REGISTRY_IDENTIFIER_LENGTH, RESERVED_VCS_HOSTS, SUBDIR_SEPARATOR, UNKNOWN_NAMESPACE_TEXT,
};
pub use error::{
    ErrorCategory, HostError, HostnameError, IdentifierError, ModuleSourceError, ParserError,
    RegistrySourceError, SubdirError,
};
pub use hostname::{validate_hostname, Hostname, HostnameService, IdnaHostnames, RegistryKind};
pub use identifier::{
    validate_identifier, IdentifierRole, Letters, RuleGeneration, RuleSet, PROVIDER_CURRENT_RULES,
    PROVIDER_LEGACY_RULES, REGISTRY_NAME_RULES, TARGET_SYSTEM_RULES,
};
pub use module::{
    parse_raw_module_source, LocalSource, ModuleSource, NoRemoteSources, RemoteSource, RemoteSourceParser,
};
pub use module_registry::{parse_module_registry_source, ModuleRegistryPackage, ModuleRegistrySource};
pub use package::{RegistryPackage, RegistrySource};
pub use parser::Parser;
pub use provider::{
    parse_provider_part, parse_provider_source, validate_provider_address, Namespace, Provider,
};
pub use subdir::{clean_path, split_subdir};
