//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use registry_address::prelude::*;
//!
//! let provider = Provider::parse("hashicorp/aws").unwrap();
//! assert_eq!(provider.hostname(), &DEFAULT_REGISTRY_HOST);
//! ```
//!
//! The identifier rule tables and the low-level validators are left out;
//! import them from the crate root.

pub use crate::{
    // Addresses
    ComponentPackage, ComponentSource, Hostname, LocalSource, ModuleRegistryPackage,
    ModuleRegistrySource, ModuleSource, Namespace, Provider, RegistryPackage, RegistrySource,
    RemoteSource,
    // Configuration
    HostnameService, IdnaHostnames, NoRemoteSources, Parser, RemoteSourceParser, RuleGeneration,
    // Errors
    ErrorCategory, HostError, HostnameError, IdentifierError, ModuleSourceError, ParserError,
    RegistrySourceError, SubdirError,
    // Constants
    BUILTIN_PROVIDER_HOST, BUILTIN_PROVIDER_NAMESPACE, DEFAULT_REGISTRY_HOST,
};
