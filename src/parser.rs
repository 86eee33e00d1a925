//! Parser configuration.

use crate::hostname::IdnaHostnames;
use crate::identifier::RuleGeneration;
use crate::module::NoRemoteSources;

/// Configured entry point for every address family.
///
/// Holds the hostname service used to normalize registry hosts, the
/// recognizer consulted for remote module sources, and the provider rule
/// generation. The free functions ([`parse_provider_source`],
/// [`parse_component_source`], [`parse_raw_module_source`]) use
/// [`Parser::new`].
///
/// [`parse_provider_source`]: crate::parse_provider_source
/// [`parse_component_source`]: crate::parse_component_source
/// [`parse_raw_module_source`]: crate::parse_raw_module_source
///
/// # Examples
///
/// ```
/// use registry_address::{Parser, RuleGeneration};
///
/// let parser = Parser::new().with_provider_rules(RuleGeneration::Legacy);
/// let provider = parser.parse_provider_source("HashiCorp/AWS").unwrap();
/// assert_eq!(provider.to_string(), "registry.terraform.io/hashicorp/aws");
/// ```
#[derive(Debug, Clone)]
pub struct Parser<H = IdnaHostnames, R = NoRemoteSources> {
    hostnames: H,
    remote: R,
    provider_rules: RuleGeneration,
}

impl Parser {
    /// Creates a parser with the default services and current rules.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hostnames: IdnaHostnames,
            remote: NoRemoteSources,
            provider_rules: RuleGeneration::Current,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, R> Parser<H, R> {
    /// Replaces the hostname service.
    #[must_use]
    pub fn with_hostname_service<H2>(self, hostnames: H2) -> Parser<H2, R> {
        Parser {
            hostnames,
            remote: self.remote,
            provider_rules: self.provider_rules,
        }
    }

    /// Replaces the remote module source recognizer.
    #[must_use]
    pub fn with_remote_parser<R2>(self, remote: R2) -> Parser<H, R2> {
        Parser {
            hostnames: self.hostnames,
            remote,
            provider_rules: self.provider_rules,
        }
    }

    /// Selects the provider identifier rule generation.
    #[must_use]
    pub fn with_provider_rules(mut self, generation: RuleGeneration) -> Self {
        self.provider_rules = generation;
        self
    }

    /// The hostname service in use.
    #[must_use]
    pub const fn hostnames(&self) -> &H {
        &self.hostnames
    }

    /// The remote module source recognizer in use.
    #[must_use]
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    /// The provider identifier rule generation in use.
    #[must_use]
    pub const fn provider_rules(&self) -> RuleGeneration {
        self.provider_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let parser = Parser::new();
        assert_eq!(parser.provider_rules(), RuleGeneration::Current);
    }

    #[test]
    fn builder_keeps_other_settings() {
        let parser = Parser::new()
            .with_provider_rules(RuleGeneration::Legacy)
            .with_remote_parser(NoRemoteSources);
        assert_eq!(parser.provider_rules(), RuleGeneration::Legacy);
    }
}
