//! Identifier rules for namespaces, provider types, package names, and
//! target systems.
//!
//! The rules are data, not code: a [`RuleSet`] describes which characters
//! are allowed, whether separators may repeat, and whether the result is
//! case-folded. Two provider rule generations exist, selected with
//! [`RuleGeneration`].

use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};
use icu_properties::CodePointMapData;

use crate::constants::MAX_REGISTRY_IDENTIFIER_LENGTH;
use crate::error::IdentifierError;

const PROVIDER_CURRENT_DESCRIPTION: &str = "must contain only letters, digits, dashes, and underscores, and may not use leading or trailing dashes or underscores";
const PROVIDER_LEGACY_DESCRIPTION: &str =
    "must contain only letters, digits, and dashes, and may not use leading or trailing dashes";
const REGISTRY_NAME_DESCRIPTION: &str = "must be between one and 64 characters, including ASCII letters, digits, dashes, and underscores, where dashes and underscores may not be the prefix or suffix";
const TARGET_SYSTEM_DESCRIPTION: &str = "must be between one and 64 ASCII letters or digits";

const RESERVED_TYPE_PREFIX: &str = "terraform-";
const REPOSITORY_TYPE_PREFIX: &str = "terraform-provider-";

/// Which letters an identifier may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letters {
    /// `A-Z` and `a-z` only.
    Ascii,
    /// Any Unicode letter or decimal digit, plus combining marks after the
    /// first character. No normalization is applied, so precomposed and
    /// decomposed spellings stay distinct.
    Unicode,
}

/// Character-class and case policy for one identifier role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    letters: Letters,
    dashes: bool,
    underscores: bool,
    consecutive_separators: bool,
    fold_case: bool,
    max_len: Option<usize>,
    description: &'static str,
}

/// Provider namespace/type rules: underscores and repeated separators
/// allowed, case preserved.
pub const PROVIDER_CURRENT_RULES: RuleSet = RuleSet {
    letters: Letters::Unicode,
    dashes: true,
    underscores: true,
    consecutive_separators: true,
    fold_case: false,
    max_len: None,
    description: PROVIDER_CURRENT_DESCRIPTION,
};

/// Earlier provider namespace/type rules: dashes only, never two in a row,
/// folded to lower case.
pub const PROVIDER_LEGACY_RULES: RuleSet = RuleSet {
    letters: Letters::Unicode,
    dashes: true,
    underscores: false,
    consecutive_separators: false,
    fold_case: true,
    max_len: None,
    description: PROVIDER_LEGACY_DESCRIPTION,
};

/// Registry package namespace and name rules.
pub const REGISTRY_NAME_RULES: RuleSet = RuleSet {
    letters: Letters::Ascii,
    dashes: true,
    underscores: true,
    consecutive_separators: true,
    fold_case: false,
    max_len: Some(MAX_REGISTRY_IDENTIFIER_LENGTH),
    description: REGISTRY_NAME_DESCRIPTION,
};

/// Module target system rules: ASCII letters and digits only.
pub const TARGET_SYSTEM_RULES: RuleSet = RuleSet {
    letters: Letters::Ascii,
    dashes: false,
    underscores: false,
    consecutive_separators: true,
    fold_case: false,
    max_len: Some(MAX_REGISTRY_IDENTIFIER_LENGTH),
    description: TARGET_SYSTEM_DESCRIPTION,
};

impl RuleSet {
    /// Human-readable summary of what the rules accept.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Whether validated identifiers are folded to lower case.
    #[must_use]
    pub const fn folds_case(&self) -> bool {
        self.fold_case
    }

    /// Checks `input` against the rules, returning its normalized form.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` for the first rule broken, checked in this
    /// order: empty, too long, dots, repeated separators, leading or
    /// trailing separator, disallowed character.
    pub fn validate(&self, input: &str) -> Result<String, IdentifierError> {
        if input.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if let Some(max) = self.max_len {
            let actual = input.chars().count();
            if actual > max {
                return Err(IdentifierError::TooLong {
                    max,
                    actual,
                    description: self.description,
                });
            }
        }

        if input.contains('.') {
            return Err(IdentifierError::Dots);
        }

        if !self.consecutive_separators {
            let mut prev_sep = false;
            for c in input.chars() {
                let sep = self.is_separator(c);
                if sep && prev_sep {
                    return Err(IdentifierError::ConsecutiveSeparators);
                }
                prev_sep = sep;
            }
        }

        let invalid = IdentifierError::InvalidChars {
            description: self.description,
        };

        let starts_badly = input
            .chars()
            .next()
            .is_some_and(|c| self.is_separator(c) || general_category(c).is_mark());
        let ends_badly = input.chars().next_back().is_some_and(|c| self.is_separator(c));
        if starts_badly || ends_badly {
            return Err(invalid);
        }

        if !input.chars().all(|c| self.is_valid_char(c)) {
            return Err(invalid);
        }

        if self.fold_case {
            Ok(input.to_lowercase())
        } else {
            Ok(input.to_string())
        }
    }

    /// Returns true if the character is allowed anywhere in an identifier.
    #[must_use]
    pub fn is_valid_char(&self, c: char) -> bool {
        if c.is_ascii_alphanumeric() || self.is_separator(c) {
            return true;
        }
        match self.letters {
            Letters::Ascii => false,
            Letters::Unicode => !c.is_ascii() && general_category(c).is_word_part(),
        }
    }

    const fn is_separator(&self, c: char) -> bool {
        (self.dashes && c == '-') || (self.underscores && c == '_')
    }
}

/// Which generation of provider identifier rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleGeneration {
    /// Underscores and repeated separators allowed, case preserved.
    #[default]
    Current,
    /// Dashes only, no repeats, folded to lower case.
    Legacy,
}

impl RuleGeneration {
    /// The provider namespace/type rules for this generation.
    #[must_use]
    pub const fn provider_rules(self) -> &'static RuleSet {
        match self {
            Self::Current => &PROVIDER_CURRENT_RULES,
            Self::Legacy => &PROVIDER_LEGACY_RULES,
        }
    }
}

/// The position an identifier occupies in an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierRole {
    /// Provider namespace.
    ProviderNamespace,
    /// Provider type.
    ProviderType,
    /// Component or module registry namespace.
    PackageNamespace,
    /// Component name.
    ComponentName,
    /// Module name.
    ModuleName,
    /// Module target system.
    TargetSystem,
}

impl IdentifierRole {
    /// The rule set governing this role.
    #[must_use]
    pub const fn rules(self, generation: RuleGeneration) -> &'static RuleSet {
        match self {
            Self::ProviderNamespace | Self::ProviderType => generation.provider_rules(),
            Self::PackageNamespace | Self::ComponentName | Self::ModuleName => &REGISTRY_NAME_RULES,
            Self::TargetSystem => &TARGET_SYSTEM_RULES,
        }
    }
}

/// Validates one identifier segment for the given role.
///
/// Provider types additionally may not start with `terraform-`; when the
/// type looks like a repository name (`terraform-provider-<x>`) and `<x>`
/// would be valid on its own, the error carries `<x>` as a suggestion.
///
/// # Errors
///
/// Returns `IdentifierError` describing the first rule broken.
///
/// # Examples
///
/// ```
/// use registry_address::{validate_identifier, IdentifierRole, RuleGeneration};
///
/// let ty = validate_identifier("aws", IdentifierRole::ProviderType, RuleGeneration::Current).unwrap();
/// assert_eq!(ty, "aws");
///
/// let err = validate_identifier("a.b", IdentifierRole::ProviderNamespace, RuleGeneration::Current)
///     .unwrap_err();
/// assert_eq!(err.to_string(), "dots are not allowed");
/// ```
pub fn validate_identifier(
    input: &str,
    role: IdentifierRole,
    generation: RuleGeneration,
) -> Result<String, IdentifierError> {
    let rules = role.rules(generation);
    let value = rules.validate(input)?;
    if role == IdentifierRole::ProviderType {
        check_type_prefix(&value, rules)?;
    }
    Ok(value)
}

/// Rejects provider types carrying the reserved `terraform-` prefix.
fn check_type_prefix(value: &str, rules: &RuleSet) -> Result<(), IdentifierError> {
    if strip_prefix_ignore_ascii_case(value, RESERVED_TYPE_PREFIX).is_none() {
        return Ok(());
    }

    let suggestion = strip_prefix_ignore_ascii_case(value, REPOSITORY_TYPE_PREFIX)
        .and_then(|suggested| rules.validate(suggested).ok());
    let prefix = if suggestion.is_some() {
        REPOSITORY_TYPE_PREFIX
    } else {
        RESERVED_TYPE_PREFIX
    };

    Err(IdentifierError::ReservedPrefix { prefix, suggestion })
}

fn strip_prefix_ignore_ascii_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        value.get(prefix.len()..)
    } else {
        None
    }
}

/// Unicode general category of a character, reduced to what the identifier
/// rules care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CharClass(GeneralCategory);

impl CharClass {
    fn is_mark(self) -> bool {
        GeneralCategoryGroup::Mark.contains(self.0)
    }

    fn is_word_part(self) -> bool {
        GeneralCategoryGroup::Letter.contains(self.0)
            || GeneralCategoryGroup::DecimalNumber.contains(self.0)
            || self.is_mark()
    }
}

fn general_category(c: char) -> CharClass {
    CharClass(CodePointMapData::<GeneralCategory>::new().get(c))
}
