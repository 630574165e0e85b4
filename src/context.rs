use crate::error::ConfigurationError;
use crate::segment::{SegmentDescriptor, UNB, UNE, UNG, UNZ};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The interchange standards this crate can envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Dialect {
    Edifact,
}

impl Dialect {
    #[must_use]
    pub fn profile(self) -> &'static DialectProfile {
        match self {
            Dialect::Edifact => &EDIFACT,
        }
    }
}

impl FromStr for Dialect {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edifact" => Ok(Dialect::Edifact),
            _ => Err(ConfigurationError::UnknownDialect {
                name: s.to_string(),
            }),
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Edifact => write!(f, "edifact"),
        }
    }
}

/// The four control characters of an interchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Separators {
    pub component: char,
    pub data: char,
    pub release: char,
    pub terminator: char,
}

impl Separators {
    fn roles(&self) -> [(&'static str, char); 4] {
        [
            ("component separator", self.component),
            ("data element separator", self.data),
            ("release indicator", self.release),
            ("segment terminator", self.terminator),
        ]
    }

    #[must_use]
    pub fn is_control(&self, c: char) -> bool {
        c == self.component || c == self.data || c == self.release || c == self.terminator
    }
}

pub const EDIFACT_DEFAULTS: Separators = Separators {
    component: ':',
    data: '+',
    release: '?',
    terminator: '\'',
};

/// Constants a dialect contributes to the envelope: default separators and
/// the control segments that bound an interchange and its groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectProfile {
    pub dialect: Dialect,
    pub defaults: Separators,
    pub advice_tag: &'static str,
    pub decimal_mark: char,
    pub interchange_header: SegmentDescriptor,
    pub group_header: SegmentDescriptor,
    pub group_trailer: SegmentDescriptor,
    pub interchange_trailer: SegmentDescriptor,
}

pub const EDIFACT: DialectProfile = DialectProfile {
    dialect: Dialect::Edifact,
    defaults: EDIFACT_DEFAULTS,
    advice_tag: "UNA",
    decimal_mark: '.',
    interchange_header: UNB,
    group_header: UNG,
    group_trailer: UNE,
    interchange_trailer: UNZ,
};

/// Caller-supplied separators that replace the dialect defaults field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeparatorOverride {
    pub component: Option<char>,
    pub data: Option<char>,
    pub release: Option<char>,
    pub terminator: Option<char>,
    pub dialect: Option<String>,
}

impl SeparatorOverride {
    /// # Errors
    /// Returns `ConfigurationError::Parse` if the JSON is not a valid override.
    pub fn from_json(source: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(source).map_err(|e| ConfigurationError::Parse {
            message: e.to_string(),
        })
    }

    /// # Errors
    /// Returns `ConfigurationError::Parse` if the YAML is not a valid override.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(source).map_err(|e| ConfigurationError::Parse {
            message: e.to_string(),
        })
    }

    fn apply(&self, defaults: Separators) -> Separators {
        Separators {
            component: self.component.unwrap_or(defaults.component),
            data: self.data.unwrap_or(defaults.data),
            release: self.release.unwrap_or(defaults.release),
            terminator: self.terminator.unwrap_or(defaults.terminator),
        }
    }
}

/// Effective separators for one encode call. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeparatorContext {
    dialect: Dialect,
    separators: Separators,
    is_default: bool,
}

impl SeparatorContext {
    /// Merges `overrides` onto the dialect defaults and validates the result.
    ///
    /// A dialect named in `overrides` takes precedence over `dialect`.
    ///
    /// # Errors
    /// Returns a `ConfigurationError` if the dialect name is unknown or two
    /// separators share a character.
    pub fn new(
        dialect: Dialect,
        overrides: Option<&SeparatorOverride>,
    ) -> Result<Self, ConfigurationError> {
        let dialect = match overrides.and_then(|o| o.dialect.as_deref()) {
            Some(name) => name.parse()?,
            None => dialect,
        };
        let defaults = dialect.profile().defaults;
        let separators = match overrides {
            Some(o) => o.apply(defaults),
            None => defaults,
        };

        validate(&separators)?;

        Ok(SeparatorContext {
            dialect,
            separators,
            is_default: separators == defaults,
        })
    }

    /// The dialect defaults, unmodified.
    #[must_use]
    pub fn default_for(dialect: Dialect) -> Self {
        SeparatorContext {
            dialect,
            separators: dialect.profile().defaults,
            is_default: true,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn profile(&self) -> &'static DialectProfile {
        self.dialect.profile()
    }

    pub fn separators(&self) -> Separators {
        self.separators
    }

    pub fn component(&self) -> char {
        self.separators.component
    }

    pub fn data(&self) -> char {
        self.separators.data
    }

    pub fn release(&self) -> char {
        self.separators.release
    }

    pub fn terminator(&self) -> char {
        self.separators.terminator
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Prefixes every control character in `value` with the release indicator.
    #[must_use]
    pub fn escape(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for c in value.chars() {
            if self.separators.is_control(c) {
                out.push(self.separators.release);
            }
            out.push(c);
        }
        out
    }
}

fn validate(separators: &Separators) -> Result<(), ConfigurationError> {
    let roles = separators.roles();
    for (i, (first, a)) in roles.iter().enumerate() {
        for (second, b) in &roles[i + 1..] {
            if a == b {
                return Err(ConfigurationError::DuplicateSeparator {
                    first: *first,
                    second: *second,
                    value: *a,
                });
            }
        }
    }
    Ok(())
}
