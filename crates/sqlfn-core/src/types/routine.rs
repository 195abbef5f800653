//! Routine characteristics: language, determinism, and null-call behavior.

use std::borrow::Cow;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Implementation language of a function body (`SQL` unless stated otherwise).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub const SQL: &'static str = "SQL";

    /// Language names are case-insensitive and stored upper-cased. A blank name is SQL.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Self::sql();
        }
        Self(name.to_ascii_uppercase())
    }

    pub fn sql() -> Self {
        Self(Self::SQL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::sql()
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl JsonSchema for Language {
    fn schema_name() -> Cow<'static, str> {
        "Language".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "description": "Implementation language, case-insensitive.",
            "default": "SQL"
        })
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Determinism {
    Deterministic,
    #[default]
    NotDeterministic,
}

impl fmt::Display for Determinism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deterministic => f.write_str("DETERMINISTIC"),
            Self::NotDeterministic => f.write_str("NOT_DETERMINISTIC"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NullCallClause {
    /// The function returns NULL without being invoked when any argument is NULL
    ReturnsNullOnNullInput,
    /// The function is invoked even when arguments are NULL
    #[default]
    CalledOnNullInput,
}

impl fmt::Display for NullCallClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnsNullOnNullInput => f.write_str("RETURNS_NULL_ON_NULL_INPUT"),
            Self::CalledOnNullInput => f.write_str("CALLED_ON_NULL_INPUT"),
        }
    }
}

/// Determinism and null-call behavior of a function body.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct RoutineCharacteristics {
    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub determinism: Determinism,

    #[serde(default)]
    pub null_call_clause: NullCallClause,
}

impl RoutineCharacteristics {
    pub fn new(language: Language, determinism: Determinism, null_call_clause: NullCallClause) -> Self {
        Self {
            language,
            determinism,
            null_call_clause,
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.determinism == Determinism::Deterministic
    }

    pub fn is_called_on_null_input(&self) -> bool {
        self.null_call_clause == NullCallClause::CalledOnNullInput
    }
}

impl fmt::Display for RoutineCharacteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.language, self.determinism, self.null_call_clause
        )
    }
}
