use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Settings for a [`super::FunctionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Languages a function body may be written in. Compared case-insensitively.
    pub supported_languages: Vec<Language>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            supported_languages: vec![Language::sql()],
        }
    }
}

impl RegistryConfig {
    pub fn supports(&self, language: &Language) -> bool {
        self.supported_languages.contains(language)
    }
}
