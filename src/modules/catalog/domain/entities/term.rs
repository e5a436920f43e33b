use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::value_objects::{LanguageCode, TermId};

/// A classification value inside a taxonomy, stored per language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub taxonomy: String,
    pub name: String,
    pub slug: String,
    pub language: LanguageCode,
}

/// Term creation request
///
/// `slug` is optional; stores derive one from the name when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTerm {
    pub name: String,
    pub slug: Option<String>,
    pub language: LanguageCode,
}

impl NewTerm {
    pub fn new(name: &str, language: &LanguageCode) -> Self {
        Self {
            name: name.to_string(),
            slug: None,
            language: language.clone(),
        }
    }

    pub fn with_slug(mut self, slug: String) -> Self {
        self.slug = Some(slug);
        self
    }
}
