use deunicode::deunicode_with_tofu;
use regex::Regex;
use std::sync::LazyLock;

use crate::log_debug;
use crate::modules::catalog::LanguageCode;

/// Transformation applied while building a slug
pub trait SlugTransformation: Send + Sync {
    fn transform(&self, input: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Transliterates any Unicode text to ASCII ("Größe" -> "Grosse",
/// "Москва" -> "Moskva"); characters without a transliteration are dropped
#[derive(Debug, Clone)]
pub struct AsciiFoldTransform;

impl SlugTransformation for AsciiFoldTransform {
    fn transform(&self, input: &str) -> String {
        deunicode_with_tofu(input, "")
    }

    fn name(&self) -> &'static str {
        "AsciiFold"
    }
}

#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl SlugTransformation for LowercaseTransform {
    fn transform(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Collapses every run of non `[a-z0-9]` characters into one hyphen
#[derive(Debug, Clone)]
pub struct HyphenateTransform;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("separator pattern is valid"));

impl SlugTransformation for HyphenateTransform {
    fn transform(&self, input: &str) -> String {
        SEPARATOR.replace_all(input, "-").trim_matches('-').to_string()
    }

    fn name(&self) -> &'static str {
        "Hyphenate"
    }
}

/// Builds URL slugs for taxonomy terms
///
/// Translated terms get the language code appended so that "rosso" (it)
/// and "rosso" (es) never compete for the same slug.
pub struct SlugNormalizer {
    transformations: Vec<Box<dyn SlugTransformation>>,
    fallback: String,
}

impl SlugNormalizer {
    /// Create a new empty normalizer
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
            fallback: "term".to_string(),
        }
    }

    /// ASCII fold, lowercase, hyphenate
    pub fn default_pipeline() -> Self {
        Self::new()
            .with_ascii_fold()
            .with_lowercase()
            .with_hyphenate()
    }

    pub fn with_ascii_fold(mut self) -> Self {
        self.transformations.push(Box::new(AsciiFoldTransform));
        self
    }

    pub fn with_lowercase(mut self) -> Self {
        self.transformations.push(Box::new(LowercaseTransform));
        self
    }

    pub fn with_hyphenate(mut self) -> Self {
        self.transformations.push(Box::new(HyphenateTransform));
        self
    }

    /// Slug used when nothing survives normalization (e.g. punctuation-only names)
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        self.fallback = fallback.to_string();
        self
    }

    pub fn normalize(&self, input: &str) -> String {
        let mut result = input.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log_debug!("Slug after {}: '{}'", transformation.name(), result);
        }

        if result.is_empty() {
            self.fallback.clone()
        } else {
            result
        }
    }

    /// Slug for a term created in `language`
    pub fn term_slug(&self, name: &str, language: &LanguageCode) -> String {
        let base = self.normalize(name);
        if language.is_empty() {
            base
        } else {
            format!("{}-{}", base, self.normalize(language.as_str()))
        }
    }

    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for SlugNormalizer {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
