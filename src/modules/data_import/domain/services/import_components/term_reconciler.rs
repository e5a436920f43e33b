use std::sync::Arc;

use crate::modules::catalog::{
    ElementType, LanguageCode, NewTerm, TaxonomyRepository, Term, TermId, TranslationRecord,
    TranslationRegistry,
};
use crate::shared::utils::LogContext;
use crate::{log_debug, log_warn};

use super::slug_normalizer::SlugNormalizer;
use super::types::ImportError;

/// Language context of a single term resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermResolutionContext {
    pub language: LanguageCode,
    pub default_language: LanguageCode,
    /// Term at the same position on the original product, when linking
    pub original_term: Option<TermId>,
}

impl TermResolutionContext {
    pub fn standalone(language: &LanguageCode, default_language: &LanguageCode) -> Self {
        Self {
            language: language.clone(),
            default_language: default_language.clone(),
            original_term: None,
        }
    }

    pub fn linked(
        language: &LanguageCode,
        default_language: &LanguageCode,
        original_term: TermId,
    ) -> Self {
        Self {
            language: language.clone(),
            default_language: default_language.clone(),
            original_term: Some(original_term),
        }
    }
}

/// Finds or creates taxonomy terms with correct cross-language grouping
///
/// Every store and registry call receives the language explicitly, so a
/// lookup can never run in a language left over from a previous call.
pub struct TermReconciler {
    taxonomy_repo: Arc<dyn TaxonomyRepository>,
    registry: Arc<dyn TranslationRegistry>,
    slugs: SlugNormalizer,
}

impl TermReconciler {
    pub fn new(
        taxonomy_repo: Arc<dyn TaxonomyRepository>,
        registry: Arc<dyn TranslationRegistry>,
    ) -> Self {
        Self {
            taxonomy_repo,
            registry,
            slugs: SlugNormalizer::default_pipeline(),
        }
    }

    pub fn with_slug_normalizer(mut self, slugs: SlugNormalizer) -> Self {
        self.slugs = slugs;
        self
    }

    pub async fn resolve_term(
        &self,
        taxonomy: &str,
        name: &str,
        context: &TermResolutionContext,
    ) -> Result<TermId, ImportError> {
        match context.original_term {
            Some(original) => self.link_translation(taxonomy, name, original, context).await,
            None => self.find_or_create(taxonomy, name, &context.language).await,
        }
    }

    /// Reuse a term with this name in `language`, or create one that
    /// starts its own translation group
    async fn find_or_create(
        &self,
        taxonomy: &str,
        name: &str,
        language: &LanguageCode,
    ) -> Result<TermId, ImportError> {
        let element_type = ElementType::taxonomy(taxonomy);

        if let Some(existing) = self
            .taxonomy_repo
            .find_term_by_name(taxonomy, name, language)
            .await?
        {
            match self
                .registry
                .language_of(existing.id.value(), &element_type)
                .await?
            {
                Some(registered) if &registered != language => {
                    log_debug!(
                        "Term '{}' ({}) belongs to [{}], creating a [{}] term",
                        name,
                        existing.id,
                        registered,
                        language
                    );
                }
                _ => {
                    LogContext::term_operation("reuse", taxonomy, name, language.as_str());
                    return Ok(existing.id);
                }
            }
        }

        let term = self.create(taxonomy, NewTerm::new(name, language)).await?;
        self.registry
            .register_translation(&TranslationRecord {
                element_id: term.id.value(),
                element_type,
                group_id: None,
                language: language.clone(),
                source_language: None,
            })
            .await?;

        LogContext::term_operation("create", taxonomy, name, language.as_str());
        Ok(term.id)
    }

    /// Resolve the translation of `original` into the context language
    async fn link_translation(
        &self,
        taxonomy: &str,
        name: &str,
        original: TermId,
        context: &TermResolutionContext,
    ) -> Result<TermId, ImportError> {
        let element_type = ElementType::taxonomy(taxonomy);

        let original_term = match self.taxonomy_repo.get_term(original, taxonomy).await? {
            Some(term) => term,
            None => {
                log_warn!(
                    "Original term {} no longer exists in {}, resolving '{}' standalone",
                    original,
                    taxonomy,
                    name
                );
                return self.find_or_create(taxonomy, name, &context.language).await;
            }
        };

        if let Some(existing) = self
            .registry
            .translation_of(original.value(), &element_type, &context.language)
            .await?
        {
            let existing = TermId(existing);
            self.correct_name_drift(taxonomy, existing, name).await?;
            LogContext::term_operation("reuse-translation", taxonomy, name, context.language.as_str());
            return Ok(existing);
        }

        let group_id = match self
            .registry
            .group_id_of(original.value(), &element_type)
            .await?
        {
            Some(group_id) => group_id,
            None => {
                // Unregistered original: seed its group in its own language first
                let original_language = original_term.language.clone();
                let language = if original_language.is_empty() {
                    context.default_language.clone()
                } else {
                    original_language
                };
                self.registry
                    .register_translation(&TranslationRecord {
                        element_id: original.value(),
                        element_type: element_type.clone(),
                        group_id: None,
                        language,
                        source_language: None,
                    })
                    .await?
            }
        };

        let slug = self.slugs.term_slug(name, &context.language);
        let term = self
            .create(taxonomy, NewTerm::new(name, &context.language).with_slug(slug))
            .await?;

        self.registry
            .register_translation(&TranslationRecord {
                element_id: term.id.value(),
                element_type,
                group_id: Some(group_id),
                language: context.language.clone(),
                source_language: Some(context.default_language.clone()),
            })
            .await?;

        LogContext::term_operation("create-translation", taxonomy, name, context.language.as_str());
        Ok(term.id)
    }

    async fn correct_name_drift(
        &self,
        taxonomy: &str,
        term_id: TermId,
        name: &str,
    ) -> Result<(), ImportError> {
        match self.taxonomy_repo.get_term(term_id, taxonomy).await? {
            Some(term) if term.name != name => {
                log_debug!("Renaming term {} from '{}' to '{}'", term_id, term.name, name);
                self.taxonomy_repo
                    .update_term_name(term_id, taxonomy, name)
                    .await?;
            }
            Some(_) => {}
            None => {
                log_warn!("Registered translation {} is missing from {}", term_id, taxonomy);
            }
        }
        Ok(())
    }

    async fn create(&self, taxonomy: &str, new_term: NewTerm) -> Result<Term, ImportError> {
        self.taxonomy_repo
            .create_term(taxonomy, &new_term)
            .await
            .map_err(|error| ImportError::TermCreationFailed {
                taxonomy: taxonomy.to_string(),
                term: new_term.name.clone(),
                reason: error.to_string(),
            })
    }
}
