use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::log_debug;
use crate::modules::catalog::domain::entities::{NewTerm, Term};
use crate::modules::catalog::domain::repositories::TaxonomyRepository;
use crate::modules::catalog::domain::value_objects::{LanguageCode, TermId};
use crate::shared::errors::{AppError, AppResult};

const MAX_TERM_NAME_LENGTH: usize = 200;

/// Term store backed by a concurrent map
///
/// Mirrors the rules of a typical catalog term table: names are limited
/// to 200 characters, empty names are rejected and slugs are unique per
/// taxonomy (a numeric suffix is appended on collision).
#[derive(Debug)]
pub struct InMemoryTaxonomyRepository {
    terms: DashMap<u64, Term>,
    next_id: AtomicU64,
}

impl InMemoryTaxonomyRepository {
    pub fn new() -> Self {
        Self {
            terms: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Terms of a taxonomy ordered by id
    pub fn terms(&self, taxonomy: &str) -> Vec<Term> {
        let mut terms: Vec<Term> = self
            .terms
            .iter()
            .filter(|entry| entry.taxonomy == taxonomy)
            .map(|entry| entry.value().clone())
            .collect();
        terms.sort_by_key(|term| term.id);
        terms
    }

    pub fn term_count(&self, taxonomy: &str) -> usize {
        self.terms
            .iter()
            .filter(|entry| entry.taxonomy == taxonomy)
            .count()
    }

    fn slug_taken(&self, taxonomy: &str, slug: &str) -> bool {
        self.terms
            .iter()
            .any(|entry| entry.taxonomy == taxonomy && entry.slug == slug)
    }

    fn unique_slug(&self, taxonomy: &str, base: &str) -> String {
        if !self.slug_taken(taxonomy, base) {
            return base.to_string();
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if !self.slug_taken(taxonomy, &candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn derive_slug(name: &str) -> String {
        name.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>()
            .join("-")
    }
}

impl Default for InMemoryTaxonomyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaxonomyRepository for InMemoryTaxonomyRepository {
    async fn find_term_by_name(
        &self,
        taxonomy: &str,
        name: &str,
        language: &LanguageCode,
    ) -> AppResult<Option<Term>> {
        Ok(self
            .terms
            .iter()
            .filter(|entry| {
                entry.taxonomy == taxonomy && entry.name == name && &entry.language == language
            })
            .map(|entry| entry.value().clone())
            .min_by_key(|term| term.id))
    }

    async fn create_term(&self, taxonomy: &str, term: &NewTerm) -> AppResult<Term> {
        let name = term.name.trim();
        if name.is_empty() {
            return Err(AppError::Rejected(format!(
                "Empty term name for taxonomy {}",
                taxonomy
            )));
        }
        if name.chars().count() > MAX_TERM_NAME_LENGTH {
            return Err(AppError::Rejected(format!(
                "Term name exceeds {} characters in taxonomy {}",
                MAX_TERM_NAME_LENGTH, taxonomy
            )));
        }

        let base_slug = match &term.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => Self::derive_slug(name),
        };
        let slug = self.unique_slug(taxonomy, &base_slug);

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Term {
            id: TermId(id),
            taxonomy: taxonomy.to_string(),
            name: name.to_string(),
            slug,
            language: term.language.clone(),
        };
        self.terms.insert(id, created.clone());

        log_debug!(
            "Stored term #{} '{}' ({}) in {}",
            id,
            created.name,
            created.slug,
            taxonomy
        );
        Ok(created)
    }

    async fn update_term_name(&self, id: TermId, taxonomy: &str, name: &str) -> AppResult<()> {
        match self.terms.get_mut(&id.value()) {
            Some(mut term) if term.taxonomy == taxonomy => {
                term.name = name.to_string();
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "Term {} in taxonomy {}",
                id, taxonomy
            ))),
        }
    }

    async fn get_term(&self, id: TermId, taxonomy: &str) -> AppResult<Option<Term>> {
        Ok(self
            .terms
            .get(&id.value())
            .filter(|term| term.taxonomy == taxonomy)
            .map(|term| term.value().clone()))
    }
}
