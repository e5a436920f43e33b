use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::modules::catalog::domain::entities::{NewTerm, Term};
use crate::modules::catalog::domain::value_objects::{LanguageCode, TermId};
use crate::shared::errors::AppResult;

/// Repository interface for taxonomy terms
///
/// Lookups take the language explicitly; a term authored in one language
/// is invisible to lookups made in another.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Find a term by exact name within a taxonomy and language
    async fn find_term_by_name(
        &self,
        taxonomy: &str,
        name: &str,
        language: &LanguageCode,
    ) -> AppResult<Option<Term>>;

    /// Create a term; rejected creations surface as errors
    async fn create_term(&self, taxonomy: &str, term: &NewTerm) -> AppResult<Term>;

    /// Rename an existing term
    async fn update_term_name(&self, id: TermId, taxonomy: &str, name: &str) -> AppResult<()>;

    /// Fetch a term by id
    async fn get_term(&self, id: TermId, taxonomy: &str) -> AppResult<Option<Term>>;
}
