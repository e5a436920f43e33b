use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::catalog::domain::value_objects::{
    ElementType, LanguageCode, TranslationGroupId,
};
use crate::shared::errors::AppResult;

/// Language details of one element, as registered with the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub element_id: u64,
    pub element_type: ElementType,
    /// `None` seeds a new group
    pub group_id: Option<TranslationGroupId>,
    pub language: LanguageCode,
    pub source_language: Option<LanguageCode>,
}

/// Repository interface for the translation registry
///
/// Every call names its language explicitly; the registry holds no
/// "current language" state.
#[async_trait]
pub trait TranslationRegistry: Send + Sync {
    /// Language canonical elements are authored in
    async fn default_language(&self) -> AppResult<LanguageCode>;

    async fn language_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
    ) -> AppResult<Option<LanguageCode>>;

    /// Member of the element's group in `target_language`, if any
    async fn translation_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
        target_language: &LanguageCode,
    ) -> AppResult<Option<u64>>;

    async fn group_id_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
    ) -> AppResult<Option<TranslationGroupId>>;

    /// Set an element's language and group; returns the group it ended up in
    async fn register_translation(
        &self,
        record: &TranslationRecord,
    ) -> AppResult<TranslationGroupId>;
}
