use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::modules::catalog::domain::repositories::{TranslationRecord, TranslationRegistry};
use crate::modules::catalog::domain::value_objects::{
    ElementType, LanguageCode, TranslationGroupId,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

#[derive(Debug, Clone)]
struct RegisteredElement {
    group_id: TranslationGroupId,
    language: LanguageCode,
    source_language: Option<LanguageCode>,
}

/// Translation registry backed by a concurrent map
///
/// Enforces the group invariant: one member per language per group.
#[derive(Debug)]
pub struct InMemoryTranslationRegistry {
    default_language: LanguageCode,
    elements: DashMap<(ElementType, u64), RegisteredElement>,
    next_group_id: AtomicU64,
}

impl InMemoryTranslationRegistry {
    pub fn new(default_language: &str) -> Self {
        Self {
            default_language: LanguageCode::new(default_language),
            elements: DashMap::new(),
            next_group_id: AtomicU64::new(1),
        }
    }

    /// Elements of a group as (element id, language), ordered by id
    pub fn group_members(
        &self,
        element_type: &ElementType,
        group_id: TranslationGroupId,
    ) -> Vec<(u64, LanguageCode)> {
        let mut members: Vec<(u64, LanguageCode)> = self
            .elements
            .iter()
            .filter(|entry| &entry.key().0 == element_type && entry.group_id == group_id)
            .map(|entry| (entry.key().1, entry.language.clone()))
            .collect();
        members.sort_by_key(|(id, _)| *id);
        members
    }

    pub fn source_language_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
    ) -> Option<LanguageCode> {
        self.elements
            .get(&(element_type.clone(), element_id))
            .and_then(|entry| entry.source_language.clone())
    }
}

#[async_trait]
impl TranslationRegistry for InMemoryTranslationRegistry {
    async fn default_language(&self) -> AppResult<LanguageCode> {
        Ok(self.default_language.clone())
    }

    async fn language_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
    ) -> AppResult<Option<LanguageCode>> {
        Ok(self
            .elements
            .get(&(element_type.clone(), element_id))
            .map(|entry| entry.language.clone()))
    }

    async fn translation_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
        target_language: &LanguageCode,
    ) -> AppResult<Option<u64>> {
        let group_id = match self.group_id_of(element_id, element_type).await? {
            Some(group_id) => group_id,
            None => return Ok(None),
        };

        Ok(self
            .group_members(element_type, group_id)
            .into_iter()
            .find(|(_, language)| language == target_language)
            .map(|(id, _)| id))
    }

    async fn group_id_of(
        &self,
        element_id: u64,
        element_type: &ElementType,
    ) -> AppResult<Option<TranslationGroupId>> {
        Ok(self
            .elements
            .get(&(element_type.clone(), element_id))
            .map(|entry| entry.group_id))
    }

    async fn register_translation(
        &self,
        record: &TranslationRecord,
    ) -> AppResult<TranslationGroupId> {
        let group_id = match record.group_id {
            Some(group_id) => {
                let occupied = self
                    .group_members(&record.element_type, group_id)
                    .into_iter()
                    .any(|(id, language)| id != record.element_id && language == record.language);
                if occupied {
                    return Err(AppError::Conflict(format!(
                        "Group {} of {} already has a [{}] member",
                        group_id, record.element_type, record.language
                    )));
                }
                group_id
            }
            None => TranslationGroupId(self.next_group_id.fetch_add(1, Ordering::SeqCst)),
        };

        self.elements.insert(
            (record.element_type.clone(), record.element_id),
            RegisteredElement {
                group_id,
                language: record.language.clone(),
                source_language: record.source_language.clone(),
            },
        );

        LogContext::translation_link(
            &record.element_type.to_string(),
            record.element_id,
            record.group_id.map(|g| g.value()),
            record.language.as_str(),
        );
        Ok(group_id)
    }
}
