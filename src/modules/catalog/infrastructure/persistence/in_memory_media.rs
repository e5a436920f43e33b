use async_trait::async_trait;
use dashmap::DashMap;

use crate::modules::catalog::domain::repositories::MediaRepository;
use crate::modules::catalog::domain::value_objects::AttachmentId;
use crate::shared::errors::AppResult;

/// Media library lookup table keyed by file URL
#[derive(Debug, Default)]
pub struct InMemoryMediaRepository {
    attachments: DashMap<String, AttachmentId>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attachment(self, url: &str, id: u64) -> Self {
        self.attachments.insert(url.to_string(), AttachmentId(id));
        self
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn find_attachment_id_by_url(&self, url: &str) -> AppResult<Option<AttachmentId>> {
        Ok(self.attachments.get(url).map(|entry| *entry.value()))
    }
}
