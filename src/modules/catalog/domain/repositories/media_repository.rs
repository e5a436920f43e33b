use async_trait::async_trait;

use crate::modules::catalog::domain::value_objects::AttachmentId;
use crate::shared::errors::AppResult;

/// Repository interface for the media library
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Resolve an uploaded file URL to its attachment id
    async fn find_attachment_id_by_url(&self, url: &str) -> AppResult<Option<AttachmentId>>;
}
