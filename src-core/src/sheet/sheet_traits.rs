use async_trait::async_trait;

use crate::errors::LoadError;

/// Where the delimited sheet text comes from.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError>;
}
