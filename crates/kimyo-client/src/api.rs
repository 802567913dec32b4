use crate::error::Error;
use crate::wire::{ContentSnapshot, ModuleCreated};
use async_trait::async_trait;
use kimyo_http::FilePart;
use kimyo_model::{Grade, Module, ModulePatch, NewModule, NewTopic, Topic, TopicRecord};

/// The backend operations the CMS layer is written against. Implemented
/// by [`crate::ContentClient`]; editor and store tests substitute
/// scripted fakes.
///
/// None of these operations retry on failure. Every error is terminal
/// for that attempt and safe to re-issue from the call site.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn list_modules(&self, grade: Grade) -> Result<Vec<Module>, Error>;

    async fn add_module(&self, module: &NewModule) -> Result<ModuleCreated, Error>;

    /// Partial update; only the fields present in `patch` are sent.
    async fn update_module(&self, id: i64, patch: &ModulePatch) -> Result<(), Error>;

    /// Irreversible; the backend cascades deletion of owned topics.
    async fn delete_module(&self, id: i64) -> Result<(), Error>;

    async fn list_topics(&self, module_slug: &str) -> Result<Vec<Topic>, Error>;

    async fn add_topic(&self, topic: &NewTopic) -> Result<i64, Error>;

    /// Whole-record overwrite of title, description, content and order.
    async fn update_topic(&self, id: i64, record: &TopicRecord) -> Result<(), Error>;

    async fn delete_topic(&self, id: i64) -> Result<(), Error>;

    /// Uploads an asset for embedding in rich content; returns its URL.
    async fn upload_asset(&self, part: FilePart) -> Result<String, Error>;

    /// Full course tree, served without the `success` envelope.
    async fn content_snapshot(&self) -> Result<ContentSnapshot, Error>;
}
