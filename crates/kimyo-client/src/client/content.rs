use crate::api::ContentApi;
use crate::client::base::{BaseClient, Config};
use crate::error::Error;
use crate::wire::{
    AckEnvelope, ContentSnapshot, ModuleCreated, ModuleCreatedEnvelope, ModuleListEnvelope,
    TopicCreatedEnvelope, TopicListEnvelope, UploadEnvelope,
};
use async_trait::async_trait;
use http::Method;
use kimyo_http::{BaseHttpClient, FilePart, HttpClient};
use kimyo_model::{Grade, Module, ModulePatch, NewModule, NewTopic, Topic, TopicRecord};
use serde::Serialize;

pub struct ContentClient<H: BaseHttpClient<Error = kimyo_http::Error> = HttpClient> {
    config: Config,
    http_client: H,
}

impl ContentClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http_client: HttpClient::default(),
        }
    }
}

impl<H: BaseHttpClient<Error = kimyo_http::Error>> ContentClient<H> {
    #[must_use]
    pub fn with_http_client(config: Config, http_client: H) -> Self {
        Self { config, http_client }
    }
}

impl<H: BaseHttpClient<Error = kimyo_http::Error>> BaseClient for ContentClient<H> {
    type Http = H;

    fn http_client(&self) -> &H {
        &self.http_client
    }

    fn config(&self) -> &Config {
        &self.config
    }
}

#[derive(Serialize)]
struct IdBody {
    id: i64,
}

#[derive(Serialize)]
struct UpdateModuleBody<'a> {
    id: i64,
    #[serde(flatten)]
    patch: &'a ModulePatch,
}

#[derive(Serialize)]
struct UpdateTopicBody<'a> {
    id: i64,
    #[serde(flatten)]
    record: &'a TopicRecord,
}

#[async_trait]
impl<H: BaseHttpClient<Error = kimyo_http::Error>> ContentApi for ContentClient<H> {
    async fn list_modules(&self, grade: Grade) -> Result<Vec<Module>, Error> {
        let envelope: ModuleListEnvelope = self
            .api_get("getModules.php", &[("grade", grade.as_str())])
            .await?;
        envelope.into_modules("getModules")
    }

    async fn add_module(&self, module: &NewModule) -> Result<ModuleCreated, Error> {
        let envelope: ModuleCreatedEnvelope =
            self.api_send(Method::POST, "addModule.php", module).await?;
        envelope.into_created("addModule")
    }

    async fn update_module(&self, id: i64, patch: &ModulePatch) -> Result<(), Error> {
        let body = UpdateModuleBody { id, patch };
        let envelope: AckEnvelope = self.api_send(Method::PUT, "updateModule.php", &body).await?;
        envelope.into_ack("updateModule")
    }

    async fn delete_module(&self, id: i64) -> Result<(), Error> {
        let envelope: AckEnvelope = self
            .api_send(Method::DELETE, "deleteModule.php", &IdBody { id })
            .await?;
        envelope.into_ack("deleteModule")
    }

    async fn list_topics(&self, module_slug: &str) -> Result<Vec<Topic>, Error> {
        let envelope: TopicListEnvelope =
            self.api_get("getTopics.php", &[("slug", module_slug)]).await?;
        envelope.into_topics("getTopics")
    }

    async fn add_topic(&self, topic: &NewTopic) -> Result<i64, Error> {
        let envelope: TopicCreatedEnvelope =
            self.api_send(Method::POST, "addTopic.php", topic).await?;
        envelope.into_id("addTopic")
    }

    async fn update_topic(&self, id: i64, record: &TopicRecord) -> Result<(), Error> {
        let body = UpdateTopicBody { id, record };
        let envelope: AckEnvelope = self.api_send(Method::PUT, "updateTopic.php", &body).await?;
        envelope.into_ack("updateTopic")
    }

    async fn delete_topic(&self, id: i64) -> Result<(), Error> {
        let envelope: AckEnvelope = self
            .api_send(Method::DELETE, "deleteTopic.php", &IdBody { id })
            .await?;
        envelope.into_ack("deleteTopic")
    }

    async fn upload_asset(&self, part: FilePart) -> Result<String, Error> {
        let envelope: UploadEnvelope = self.api_upload("upload.php", part).await?;
        envelope.into_url("upload")
    }

    async fn content_snapshot(&self) -> Result<ContentSnapshot, Error> {
        self.api_get("getAllContent.php", &[]).await
    }
}
