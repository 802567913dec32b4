//! Scripted in-memory backend used by editor and store tests.

use async_trait::async_trait;
use kimyo_client::{ContentApi, ContentSnapshot, Error, ModuleCreated};
use kimyo_http::FilePart;
use kimyo_model::{Grade, Module, ModulePatch, NewModule, NewTopic, Topic, TopicRecord};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListModules(Grade),
    AddModule(NewModule),
    UpdateModule(i64, ModulePatch),
    DeleteModule(i64),
    ListTopics(String),
    AddTopic(NewTopic),
    UpdateTopic(i64, TopicRecord),
    DeleteTopic(i64),
    Upload(String),
    Snapshot,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    pub calls: Mutex<Vec<Call>>,
    /// When set, the next operation consumes it and fails.
    pub fail_next: Mutex<Option<String>>,
    pub modules: Mutex<Vec<Module>>,
    pub topics: Mutex<Vec<Topic>>,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_owned());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(message) => Err(Error::Api(message)),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentApi for FakeApi {
    async fn list_modules(&self, grade: Grade) -> Result<Vec<Module>, Error> {
        self.record(Call::ListModules(grade))?;
        Ok(self
            .modules
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.grade == grade)
            .cloned()
            .collect())
    }

    async fn add_module(&self, module: &NewModule) -> Result<ModuleCreated, Error> {
        self.record(Call::AddModule(module.clone()))?;
        Ok(ModuleCreated {
            id: self.next_id(),
            slug: module.slug.clone(),
        })
    }

    async fn update_module(&self, id: i64, patch: &ModulePatch) -> Result<(), Error> {
        self.record(Call::UpdateModule(id, patch.clone()))
    }

    async fn delete_module(&self, id: i64) -> Result<(), Error> {
        self.record(Call::DeleteModule(id))
    }

    async fn list_topics(&self, module_slug: &str) -> Result<Vec<Topic>, Error> {
        self.record(Call::ListTopics(module_slug.to_owned()))?;
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn add_topic(&self, topic: &NewTopic) -> Result<i64, Error> {
        self.record(Call::AddTopic(topic.clone()))?;
        Ok(self.next_id())
    }

    async fn update_topic(&self, id: i64, record: &TopicRecord) -> Result<(), Error> {
        self.record(Call::UpdateTopic(id, record.clone()))
    }

    async fn delete_topic(&self, id: i64) -> Result<(), Error> {
        self.record(Call::DeleteTopic(id))
    }

    async fn upload_asset(&self, part: FilePart) -> Result<String, Error> {
        self.record(Call::Upload(part.file_name.clone()))?;
        Ok(format!("/uploads/{}", part.file_name))
    }

    async fn content_snapshot(&self) -> Result<ContentSnapshot, Error> {
        self.record(Call::Snapshot)?;
        Ok(ContentSnapshot {
            modules: Vec::new(),
            last_updated: None,
            total_modules: 0,
        })
    }
}

pub(crate) fn module(id: i64, slug: &str, title: &str) -> Module {
    let mut module = Module::draft(slug, Grade::Ten, title);
    module.id = Some(id);
    module
}

pub(crate) fn topic(id: i64, module_id: i64, title: &str, order: i64) -> Topic {
    Topic {
        id: Some(id),
        module_id,
        title: title.to_owned(),
        description: None,
        content: String::new(),
        order_in_module: order,
        created_at: None,
        updated_at: None,
    }
}
