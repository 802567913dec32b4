use crate::dialog::ConfirmDialog;
use crate::error::CmsError;
use kimyo_client::ContentApi;
use kimyo_model::blocks::BlockDocument;
use kimyo_model::{Module, NewTopic, Topic};
use validator::Validate;

/// Topic list of the selected module. New topics get placeholder content
/// and an order of `count(existing)`; orders are otherwise left exactly
/// as the server sent them.
pub struct TopicStore {
    module_id: i64,
    module_slug: String,
    topics: Vec<Topic>,
    selected: Option<i64>,
    filter: String,
    pending_delete: Option<i64>,
}

impl TopicStore {
    pub fn new(module: &Module) -> Result<Self, CmsError> {
        let module_id = module
            .id
            .ok_or(CmsError::Validation("module has not been persisted yet".into()))?;
        Ok(Self {
            module_id,
            module_slug: module.slug.clone(),
            topics: Vec::new(),
            selected: None,
            filter: String::new(),
            pending_delete: None,
        })
    }

    pub fn module_id(&self) -> i64 {
        self.module_id
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub async fn load<A: ContentApi>(&mut self, api: &A) -> Result<(), CmsError> {
        let mut topics = api.list_topics(&self.module_slug).await?;
        topics.sort_by_key(|t| t.order_in_module);
        self.topics = topics;
        if let Some(id) = self.selected {
            if !self.topics.iter().any(|t| t.id == Some(id)) {
                self.selected = None;
            }
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn visible(&self) -> Vec<&Topic> {
        self.topics
            .iter()
            .filter(|t| self.filter.is_empty() || t.matches(&self.filter))
            .collect()
    }

    pub fn select(&mut self, id: i64) -> Result<&Topic, CmsError> {
        let topic = self
            .topics
            .iter()
            .find(|t| t.id == Some(id))
            .ok_or(CmsError::UnknownId(id))?;
        self.selected = Some(id);
        Ok(topic)
    }

    pub fn selected(&self) -> Option<&Topic> {
        self.selected
            .and_then(|id| self.topics.iter().find(|t| t.id == Some(id)))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Creates a topic with placeholder content, appends it and selects
    /// it.
    pub async fn add<A: ContentApi>(
        &mut self,
        api: &A,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<&Topic, CmsError> {
        let content = BlockDocument::placeholder()
            .to_content_string()
            .map_err(kimyo_client::Error::from)?;
        let new = NewTopic {
            module_id: self.module_id,
            title: title.into(),
            description,
            content,
            order_in_module: self.topics.len() as i64,
        };
        new.validate()?;

        let id = api.add_topic(&new).await?;
        self.topics.push(Topic {
            id: Some(id),
            module_id: new.module_id,
            title: new.title,
            description: new.description,
            content: new.content,
            order_in_module: new.order_in_module,
            created_at: None,
            updated_at: None,
        });
        self.selected = Some(id);
        tracing::info!(id, "topic created");
        Ok(self.topics.last().expect("just pushed"))
    }

    pub fn request_delete(&mut self, id: i64) -> Result<ConfirmDialog, CmsError> {
        let topic = self
            .topics
            .iter()
            .find(|t| t.id == Some(id))
            .ok_or(CmsError::UnknownId(id))?;
        self.pending_delete = Some(id);
        Ok(ConfirmDialog::new(
            "Delete topic",
            format!("Delete \"{}\"? This cannot be undone.", topic.title),
        )
        .danger())
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<A: ContentApi>(&mut self, api: &A) -> Result<Topic, CmsError> {
        let id = self
            .pending_delete
            .ok_or(CmsError::Validation("no deletion pending".into()))?;
        api.delete_topic(id).await?;
        self.pending_delete = None;
        let position = self
            .topics
            .iter()
            .position(|t| t.id == Some(id))
            .ok_or(CmsError::UnknownId(id))?;
        let removed = self.topics.remove(position);
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::info!(id, "topic deleted");
        Ok(removed)
    }

    /// Adopts the record returned by a successful topic-editor save.
    pub fn apply_saved(&mut self, saved: Topic) {
        match self.topics.iter_mut().find(|t| t.id == saved.id) {
            Some(slot) => *slot = saved,
            None => self.topics.push(saved),
        }
        self.topics.sort_by_key(|t| t.order_in_module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Call, FakeApi, module, topic};

    async fn loaded_store(api: &FakeApi) -> TopicStore {
        api.topics.lock().unwrap().extend([
            topic(5, 1, "Groups and periods", 1),
            topic(4, 1, "History of the table", 0),
        ]);
        let mut store = TopicStore::new(&module(1, "periodic-table", "Periodic Table")).unwrap();
        store.load(api).await.unwrap();
        store
    }

    #[tokio::test]
    async fn load_sorts_by_order_within_module() {
        let api = FakeApi::new();
        let store = loaded_store(&api).await;
        assert_eq!(api.calls(), vec![Call::ListTopics("periodic-table".to_owned())]);
        assert_eq!(store.topics()[0].id, Some(4));
        assert_eq!(store.topics()[1].id, Some(5));
    }

    #[tokio::test]
    async fn an_unpersisted_module_cannot_host_a_topic_store() {
        let unsaved = Module::draft("draft", kimyo_model::Grade::Ten, "Draft");
        assert!(matches!(
            TopicStore::new(&unsaved),
            Err(CmsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn new_topics_default_order_to_the_current_count() {
        let api = FakeApi::new();
        let mut store = loaded_store(&api).await;

        let added = store.add(&api, "Metals", None).await.unwrap();
        assert_eq!(added.order_in_module, 2);
        let parsed = BlockDocument::parse(&added.content).unwrap();
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(store.selected().unwrap().title, "Metals");
    }

    #[tokio::test]
    async fn empty_title_is_rejected_without_a_network_call() {
        let api = FakeApi::new();
        let mut store = loaded_store(&api).await;
        let calls_before = api.calls().len();
        assert!(matches!(
            store.add(&api, "", None).await,
            Err(CmsError::Validation(_))
        ));
        assert_eq!(api.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn delete_flow_has_no_cascade_warning() {
        let api = FakeApi::new();
        let mut store = loaded_store(&api).await;
        store.select(5).unwrap();

        let dialog = store.request_delete(5).unwrap();
        assert!(dialog.danger);
        assert!(!dialog.body.contains("topics"));

        let removed = store.confirm_delete(&api).await.unwrap();
        assert_eq!(removed.id, Some(5));
        assert!(store.selected().is_none());
        assert_eq!(store.topics().len(), 1);
    }

    #[tokio::test]
    async fn apply_saved_keeps_the_list_ordered() {
        let api = FakeApi::new();
        let mut store = loaded_store(&api).await;
        let mut saved = topic(4, 1, "History of the table", 9);
        saved.content = r#"{"blocks":[]}"#.to_owned();
        store.apply_saved(saved);
        assert_eq!(store.topics().last().unwrap().id, Some(4));
    }
}
