use crate::dialog::{Alert, ConfirmDialog};
use crate::editor::EditorPhase;
use crate::error::CmsError;
use crate::session::EditSession;
use kimyo_client::ContentApi;
use kimyo_http::FilePart;
use kimyo_model::blocks::{Block, BlockDocument};
use kimyo_model::{Topic, TopicRecord};
use validator::Validate;

/// Editor for one topic's metadata and its rich-text body.
///
/// The stored content string is parsed into a [`BlockDocument`] on open;
/// corruption degrades to a single empty paragraph instead of failing
/// the open. Saving serializes the tree back and sends the whole record.
pub struct TopicEditor {
    session: EditSession<Topic>,
    document: BlockDocument,
    baseline_document: BlockDocument,
    phase: EditorPhase,
    open: bool,
    notice: Option<Alert>,
}

impl TopicEditor {
    /// Opens the editor on a persisted topic; never fails.
    #[must_use]
    pub fn open(topic: Topic) -> Self {
        let document = BlockDocument::parse_or_placeholder(&topic.content);
        let mut session = EditSession::new(topic);
        session.enter_edit();
        Self {
            baseline_document: document.clone(),
            document,
            session,
            phase: EditorPhase::Editing,
            open: true,
            notice: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn topic(&self) -> &Topic {
        self.session.draft()
    }

    pub fn document(&self) -> &BlockDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut BlockDocument {
        &mut self.document
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.session.draft_mut().title = title.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.session.draft_mut().description = description;
    }

    /// Raw order value; siblings are never renumbered or de-duplicated
    /// on the client.
    pub fn set_order(&mut self, order: i64) {
        self.session.draft_mut().order_in_module = order;
    }

    pub fn take_notice(&mut self) -> Option<Alert> {
        self.notice.take()
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty() || self.document != self.baseline_document
    }

    /// Uploads an image and appends it to the document as an image block.
    /// Returns the served URL.
    pub async fn attach_image<A: ContentApi>(
        &mut self,
        api: &A,
        part: FilePart,
        caption: &str,
    ) -> Result<String, CmsError> {
        let url = api.upload_asset(part).await?;
        self.document.blocks.push(Block::image(url.clone(), caption));
        Ok(url)
    }

    /// Validates the draft and opens the save confirmation.
    pub fn request_save(&mut self) -> Result<ConfirmDialog, CmsError> {
        if self.phase != EditorPhase::Editing {
            return Err(CmsError::Phase(self.phase));
        }
        self.session.draft().validate()?;
        if self.session.draft().id.is_none() {
            return Err(CmsError::Validation(
                "topic has not been persisted yet".into(),
            ));
        }
        self.phase = EditorPhase::ConfirmingSave;
        Ok(ConfirmDialog::new(
            "Save topic",
            format!("Save changes to \"{}\"?", self.session.draft().title),
        ))
    }

    pub fn dismiss_confirm(&mut self) -> Result<(), CmsError> {
        if self.phase != EditorPhase::ConfirmingSave {
            return Err(CmsError::Phase(self.phase));
        }
        self.phase = EditorPhase::Editing;
        Ok(())
    }

    /// Serializes the block tree, sends the whole record, and closes the
    /// editor on acknowledgment. On failure the editor stays open with
    /// everything intact.
    pub async fn confirm_save<A: ContentApi>(&mut self, api: &A) -> Result<Topic, CmsError> {
        if self.phase != EditorPhase::ConfirmingSave {
            return Err(CmsError::Phase(self.phase));
        }
        self.phase = EditorPhase::Saving;

        let result = self.push(api).await;
        match result {
            Ok(saved) => {
                self.session.rebaseline(saved.clone());
                self.baseline_document = self.document.clone();
                self.phase = EditorPhase::Viewing;
                self.open = false;
                self.notice = Some(Alert::info(format!("Saved \"{}\"", saved.title)));
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(%err, "topic save failed, keeping editor open");
                self.phase = EditorPhase::Editing;
                Err(err)
            }
        }
    }

    /// Discards everything and closes without saving.
    pub fn cancel(&mut self) {
        self.session.discard();
        self.document = self.baseline_document.clone();
        self.phase = EditorPhase::Viewing;
        self.open = false;
    }

    async fn push<A: ContentApi>(&mut self, api: &A) -> Result<Topic, CmsError> {
        let mut draft = self.session.draft().clone();
        draft.content = self
            .document
            .to_content_string()
            .map_err(kimyo_client::Error::from)?;
        let id = draft.id.ok_or_else(|| {
            CmsError::Validation("topic has not been persisted yet".into())
        })?;
        api.update_topic(id, &TopicRecord::from(&draft)).await?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Call, FakeApi, topic};
    use kimyo_model::blocks::PARAGRAPH;

    fn stored_topic() -> Topic {
        let mut t = topic(31, 7, "Electron shells", 2);
        t.content = r#"{"blocks":[{"type":"paragraph","data":{"text":"K, L, M"}}]}"#.to_owned();
        t
    }

    #[test]
    fn opening_parses_the_stored_document() {
        let editor = TopicEditor::open(stored_topic());
        assert!(editor.is_open());
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.document().blocks[0].text(), Some("K, L, M"));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn corrupt_content_opens_with_a_placeholder_paragraph() {
        let mut t = stored_topic();
        t.content = "{{{ not json".to_owned();
        let editor = TopicEditor::open(t);
        assert!(editor.is_open());
        assert_eq!(editor.document().blocks.len(), 1);
        assert_eq!(editor.document().blocks[0].kind, PARAGRAPH);
        assert_eq!(editor.document().blocks[0].text(), Some(""));
    }

    #[test]
    fn editing_the_document_makes_the_editor_dirty() {
        let mut editor = TopicEditor::open(stored_topic());
        editor
            .document_mut()
            .blocks
            .push(Block::paragraph("New paragraph"));
        assert!(editor.is_dirty());
    }

    #[tokio::test]
    async fn save_serializes_the_tree_and_closes_on_ack() {
        let api = FakeApi::new();
        let mut editor = TopicEditor::open(stored_topic());
        editor.set_title("Electron shells and subshells");
        editor.document_mut().blocks.push(Block::paragraph("s, p, d, f"));
        editor.request_save().unwrap();

        let saved = editor.confirm_save(&api).await.unwrap();
        assert!(!editor.is_open());
        assert_eq!(saved.title, "Electron shells and subshells");

        match &api.calls()[0] {
            Call::UpdateTopic(id, record) => {
                assert_eq!(*id, 31);
                assert_eq!(record.order_in_module, 2);
                let reparsed = BlockDocument::parse(&record.content).unwrap();
                assert_eq!(reparsed.blocks.len(), 2);
                assert_eq!(reparsed.blocks[1].text(), Some("s, p, d, f"));
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_failed_save_keeps_the_editor_open() {
        let api = FakeApi::new();
        api.fail_next("storage full");
        let mut editor = TopicEditor::open(stored_topic());
        editor.set_title("Changed");
        editor.request_save().unwrap();

        assert!(editor.confirm_save(&api).await.is_err());
        assert!(editor.is_open());
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.topic().title, "Changed");
    }

    #[test]
    fn empty_title_is_rejected_before_confirmation() {
        let mut editor = TopicEditor::open(stored_topic());
        editor.set_title("");
        assert!(matches!(
            editor.request_save(),
            Err(CmsError::Validation(_))
        ));
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[test]
    fn duplicate_orders_are_accepted_silently() {
        let mut editor = TopicEditor::open(stored_topic());
        editor.set_order(2);
        assert!(!editor.is_dirty());
        editor.set_order(-5);
        assert_eq!(editor.topic().order_in_module, -5);
        assert!(editor.request_save().is_ok());
    }

    #[tokio::test]
    async fn attach_image_uploads_and_appends_a_block() {
        let api = FakeApi::new();
        let mut editor = TopicEditor::open(stored_topic());
        let part = FilePart {
            file_name: "orbital.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        };

        let url = editor.attach_image(&api, part, "s-orbital").await.unwrap();
        assert_eq!(url, "/uploads/orbital.png");
        let last = editor.document().blocks.last().unwrap();
        assert_eq!(last.kind, "image");
        assert_eq!(last.data["url"], "/uploads/orbital.png");
        assert!(editor.is_dirty());
    }

    #[test]
    fn cancel_discards_and_closes() {
        let mut editor = TopicEditor::open(stored_topic());
        editor.set_title("Changed");
        editor.document_mut().blocks.clear();
        editor.cancel();
        assert!(!editor.is_open());
        assert!(!editor.is_dirty());
    }
}
