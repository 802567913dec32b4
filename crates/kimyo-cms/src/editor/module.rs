use crate::dialog::{Alert, ConfirmDialog};
use crate::editor::EditorPhase;
use crate::error::CmsError;
use crate::session::EditSession;
use kimyo_client::ContentApi;
use kimyo_model::icon::{self, Icon};
use kimyo_model::{Module, ModulePatch, NewModule, Topic};
use std::collections::BTreeSet;
use validator::Validate;

/// Editor for one module and its list of owned topics.
///
/// Saving is a two-step gesture: `request_save` validates the draft and
/// yields the confirmation dialog, `confirm_save` performs the network
/// round-trip. On success the session is re-baselined on the server
/// state; on failure the draft and pending deletions survive so the
/// author can retry.
pub struct ModuleEditor {
    session: EditSession<Module>,
    topics: Vec<Topic>,
    phase: EditorPhase,
    notice: Option<Alert>,
}

impl ModuleEditor {
    #[must_use]
    pub fn new(module: Module, topics: Vec<Topic>) -> Self {
        Self {
            session: EditSession::new(module),
            topics,
            phase: EditorPhase::Viewing,
            notice: None,
        }
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn module(&self) -> &Module {
        self.session.draft()
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// The transient saved-notice from the last successful save, if it
    /// has not been taken yet.
    pub fn take_notice(&mut self) -> Option<Alert> {
        self.notice.take()
    }

    /// Icon of the draft, with the fallback glyph for unresolvable names.
    pub fn resolved_icon(&self) -> &'static Icon {
        self.session
            .draft()
            .icon
            .as_deref()
            .map_or(&icon::FALLBACK, icon::resolve)
    }

    /// Mutable access to the draft; only available while editing.
    pub fn module_mut(&mut self) -> Result<&mut Module, CmsError> {
        if self.phase != EditorPhase::Editing {
            return Err(CmsError::Phase(self.phase));
        }
        Ok(self.session.draft_mut())
    }

    pub fn begin_edit(&mut self) -> Result<(), CmsError> {
        if self.phase != EditorPhase::Viewing {
            return Err(CmsError::Phase(self.phase));
        }
        self.session.enter_edit();
        self.phase = EditorPhase::Editing;
        Ok(())
    }

    /// Discards the draft and pending deletions, bypassing any save.
    pub fn cancel(&mut self) -> Result<(), CmsError> {
        if self.phase != EditorPhase::Editing {
            return Err(CmsError::Phase(self.phase));
        }
        self.session.discard();
        self.phase = EditorPhase::Viewing;
        Ok(())
    }

    /// Marks an owned topic for deletion on save. Ids that do not belong
    /// to this module's topic list are a no-op.
    pub fn mark_topic_for_deletion(&mut self, id: i64) -> bool {
        if !self.topics.iter().any(|t| t.id == Some(id)) {
            return false;
        }
        self.session.mark_delete(id)
    }

    pub fn unmark_topic_deletion(&mut self, id: i64) -> bool {
        self.session.unmark_delete(id)
    }

    pub fn pending_topic_deletions(&self) -> &BTreeSet<i64> {
        self.session.pending_deletions()
    }

    /// Validates the draft and opens the save confirmation. Rejected
    /// without any network traffic when the draft is invalid or clean.
    pub fn request_save(&mut self) -> Result<ConfirmDialog, CmsError> {
        if self.phase != EditorPhase::Editing {
            return Err(CmsError::Phase(self.phase));
        }
        if !self.session.is_dirty() {
            return Err(CmsError::Validation("there are no changes to save".into()));
        }
        self.session.draft().validate()?;

        self.phase = EditorPhase::ConfirmingSave;
        let deletions = self.session.pending_deletions().len();
        let mut body = format!("Save changes to \"{}\"?", self.session.draft().title);
        if deletions > 0 {
            body.push_str(&format!(
                " {deletions} topic(s) marked for deletion will be removed permanently."
            ));
        }
        Ok(ConfirmDialog::new("Save module", body))
    }

    pub fn dismiss_confirm(&mut self) -> Result<(), CmsError> {
        if self.phase != EditorPhase::ConfirmingSave {
            return Err(CmsError::Phase(self.phase));
        }
        self.phase = EditorPhase::Editing;
        Ok(())
    }

    /// Performs the save round-trip and returns the persisted module.
    pub async fn confirm_save<A: ContentApi>(&mut self, api: &A) -> Result<Module, CmsError> {
        if self.phase != EditorPhase::ConfirmingSave {
            return Err(CmsError::Phase(self.phase));
        }
        self.phase = EditorPhase::Saving;
        match self.push(api).await {
            Ok(saved) => {
                self.session.rebaseline(saved.clone());
                self.phase = EditorPhase::Viewing;
                self.notice = Some(Alert::info(format!("Saved \"{}\"", saved.title)));
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(%err, "module save failed, keeping draft");
                self.phase = EditorPhase::Editing;
                Err(err)
            }
        }
    }

    /// Adopts a new baseline, e.g. when the selection changes. Abandons
    /// any in-progress edit; callers wanting to prompt check `is_dirty`.
    pub fn rebaseline(&mut self, module: Module, topics: Vec<Topic>) {
        self.session.rebaseline(module);
        self.topics = topics;
        self.phase = EditorPhase::Viewing;
    }

    async fn push<A: ContentApi>(&mut self, api: &A) -> Result<Module, CmsError> {
        let pending: Vec<i64> = self.session.pending_deletions().iter().copied().collect();
        for id in pending {
            api.delete_topic(id).await?;
            // Unmark as we go so a later failure does not re-delete.
            self.session.unmark_delete(id);
            self.topics.retain(|t| t.id != Some(id));
        }

        let draft = self.session.draft().clone();
        match draft.id {
            Some(id) => {
                let patch = ModulePatch::between(self.session.baseline(), &draft);
                if !patch.is_empty() {
                    api.update_module(id, &patch).await?;
                }
                Ok(draft)
            }
            None => {
                let created = api.add_module(&NewModule::from(&draft)).await?;
                let mut saved = draft;
                saved.id = Some(created.id);
                saved.slug = created.slug;
                Ok(saved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Call, FakeApi, module, topic};

    fn editor() -> ModuleEditor {
        let m = module(7, "periodic-table", "Periodic Table");
        let topics = vec![topic(1, 7, "Groups", 0), topic(2, 7, "Periods", 1)];
        ModuleEditor::new(m, topics)
    }

    #[test]
    fn starts_clean_and_viewing() {
        let editor = editor();
        assert_eq!(editor.phase(), EditorPhase::Viewing);
        assert!(!editor.is_dirty());
    }

    #[test]
    fn draft_is_locked_outside_edit_mode() {
        let mut editor = editor();
        assert!(matches!(editor.module_mut(), Err(CmsError::Phase(_))));
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = "Changed".to_owned();
        assert!(editor.is_dirty());
    }

    #[test]
    fn cancel_discards_and_returns_to_viewing() {
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = "Changed".to_owned();
        editor.mark_topic_for_deletion(1);

        editor.cancel().unwrap();
        assert_eq!(editor.phase(), EditorPhase::Viewing);
        assert!(!editor.is_dirty());
        assert_eq!(editor.module().title, "Periodic Table");
        assert!(editor.pending_topic_deletions().is_empty());
    }

    #[test]
    fn marking_an_unknown_topic_is_a_no_op() {
        let mut editor = editor();
        editor.begin_edit().unwrap();
        assert!(!editor.mark_topic_for_deletion(999));
        assert!(editor.pending_topic_deletions().is_empty());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn a_clean_draft_cannot_request_a_save() {
        let mut editor = editor();
        editor.begin_edit().unwrap();
        assert!(matches!(
            editor.request_save(),
            Err(CmsError::Validation(_))
        ));
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[tokio::test]
    async fn an_invalid_draft_is_rejected_before_any_network_call() {
        let api = FakeApi::new();
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = String::new();

        assert!(matches!(
            editor.request_save(),
            Err(CmsError::Validation(_))
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_save_deletes_marked_topics_then_patches() {
        let api = FakeApi::new();
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = "Periodic Table II".to_owned();
        assert!(editor.mark_topic_for_deletion(2));

        let dialog = editor.request_save().unwrap();
        assert!(dialog.body.contains("1 topic(s)"));
        assert_eq!(editor.phase(), EditorPhase::ConfirmingSave);

        let saved = editor.confirm_save(&api).await.unwrap();
        assert_eq!(saved.title, "Periodic Table II");
        assert_eq!(editor.phase(), EditorPhase::Viewing);
        assert!(!editor.is_dirty());
        assert!(editor.topics().iter().all(|t| t.id != Some(2)));
        assert_eq!(editor.take_notice().unwrap().message, "Saved \"Periodic Table II\"");

        let calls = api.calls();
        assert_eq!(calls[0], Call::DeleteTopic(2));
        match &calls[1] {
            Call::UpdateModule(id, patch) => {
                assert_eq!(*id, 7);
                assert_eq!(patch.title.as_deref(), Some("Periodic Table II"));
                assert!(patch.slug.is_none());
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn deletions_alone_save_without_an_update_call() {
        let api = FakeApi::new();
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.mark_topic_for_deletion(1);
        editor.request_save().unwrap();
        editor.confirm_save(&api).await.unwrap();

        assert_eq!(api.calls(), vec![Call::DeleteTopic(1)]);
    }

    #[tokio::test]
    async fn a_failed_save_returns_to_editing_with_the_draft_intact() {
        let api = FakeApi::new();
        api.fail_next("database unavailable");
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = "Changed".to_owned();
        editor.request_save().unwrap();

        let err = editor.confirm_save(&api).await.unwrap_err();
        assert!(matches!(err, CmsError::Api(_)));
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(editor.is_dirty());
        assert_eq!(editor.module().title, "Changed");
    }

    #[tokio::test]
    async fn saving_an_unpersisted_module_creates_it_and_adopts_the_id() {
        let api = FakeApi::new();
        let draft = Module::draft("quantum-mechanics", kimyo_model::Grade::Ten, "Quantum Mechanics");
        let mut editor = ModuleEditor::new(draft, Vec::new());
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().description = Some("Wave mechanics".to_owned());
        editor.request_save().unwrap();

        let saved = editor.confirm_save(&api).await.unwrap();
        assert_eq!(saved.id, Some(100));
        assert!(matches!(api.calls()[0], Call::AddModule(_)));
    }

    #[test]
    fn dismissing_the_confirmation_returns_to_editing() {
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = "Changed".to_owned();
        editor.request_save().unwrap();
        editor.dismiss_confirm().unwrap();
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(editor.is_dirty());
    }

    #[test]
    fn rebaseline_resets_phase_and_dirtiness() {
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().title = "Half-finished".to_owned();

        editor.rebaseline(module(8, "atomic-structure", "Atomic Structure"), Vec::new());
        assert_eq!(editor.phase(), EditorPhase::Viewing);
        assert!(!editor.is_dirty());
        assert_eq!(editor.module().slug, "atomic-structure");
    }

    #[test]
    fn unresolvable_icon_names_render_the_fallback() {
        let mut editor = editor();
        editor.begin_edit().unwrap();
        editor.module_mut().unwrap().icon = Some("no-such-icon".to_owned());
        assert_eq!(editor.resolved_icon().name, "flask");
    }
}
