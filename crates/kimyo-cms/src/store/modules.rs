use crate::dialog::ConfirmDialog;
use crate::error::CmsError;
use kimyo_client::ContentApi;
use kimyo_model::{Grade, Module, NewModule};
use validator::Validate;

/// Sidebar collection of one grade's modules: load, client-side filter,
/// selection, and the add/delete flows with their confirmation dialogs.
pub struct ModuleStore {
    grade: Grade,
    modules: Vec<Module>,
    selected: Option<i64>,
    filter: String,
    pending_delete: Option<i64>,
}

impl ModuleStore {
    #[must_use]
    pub fn new(grade: Grade) -> Self {
        Self {
            grade,
            modules: Vec::new(),
            selected: None,
            filter: String::new(),
            pending_delete: None,
        }
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Fetches the full collection; there is no pagination.
    pub async fn load<A: ContentApi>(&mut self, api: &A) -> Result<(), CmsError> {
        self.modules = api.list_modules(self.grade).await?;
        if let Some(id) = self.selected {
            if !self.modules.iter().any(|m| m.id == Some(id)) {
                self.selected = None;
            }
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Modules passing the case-insensitive substring filter, in server
    /// order. Filtering happens over already-loaded data only.
    pub fn visible(&self) -> Vec<&Module> {
        self.modules
            .iter()
            .filter(|m| self.filter.is_empty() || m.matches(&self.filter))
            .collect()
    }

    pub fn select(&mut self, id: i64) -> Result<&Module, CmsError> {
        let module = self
            .modules
            .iter()
            .find(|m| m.id == Some(id))
            .ok_or(CmsError::UnknownId(id))?;
        self.selected = Some(id);
        Ok(module)
    }

    pub fn selected(&self) -> Option<&Module> {
        self.selected
            .and_then(|id| self.modules.iter().find(|m| m.id == Some(id)))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Validates and creates a module; on success it is appended to the
    /// collection and becomes the selection.
    pub async fn add<A: ContentApi>(&mut self, api: &A, new: NewModule) -> Result<&Module, CmsError> {
        new.validate()?;
        if self.modules.iter().any(|m| m.slug == new.slug) {
            return Err(CmsError::Validation(format!(
                "a module with slug \"{}\" already exists",
                new.slug
            )));
        }

        let created = api.add_module(&new).await?;
        let mut module = Module::draft(created.slug, new.grade, new.title);
        module.id = Some(created.id);
        module.description = new.description;
        module.icon = new.icon;
        module.color = new.color;
        module.active = new.active;
        self.modules.push(module);
        self.selected = Some(created.id);
        tracing::info!(id = created.id, "module created");
        Ok(self.modules.last().expect("just pushed"))
    }

    /// Opens the delete confirmation, warning about the topic cascade.
    pub fn request_delete(&mut self, id: i64) -> Result<ConfirmDialog, CmsError> {
        let module = self
            .modules
            .iter()
            .find(|m| m.id == Some(id))
            .ok_or(CmsError::UnknownId(id))?;
        self.pending_delete = Some(id);
        Ok(ConfirmDialog::new(
            "Delete module",
            format!(
                "Delete \"{}\"? All of its topics will be removed as well. This cannot be undone.",
                module.title
            ),
        )
        .danger())
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issues the delete call, removes the module locally and clears the
    /// selection if it pointed at the deleted module.
    pub async fn confirm_delete<A: ContentApi>(&mut self, api: &A) -> Result<Module, CmsError> {
        let id = self
            .pending_delete
            .ok_or(CmsError::Validation("no deletion pending".into()))?;
        api.delete_module(id).await?;
        self.pending_delete = None;
        let position = self
            .modules
            .iter()
            .position(|m| m.id == Some(id))
            .ok_or(CmsError::UnknownId(id))?;
        let removed = self.modules.remove(position);
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::info!(id, "module deleted");
        Ok(removed)
    }

    /// Adopts the entity returned by a successful editor save so later
    /// re-baselines see server state.
    pub fn apply_saved(&mut self, saved: Module) {
        match self.modules.iter_mut().find(|m| m.id == saved.id) {
            Some(slot) => *slot = saved,
            None => self.modules.push(saved),
        }
    }
}
