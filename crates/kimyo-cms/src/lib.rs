//! Editing workflows of the course CMS: edit sessions over pristine
//! baselines, editor state machines, collection stores and the dialog
//! values front ends render. Everything here is in-memory and headless;
//! network traffic goes through [`kimyo_client::ContentApi`].

pub mod dialog;
pub mod editor;
pub mod error;
pub mod selection;
pub mod session;
pub mod store;

#[cfg(test)]
mod testutil;

pub use dialog::Alert;
pub use dialog::AlertKind;
pub use dialog::ConfirmDialog;
pub use dialog::Decision;
pub use dialog::IconPicker;
pub use editor::EditorPhase;
pub use editor::module::ModuleEditor;
pub use editor::topic::TopicEditor;
pub use error::CmsError;
pub use selection::LastSelection;
pub use selection::SelectionFile;
pub use session::EditSession;
pub use store::modules::ModuleStore;
pub use store::topics::TopicStore;
