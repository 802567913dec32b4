pub mod module;
pub mod topic;

use std::fmt;

/// Lifecycle of an editor surface. Form controls are interactive only in
/// `Editing`; `ConfirmingSave` is a plain confirm-intent dialog (there is
/// deliberately no password theatre here), and `Saving` marks an API call
/// in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Viewing,
    Editing,
    ConfirmingSave,
    Saving,
}

impl fmt::Display for EditorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            EditorPhase::Viewing => "viewing",
            EditorPhase::Editing => "editing",
            EditorPhase::ConfirmingSave => "confirming a save",
            EditorPhase::Saving => "saving",
        };
        f.write_str(phase)
    }
}
