//! Headless dialog values. Editors and stores describe what to ask; a
//! front end renders it and feeds the [`Decision`] back.

use kimyo_model::icon::{self, Icon};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub body: String,
    /// Marks destructive confirmations so front ends can style or
    /// double-guard them.
    pub danger: bool,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            danger: false,
        }
    }

    #[must_use]
    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }
}

/// Picker over the static icon registry with a client-side name filter.
#[derive(Debug, Clone, Default)]
pub struct IconPicker {
    filter: String,
    chosen: Option<&'static Icon>,
}

impl IconPicker {
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn entries(&self) -> Vec<&'static Icon> {
        let needle = self.filter.to_lowercase();
        icon::all()
            .iter()
            .filter(|icon| {
                needle.is_empty()
                    || icon.name.contains(&needle)
                    || icon.label.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Chooses by name; unknown names select the fallback glyph rather
    /// than failing.
    pub fn choose(&mut self, name: &str) -> &'static Icon {
        let icon = icon::resolve(name);
        self.chosen = Some(icon);
        icon
    }

    pub fn chosen(&self) -> Option<&'static Icon> {
        self.chosen
    }
}
