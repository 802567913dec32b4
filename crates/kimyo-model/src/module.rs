use crate::palette::ColorToken;
use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Grade level a module is taught in. The backend only knows these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "11")]
    Eleven,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown grade level: {0}")]
pub struct UnknownGrade(pub String);

impl Grade {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Ten => "10",
            Grade::Eleven => "11",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "10" => Ok(Grade::Ten),
            "11" => Ok(Grade::Eleven),
            other => Err(UnknownGrade(other.to_owned())),
        }
    }
}

/// A course unit. `id` and the timestamps are server-assigned and absent
/// until the module has been persisted once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(rename = "grade_level")]
    pub grade: Grade,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
    #[serde(with = "wire::int_bool")]
    pub active: bool,
    #[serde(default, with = "wire::php_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::php_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Module {
    /// A fresh, never-persisted module with the given identity fields.
    #[must_use]
    pub fn draft(slug: impl Into<String>, grade: Grade, title: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            grade,
            title: title.into(),
            description: None,
            icon: None,
            color: None,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Case-insensitive substring match over title and description, used
    /// by the sidebar filter.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// Creation payload for `addModule.php`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewModule {
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[serde(rename = "grade_level")]
    pub grade: Grade,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
    #[serde(with = "wire::int_bool")]
    pub active: bool,
}

impl From<&Module> for NewModule {
    fn from(module: &Module) -> Self {
        Self {
            slug: module.slug.clone(),
            grade: module.grade,
            title: module.title.clone(),
            description: module.description.clone(),
            icon: module.icon.clone(),
            color: module.color,
            active: module.active,
        }
    }
}

/// Partial update payload for `updateModule.php`. Only fields that
/// actually changed are serialized; an empty string clears an optional
/// text field (the backend has no notion of JSON null).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "grade_level", skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(serialize_with = "wire::some_int_bool", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ModulePatch {
    /// Field-by-field diff of a draft against its baseline.
    #[must_use]
    pub fn between(baseline: &Module, draft: &Module) -> Self {
        Self {
            slug: changed(&baseline.slug, &draft.slug),
            grade: (baseline.grade != draft.grade).then_some(draft.grade),
            title: changed(&baseline.title, &draft.title),
            description: changed_opt(baseline.description.as_deref(), draft.description.as_deref()),
            icon: changed_opt(baseline.icon.as_deref(), draft.icon.as_deref()),
            color: (baseline.color != draft.color)
                .then(|| draft.color.map_or_else(String::new, |c| c.as_str().to_owned())),
            active: (baseline.active != draft.active).then_some(draft.active),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn changed(baseline: &str, draft: &str) -> Option<String> {
    (baseline != draft).then(|| draft.to_owned())
}

fn changed_opt(baseline: Option<&str>, draft: Option<&str>) -> Option<String> {
    (baseline != draft).then(|| draft.unwrap_or_default().to_owned())
}

pub(crate) fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("slug must be lowercase letters, digits and dashes".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample() -> Module {
        Module::draft("quantum-mechanics", Grade::Ten, "Quantum Mechanics")
    }

    #[test]
    fn grade_serializes_as_the_wire_string() {
        assert_eq!(serde_json::to_string(&Grade::Ten).unwrap(), r#""10""#);
        assert_eq!("11".parse::<Grade>(), Ok(Grade::Eleven));
        assert!("9".parse::<Grade>().is_err());
    }

    #[test]
    fn new_module_serializes_active_as_integer() {
        let new = NewModule::from(&sample());
        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(json["active"], 1);
        assert_eq!(json["grade_level"], "10");
        assert_eq!(json["slug"], "quantum-mechanics");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn module_parses_backend_row() {
        let row = r#"{
            "id": 7,
            "slug": "atomic-structure",
            "grade_level": "11",
            "title": "Atomic Structure",
            "description": "Protons, neutrons, electrons",
            "icon": "atom",
            "color": "violet",
            "active": "1",
            "created_at": "2024-01-15 09:00:00"
        }"#;
        let module: Module = serde_json::from_str(row).unwrap();
        assert_eq!(module.id, Some(7));
        assert_eq!(module.grade, Grade::Eleven);
        assert_eq!(module.color, Some(ColorToken::Violet));
        assert!(module.active);
        assert!(module.created_at.is_some());
        assert!(module.updated_at.is_none());
    }

    #[test]
    fn patch_contains_only_changed_fields() {
        let baseline = sample();
        let mut draft = baseline.clone();
        draft.title = "Quantum Mechanics II".to_owned();
        draft.active = false;

        let patch = ModulePatch::between(&baseline, &draft);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "Quantum Mechanics II");
        assert_eq!(json["active"], 0);
        assert!(json.get("slug").is_none());
        assert!(json.get("grade_level").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn clearing_an_optional_field_sends_an_empty_string() {
        let mut baseline = sample();
        baseline.description = Some("old".to_owned());
        let mut draft = baseline.clone();
        draft.description = None;

        let patch = ModulePatch::between(&baseline, &draft);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["description"], "");
    }

    #[test]
    fn identical_records_produce_an_empty_patch() {
        let module = sample();
        assert!(ModulePatch::between(&module, &module.clone()).is_empty());
    }

    #[test]
    fn slug_validation_rejects_malformed_slugs() {
        for bad in ["", "Quantum", "has space", "-leading", "trailing-", "ümlaut"] {
            let mut module = sample();
            module.slug = bad.to_owned();
            assert!(module.validate().is_err(), "expected {bad:?} to be rejected");
        }
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn filter_matches_title_and_description_case_insensitively() {
        let mut module = sample();
        module.description = Some("Wave functions and orbitals".to_owned());
        assert!(module.matches("quantum"));
        assert!(module.matches("ORBITAL"));
        assert!(!module.matches("thermodynamics"));
    }
}
