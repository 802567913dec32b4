use crate::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single lesson inside a module. `content` is the serialized
/// block-tree document and stays opaque at this level; see
/// [`crate::blocks`] for the structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Topic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub module_id: i64,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    pub order_in_module: i64,
    #[serde(default, with = "wire::php_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::php_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Creation payload for `addTopic.php`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewTopic {
    pub module_id: i64,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    pub order_in_module: i64,
}

/// Whole-record payload for `updateTopic.php`. Unlike modules, topic
/// saves always overwrite every mutable field.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct TopicRecord {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    pub order_in_module: i64,
}

impl From<&Topic> for TopicRecord {
    fn from(topic: &Topic) -> Self {
        Self {
            title: topic.title.clone(),
            description: topic.description.clone(),
            content: topic.content.clone(),
            order_in_module: topic.order_in_module,
        }
    }
}

impl Topic {
    /// Case-insensitive substring match over title and description.
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
