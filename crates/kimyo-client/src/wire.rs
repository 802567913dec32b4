//! Response envelopes of the PHP backend.
//!
//! Every mutating endpoint answers `{success, ...}`; a `success: false`
//! envelope becomes [`Error::Api`] with the server's message when one is
//! present.

use crate::error::Error;
use kimyo_model::{Module, Topic};
use serde::{Deserialize, Serialize};

pub(crate) fn rejection(operation: &str, message: Option<String>) -> Error {
    Error::Api(message.unwrap_or_else(|| format!("{operation} was rejected by the server")))
}

/// Identity assigned to a freshly created module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCreated {
    pub id: i64,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModuleListEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl ModuleListEnvelope {
    pub(crate) fn into_modules(self, operation: &str) -> Result<Vec<Module>, Error> {
        if self.success {
            Ok(self.modules)
        } else {
            Err(rejection(operation, self.message))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicListEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl TopicListEnvelope {
    pub(crate) fn into_topics(self, operation: &str) -> Result<Vec<Topic>, Error> {
        if self.success {
            Ok(self.topics)
        } else {
            Err(rejection(operation, self.message))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AckEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckEnvelope {
    pub(crate) fn into_ack(self, operation: &str) -> Result<(), Error> {
        if self.success {
            Ok(())
        } else {
            Err(rejection(operation, self.message))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModuleCreatedEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl ModuleCreatedEnvelope {
    pub(crate) fn into_created(self, operation: &str) -> Result<ModuleCreated, Error> {
        if !self.success {
            return Err(rejection(operation, self.message));
        }
        match (self.id, self.slug) {
            (Some(id), Some(slug)) => Ok(ModuleCreated { id, slug }),
            _ => Err(Error::Api(format!("{operation} answered without an id"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicCreatedEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl TopicCreatedEnvelope {
    pub(crate) fn into_id(self, operation: &str) -> Result<i64, Error> {
        if !self.success {
            return Err(rejection(operation, self.message));
        }
        self.id
            .ok_or_else(|| Error::Api(format!("{operation} answered without an id")))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadEnvelope {
    pub(crate) fn into_url(self, operation: &str) -> Result<String, Error> {
        if !self.success {
            return Err(rejection(operation, self.message));
        }
        self.url
            .ok_or_else(|| Error::Api(format!("{operation} answered without a url")))
    }
}

/// Full course tree as served by `getAllContent.php`. This endpoint has
/// no `success` flag; the body is the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSnapshot {
    #[serde(default)]
    pub modules: Vec<ModuleWithTopics>,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_modules: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleWithTopics {
    #[serde(flatten)]
    pub module: Module,
    #[serde(default)]
    pub topics: Vec<Topic>,
}
