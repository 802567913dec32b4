//! Block-tree representation of a topic's rich-text content.
//!
//! The editing surface works on an ordered list of typed blocks; storage
//! is a JSON string. Blocks keep their `data` payload as raw JSON so that
//! types this crate does not know about survive a load/save cycle
//! unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const PARAGRAPH: &str = "paragraph";
pub const HEADER: &str = "header";
pub const IMAGE: &str = "image";
pub const LIST: &str = "list";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    #[must_use]
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(PARAGRAPH, json!({ "text": text.into() }))
    }

    #[must_use]
    pub fn header(text: impl Into<String>, level: u8) -> Self {
        Self::new(HEADER, json!({ "text": text.into(), "level": level }))
    }

    #[must_use]
    pub fn image(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::new(IMAGE, json!({ "url": url.into(), "caption": caption.into() }))
    }

    #[must_use]
    pub fn unordered_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        Self::new(LIST, json!({ "style": "unordered", "items": items }))
    }

    /// Plain text carried by the block, when its payload has a `text`
    /// field. Used for previews and content-length displays.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.data.get("text").and_then(Value::as_str)
    }
}

impl BlockDocument {
    /// The document a corrupt or empty content string degrades to: one
    /// empty paragraph, ready for editing.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            time: None,
            blocks: vec![Block::paragraph("")],
            version: None,
            extra: Map::new(),
        }
    }

    /// Strict parse of a stored content string.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Parse that never fails: corruption degrades to [`placeholder`],
    /// it must not block the editor from opening.
    ///
    /// [`placeholder`]: BlockDocument::placeholder
    #[must_use]
    pub fn parse_or_placeholder(content: &str) -> Self {
        match Self::parse(content) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(%err, "stored content is not a block document, substituting placeholder");
                Self::placeholder()
            }
        }
    }

    /// Serialize back to the storage form.
    pub fn to_content_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
            || self
                .blocks
                .iter()
                .all(|b| b.kind == PARAGRAPH && b.text().unwrap_or_default().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_round_trips_without_losing_unknown_blocks() {
        let stored = r#"{
            "time": 1700000000,
            "blocks": [
                {"type": "paragraph", "data": {"text": "Valence electrons"}},
                {"type": "chem-formula", "data": {"formula": "H2SO4", "display": true}, "id": "x1"},
                {"type": "list", "data": {"style": "unordered", "items": ["Na", "K"]}}
            ],
            "version": "2.28.2"
        }"#;
        let doc = BlockDocument::parse(stored).unwrap();
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1].kind, "chem-formula");
        assert_eq!(doc.blocks[1].extra["id"], "x1");

        let reparsed = BlockDocument::parse(&doc.to_content_string().unwrap()).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn corrupt_content_degrades_to_a_single_empty_paragraph() {
        for corrupt in ["", "not json", "[1,2,3]", "{\"blocks\": 5}"] {
            let doc = BlockDocument::parse_or_placeholder(corrupt);
            assert_eq!(doc.blocks.len(), 1, "{corrupt:?}");
            assert_eq!(doc.blocks[0].kind, PARAGRAPH);
            assert_eq!(doc.blocks[0].text(), Some(""));
        }
    }

    #[test]
    fn placeholder_counts_as_empty() {
        assert!(BlockDocument::placeholder().is_empty());
        let mut doc = BlockDocument::placeholder();
        doc.blocks.push(Block::header("Ionic bonds", 2));
        assert!(!doc.is_empty());
    }

    #[test]
    fn constructors_produce_the_expected_payloads() {
        let block = Block::image("/uploads/orbital.png", "s-orbital");
        assert_eq!(block.kind, IMAGE);
        assert_eq!(block.data["url"], "/uploads/orbital.png");

        let list = Block::unordered_list(["H", "He"]);
        assert_eq!(list.data["items"][1], "He");
    }
}
