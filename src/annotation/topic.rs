//! Topic: an abstract topic of the document (regular or coarse)

use super::{decode_record, write_prefix, AnnotationId, AnnotationKind, TopicIdx};
use crate::link::LinkKey;
use crate::response::{GraphBuilder, ResponseResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Requires the "topics" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Topic {
    id: Option<AnnotationId>,
    #[serde(deserialize_with = "super::null_default")]
    label: String,
    wiki_link: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    score: f64,
}

impl Topic {
    pub fn id(&self) -> Option<AnnotationId> {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wikipedia page for this topic, if one could be linked
    pub fn wikipedia_link(&self) -> Option<&str> {
        self.wiki_link.as_deref()
    }

    /// Relevance of this topic to the document
    pub fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, "Topic", self.id)?;
        write!(f, "with label '{}'", self.label)
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<TopicIdx> {
    let topic: Topic = decode_record(json, AnnotationKind::Topic, index)?;
    let idx = TopicIdx(builder.records.topics.len());
    let key = topic.id.map(LinkKey::Topic);
    builder.records.topics.push(topic);
    builder.resolve(key, idx.into());
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_use_defaults() {
        let topic: Topic = serde_json::from_value(json!({"id": 4})).unwrap();
        assert_eq!(topic.id(), Some(4));
        assert_eq!(topic.label(), "");
        assert_eq!(topic.score(), 0.0);
        assert_eq!(topic.wikipedia_link(), None);
    }


    #[test]
    fn null_fields_use_defaults() {
        let topic: Topic =
            serde_json::from_value(json!({"id": 0, "label": null, "score": null})).unwrap();
        assert_eq!(topic.id(), Some(0));
        assert_eq!(topic.label(), "");
        assert_eq!(topic.score(), 0.0);
    }

    #[test]
    fn display_names_label() {
        let topic: Topic =
            serde_json::from_value(json!({"id": 1, "label": "Dogs", "wikiLink": "w"})).unwrap();
        assert_eq!(topic.to_string(), "Topic @id=1 with label 'Dogs'");
        assert_eq!(topic.wikipedia_link(), Some("w"));
    }
}
