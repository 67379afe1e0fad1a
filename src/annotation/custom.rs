//! CustomAnnotation: output of a user-supplied rule, linking arbitrary
//! annotations under named keys

use super::{decode_record, AnnotationId, AnnotationKind, AnnotationRef, CustomAnnotationIdx};
use crate::link::{LinkAction, LinkKey, LinkSlot};
use crate::response::{AnnotationHandle, CustomAnnotationRef, GraphBuilder, ResponseResult};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Reference from a custom annotation to another annotation, by kind name
/// and identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomLink {
    #[serde(deserialize_with = "super::null_default")]
    annotation_name: String,
    linked_id: Option<AnnotationId>,
}

impl CustomLink {
    pub fn annotation_name(&self) -> &str {
        &self.annotation_name
    }

    pub fn linked_id(&self) -> Option<AnnotationId> {
        self.linked_id
    }

    /// Registry key of the annotation this link points at
    pub fn key(&self) -> LinkKey {
        LinkKey::from_link(&self.annotation_name, self.linked_id)
    }
}

/// One keyed entry of a custom annotation's contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyValue {
    key: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    links: Vec<CustomLink>,
    #[serde(deserialize_with = "super::null_default")]
    int_value: Vec<i64>,
    #[serde(deserialize_with = "super::null_default")]
    float_value: Vec<f64>,
    #[serde(deserialize_with = "super::null_default")]
    string_value: Vec<String>,
    #[serde(deserialize_with = "super::null_default")]
    bytes_value: Vec<String>,
}

impl KeyValue {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn links(&self) -> &[CustomLink] {
        &self.links
    }
}

/// A value stored under a custom annotation attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// A link whose target was built
    Linked(AnnotationRef),
    /// A link whose target never appeared in the payload
    Unlinked(CustomLink),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomAnnotation {
    #[serde(deserialize_with = "super::null_default")]
    name: String,
    #[serde(deserialize_with = "super::null_default")]
    contents: Vec<KeyValue>,
    #[serde(skip)]
    attributes: DashMap<String, Vec<AttributeValue>>,
}

impl CustomAnnotation {
    /// Name of the rule that produced this annotation
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[KeyValue] {
        &self.contents
    }
}

impl fmt::Display for CustomAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomAnnotation with name '{}'", self.name)
    }
}

impl<'g> CustomAnnotationRef<'g> {
    /// Every value stored under `key`, in content order.
    ///
    /// Results are cached per key for the life of the graph.
    pub fn attribute(&self, key: &str) -> Vec<AttributeValue> {
        let record = self.record();
        if let Some(cached) = record.attributes.get(key) {
            return cached.value().clone();
        }
        let values = self.collect_attribute(key);
        record.attributes.insert(key.to_string(), values.clone());
        values
    }

    fn collect_attribute(&self, key: &str) -> Vec<AttributeValue> {
        let graph = self.graph();
        let mut values = Vec::new();
        for (content, entry) in self.record().contents.iter().enumerate() {
            if entry.key.as_deref() != Some(key) {
                continue;
            }
            for (link, custom_link) in entry.links.iter().enumerate() {
                let slot = LinkSlot { annotation: self.idx(), content, link };
                values.push(match graph.links.custom_links.get(&slot) {
                    Some(&target) => AttributeValue::Linked(target),
                    None => AttributeValue::Unlinked(custom_link.clone()),
                });
            }
            values.extend(entry.int_value.iter().map(|&v| AttributeValue::Int(v)));
            values.extend(entry.float_value.iter().map(|&v| AttributeValue::Float(v)));
            values.extend(entry.string_value.iter().cloned().map(AttributeValue::String));
            values.extend(entry.bytes_value.iter().cloned().map(AttributeValue::Bytes));
        }
        values
    }

    /// Every link of this annotation with its target, if it was built
    pub fn links(&self) -> Vec<(&'g CustomLink, Option<AnnotationHandle<'g>>)> {
        let graph = self.graph();
        let annotation = self.idx();
        self.record()
            .contents
            .iter()
            .enumerate()
            .flat_map(|(content, entry)| {
                entry.links.iter().enumerate().map(move |(link, custom_link)| {
                    let slot = LinkSlot { annotation, content, link };
                    let target = graph
                        .links
                        .custom_links
                        .get(&slot)
                        .map(|&target| graph.resolve(target));
                    (custom_link, target)
                })
            })
            .collect()
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<CustomAnnotationIdx> {
    let annotation: CustomAnnotation =
        decode_record(json, AnnotationKind::CustomAnnotation, index)?;
    let idx = CustomAnnotationIdx(builder.records.custom_annotations.len());

    for (content, entry) in annotation.contents.iter().enumerate() {
        for (link, custom_link) in entry.links.iter().enumerate() {
            let slot = LinkSlot { annotation: idx, content, link };
            builder.register(custom_link.key(), LinkAction::Custom(slot));
        }
    }
    builder.records.custom_annotations.push(annotation);
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeConfig;
    use crate::response::Response;
    use serde_json::json;

    fn payload() -> Value {
        json!({"ok": true, "response": {
            "customAnnotations": [{
                "name": "Pet",
                "contents": [
                    {"key": "animal", "links": [
                        {"annotationName": "entity", "linkedId": 0},
                        {"annotationName": "entity", "linkedId": 9}
                    ]},
                    {"key": "count", "intValue": [2], "floatValue": [0.5]},
                    {"key": "label", "stringValue": ["dog"], "bytesValue": ["ZG9n"]}
                ]
            }],
            "entities": [{"id": 0, "entityId": "Dog"}]
        }})
    }

    #[test]
    fn attribute_resolves_built_links_and_keeps_dangling_ones() {
        let response = Response::decode(&payload(), &DecodeConfig::default()).unwrap();
        let annotation = response.custom_annotations().next().unwrap();
        let entity = response.entities().next().unwrap();

        let values = annotation.attribute("animal");
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], AttributeValue::Linked(entity.annotation_ref()));
        match &values[1] {
            AttributeValue::Unlinked(link) => assert_eq!(link.linked_id(), Some(9)),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn attribute_collects_scalar_values_by_type() {
        let response = Response::decode(&payload(), &DecodeConfig::default()).unwrap();
        let annotation = response.custom_annotations().next().unwrap();

        assert_eq!(
            annotation.attribute("count"),
            vec![AttributeValue::Int(2), AttributeValue::Float(0.5)]
        );
        assert_eq!(
            annotation.attribute("label"),
            vec![
                AttributeValue::String("dog".to_string()),
                AttributeValue::Bytes("ZG9n".to_string())
            ]
        );
        assert!(annotation.attribute("missing").is_empty());
    }

    #[test]
    fn attribute_is_memoized() {
        let response = Response::decode(&payload(), &DecodeConfig::default()).unwrap();
        let annotation = response.custom_annotations().next().unwrap();

        let first = annotation.attribute("count");
        assert!(annotation.record().attributes.contains_key("count"));
        assert_eq!(annotation.attribute("count"), first);
    }


    #[test]
    fn null_contents_decode_to_defaults() {
        let annotation: CustomAnnotation = serde_json::from_value(json!({
            "name": null,
            "contents": [{
                "key": "k",
                "links": [{"annotationName": null, "linkedId": 3}],
                "intValue": null,
                "floatValue": null,
                "stringValue": null,
                "bytesValue": null
            }]
        }))
        .unwrap();
        assert_eq!(annotation.name(), "");
        let entry = &annotation.contents()[0];
        assert_eq!(entry.key(), Some("k"));
        assert_eq!(entry.links()[0].annotation_name(), "");
        assert_eq!(entry.links()[0].linked_id(), Some(3));
        assert!(entry.int_value.is_empty());
        assert!(entry.bytes_value.is_empty());

        let empty: CustomAnnotation =
            serde_json::from_value(json!({"name": "R", "contents": null})).unwrap();
        assert!(empty.contents().is_empty());
    }

    #[test]
    fn target_sees_annotation_under_rule_name() {
        let response = Response::decode(&payload(), &DecodeConfig::default()).unwrap();
        let entity = response.entities().next().unwrap();

        let attached = entity.custom_annotations("Pet");
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].name(), "Pet");
        assert!(entity.custom_annotations("Other").is_empty());
    }

    #[test]
    fn links_pair_each_link_with_its_target() {
        let response = Response::decode(&payload(), &DecodeConfig::default()).unwrap();
        let annotation = response.custom_annotations().next().unwrap();

        let links = annotation.links();
        assert_eq!(links.len(), 2);
        assert!(matches!(links[0].1, Some(AnnotationHandle::Entity(_))));
        assert!(links[1].1.is_none());
        assert_eq!(response.unresolved_links().len(), 1);
    }
}
