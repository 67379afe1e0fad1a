//! Property: an "is-a" or "has-a" relation between a focus and its modifier

use super::{
    decode_record, join_positions, write_prefix, AnnotationId, AnnotationKind, Position,
    PropertyIdx,
};
use crate::link::{LinkKey, WordLink};
use crate::response::{handles, GraphBuilder, PropertyRef, ResponseResult, WordRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Requires the "relations" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Property {
    id: Option<AnnotationId>,
    #[serde(rename = "wordPositions", deserialize_with = "super::null_default")]
    predicate_positions: Vec<Position>,
    #[serde(deserialize_with = "super::null_default")]
    property_positions: Vec<Position>,
}

impl Property {
    pub fn id(&self) -> Option<AnnotationId> {
        self.id
    }

    /// Positions of the words in the predicate (focus)
    pub fn predicate_positions(&self) -> &[Position] {
        &self.predicate_positions
    }

    /// Positions of the words modifying the predicate
    pub fn property_positions(&self) -> &[Position] {
        &self.property_positions
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, "Property", self.id)?;
        write!(f, "at positions {}", join_positions(&self.predicate_positions))
    }
}

impl<'g> PropertyRef<'g> {
    pub fn predicate_words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.property_predicate_words.get(&self.idx()))
    }

    pub fn property_words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.property_property_words.get(&self.idx()))
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<PropertyIdx> {
    let property: Property = decode_record(json, AnnotationKind::Property, index)?;
    let idx = PropertyIdx(builder.records.properties.len());
    let key = property.id.map(LinkKey::Property);
    let predicates = property.predicate_positions.clone();
    let modifiers = property.property_positions.clone();
    builder.records.properties.push(property);

    builder.resolve(key, idx.into());
    builder.register_words(&predicates, WordLink::PropertyPredicate(idx));
    builder.register_words(&modifiers, WordLink::PropertyProperty(idx));
    Ok(idx)
}
