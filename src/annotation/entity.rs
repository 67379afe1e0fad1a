//! Entity: a named entity matched in the text

use super::{
    decode_record, join_positions, write_prefix, AnnotationId, AnnotationKind, EntityIdx,
    Position,
};
use crate::link::{LinkKey, WordLink};
use crate::response::{handles, EntityRef, GraphBuilder, ResponseResult, WordRef};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Requires the "entities" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "id")]
    document_id: Option<AnnotationId>,
    entity_id: Option<String>,
    entity_english_id: Option<String>,
    freebase_id: Option<String>,
    wiki_link: Option<String>,
    matched_text: Option<String>,
    starting_pos: Option<u64>,
    ending_pos: Option<u64>,
    #[serde(deserialize_with = "super::null_default")]
    matching_tokens: Vec<Position>,
    #[serde(deserialize_with = "super::null_default")]
    freebase_types: Vec<String>,
    relevance_score: Option<f64>,
    confidence_score: Option<f64>,
    #[serde(rename = "type", deserialize_with = "super::null_default")]
    dbpedia_types: Vec<String>,
    #[serde(deserialize_with = "super::null_default")]
    data: Map<String, Value>,
}

impl Entity {
    /// Identifier of this mention within the response; what other
    /// annotations link to
    pub fn document_id(&self) -> Option<AnnotationId> {
        self.document_id
    }

    /// Disambiguated id from the document language's Wikipedia, if any
    pub fn id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn localized_id(&self) -> Option<&str> {
        self.id()
    }

    /// Disambiguated id in the English Wikipedia, if a language link exists
    pub fn english_id(&self) -> Option<&str> {
        self.entity_english_id.as_deref()
    }

    pub fn freebase_id(&self) -> Option<&str> {
        self.freebase_id.as_deref()
    }

    pub fn wikipedia_link(&self) -> Option<&str> {
        self.wiki_link.as_deref()
    }

    /// Source text that matched this entity
    pub fn matched_text(&self) -> Option<&str> {
        self.matched_text.as_deref()
    }

    pub fn starting_position(&self) -> Option<u64> {
        self.starting_pos
    }

    pub fn ending_position(&self) -> Option<u64> {
        self.ending_pos
    }

    /// Positions of the words making up this entity
    pub fn matched_positions(&self) -> &[Position] {
        &self.matching_tokens
    }

    pub fn freebase_types(&self) -> &[String] {
        &self.freebase_types
    }

    /// Relevance to the source text, 0 to 1
    pub fn relevance_score(&self) -> Option<f64> {
        self.relevance_score
    }

    /// Confidence this is a valid entity, 0.5 to 10
    pub fn confidence_score(&self) -> Option<f64> {
        self.confidence_score
    }

    pub fn dbpedia_types(&self) -> &[String] {
        &self.dbpedia_types
    }

    /// Enrichment data returned for this entity
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, "Entity", self.entity_id.as_deref())?;
        write!(f, "at positions {}", join_positions(&self.matching_tokens))
    }
}

impl<'g> EntityRef<'g> {
    /// Words making up this entity
    pub fn matched_words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.entity_words.get(&self.idx()))
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<EntityIdx> {
    let entity: Entity = decode_record(json, AnnotationKind::Entity, index)?;
    let idx = EntityIdx(builder.records.entities.len());
    let key = entity.document_id.map(LinkKey::Entity);
    let positions = entity.matching_tokens.clone();
    builder.records.entities.push(entity);

    builder.resolve(key, idx.into());
    builder.register_words(&positions, WordLink::Entity(idx));
    Ok(idx)
}
