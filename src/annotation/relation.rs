//! Relation: a grammatical relation between words, owning its params

use super::{
    decode_record, join_positions, write_prefix, AnnotationId, AnnotationKind, EntityIdx,
    Position, RelationIdx, RelationParamIdx,
};
use crate::link::{LinkKey, WordLink};
use crate::response::{
    handles, EntityRef, GraphBuilder, RelationParamRef, RelationRef, ResponseResult, WordRef,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Requires the "relations" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relation {
    id: Option<AnnotationId>,
    #[serde(rename = "wordPositions", deserialize_with = "super::null_default")]
    predicate_positions: Vec<Position>,
    /// Built from the nested `params` array, not decoded directly
    #[serde(skip)]
    pub(crate) params: Vec<RelationParamIdx>,
}

impl Relation {
    pub fn id(&self) -> Option<AnnotationId> {
        self.id
    }

    /// Positions of the predicate words within their sentence
    pub fn predicate_positions(&self) -> &[Position] {
        &self.predicate_positions
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, "Relation", self.id)?;
        write!(f, "at positions {}", join_positions(&self.predicate_positions))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ParamFields {
    relation: Option<String>,
    #[serde(deserialize_with = "super::null_default")]
    word_positions: Vec<Position>,
}

/// One argument of a relation, typically its SUBJECT or OBJECT
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationParam {
    relation_parent: RelationIdx,
    relation: Option<String>,
    param_positions: Vec<Position>,
}

impl RelationParam {
    /// Role of this param towards the predicate: SUBJECT, OBJECT or OTHER
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn param_positions(&self) -> &[Position] {
        &self.param_positions
    }
}

impl fmt::Display for RelationParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RelationParam: '{}' at positions {}",
            self.relation.as_deref().unwrap_or_default(),
            join_positions(&self.param_positions)
        )
    }
}

impl<'g> RelationRef<'g> {
    pub fn params(&self) -> impl Iterator<Item = RelationParamRef<'g>> + 'g {
        handles(self.graph(), &self.record().params)
    }

    pub fn predicate_words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.relation_words.get(&self.idx()))
    }
}

impl<'g> RelationParamRef<'g> {
    /// The relation owning this param
    pub fn relation_parent(&self) -> RelationRef<'g> {
        RelationRef::new(self.graph(), self.record().relation_parent)
    }

    pub fn param_words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.param_words.get(&self.idx()))
    }

    /// Distinct entities mentioned by this param's words, first mention first
    pub fn entities(&self) -> Vec<EntityRef<'g>> {
        let mut seen: HashSet<EntityIdx> = HashSet::new();
        self.param_words()
            .flat_map(|word| word.entities())
            .filter(|entity| seen.insert(entity.idx()))
            .collect()
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<RelationIdx> {
    let mut relation: Relation = decode_record(json, AnnotationKind::Relation, index)?;
    let idx = RelationIdx(builder.records.relations.len());

    let params = json
        .get("params")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for (param_index, param_json) in params.iter().enumerate() {
        relation.params.push(build_param(builder, param_json, param_index, idx)?);
    }

    let key = relation.id.map(LinkKey::Relation);
    let positions = relation.predicate_positions.clone();
    builder.records.relations.push(relation);

    builder.resolve(key, idx.into());
    builder.register_words(&positions, WordLink::Relation(idx));
    Ok(idx)
}

fn build_param(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
    relation_parent: RelationIdx,
) -> ResponseResult<RelationParamIdx> {
    let fields: ParamFields = decode_record(json, AnnotationKind::RelationParam, index)?;
    let idx = RelationParamIdx(builder.records.relation_params.len());
    builder.register_words(&fields.word_positions, WordLink::RelationParam(idx));
    builder.records.relation_params.push(RelationParam {
        relation_parent,
        relation: fields.relation,
        param_positions: fields.word_positions,
    });
    Ok(idx)
}
