//! Entailment: a word entailed by words of the source text

use super::{
    decode_record, join_positions, write_prefix, AnnotationId, AnnotationKind, EntailmentIdx,
    Position,
};
use crate::link::{LinkKey, WordLink};
use crate::response::{handles, EntailmentRef, GraphBuilder, ResponseResult, WordRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The entailed side of an entailment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntailedTree {
    pub word: Option<String>,
}

/// Requires the "entailments" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entailment {
    id: Option<AnnotationId>,
    #[serde(deserialize_with = "super::null_default")]
    word_positions: Vec<Position>,
    prior_score: Option<f64>,
    context_score: Option<f64>,
    score: Option<f64>,
    entailed_tree: Option<EntailedTree>,
}

impl Entailment {
    pub fn id(&self) -> Option<AnnotationId> {
        self.id
    }

    /// Positions of the words that generated this entailment
    pub fn matched_positions(&self) -> &[Position] {
        &self.word_positions
    }

    /// Score independent of the context the words appear in
    pub fn prior_score(&self) -> Option<f64> {
        self.prior_score
    }

    /// Agreement between the source words' usage here and the entailed
    /// word's usage in the knowledge base
    pub fn context_score(&self) -> Option<f64> {
        self.context_score
    }

    /// Overall confidence, combining prior and context score
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn entailed_word(&self) -> Option<&str> {
        self.entailed_tree.as_ref().and_then(|t| t.word.as_deref())
    }
}

impl fmt::Display for Entailment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, "Entailment", self.id)?;
        write!(
            f,
            ": '{}' at positions {}",
            self.entailed_word().unwrap_or_default(),
            join_positions(&self.word_positions)
        )
    }
}

impl<'g> EntailmentRef<'g> {
    /// Words that generated this entailment
    pub fn matched_words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.entailment_words.get(&self.idx()))
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<EntailmentIdx> {
    let entailment: Entailment = decode_record(json, AnnotationKind::Entailment, index)?;
    let idx = EntailmentIdx(builder.records.entailments.len());
    let key = entailment.id.map(LinkKey::Entailment);
    let positions = entailment.word_positions.clone();
    builder.records.entailments.push(entailment);

    builder.resolve(key, idx.into());
    builder.register_words(&positions, WordLink::Entailment(idx));
    Ok(idx)
}
