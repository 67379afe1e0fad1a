//! NounPhrase: a multi-word phrase within a sentence

use super::{
    decode_record, join_positions, write_prefix, AnnotationId, AnnotationKind, NounPhraseIdx,
    Position,
};
use crate::link::{LinkKey, WordLink};
use crate::response::{handles, GraphBuilder, NounPhraseRef, ResponseResult, WordRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Requires the "relations" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NounPhrase {
    id: Option<AnnotationId>,
    #[serde(deserialize_with = "super::null_default")]
    word_positions: Vec<Position>,
}

impl NounPhrase {
    pub fn id(&self) -> Option<AnnotationId> {
        self.id
    }

    pub fn word_positions(&self) -> &[Position] {
        &self.word_positions
    }
}

impl fmt::Display for NounPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, "NounPhrase", self.id)?;
        write!(f, "at positions {}", join_positions(&self.word_positions))
    }
}

impl<'g> NounPhraseRef<'g> {
    /// Words making up this phrase
    pub fn words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.noun_phrase_words.get(&self.idx()))
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<NounPhraseIdx> {
    let phrase: NounPhrase = decode_record(json, AnnotationKind::NounPhrase, index)?;
    let idx = NounPhraseIdx(builder.records.noun_phrases.len());
    let key = phrase.id.map(LinkKey::NounPhrase);
    let positions = phrase.word_positions.clone();
    builder.records.noun_phrases.push(phrase);

    builder.resolve(key, idx.into());
    builder.register_words(&positions, WordLink::NounPhrase(idx));
    Ok(idx)
}
