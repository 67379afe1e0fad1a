//! Word: a single token, the most referenced annotation in a response

use super::{decode_record, AnnotationKind, Position, WordIdx};
use crate::link::LinkKey;
use crate::response::{
    handles, EntailmentRef, EntityRef, GraphBuilder, NounPhraseRef, PropertyRef,
    RelationParamRef, RelationRef, ResponseResult, WordRef,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Score of one WordNet sense for a word
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sense {
    #[serde(deserialize_with = "super::null_default")]
    pub synset: String,
    #[serde(deserialize_with = "super::null_default")]
    pub score: f64,
}

/// Requires the "words" extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Word {
    position: Option<Position>,
    parent_position: Option<i64>,
    relation_to_parent: Option<String>,
    token: Option<String>,
    stem: Option<String>,
    lemma: Option<String>,
    part_of_speech: Option<String>,
    #[serde(rename = "startingPos")]
    input_start_offset: Option<u64>,
    #[serde(rename = "endingPos")]
    input_end_offset: Option<u64>,
    #[serde(deserialize_with = "super::null_default")]
    senses: Vec<Sense>,
}

impl Word {
    /// Position of this word in the document
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Position of the grammatical parent; `None` (or negative) for the
    /// sentence root or when dependency trees were not requested
    pub fn parent_position(&self) -> Option<i64> {
        self.parent_position
    }

    /// Stanford dependency label between this word and its parent
    pub fn relation_to_parent(&self) -> Option<&str> {
        self.relation_to_parent.as_deref()
    }

    /// Raw token as it appeared in the source text
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn stem(&self) -> Option<&str> {
        self.stem.as_deref()
    }

    /// Morphological root of the word
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// Penn treebank part-of-speech tag
    pub fn part_of_speech(&self) -> Option<&str> {
        self.part_of_speech.as_deref()
    }

    /// Start offset in the input, counted in characters
    pub fn input_start_offset(&self) -> Option<u64> {
        self.input_start_offset
    }

    pub fn input_end_offset(&self) -> Option<u64> {
        self.input_end_offset
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word '{}'", self.token.as_deref().unwrap_or_default())?;
        if let Some(position) = self.position {
            write!(f, " at position {}", position)?;
        }
        Ok(())
    }
}

impl<'g> WordRef<'g> {
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_entities.get(&self.idx()))
    }

    pub fn entailments(&self) -> impl Iterator<Item = EntailmentRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_entailments.get(&self.idx()))
    }

    /// Relations this word is a predicate of
    pub fn relations(&self) -> impl Iterator<Item = RelationRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_relations.get(&self.idx()))
    }

    pub fn relation_params(&self) -> impl Iterator<Item = RelationParamRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_params.get(&self.idx()))
    }

    /// Properties this word is a predicate (focus) member of
    pub fn property_predicates(&self) -> impl Iterator<Item = PropertyRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_property_predicates.get(&self.idx()))
    }

    /// Properties this word is a modifier member of
    pub fn property_properties(&self) -> impl Iterator<Item = PropertyRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_property_properties.get(&self.idx()))
    }

    pub fn noun_phrases(&self) -> impl Iterator<Item = NounPhraseRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.word_noun_phrases.get(&self.idx()))
    }

    /// Grammatical parent in the dependency tree
    pub fn parent(&self) -> Option<WordRef<'g>> {
        let graph = self.graph();
        graph
            .links
            .parents
            .get(&self.idx())
            .map(|&parent| WordRef::new(graph, parent))
    }

    pub fn children(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        let graph = self.graph();
        handles(graph, graph.links.children.get(&self.idx()))
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    index: usize,
) -> ResponseResult<WordIdx> {
    let word: Word = decode_record(json, AnnotationKind::Word, index)?;
    let idx = WordIdx(builder.records.words.len());
    let key = word.position.map(LinkKey::Word);
    builder.records.words.push(word);
    builder.resolve(key, idx.into());
    Ok(idx)
}
