//! Sentences and their dependency trees
//!
//! The dependency tree is linked positionally inside one sentence once all
//! of its words exist; it does not go through the link registry.

use super::builder::GraphBuilder;
use super::handle::{handles, SentenceRef, WordRef};
use super::ResponseResult;
use crate::annotation::{self, Position, SentenceIdx, Word, WordIdx};
use crate::config::DecodeConfig;
use crate::link::LinkTable;
use serde_json::Value;
use std::collections::HashMap;

/// A sentence: its words in order and the root of its dependency tree
#[derive(Debug, Clone, Default)]
pub struct Sentence {
    pub(crate) words: Vec<WordIdx>,
    pub(crate) root: Option<WordIdx>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'g> SentenceRef<'g> {
    pub fn words(&self) -> impl Iterator<Item = WordRef<'g>> + 'g {
        handles(self.graph(), &self.record().words)
    }

    /// Root of the dependency tree, if the "dependency-trees" extractor ran
    /// and a non-punctuation parentless word exists
    pub fn root_word(&self) -> Option<WordRef<'g>> {
        self.record().root.map(|idx| WordRef::new(self.graph(), idx))
    }
}

pub(crate) fn build(
    builder: &mut GraphBuilder<'_>,
    json: &Value,
    _index: usize,
) -> ResponseResult<SentenceIdx> {
    let words = builder.build_each(json, "words", annotation::build_word)?;
    let root = link_dependency_tree(
        &words,
        &builder.records.words,
        &mut builder.links,
        builder.config,
    );

    let idx = SentenceIdx(builder.records.sentences.len());
    builder.records.sentences.push(Sentence { words, root });
    Ok(idx)
}

/// Link each word to its parent and pick the sentence root.
///
/// A word with no (or a negative) parent position is a root candidate
/// unless its part of speech is punctuation; the last candidate wins.
/// A parent position with no word in this sentence leaves the word
/// parentless.
pub(crate) fn link_dependency_tree(
    words: &[WordIdx],
    records: &[Word],
    links: &mut LinkTable,
    config: &DecodeConfig,
) -> Option<WordIdx> {
    let by_position: HashMap<Position, WordIdx> = words
        .iter()
        .filter_map(|&idx| records[idx.0].position().map(|position| (position, idx)))
        .collect();

    let mut root = None;
    for &idx in words {
        let word = &records[idx.0];
        match word.parent_position().filter(|p| *p >= 0) {
            Some(parent_position) => {
                let parent = Position::try_from(parent_position)
                    .ok()
                    .and_then(|p| by_position.get(&p));
                match parent {
                    Some(&parent) => links.set_parent(idx, parent),
                    None => tracing::debug!(
                        position = ?word.position(),
                        parent_position,
                        "parent word not in sentence"
                    ),
                }
            }
            None => {
                let punctuation = word
                    .part_of_speech()
                    .map(|tag| config.is_punctuation(tag))
                    .unwrap_or(false);
                if !punctuation {
                    root = Some(idx);
                }
            }
        }
    }
    root
}
