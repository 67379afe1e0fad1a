//! GraphBuilder: the single decode pass over one response payload
//!
//! Annotation kinds are built in a fixed order so that every reference
//! between annotations resolves forward in time, except references to
//! words, which resolve when the sentences are built last.

use super::sentence::{self, Sentence};
use super::ResponseResult;
use crate::annotation::{
    self, AnnotationRef, CustomAnnotation, Entailment, Entity, NounPhrase, Position, Property,
    Relation, RelationParam, Topic, TopicIdx, Word,
};
use crate::config::DecodeConfig;
use crate::link::{LinkAction, LinkKey, LinkRegistry, LinkTable, WordLink};
use serde_json::Value;
use std::collections::HashSet;

/// Record arenas, one per kind, in decode order
#[derive(Debug, Default)]
pub(crate) struct Records {
    pub(crate) custom_annotations: Vec<CustomAnnotation>,
    /// Regular and coarse topics share one arena
    pub(crate) topics: Vec<Topic>,
    pub(crate) entities: Vec<Entity>,
    pub(crate) entailments: Vec<Entailment>,
    pub(crate) relations: Vec<Relation>,
    pub(crate) relation_params: Vec<RelationParam>,
    pub(crate) properties: Vec<Property>,
    pub(crate) noun_phrases: Vec<NounPhrase>,
    pub(crate) words: Vec<Word>,
    pub(crate) sentences: Vec<Sentence>,
}

/// Output of the decode pass before it is frozen into a `Response`
#[derive(Debug)]
pub(crate) struct Built {
    pub(crate) records: Records,
    pub(crate) links: LinkTable,
    pub(crate) registry: LinkRegistry,
    pub(crate) topics: Vec<TopicIdx>,
    pub(crate) coarse_topics: Vec<TopicIdx>,
}

/// Mutable state shared by every annotation constructor during one decode
pub(crate) struct GraphBuilder<'c> {
    pub(crate) config: &'c DecodeConfig,
    pub(crate) records: Records,
    pub(crate) registry: LinkRegistry,
    pub(crate) links: LinkTable,
}

impl<'c> GraphBuilder<'c> {
    pub(crate) fn new(config: &'c DecodeConfig) -> Self {
        Self {
            config,
            records: Records::default(),
            registry: LinkRegistry::new(),
            links: LinkTable::new(),
        }
    }

    /// Self-resolution: fire every request queued at `key` against `target`.
    ///
    /// Records without an identifier have no key and resolve nothing.
    pub(crate) fn resolve(&mut self, key: Option<LinkKey>, target: AnnotationRef) {
        let Some(key) = key else {
            return;
        };
        let actions = self.registry.drain(&key);
        if actions.is_empty() {
            return;
        }
        tracing::trace!(key = %key, count = actions.len(), "resolving pending links");
        for action in actions {
            if !self.links.apply(action, target) {
                tracing::warn!(key = %key, action = ?action, "link request does not fit its target");
            }
        }
    }

    /// Forward registration of a word link at each distinct position
    pub(crate) fn register_words(&mut self, positions: &[Position], link: WordLink) {
        let mut seen = HashSet::new();
        for &position in positions {
            if seen.insert(position) {
                self.registry
                    .register(LinkKey::Word(position), LinkAction::Word(link));
            }
        }
    }

    pub(crate) fn register(&mut self, key: LinkKey, action: LinkAction) {
        self.registry.register(key, action);
    }

    /// Build every element of the array at `json[field]`, in array order.
    ///
    /// A missing field, or one that is not an array, builds nothing.
    pub(crate) fn build_each<T>(
        &mut self,
        json: &Value,
        field: &str,
        mut build: impl FnMut(&mut Self, &Value, usize) -> ResponseResult<T>,
    ) -> ResponseResult<Vec<T>> {
        let items = json
            .get(field)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| build(self, item, index))
            .collect()
    }

    /// Decode every annotation array of a `response` body
    pub(crate) fn build_body(mut self, body: &Value) -> ResponseResult<Built> {
        self.build_each(body, "customAnnotations", annotation::build_custom_annotation)?;
        let topics = self.build_each(body, "topics", annotation::build_topic)?;
        let coarse_topics = self.build_each(body, "coarseTopics", annotation::build_topic)?;
        self.build_each(body, "entities", annotation::build_entity)?;
        self.build_each(body, "entailments", annotation::build_entailment)?;
        self.build_each(body, "relations", annotation::build_relation)?;
        self.build_each(body, "properties", annotation::build_property)?;
        self.build_each(body, "nounPhrases", annotation::build_noun_phrase)?;
        self.build_each(body, "sentences", sentence::build)?;

        Ok(Built {
            records: self.records,
            links: self.links,
            registry: self.registry,
            topics,
            coarse_topics,
        })
    }

    /// A graph with no annotations, for payloads without a `response` body
    pub(crate) fn empty(self) -> Built {
        Built {
            records: self.records,
            links: self.links,
            registry: self.registry,
            topics: Vec::new(),
            coarse_topics: Vec::new(),
        }
    }
}
