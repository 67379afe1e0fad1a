//! LinkTable: cross references between built annotations
//!
//! Records are immutable once decoded; every association between two
//! records is kept here instead, keyed by arena index on both sides.

use super::registry::{LinkAction, LinkSlot, WordLink};
use crate::annotation::{
    AnnotationRef, CustomAnnotationIdx, EntailmentIdx, EntityIdx, NounPhraseIdx, PropertyIdx,
    RelationIdx, RelationParamIdx, WordIdx,
};
use std::collections::HashMap;
use std::hash::Hash;

/// One-to-many association from `K` to an ordered list of `V`
#[derive(Debug)]
pub(crate) struct Adjacency<K, V> {
    map: HashMap<K, Vec<V>>,
}

impl<K, V> Default for Adjacency<K, V> {
    fn default() -> Self {
        Self { map: HashMap::new() }
    }
}

impl<K: Eq + Hash, V> Adjacency<K, V> {
    pub(crate) fn push(&mut self, key: K, value: V) {
        self.map.entry(key).or_default().push(value);
    }

    pub(crate) fn get(&self, key: &K) -> &[V] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Side table of every cross reference in one response graph
#[derive(Debug, Default)]
pub struct LinkTable {
    pub(crate) entity_words: Adjacency<EntityIdx, WordIdx>,
    pub(crate) entailment_words: Adjacency<EntailmentIdx, WordIdx>,
    pub(crate) relation_words: Adjacency<RelationIdx, WordIdx>,
    pub(crate) param_words: Adjacency<RelationParamIdx, WordIdx>,
    pub(crate) property_predicate_words: Adjacency<PropertyIdx, WordIdx>,
    pub(crate) property_property_words: Adjacency<PropertyIdx, WordIdx>,
    pub(crate) noun_phrase_words: Adjacency<NounPhraseIdx, WordIdx>,

    pub(crate) word_entities: Adjacency<WordIdx, EntityIdx>,
    pub(crate) word_entailments: Adjacency<WordIdx, EntailmentIdx>,
    pub(crate) word_relations: Adjacency<WordIdx, RelationIdx>,
    pub(crate) word_params: Adjacency<WordIdx, RelationParamIdx>,
    pub(crate) word_property_predicates: Adjacency<WordIdx, PropertyIdx>,
    pub(crate) word_property_properties: Adjacency<WordIdx, PropertyIdx>,
    pub(crate) word_noun_phrases: Adjacency<WordIdx, NounPhraseIdx>,

    pub(crate) parents: HashMap<WordIdx, WordIdx>,
    pub(crate) children: Adjacency<WordIdx, WordIdx>,

    /// Custom annotations attached to each target
    pub(crate) custom: Adjacency<AnnotationRef, CustomAnnotationIdx>,
    /// Resolved target of each custom-annotation link
    pub(crate) custom_links: HashMap<LinkSlot, AnnotationRef>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a drained request now that its target exists.
    ///
    /// Returns false when the target kind cannot satisfy the request; the
    /// registry keys words only by word keys, so that means a caller bug.
    pub(crate) fn apply(&mut self, action: LinkAction, target: AnnotationRef) -> bool {
        match (action, target) {
            (LinkAction::Word(link), AnnotationRef::Word(word)) => {
                self.attach_word(link, word);
                true
            }
            (LinkAction::Word(_), _) => false,
            (LinkAction::Custom(slot), target) => {
                self.custom_links.insert(slot, target);
                self.custom.push(target, slot.annotation);
                true
            }
        }
    }

    fn attach_word(&mut self, link: WordLink, word: WordIdx) {
        match link {
            WordLink::Entity(entity) => {
                self.entity_words.push(entity, word);
                self.word_entities.push(word, entity);
            }
            WordLink::Entailment(entailment) => {
                self.entailment_words.push(entailment, word);
                self.word_entailments.push(word, entailment);
            }
            WordLink::Relation(relation) => {
                self.relation_words.push(relation, word);
                self.word_relations.push(word, relation);
            }
            WordLink::RelationParam(param) => {
                self.param_words.push(param, word);
                self.word_params.push(word, param);
            }
            WordLink::PropertyPredicate(property) => {
                self.property_predicate_words.push(property, word);
                self.word_property_predicates.push(word, property);
            }
            WordLink::PropertyProperty(property) => {
                self.property_property_words.push(property, word);
                self.word_property_properties.push(word, property);
            }
            WordLink::NounPhrase(phrase) => {
                self.noun_phrase_words.push(phrase, word);
                self.word_noun_phrases.push(word, phrase);
            }
        }
    }

    /// Link `child` under `parent` in the dependency tree
    pub(crate) fn set_parent(&mut self, child: WordIdx, parent: WordIdx) {
        self.parents.insert(child, parent);
        self.children.push(parent, child);
    }
}
