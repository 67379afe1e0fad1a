//! Handles: borrowed views of one record inside a finished response graph

use super::sentence::Sentence;
use super::Response;
use crate::annotation::{
    AnnotationRef, CustomAnnotation, CustomAnnotationIdx, Entailment, EntailmentIdx, Entity,
    EntityIdx, NounPhrase, NounPhraseIdx, Property, PropertyIdx, Relation, RelationIdx,
    RelationParam, RelationParamIdx, SentenceIdx, Topic, TopicIdx, Word, WordIdx,
};
use std::fmt;
use std::ops::Deref;

/// An index into one of the response's record arenas
pub trait ArenaIndex: Copy + Eq + fmt::Debug {
    type Record;

    /// The record at this index. Indices are only valid for the graph that
    /// produced them.
    fn record(self, graph: &Response) -> &Self::Record;
}

macro_rules! arena {
    ($idx:ty, $record:ty, $field:ident) => {
        impl ArenaIndex for $idx {
            type Record = $record;

            fn record(self, graph: &Response) -> &$record {
                &graph.records.$field[self.0]
            }
        }
    };
}

arena!(CustomAnnotationIdx, CustomAnnotation, custom_annotations);
arena!(TopicIdx, Topic, topics);
arena!(EntityIdx, Entity, entities);
arena!(EntailmentIdx, Entailment, entailments);
arena!(RelationIdx, Relation, relations);
arena!(RelationParamIdx, RelationParam, relation_params);
arena!(PropertyIdx, Property, properties);
arena!(NounPhraseIdx, NounPhrase, noun_phrases);
arena!(WordIdx, Word, words);
arena!(SentenceIdx, Sentence, sentences);

/// A record together with the graph it belongs to.
///
/// Derefs to the decoded record; navigation methods follow the graph's
/// cross references.
pub struct Handle<'g, I> {
    graph: &'g Response,
    idx: I,
}

pub type CustomAnnotationRef<'g> = Handle<'g, CustomAnnotationIdx>;
pub type TopicRef<'g> = Handle<'g, TopicIdx>;
pub type EntityRef<'g> = Handle<'g, EntityIdx>;
pub type EntailmentRef<'g> = Handle<'g, EntailmentIdx>;
pub type RelationRef<'g> = Handle<'g, RelationIdx>;
pub type RelationParamRef<'g> = Handle<'g, RelationParamIdx>;
pub type PropertyRef<'g> = Handle<'g, PropertyIdx>;
pub type NounPhraseRef<'g> = Handle<'g, NounPhraseIdx>;
pub type WordRef<'g> = Handle<'g, WordIdx>;
pub type SentenceRef<'g> = Handle<'g, SentenceIdx>;

impl<'g, I: ArenaIndex> Handle<'g, I> {
    pub(crate) fn new(graph: &'g Response, idx: I) -> Self {
        Self { graph, idx }
    }

    pub fn idx(&self) -> I {
        self.idx
    }

    pub fn record(&self) -> &'g I::Record {
        self.idx.record(self.graph)
    }

    pub fn graph(&self) -> &'g Response {
        self.graph
    }
}

impl<'g, I: ArenaIndex + Into<AnnotationRef>> Handle<'g, I> {
    pub fn annotation_ref(&self) -> AnnotationRef {
        self.idx.into()
    }

    /// Custom annotations produced by `rule` that link to this annotation
    pub fn custom_annotations(&self, rule: &str) -> Vec<CustomAnnotationRef<'g>> {
        let graph = self.graph;
        handles(graph, graph.links.custom.get(&self.annotation_ref()))
            .filter(|annotation| annotation.name() == rule)
            .collect()
    }
}

/// Handles for every index in `ids`, in order
pub(crate) fn handles<'g, I: ArenaIndex>(
    graph: &'g Response,
    ids: &'g [I],
) -> impl Iterator<Item = Handle<'g, I>> + 'g {
    ids.iter().map(move |&idx| Handle::new(graph, idx))
}

impl<I: Copy> Clone for Handle<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Copy> Copy for Handle<'_, I> {}

impl<I: ArenaIndex> PartialEq for Handle<'_, I> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.idx == other.idx
    }
}

impl<I: ArenaIndex> Eq for Handle<'_, I> {}

impl<I: ArenaIndex> Deref for Handle<'_, I> {
    type Target = I::Record;

    fn deref(&self) -> &Self::Target {
        self.idx.record(self.graph)
    }
}

impl<I> fmt::Debug for Handle<'_, I>
where
    I: ArenaIndex,
    I::Record: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("idx", &self.idx)
            .field("record", self.record())
            .finish()
    }
}

impl<I> fmt::Display for Handle<'_, I>
where
    I: ArenaIndex,
    I::Record: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.record(), f)
    }
}

/// Any annotation a custom annotation link can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationHandle<'g> {
    Topic(TopicRef<'g>),
    Entity(EntityRef<'g>),
    Entailment(EntailmentRef<'g>),
    Relation(RelationRef<'g>),
    Property(PropertyRef<'g>),
    NounPhrase(NounPhraseRef<'g>),
    Word(WordRef<'g>),
}

impl<'g> AnnotationHandle<'g> {
    pub(crate) fn new(graph: &'g Response, target: AnnotationRef) -> Self {
        match target {
            AnnotationRef::Topic(idx) => AnnotationHandle::Topic(Handle::new(graph, idx)),
            AnnotationRef::Entity(idx) => AnnotationHandle::Entity(Handle::new(graph, idx)),
            AnnotationRef::Entailment(idx) => {
                AnnotationHandle::Entailment(Handle::new(graph, idx))
            }
            AnnotationRef::Relation(idx) => AnnotationHandle::Relation(Handle::new(graph, idx)),
            AnnotationRef::Property(idx) => AnnotationHandle::Property(Handle::new(graph, idx)),
            AnnotationRef::NounPhrase(idx) => {
                AnnotationHandle::NounPhrase(Handle::new(graph, idx))
            }
            AnnotationRef::Word(idx) => AnnotationHandle::Word(Handle::new(graph, idx)),
        }
    }
}

impl fmt::Display for AnnotationHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationHandle::Topic(h) => fmt::Display::fmt(h, f),
            AnnotationHandle::Entity(h) => fmt::Display::fmt(h, f),
            AnnotationHandle::Entailment(h) => fmt::Display::fmt(h, f),
            AnnotationHandle::Relation(h) => fmt::Display::fmt(h, f),
            AnnotationHandle::Property(h) => fmt::Display::fmt(h, f),
            AnnotationHandle::NounPhrase(h) => fmt::Display::fmt(h, f),
            AnnotationHandle::Word(h) => fmt::Display::fmt(h, f),
        }
    }
}
