//! LinkRegistry: pending link requests keyed by their target's identity

use super::key::LinkKey;
use crate::annotation::{
    CustomAnnotationIdx, EntailmentIdx, EntityIdx, NounPhraseIdx, PropertyIdx, RelationIdx,
    RelationParamIdx,
};
use serde::Serialize;
use std::collections::HashMap;

/// A word link requested by an annotation that spans word positions.
///
/// The variant names the requester's collection the word joins, and the
/// word's back-reference collection the requester joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "link", content = "from", rename_all = "snake_case")]
pub enum WordLink {
    Entity(EntityIdx),
    Entailment(EntailmentIdx),
    Relation(RelationIdx),
    RelationParam(RelationParamIdx),
    /// Word is part of the property's predicate (focus)
    PropertyPredicate(PropertyIdx),
    /// Word is part of the property's modifier
    PropertyProperty(PropertyIdx),
    NounPhrase(NounPhraseIdx),
}

/// One link of one custom annotation: `contents[content].links[link]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LinkSlot {
    pub annotation: CustomAnnotationIdx,
    pub content: usize,
    pub link: usize,
}

/// Deferred work stored under a target's key until the target is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkAction {
    Word(WordLink),
    Custom(LinkSlot),
}

/// A request whose target was never built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedLink {
    pub key: LinkKey,
    pub action: LinkAction,
}

/// Ordered queues of pending link requests, one per target key.
///
/// Scoped to a single response decode. Draining removes a key's queue, so
/// every request fires at most once no matter how often the key is drained.
#[derive(Debug, Default)]
pub struct LinkRegistry {
    queues: HashMap<LinkKey, Vec<(u64, LinkAction)>>,
    next_seq: u64,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request to the queue at `key`
    pub fn register(&mut self, key: LinkKey, action: LinkAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queues.entry(key).or_default().push((seq, action));
    }

    /// Remove and return every request queued at `key`, in insertion order
    pub fn drain(&mut self, key: &LinkKey) -> Vec<LinkAction> {
        self.queues
            .remove(key)
            .map(|queue| queue.into_iter().map(|(_, action)| action).collect())
            .unwrap_or_default()
    }

    /// Number of requests still waiting for their target
    pub fn pending_count(&self) -> usize {
        self.queues.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Every request that was never drained, in registration order
    pub fn into_unresolved(self) -> Vec<UnresolvedLink> {
        let mut pending: Vec<(u64, UnresolvedLink)> = self
            .queues
            .into_iter()
            .flat_map(|(key, queue)| {
                queue.into_iter().map(move |(seq, action)| {
                    (seq, UnresolvedLink { key: key.clone(), action })
                })
            })
            .collect();
        pending.sort_by_key(|(seq, _)| *seq);
        pending.into_iter().map(|(_, link)| link).collect()
    }
}
