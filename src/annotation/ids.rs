//! Arena indices and cross-kind annotation references

use serde::Serialize;
use std::fmt;

/// Identifier carried in an annotation's `id` field.
pub type AnnotationId = i64;

/// Position of a word within the analyzed document.
pub type Position = u32;

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Position of the record in its arena (decode order)
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_index!(
    /// Index of a custom annotation in its response
    CustomAnnotationIdx
);
arena_index!(
    /// Index of a topic (regular or coarse) in its response
    TopicIdx
);
arena_index!(
    /// Index of an entity in its response
    EntityIdx
);
arena_index!(
    /// Index of an entailment in its response
    EntailmentIdx
);
arena_index!(
    /// Index of a relation in its response
    RelationIdx
);
arena_index!(
    /// Index of a relation param in its response
    RelationParamIdx
);
arena_index!(
    /// Index of a property in its response
    PropertyIdx
);
arena_index!(
    /// Index of a noun phrase in its response
    NounPhraseIdx
);
arena_index!(
    /// Index of a word in its response (across all sentences)
    WordIdx
);
arena_index!(
    /// Index of a sentence in its response
    SentenceIdx
);

/// The kinds of annotation a response can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationKind {
    CustomAnnotation,
    Topic,
    Entity,
    Entailment,
    Relation,
    RelationParam,
    Property,
    NounPhrase,
    Word,
}

impl AnnotationKind {
    /// Name used for this kind in payload link references
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::CustomAnnotation => "customAnnotation",
            AnnotationKind::Topic => "topic",
            AnnotationKind::Entity => "entity",
            AnnotationKind::Entailment => "entailment",
            AnnotationKind::Relation => "relation",
            AnnotationKind::RelationParam => "relationParam",
            AnnotationKind::Property => "property",
            AnnotationKind::NounPhrase => "nounPhrase",
            AnnotationKind::Word => "word",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to any annotation a custom annotation can link to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "camelCase")]
pub enum AnnotationRef {
    Topic(TopicIdx),
    Entity(EntityIdx),
    Entailment(EntailmentIdx),
    Relation(RelationIdx),
    Property(PropertyIdx),
    NounPhrase(NounPhraseIdx),
    Word(WordIdx),
}

impl AnnotationRef {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            AnnotationRef::Topic(_) => AnnotationKind::Topic,
            AnnotationRef::Entity(_) => AnnotationKind::Entity,
            AnnotationRef::Entailment(_) => AnnotationKind::Entailment,
            AnnotationRef::Relation(_) => AnnotationKind::Relation,
            AnnotationRef::Property(_) => AnnotationKind::Property,
            AnnotationRef::NounPhrase(_) => AnnotationKind::NounPhrase,
            AnnotationRef::Word(_) => AnnotationKind::Word,
        }
    }
}

impl From<TopicIdx> for AnnotationRef {
    fn from(idx: TopicIdx) -> Self {
        AnnotationRef::Topic(idx)
    }
}

impl From<EntityIdx> for AnnotationRef {
    fn from(idx: EntityIdx) -> Self {
        AnnotationRef::Entity(idx)
    }
}

impl From<EntailmentIdx> for AnnotationRef {
    fn from(idx: EntailmentIdx) -> Self {
        AnnotationRef::Entailment(idx)
    }
}

impl From<RelationIdx> for AnnotationRef {
    fn from(idx: RelationIdx) -> Self {
        AnnotationRef::Relation(idx)
    }
}

impl From<PropertyIdx> for AnnotationRef {
    fn from(idx: PropertyIdx) -> Self {
        AnnotationRef::Property(idx)
    }
}

impl From<NounPhraseIdx> for AnnotationRef {
    fn from(idx: NounPhraseIdx) -> Self {
        AnnotationRef::NounPhrase(idx)
    }
}

impl From<WordIdx> for AnnotationRef {
    fn from(idx: WordIdx) -> Self {
        AnnotationRef::Word(idx)
    }
}

/// Joins positions as `0, 1, 2` for display output
pub(crate) fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes the `Kind @id=N ` prefix shared by every record's display form
pub(crate) fn write_prefix(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    id: Option<impl fmt::Display>,
) -> fmt::Result {
    match id {
        Some(id) => write!(f, "{} @id={} ", kind, id),
        None => write!(f, "{} ", kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_ref_reports_kind() {
        assert_eq!(AnnotationRef::from(WordIdx(3)).kind(), AnnotationKind::Word);
        assert_eq!(AnnotationRef::from(EntityIdx(0)).kind(), AnnotationKind::Entity);
    }

    #[test]
    fn annotation_ref_serializes_tagged() {
        let json = serde_json::to_value(AnnotationRef::Word(WordIdx(2))).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "word", "index": 2}));
    }

    #[test]
    fn positions_join_with_commas() {
        assert_eq!(join_positions(&[0, 4, 7]), "0, 4, 7");
        assert_eq!(join_positions(&[]), "");
    }
}
