//! Registry keys: the identity an annotation is addressed by

use crate::annotation::{AnnotationId, AnnotationKind, Position};
use serde::Serialize;
use std::fmt;

/// `(kind, identifier)` pair addressing one annotation in the registry.
///
/// Never persisted; a key only lives for the decode of one response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum LinkKey {
    Topic(AnnotationId),
    Entity(AnnotationId),
    Entailment(AnnotationId),
    Relation(AnnotationId),
    Property(AnnotationId),
    NounPhrase(AnnotationId),
    Word(Position),
    /// A custom-annotation link whose target name is not a built-in kind.
    /// Nothing is ever built under such a key.
    Rule {
        name: String,
        id: Option<AnnotationId>,
    },
}

impl LinkKey {
    /// Key for a custom-annotation link given as `annotationName` / `linkedId`
    pub fn from_link(annotation_name: &str, linked_id: Option<AnnotationId>) -> Self {
        let key = linked_id.and_then(|id| match annotation_name {
            "topic" => Some(LinkKey::Topic(id)),
            "entity" => Some(LinkKey::Entity(id)),
            "entailment" => Some(LinkKey::Entailment(id)),
            "relation" => Some(LinkKey::Relation(id)),
            "property" => Some(LinkKey::Property(id)),
            "nounPhrase" => Some(LinkKey::NounPhrase(id)),
            "word" => Position::try_from(id).ok().map(LinkKey::Word),
            _ => None,
        });
        key.unwrap_or_else(|| LinkKey::Rule {
            name: annotation_name.to_string(),
            id: linked_id,
        })
    }

    /// Kind addressed by this key, `None` for rule keys
    pub fn kind(&self) -> Option<AnnotationKind> {
        match self {
            LinkKey::Topic(_) => Some(AnnotationKind::Topic),
            LinkKey::Entity(_) => Some(AnnotationKind::Entity),
            LinkKey::Entailment(_) => Some(AnnotationKind::Entailment),
            LinkKey::Relation(_) => Some(AnnotationKind::Relation),
            LinkKey::Property(_) => Some(AnnotationKind::Property),
            LinkKey::NounPhrase(_) => Some(AnnotationKind::NounPhrase),
            LinkKey::Word(_) => Some(AnnotationKind::Word),
            LinkKey::Rule { .. } => None,
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKey::Topic(id)
            | LinkKey::Entity(id)
            | LinkKey::Entailment(id)
            | LinkKey::Relation(id)
            | LinkKey::Property(id)
            | LinkKey::NounPhrase(id) => {
                // kind() is always Some for these variants
                let kind = self.kind().map(|k| k.as_str()).unwrap_or_default();
                write!(f, "({}, {})", kind, id)
            }
            LinkKey::Word(position) => write!(f, "(word, {})", position),
            LinkKey::Rule { name, id: Some(id) } => write!(f, "({}, {})", name, id),
            LinkKey::Rule { name, id: None } => write!(f, "({}, -)", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_map_to_kind_keys() {
        assert_eq!(LinkKey::from_link("entity", Some(5)), LinkKey::Entity(5));
        assert_eq!(LinkKey::from_link("nounPhrase", Some(2)), LinkKey::NounPhrase(2));
        assert_eq!(LinkKey::from_link("word", Some(7)), LinkKey::Word(7));
    }

    #[test]
    fn unknown_names_become_rule_keys() {
        assert_eq!(
            LinkKey::from_link("myRule", Some(1)),
            LinkKey::Rule { name: "myRule".to_string(), id: Some(1) }
        );
        assert_eq!(LinkKey::from_link("myRule", Some(1)).kind(), None);
    }

    #[test]
    fn negative_word_position_never_matches_a_word() {
        assert!(matches!(LinkKey::from_link("word", Some(-1)), LinkKey::Rule { .. }));
    }

    #[test]
    fn missing_linked_id_becomes_rule_key() {
        assert_eq!(
            LinkKey::from_link("entity", None),
            LinkKey::Rule { name: "entity".to_string(), id: None }
        );
    }

    #[test]
    fn display_shows_kind_and_id() {
        assert_eq!(LinkKey::Entity(5).to_string(), "(entity, 5)");
        assert_eq!(LinkKey::Word(0).to_string(), "(word, 0)");
    }
}
