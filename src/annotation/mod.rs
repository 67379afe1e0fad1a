//! Annotation records decoded from a response payload
//!
//! Every record keeps only the fields it was decoded from. Fields absent
//! from the payload decode to empty collections, `None` or empty strings,
//! since which fields appear depends on the extractors requested. Cross
//! references between records live in the response's link table, not here.

mod custom;
mod entailment;
mod entity;
mod ids;
mod noun_phrase;
mod property;
mod relation;
mod topic;
mod word;

pub use custom::{AttributeValue, CustomAnnotation, CustomLink, KeyValue};
pub use entailment::{EntailedTree, Entailment};
pub use entity::Entity;
pub use ids::{
    AnnotationId, AnnotationKind, AnnotationRef, CustomAnnotationIdx, EntailmentIdx, EntityIdx,
    NounPhraseIdx, Position, PropertyIdx, RelationIdx, RelationParamIdx, SentenceIdx, TopicIdx,
    WordIdx,
};
pub use noun_phrase::NounPhrase;
pub use property::Property;
pub use relation::{Relation, RelationParam};
pub use topic::Topic;
pub use word::{Sense, Word};

pub(crate) use custom::build as build_custom_annotation;
pub(crate) use entailment::build as build_entailment;
pub(crate) use entity::build as build_entity;
pub(crate) use ids::{join_positions, write_prefix};
pub(crate) use noun_phrase::build as build_noun_phrase;
pub(crate) use property::build as build_property;
pub(crate) use relation::build as build_relation;
pub(crate) use topic::build as build_topic;
pub(crate) use word::build as build_word;

use crate::response::{ResponseError, ResponseResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode one record of `kind` from its JSON object.
///
/// Missing fields fall back to their defaults; a field holding the wrong
/// JSON type makes the record malformed.
pub(crate) fn decode_record<T: DeserializeOwned>(
    json: &Value,
    kind: AnnotationKind,
    index: usize,
) -> ResponseResult<T> {
    T::deserialize(json).map_err(|source| ResponseError::MalformedRecord {
        kind,
        index,
        source,
    })
}

/// Field deserializer reading an explicit `null` as the field's default.
///
/// Container-level `#[serde(default)]` only covers absent keys.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
