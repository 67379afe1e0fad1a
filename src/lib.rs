//! textgraph: cross-referenced annotation graphs for text-analytics responses
//!
//! A response payload stores annotations (entities, relations, topics,
//! words, ...) in independent arrays that reference each other only by
//! identifier, and only in one direction. Decoding it with [`Response`]
//! links every annotation to every annotation that mentions it, in both
//! directions.
//!
//! # Core Concepts
//!
//! - **Records**: immutable annotations decoded from the payload
//! - **Link registry**: pending link requests waiting for their target
//! - **Link table**: the cross references, kept apart from the records
//! - **Handles**: borrowed views that navigate the finished graph
//!
//! # Example
//!
//! ```
//! use textgraph::{DecodeConfig, Response};
//!
//! let payload = r#"{"ok": true, "response": {
//!     "entities": [{"id": 0, "entityId": "Dog", "matchingTokens": [0]}],
//!     "sentences": [{"words": [{"position": 0, "token": "Dogs", "partOfSpeech": "NNS"}]}]
//! }}"#;
//!
//! let response = Response::parse(payload, &DecodeConfig::default()).unwrap();
//! let word = response.words().next().unwrap();
//! assert_eq!(word.entities().next().unwrap().id(), Some("Dog"));
//! ```

pub mod annotation;
pub mod config;
pub mod link;
mod response;

pub use annotation::{
    AnnotationId, AnnotationKind, AnnotationRef, AttributeValue, CustomAnnotation, CustomLink,
    Entailment, Entity, KeyValue, NounPhrase, Position, Property, Relation, RelationParam, Sense,
    Topic, Word,
};
pub use config::{ConfigError, ConfigResult, DecodeConfig};
pub use link::{LinkAction, LinkKey, LinkRegistry, LinkTable, UnresolvedLink, WordLink};
pub use response::{
    AnnotationHandle, ArenaIndex, CustomAnnotationRef, EntailmentRef, EntityRef, Handle,
    NounPhraseRef, PropertyRef, RelationParamRef, RelationRef, Response, ResponseError,
    ResponseResult, Sentence, SentenceRef, TopicRef, WordRef,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
