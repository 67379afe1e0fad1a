//! Response: the finished, read-only annotation graph of one payload

mod builder;
mod handle;
mod sentence;

pub use handle::{
    AnnotationHandle, ArenaIndex, CustomAnnotationRef, EntailmentRef, EntityRef, Handle,
    NounPhraseRef, PropertyRef, RelationParamRef, RelationRef, SentenceRef, TopicRef, WordRef,
};
pub use sentence::Sentence;

pub(crate) use builder::GraphBuilder;
pub(crate) use handle::handles;

use crate::annotation::{
    AnnotationKind, AnnotationRef, CustomAnnotationIdx, EntailmentIdx, EntityIdx, NounPhraseIdx,
    PropertyIdx, RelationIdx, SentenceIdx, TopicIdx, WordIdx,
};
use crate::config::DecodeConfig;
use crate::link::{LinkTable, UnresolvedLink};
use builder::{Built, Records};
use dashmap::DashMap;
use serde_json::Value;
use thiserror::Error;

/// Errors turning a payload into a response graph
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Malformed {kind} record at index {index}: {source}")]
    MalformedRecord {
        kind: AnnotationKind,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for response decoding
pub type ResponseResult<T> = Result<T, ResponseError>;

/// Top-level status fields, read verbatim from the payload
#[derive(Debug, Clone, Default)]
struct Status {
    ok: bool,
    error: String,
    message: String,
    time: Option<f64>,
}

impl Status {
    fn read(json: &Value) -> Self {
        Self {
            ok: json.get("ok").and_then(Value::as_bool).unwrap_or(false),
            error: string_field(Some(json), "error"),
            message: string_field(Some(json), "message"),
            time: json.get("time").and_then(Value::as_f64),
        }
    }
}

/// Text fields of the `response` body
#[derive(Debug, Clone, Default)]
struct Texts {
    raw_text: String,
    cleaned_text: String,
    custom_annotation_output: String,
}

impl Texts {
    fn read(body: Option<&Value>) -> Self {
        Self {
            raw_text: string_field(body, "rawText"),
            cleaned_text: string_field(body, "cleanedText"),
            custom_annotation_output: string_field(body, "customAnnotationOutput"),
        }
    }
}

fn string_field(json: Option<&Value>, field: &str) -> String {
    json.and_then(|j| j.get(field))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The cross-referenced annotation graph of one analysis response.
///
/// Built once by [`Response::decode`] and never mutated afterwards; every
/// record and link is dropped together with it.
#[derive(Debug)]
pub struct Response {
    status: Status,
    texts: Texts,
    sentence_count: usize,
    pub(crate) records: Records,
    pub(crate) links: LinkTable,
    topics: Vec<TopicIdx>,
    coarse_topics: Vec<TopicIdx>,
    unresolved: Vec<UnresolvedLink>,
    rules: DashMap<String, Vec<CustomAnnotationIdx>>,
}

impl Response {
    /// Parse a payload as returned by the service.
    ///
    /// Fails when the text is not a JSON object or the payload reports
    /// `ok: false`.
    pub fn parse(text: &str, config: &DecodeConfig) -> ResponseResult<Self> {
        let json: Value = serde_json::from_str(text)?;
        if json.get("ok").and_then(Value::as_bool) == Some(false) {
            return Err(ResponseError::Analysis(string_field(Some(&json), "error")));
        }
        Self::decode(&json, config)
    }

    /// Build the graph from an already-parsed payload.
    ///
    /// A payload without a `response` object, or one reporting `ok: false`,
    /// decodes to an empty graph that still carries the status fields.
    pub fn decode(json: &Value, config: &DecodeConfig) -> ResponseResult<Self> {
        if !json.is_object() {
            return Err(ResponseError::NotAnObject);
        }
        let failed = json.get("ok").and_then(Value::as_bool) == Some(false);
        let body = json.get("response").filter(|b| b.is_object() && !failed);
        let builder = GraphBuilder::new(config);
        let built = match body {
            Some(body) => builder.build_body(body)?,
            None => builder.empty(),
        };
        Ok(Self::finish(built, Status::read(json), Texts::read(body), config))
    }

    fn finish(built: Built, status: Status, texts: Texts, config: &DecodeConfig) -> Self {
        let unresolved = built.registry.into_unresolved();
        for link in &unresolved {
            if config.report_unresolved {
                tracing::warn!(key = %link.key, action = ?link.action, "link target never built");
            } else {
                tracing::debug!(key = %link.key, action = ?link.action, "link target never built");
            }
        }
        tracing::debug!(
            sentences = built.records.sentences.len(),
            words = built.records.words.len(),
            entities = built.records.entities.len(),
            unresolved = unresolved.len(),
            "decoded response graph"
        );

        Self {
            status,
            texts,
            sentence_count: built.records.sentences.len(),
            records: built.records,
            links: built.links,
            topics: built.topics,
            coarse_topics: built.coarse_topics,
            unresolved,
            rules: DashMap::new(),
        }
    }

    /// Whether the service analyzed the document successfully
    pub fn ok(&self) -> bool {
        self.status.ok
    }

    /// Error description, empty when there was none
    pub fn error(&self) -> &str {
        &self.status.error
    }

    /// Warning or informational message from the service
    pub fn message(&self) -> &str {
        &self.status.message
    }

    /// Seconds the service spent processing the request
    pub fn time(&self) -> Option<f64> {
        self.status.time
    }

    pub fn raw_text(&self) -> &str {
        &self.texts.raw_text
    }

    pub fn cleaned_text(&self) -> &str {
        &self.texts.cleaned_text
    }

    /// Output produced while evaluating custom rules
    pub fn custom_annotation_output(&self) -> &str {
        &self.texts.custom_annotation_output
    }

    pub fn summary(&self) -> String {
        let time = self
            .status
            .time
            .map(|t| t.to_string())
            .unwrap_or_default();
        format!(
            "Request processed in: {} seconds.  Num Sentences:{}",
            time, self.sentence_count
        )
    }

    pub fn custom_annotations(&self) -> impl Iterator<Item = CustomAnnotationRef<'_>> + '_ {
        (0..self.records.custom_annotations.len())
            .map(move |i| Handle::new(self, CustomAnnotationIdx(i)))
    }

    pub fn topics(&self) -> impl Iterator<Item = TopicRef<'_>> + '_ {
        handles(self, &self.topics)
    }

    pub fn coarse_topics(&self) -> impl Iterator<Item = TopicRef<'_>> + '_ {
        handles(self, &self.coarse_topics)
    }

    /// Every entity across all sentences
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> + '_ {
        (0..self.records.entities.len()).map(move |i| Handle::new(self, EntityIdx(i)))
    }

    pub fn entailments(&self) -> impl Iterator<Item = EntailmentRef<'_>> + '_ {
        (0..self.records.entailments.len()).map(move |i| Handle::new(self, EntailmentIdx(i)))
    }

    pub fn relations(&self) -> impl Iterator<Item = RelationRef<'_>> + '_ {
        (0..self.records.relations.len()).map(move |i| Handle::new(self, RelationIdx(i)))
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyRef<'_>> + '_ {
        (0..self.records.properties.len()).map(move |i| Handle::new(self, PropertyIdx(i)))
    }

    pub fn noun_phrases(&self) -> impl Iterator<Item = NounPhraseRef<'_>> + '_ {
        (0..self.records.noun_phrases.len()).map(move |i| Handle::new(self, NounPhraseIdx(i)))
    }

    pub fn sentences(&self) -> impl Iterator<Item = SentenceRef<'_>> + '_ {
        (0..self.records.sentences.len()).map(move |i| Handle::new(self, SentenceIdx(i)))
    }

    /// Every word across all sentences, sentence by sentence
    pub fn words(&self) -> impl Iterator<Item = WordRef<'_>> + '_ {
        self.sentences().flat_map(|sentence| sentence.words())
    }

    /// Names of the rules that produced custom annotations, in payload order
    pub fn matching_rules(&self) -> Vec<&str> {
        self.records
            .custom_annotations
            .iter()
            .map(|annotation| annotation.name())
            .collect()
    }

    /// Custom annotations produced by `rule`
    pub fn custom_annotations_named(&self, rule: &str) -> Vec<CustomAnnotationRef<'_>> {
        if let Some(cached) = self.rules.get(rule) {
            return cached.iter().map(|&idx| Handle::new(self, idx)).collect();
        }
        let matching: Vec<CustomAnnotationIdx> = self
            .custom_annotations()
            .filter(|annotation| annotation.name() == rule)
            .map(|annotation| annotation.idx())
            .collect();
        let found = matching.iter().map(|&idx| Handle::new(self, idx)).collect();
        self.rules.insert(rule.to_string(), matching);
        found
    }

    /// The annotation a resolved custom-annotation link points at
    pub fn resolve(&self, target: AnnotationRef) -> AnnotationHandle<'_> {
        AnnotationHandle::new(self, target)
    }

    /// Link requests whose target never appeared in the payload
    pub fn unresolved_links(&self) -> &[UnresolvedLink] {
        &self.unresolved
    }

    pub fn topic(&self, idx: TopicIdx) -> TopicRef<'_> {
        Handle::new(self, idx)
    }

    pub fn word(&self, idx: WordIdx) -> WordRef<'_> {
        Handle::new(self, idx)
    }
}
