//! Payload fixtures

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};
use textgraph::{DecodeConfig, Response};

/// Decode with the default config, panicking on malformed fixtures
pub fn decode(payload: Value) -> Response {
    Response::decode(&payload, &DecodeConfig::default()).expect("fixture should decode")
}

/// "Dogs bark loudly ." with every annotation kind present.
///
/// Word positions: 0 Dogs, 1 bark, 2 loudly, 3 "."
pub fn dogs_bark() -> Value {
    json!({
        "ok": true,
        "time": 0.02,
        "response": {
            "rawText": "Dogs bark loudly.",
            "customAnnotations": [{
                "name": "Barking",
                "contents": [
                    {"key": "who", "links": [{"annotationName": "entity", "linkedId": 0}]},
                    {"key": "verb", "links": [{"annotationName": "word", "linkedId": 1}]},
                    {"key": "topic", "links": [{"annotationName": "topic", "linkedId": 0}]}
                ]
            }],
            "topics": [{"id": 0, "label": "Dogs", "score": 0.9}],
            "coarseTopics": [{"id": 1, "label": "Animals", "score": 0.7}],
            "entities": [{
                "id": 0,
                "entityId": "Dog",
                "matchingTokens": [0],
                "matchedText": "Dogs",
                "relevanceScore": 0.8
            }],
            "entailments": [{
                "id": 0,
                "wordPositions": [1],
                "entailedTree": {"word": "yelp"},
                "score": 0.4
            }],
            "relations": [{
                "id": 0,
                "wordPositions": [1],
                "params": [
                    {"relation": "SUBJECT", "wordPositions": [0]},
                    {"relation": "OTHER", "wordPositions": [2]}
                ]
            }],
            "properties": [{
                "id": 0,
                "wordPositions": [1],
                "propertyPositions": [2]
            }],
            "nounPhrases": [{"id": 0, "wordPositions": [0]}],
            "sentences": [{
                "words": [
                    {"position": 0, "token": "Dogs", "partOfSpeech": "NNS", "parentPosition": 1,
                     "relationToParent": "nsubj"},
                    {"position": 1, "token": "bark", "partOfSpeech": "VBP",
                     "relationToParent": "root"},
                    {"position": 2, "token": "loudly", "partOfSpeech": "RB", "parentPosition": 1,
                     "relationToParent": "advmod"},
                    {"position": 3, "token": ".", "partOfSpeech": "."}
                ]
            }]
        }
    })
}

/// Up to four sorted, distinct positions in `0..word_count + 3`
fn pick_positions<R: Rng + ?Sized>(rng: &mut R, word_count: u32) -> Vec<u32> {
    let mut all: Vec<u32> = (0..word_count + 3).collect();
    all.shuffle(rng);
    let len = rng.gen_range(0..=all.len().min(4));
    let mut picked = all[..len].to_vec();
    picked.sort_unstable();
    picked
}

/// A generated payload and the references it encodes
pub struct RandomPayload {
    pub payload: Value,
    /// `entity_positions[e]`: positions entity `e` references, in order
    pub entity_positions: Vec<Vec<u32>>,
    /// `phrase_positions[p]`: positions noun phrase `p` references
    pub phrase_positions: Vec<Vec<u32>>,
    /// `(predicate, modifier)` positions per property; the two may overlap
    pub property_positions: Vec<(Vec<u32>, Vec<u32>)>,
    /// Predicate positions per relation
    pub relation_positions: Vec<Vec<u32>>,
    /// Positions of each param, per relation
    pub param_positions: Vec<Vec<Vec<u32>>>,
    pub word_count: u32,
}

impl RandomPayload {
    /// Every position list that registers word links, one per requester
    pub fn position_lists(&self) -> impl Iterator<Item = &Vec<u32>> + '_ {
        self.entity_positions
            .iter()
            .chain(&self.phrase_positions)
            .chain(self.property_positions.iter().flat_map(|(p, m)| [p, m]))
            .chain(&self.relation_positions)
            .chain(self.param_positions.iter().flatten())
    }
}

/// Random entities, noun phrases, properties and relations over
/// `word_count` words split into sentences, with some references pointing
/// past the last word.
pub fn random_payload(rng: &mut impl Rng, word_count: u32) -> RandomPayload {
    let entity_count = rng.gen_range(0..8);
    let entity_positions: Vec<Vec<u32>> =
        (0..entity_count).map(|_| pick_positions(rng, word_count)).collect();
    let phrase_count = rng.gen_range(0..5);
    let phrase_positions: Vec<Vec<u32>> =
        (0..phrase_count).map(|_| pick_positions(rng, word_count)).collect();

    let property_count = rng.gen_range(0..5);
    let property_positions: Vec<(Vec<u32>, Vec<u32>)> = (0..property_count)
        .map(|_| {
            let predicate = pick_positions(rng, word_count);
            let mut modifier = pick_positions(rng, word_count);
            if rng.gen_bool(0.5) {
                modifier.extend(&predicate);
                modifier.sort_unstable();
                modifier.dedup();
            }
            (predicate, modifier)
        })
        .collect();

    let relation_count = rng.gen_range(0..4);
    let relation_positions: Vec<Vec<u32>> =
        (0..relation_count).map(|_| pick_positions(rng, word_count)).collect();
    let param_positions: Vec<Vec<Vec<u32>>> = (0..relation_count)
        .map(|_| {
            let param_count = rng.gen_range(0..4);
            (0..param_count).map(|_| pick_positions(rng, word_count)).collect()
        })
        .collect();

    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for position in 0..word_count {
        current.push(json!({
            "position": position,
            "token": format!("w{}", position),
            "partOfSpeech": "NN"
        }));
        if rng.gen_bool(0.3) {
            sentences.push(json!({"words": std::mem::take(&mut current)}));
        }
    }
    if !current.is_empty() {
        sentences.push(json!({"words": current}));
    }

    let entities: Vec<Value> = entity_positions
        .iter()
        .enumerate()
        .map(|(id, positions)| json!({"id": id, "matchingTokens": positions}))
        .collect();
    let phrases: Vec<Value> = phrase_positions
        .iter()
        .enumerate()
        .map(|(id, positions)| json!({"id": id, "wordPositions": positions}))
        .collect();

    let properties: Vec<Value> = property_positions
        .iter()
        .enumerate()
        .map(|(id, (predicate, modifier))| {
            json!({"id": id, "wordPositions": predicate, "propertyPositions": modifier})
        })
        .collect();
    let relations: Vec<Value> = relation_positions
        .iter()
        .zip(&param_positions)
        .enumerate()
        .map(|(id, (predicate, params))| {
            let params: Vec<Value> = params
                .iter()
                .map(|positions| json!({"relation": "OBJECT", "wordPositions": positions}))
                .collect();
            json!({"id": id, "wordPositions": predicate, "params": params})
        })
        .collect();

    RandomPayload {
        payload: json!({"ok": true, "response": {
            "entities": entities,
            "relations": relations,
            "properties": properties,
            "nounPhrases": phrases,
            "sentences": sentences
        }}),
        entity_positions,
        phrase_positions,
        property_positions,
        relation_positions,
        param_positions,
        word_count,
    }
}
