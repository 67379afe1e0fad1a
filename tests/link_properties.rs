//! Randomized checks of the link invariants over generated payloads

mod common;

use common::{decode, random_payload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use textgraph::{LinkKey, Position, WordRef};

const ROUNDS: u64 = 200;

fn distinct(positions: &[u32]) -> Vec<u32> {
    positions.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn in_range(positions: &[u32], word_count: u32) -> Vec<u32> {
    distinct(positions).into_iter().filter(|&p| p < word_count).collect()
}

fn positions<'g>(words: impl Iterator<Item = WordRef<'g>>) -> Vec<Position> {
    words.filter_map(|w| w.record().position()).collect()
}

#[test]
fn entity_word_links_are_bidirectional_and_exactly_once() {
    for seed in 0..ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let word_count = rng.gen_range(0..12);
        let generated = random_payload(&mut rng, word_count);
        let response = decode(generated.payload);

        let words: Vec<_> = response.words().collect();
        assert_eq!(words.len() as u32, generated.word_count, "seed {}", seed);

        for (entity, expected) in response.entities().zip(&generated.entity_positions) {
            let expected = in_range(expected, word_count);
            assert_eq!(positions(entity.matched_words()), expected, "seed {}", seed);

            for &position in &expected {
                let word = words[position as usize];
                let hits = word.entities().filter(|&e| e == entity).count();
                assert_eq!(hits, 1, "seed {} position {}", seed, position);
            }
        }

        // Every back reference has its forward counterpart
        for word in &words {
            for entity in word.entities() {
                assert!(entity.matched_words().any(|w| w == *word), "seed {}", seed);
            }
        }
    }
}

#[test]
fn entities_join_a_word_in_source_order() {
    for seed in 0..ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let generated = random_payload(&mut rng, 8);
        let response = decode(generated.payload);

        for word in response.words() {
            let Some(position) = word.position() else {
                continue;
            };
            let expected: Vec<usize> = generated
                .entity_positions
                .iter()
                .enumerate()
                .filter(|(_, positions)| positions.contains(&position))
                .map(|(index, _)| index)
                .collect();
            let linked: Vec<usize> = word.entities().map(|e| e.idx().index()).collect();
            assert_eq!(linked, expected, "seed {} position {}", seed, position);
        }
    }
}

#[test]
fn out_of_range_positions_are_exactly_the_unresolved_links() {
    for seed in 0..ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let word_count = rng.gen_range(1..10);
        let generated = random_payload(&mut rng, word_count);
        let response = decode(generated.payload.clone());

        let dangling = generated
            .position_lists()
            .flat_map(|positions| distinct(positions))
            .filter(|&p| p >= word_count)
            .count();
        assert_eq!(response.unresolved_links().len(), dangling, "seed {}", seed);
        assert!(response
            .unresolved_links()
            .iter()
            .all(|link| matches!(link.key, LinkKey::Word(p) if p >= word_count)));
    }
}

#[test]
fn noun_phrase_links_match_their_positions() {
    for seed in 0..ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let word_count = rng.gen_range(0..12);
        let generated = random_payload(&mut rng, word_count);
        let response = decode(generated.payload);

        let total_back_refs: usize = response.words().map(|w| w.noun_phrases().count()).sum();
        let expected: usize = generated
            .phrase_positions
            .iter()
            .map(|positions| distinct(positions).into_iter().filter(|&p| p < word_count).count())
            .sum();
        assert_eq!(total_back_refs, expected, "seed {}", seed);
    }
}

#[test]
fn property_roles_link_separately_and_exactly_once() {
    for seed in 0..ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let word_count = rng.gen_range(0..12);
        let generated = random_payload(&mut rng, word_count);
        let response = decode(generated.payload);
        let words: Vec<_> = response.words().collect();

        for (property, (predicate, modifier)) in
            response.properties().zip(&generated.property_positions)
        {
            let predicate = in_range(predicate, word_count);
            let modifier = in_range(modifier, word_count);
            assert_eq!(positions(property.predicate_words()), predicate, "seed {}", seed);
            assert_eq!(positions(property.property_words()), modifier, "seed {}", seed);

            for (position, word) in words.iter().enumerate() {
                let position = position as u32;
                let as_predicate = word.property_predicates().filter(|&p| p == property).count();
                let as_modifier = word.property_properties().filter(|&p| p == property).count();
                assert_eq!(
                    as_predicate,
                    usize::from(predicate.contains(&position)),
                    "seed {} position {}",
                    seed,
                    position
                );
                assert_eq!(
                    as_modifier,
                    usize::from(modifier.contains(&position)),
                    "seed {} position {}",
                    seed,
                    position
                );
            }
        }
    }
}

#[test]
fn relation_params_link_words_both_ways() {
    for seed in 0..ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let word_count = rng.gen_range(0..12);
        let generated = random_payload(&mut rng, word_count);
        let response = decode(generated.payload);
        let words: Vec<_> = response.words().collect();

        let relations = response
            .relations()
            .zip(&generated.relation_positions)
            .zip(&generated.param_positions);
        for ((relation, predicate), expected_params) in relations {
            let predicate = in_range(predicate, word_count);
            assert_eq!(positions(relation.predicate_words()), predicate, "seed {}", seed);

            let params: Vec<_> = relation.params().collect();
            assert_eq!(params.len(), expected_params.len(), "seed {}", seed);
            for (param, expected) in params.into_iter().zip(expected_params) {
                assert_eq!(param.relation_parent(), relation);
                let expected = in_range(expected, word_count);
                assert_eq!(positions(param.param_words()), expected, "seed {}", seed);

                for (position, word) in words.iter().enumerate() {
                    let hits = word.relation_params().filter(|&p| p == param).count();
                    let linked = expected.contains(&(position as u32));
                    assert_eq!(hits, usize::from(linked), "seed {} position {}", seed, position);
                }
            }
        }

        // Every back reference has its forward counterpart
        for word in &words {
            for param in word.relation_params() {
                assert!(param.param_words().any(|w| w == *word), "seed {}", seed);
            }
            for relation in word.relations() {
                assert!(relation.predicate_words().any(|w| w == *word), "seed {}", seed);
            }
        }
    }
}
