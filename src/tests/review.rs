use super::{Draw, ReviewSession};
use crate::error::Error;
use crate::section::{HeadingPair, Section, SectionId};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cards(n: usize) -> Vec<Section> {
    (0..n)
        .map(|i| Section {
            id: SectionId(i),
            part: "Topic".to_string(),
            title: format!("Q{i}"),
            body: vec![format!("Answer {i}")],
        })
        .collect()
}

fn session(n: usize, seed: u64) -> ReviewSession {
    ReviewSession::start(cards(n), HeadingPair::default(), StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn test_start_requires_sections() {
    let result = ReviewSession::start(Vec::new(), HeadingPair::default(), StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(Error::NoSections { .. })));
}

#[test]
fn test_start_draws_hidden_card() {
    let review = session(3, 7);

    assert!(review.active().is_some());
    assert!(!review.is_revealed());
    assert_eq!(review.counter().to_string(), "3/3");
}

#[test]
fn test_reveal_is_idempotent() {
    let mut review = session(2, 7);
    review.reveal();
    review.reveal();
    assert!(review.is_revealed());
}

#[test]
fn test_discard_counts_down_then_exhausts() {
    let mut review = session(3, 42);

    assert!(matches!(review.discard_and_draw(), Draw::Card(_)));
    assert_eq!(review.counter().to_string(), "2/3");

    assert!(matches!(review.discard_and_draw(), Draw::Card(_)));
    assert_eq!(review.counter().to_string(), "1/3");

    assert_eq!(review.discard_and_draw(), Draw::Exhausted);
    assert_eq!(review.remaining(), 0);
    assert!(review.active().is_none());
}

#[test]
fn test_discarded_card_never_returns() {
    for seed in 0..20 {
        let mut review = session(5, seed);
        let mut discarded = Vec::new();
        while review.remaining() > 1 {
            let before = review.remaining();
            let active = review.active().unwrap().id;
            discarded.push(active);

            let Draw::Card(next) = review.discard_and_draw() else {
                panic!("exhausted with {before} cards left");
            };

            assert_eq!(review.remaining(), before - 1);
            assert!(!discarded.contains(&next), "seed {seed}: {next:?} came back");
            assert!(!review.is_revealed());
        }
    }
}

#[test]
fn test_skip_keeps_collection_size() {
    let mut review = session(4, 3);
    for _ in 0..10 {
        review.reveal();
        assert!(matches!(review.skip_and_draw(), Draw::Card(_)));
        assert_eq!(review.remaining(), 4);
        assert!(!review.is_revealed());
    }
    assert_eq!(review.counter().to_string(), "4/4");
}

#[test]
fn test_single_card_discard_exhausts() {
    let mut review = session(1, 9);
    assert_eq!(review.skip_and_draw(), Draw::Card(SectionId(0)));
    assert_eq!(review.discard_and_draw(), Draw::Exhausted);
}

#[test]
fn test_identical_cards_are_distinct_by_id() {
    let twins: Vec<Section> = (0..2)
        .map(|i| Section {
            id: SectionId(i),
            part: String::new(),
            title: "Same".to_string(),
            body: vec!["Same".to_string()],
        })
        .collect();
    let mut review =
        ReviewSession::start(twins, HeadingPair::default(), StdRng::seed_from_u64(5)).unwrap();
    let first = review.active().unwrap().id;

    let Draw::Card(second) = review.discard_and_draw() else {
        panic!("expected a remaining twin");
    };

    assert_ne!(first, second);
    assert_eq!(review.remaining(), 1);
}
