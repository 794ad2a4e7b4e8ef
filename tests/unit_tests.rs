// Unit tests for Swipe Deck

use swipe_deck::core::{
    classifier::{classify, Classifier},
    presentation::{interpolate, PresentationBinder},
    queue::CandidateQueue,
};
use swipe_deck::models::{Candidate, Decision, DeckTuning};
use swipe_deck::services::FeedStore;
use swipe_deck::RemovalNotifier;

const THRESHOLD: f64 = 100.0;

fn candidate(id: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        first_name: format!("First {}", id),
        last_name: format!("Last {}", id),
        photo_url: Some(format!("https://img.test/{}.png", id)),
        age: Some(30),
        gender: Some("female".to_string()),
        about: Some("Builds compilers for fun".to_string()),
        skills: vec!["rust".to_string(), "llvm".to_string()],
    }
}

fn queue_of(ids: &[&str]) -> CandidateQueue {
    let mut queue = CandidateQueue::new();
    let cards: Vec<Candidate> = ids.iter().map(|id| candidate(id)).collect();
    queue.initialize(&cards);
    queue
}

#[test]
fn test_classify_within_threshold_is_none() {
    let mut offset = -THRESHOLD;
    while offset <= THRESHOLD {
        assert_eq!(classify(offset, THRESHOLD), Decision::None, "offset {}", offset);
        offset += 2.5;
    }
}

#[test]
fn test_classify_beyond_threshold() {
    for offset in [100.01, 101.0, 150.0, 1_000.0] {
        assert_eq!(classify(offset, THRESHOLD), Decision::Accept);
        assert_eq!(classify(-offset, THRESHOLD), Decision::Reject);
    }
}

#[test]
fn test_classifier_custom_threshold() {
    let classifier = Classifier::new(40.0);
    assert_eq!(classifier.classify(40.0), Decision::None);
    assert_eq!(classifier.classify(41.0), Decision::Accept);
    assert_eq!(classifier.classify(-41.0), Decision::Reject);
}

#[test]
fn test_interpolate_three_points() {
    let input = [-150.0, 0.0, 150.0];
    let output = [0.0, 1.0, 0.0];

    assert_eq!(interpolate(0.0, &input, &output), 1.0);
    assert_eq!(interpolate(-150.0, &input, &output), 0.0);
    assert!((interpolate(30.0, &input, &output) - 0.8).abs() < 1e-9);
    assert_eq!(interpolate(900.0, &input, &output), 0.0);
}

#[test]
fn test_interpolate_degenerate_inputs() {
    assert_eq!(interpolate(5.0, &[], &[]), 0.0);
    assert_eq!(interpolate(5.0, &[1.0], &[7.0]), 7.0);
}

#[test]
fn test_signals_are_continuous() {
    let binder = PresentationBinder::new(DeckTuning::default());
    let mut previous = binder.signals(-200.0);

    let mut offset = -200.0;
    while offset <= 200.0 {
        let current = binder.signals(offset);
        assert!((current.rotation_deg - previous.rotation_deg).abs() <= 0.5);
        assert!((current.opacity - previous.opacity).abs() <= 0.05);
        previous = current;
        offset += 1.0;
    }
}

#[test]
fn test_indicators_are_exclusive() {
    let binder = PresentationBinder::new(DeckTuning::default());
    for offset in [-120.0, -60.0, -1.0, 1.0, 60.0, 120.0] {
        let signals = binder.signals(offset);
        assert!(signals.reject_indicator == 0.0 || signals.accept_indicator == 0.0);
    }
}

#[test]
fn test_evict_then_pending() {
    let mut queue = queue_of(&["a", "b", "c"]);

    let evicted = queue.evict("b").unwrap();
    queue.mark_pending(&evicted.id);

    assert!(!queue.contains("b"));
    assert!(queue.is_pending("b"));
    assert_eq!(queue.ids(), vec!["a", "c"]);
}

#[test]
fn test_rollback_restores_front() {
    let mut queue = queue_of(&["a", "b", "c"]);

    let evicted = queue.evict("c").unwrap();
    queue.mark_pending("c");

    queue.clear_pending("c");
    queue.restore(evicted);

    assert_eq!(queue.front().unwrap().id, "c");
    assert!(queue.pending_ids().is_empty());
}

#[test]
fn test_initialize_twice_no_change() {
    let cards = vec![candidate("a"), candidate("b")];
    let mut queue = CandidateQueue::new();

    assert!(queue.initialize(&cards));
    let ids = queue.ids().iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let revision = queue.revision();

    assert!(!queue.initialize(&cards));
    assert_eq!(queue.revision(), revision);
    assert_eq!(queue.ids(), ids);
}

#[test]
fn test_initialize_never_resurrects_pending() {
    let mut queue = queue_of(&["a", "b"]);
    queue.evict("b");
    queue.mark_pending("b");

    queue.initialize(&[candidate("b"), candidate("a"), candidate("c")]);
    assert_eq!(queue.ids(), vec!["a", "c"]);
}

#[test]
fn test_feed_store_tracks_resolutions() {
    let feed = FeedStore::new();
    feed.set_feed(vec![candidate("a"), candidate("b")]);

    feed.candidate_resolved("a");
    assert_eq!(feed.current().unwrap().len(), 1);

    feed.candidate_restored(&candidate("a"));
    let ids: Vec<String> = feed.current().unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["b", "a"]);
}
