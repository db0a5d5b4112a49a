//! Integration tests for concurrent use of the Pattern Trie.
//!
//! Readers and writers share one trie through an `Arc`, the way request
//! handlers and an administrative reload share the engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use kapu_lib::data_structures::PatternTrie;

/// Vocabulary of one rebuild generation: every word carries the generation tag.
fn generation_words(generation: usize) -> Vec<String> {
    (0..8).map(|i| format!("g{generation}w{i}")).collect()
}

#[test]
fn test_readers_never_see_a_partial_rebuild() {
    const READERS: usize = 8;
    const WRITERS: usize = 2;
    const REBUILDS_PER_WRITER: usize = 40;

    let trie = Arc::new(PatternTrie::from_words(generation_words(0)));
    let barrier = Arc::new(Barrier::new(READERS + WRITERS));
    let generations = Arc::new(AtomicUsize::new(1));

    let writers: Vec<_> = (0..WRITERS)
        .map(|_| {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            let generations = Arc::clone(&generations);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..REBUILDS_PER_WRITER {
                    let generation = generations.fetch_add(1, Ordering::SeqCst);
                    trie.rebuild(generation_words(generation));
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..300 {
                    let patterns = trie.patterns();
                    assert_eq!(patterns.len(), 8, "partial vocabulary observed");

                    // All eight words belong to the same generation
                    let tag = patterns[0].split('w').next().map(str::to_owned);
                    assert!(patterns
                        .iter()
                        .all(|p| p.split('w').next().map(str::to_owned) == tag));

                    if let Some(found) = trie.find_first(format!("text {} text", patterns[3])) {
                        assert!(found.starts_with('g'));
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("thread panicked");
    }

    let last = generations.load(Ordering::SeqCst) - 1;
    assert_eq!(trie.len(), 8);
    assert!(trie.patterns().iter().all(|p| p.starts_with('g')));
    // Some generation is in place; the last one issued may have been overtaken
    assert!(last >= WRITERS * REBUILDS_PER_WRITER);
}

#[test]
fn test_rebuild_is_visible_to_later_calls() {
    let trie = Arc::new(PatternTrie::from_words(["y"]));

    let writer = {
        let trie = Arc::clone(&trie);
        thread::spawn(move || trie.rebuild(["x"]))
    };
    writer.join().expect("writer panicked");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let trie = Arc::clone(&trie);
            thread::spawn(move || (trie.contains_any("x"), trie.contains_any("y")))
        })
        .collect();

    for reader in readers {
        assert_eq!(reader.join().expect("reader panicked"), (true, false));
    }
}

#[test]
fn test_concurrent_inserts_and_deletes() {
    const THREADS: usize = 8;
    const WORDS_PER_THREAD: usize = 50;

    let trie = Arc::new(PatternTrie::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..WORDS_PER_THREAD {
                    let word = format!("t{thread_id}_{j}");
                    assert!(trie.insert(&word));
                    assert!(trie.contains_any(format!("say {word}!")));
                }
                // Delete the even words again
                for j in (0..WORDS_PER_THREAD).step_by(2) {
                    assert!(trie.delete(format!("t{thread_id}_{j}")));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(trie.len(), THREADS * WORDS_PER_THREAD / 2);
    assert!(trie.contains_pattern("t0_1"));
    assert!(!trie.contains_pattern("t0_0"));
    // Every deleted word left no dangling structure behind
    let expected = PatternTrie::from_words(trie.patterns());
    assert_eq!(trie.node_count(), expected.node_count());
}
