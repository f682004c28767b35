//! Criterion benchmarks for the rule-resolution hot path
//!
//! Covers: bare recursive resolution, skippable-atom fallback, and the
//! memoized searcher that the classifiers and the action gate sit on.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gestured::config::{resolve, RuleKey, RulePath, RuleTree, Searcher};
use serde_json::json;

fn keymap() -> RuleTree {
    RuleTree::from_value(&json!({
        "swipe": {
            "3": {
                "left":  { "command": "xdotool key alt+Left" },
                "right": { "command": "xdotool key alt+Right" },
                "up":    { "command": "xdotool key super" },
                "down":  { "command": "xdotool key super+d" },
            },
            "4": {
                "left":  { "command": "wmctrl -s 0" },
                "right": { "command": "wmctrl -s 1" },
            },
        },
        "pinch": {
            "2": {
                "in":  { "command": "xdotool key ctrl+plus" },
                "out": { "command": "xdotool key ctrl+minus" },
            },
        },
        "threshold": { "swipe": 1.5, "pinch": 1.0 },
        "interval":  { "swipe": 1.0 },
    }))
}

fn direct_path() -> RulePath {
    ["swipe", "3", "right", "command"].into_iter().collect()
}

/// Path that only resolves by skipping its direction atom
fn skip_path() -> RulePath {
    RulePath::new(vec![
        RuleKey::new("interval"),
        RuleKey::skippable("right"),
        RuleKey::new("swipe"),
    ])
}

fn bench_resolve_direct(c: &mut Criterion) {
    let tree = keymap();
    let path = direct_path();

    c.bench_function("resolve_direct", |b| {
        b.iter(|| resolve(black_box(path.keys()), black_box(&tree)));
    });
}

fn bench_resolve_with_skip(c: &mut Criterion) {
    let tree = keymap();
    let path = skip_path();

    c.bench_function("resolve_with_skip", |b| {
        b.iter(|| resolve(black_box(path.keys()), black_box(&tree)));
    });
}

fn bench_resolve_miss(c: &mut Criterion) {
    let tree = keymap();
    let path: RulePath = ["swipe", "5", "right", "command"].into_iter().collect();

    c.bench_function("resolve_miss", |b| {
        b.iter(|| resolve(black_box(path.keys()), black_box(&tree)));
    });
}

fn bench_searcher_memoized(c: &mut Criterion) {
    let tree = keymap();
    let path = direct_path();

    c.bench_function("searcher_memoized", |b| {
        let mut searcher = Searcher::new();
        b.iter(|| searcher.search(black_box(&path), 1, black_box(&tree)));
    });
}

fn bench_searcher_cold(c: &mut Criterion) {
    let tree = keymap();
    let path = direct_path();

    c.bench_function("searcher_cold", |b| {
        let mut searcher = Searcher::new();
        let mut generation = 0u64;
        b.iter(|| {
            // A fresh generation per iteration forces a cache miss
            generation += 1;
            searcher.search(black_box(&path), generation, black_box(&tree))
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_direct,
    bench_resolve_with_skip,
    bench_resolve_miss,
    bench_searcher_memoized,
    bench_searcher_cold,
);
criterion_main!(benches);
