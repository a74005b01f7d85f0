//! Structural properties of conversation flattening on generated trees.

use std::collections::HashSet;

use castview::{flatten, flatten_root, Cast, ConversationFlattener, DepthMode};

/// Builds a tree where cast `n` has `n % 4` replies, up to `depth` levels.
fn build_tree(prefix: &str, depth: u32, level: u32) -> Cast {
    let mut cast = Cast::new(prefix).with_depth(level);
    if depth == 0 {
        return cast;
    }
    let fanout = prefix.len() % 4;
    let replies = (0..fanout)
        .map(|i| build_tree(&format!("{prefix}{i}"), depth - 1, level + 1))
        .collect();
    cast = cast.with_replies(replies);
    cast
}

fn sample_roots() -> Vec<Cast> {
    vec![build_tree("r", 6, 0), build_tree("sss", 5, 0)]
}

#[test]
fn every_cast_appears_exactly_once() {
    let roots = sample_roots();
    let total: usize = roots.iter().map(Cast::count_casts).sum();
    let conversation = flatten(&roots);

    let hashes: HashSet<&str> = conversation.casts.iter().map(|c| c.cast.hash.as_str()).collect();
    assert_eq!(conversation.len(), total);
    assert_eq!(hashes.len(), total);
}

#[test]
fn parents_precede_children_and_depths_step_by_one() {
    let roots = sample_roots();
    let conversation = flatten(&roots);

    let mut seen = HashSet::new();
    for item in &conversation.casts {
        match &item.cast.parent_hash {
            Some(parent) => assert!(seen.contains(parent.as_str()), "{parent} not yet visited"),
            None => assert_eq!(item.depth, 0),
        }
        seen.insert(item.cast.hash.as_str());
    }

    for section in &conversation.sections {
        for reply in &section.items {
            assert_eq!(reply.depth, section.header.depth + 1);
        }
    }
}

#[test]
fn sections_match_casts_with_replies() {
    let roots = sample_roots();
    let conversation = flatten(&roots);

    let with_replies: Vec<&str> = conversation
        .casts
        .iter()
        .filter(|c| c.cast.has_replies())
        .map(|c| c.cast.hash.as_str())
        .collect();
    let headers: Vec<&str> = conversation
        .sections
        .iter()
        .map(|s| s.header.cast.hash.as_str())
        .collect();
    assert_eq!(headers, with_replies);

    for section in &conversation.sections {
        assert_eq!(
            conversation.casts[section.root_index].cast.hash,
            section.header.cast.hash
        );
        let direct: Vec<&str> = section
            .header
            .cast
            .direct_replies
            .iter()
            .map(|c| c.hash.as_str())
            .collect();
        let items: Vec<&str> = section.items.iter().map(|c| c.cast.hash.as_str()).collect();
        assert_eq!(items, direct);
    }
}

#[test]
fn flattening_is_repeatable_and_leaves_input_untouched() {
    let roots = sample_roots();
    let before = roots.clone();

    let first = flatten(&roots);
    let second = flatten(&roots);

    assert_eq!(first, second);
    assert_eq!(roots, before);
}

#[test]
fn trust_mode_reports_upstream_labels() {
    let root = Cast::new("R")
        .with_depth(0)
        .with_replies(vec![Cast::new("A").with_depth(7)]);

    let recompute = flatten_root(Some(&root));
    assert_eq!(recompute.casts[1].depth, 1);
    assert_eq!(recompute.depth_mismatches, 1);

    let trusted = ConversationFlattener::new(DepthMode::Trust).flatten_roots([Some(&root)]);
    assert_eq!(trusted.casts[1].depth, 7);
}

#[test]
fn absent_root_yields_empty_conversation() {
    let conversation = flatten_root(None);

    assert!(conversation.is_empty());
    assert!(conversation.sections.is_empty());
}
