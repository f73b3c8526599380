//! Tests for UnlockEngine

use std::sync::Arc;

use super::{ParentCompletion, UnlockEngine};
use crate::catalog::builtin::{
    ACHIEVEMENTS_INTRO, CONNECT_TO_CLIENT, GLOBAL_SETTINGS, HUNDRED_MILLION, INSTRUMENTATION_INTRO,
    LOAD_TRACE, SAMPLING_INTRO, SAVE_TRACE,
};
use crate::catalog::{CategoryDef, ItemDef, Registry};
use crate::progress::{CompletionStore, MemoryStore};

fn engine(items: Vec<ItemDef>, categories: Vec<CategoryDef>) -> UnlockEngine {
    UnlockEngine::new(Arc::new(Registry::build(items, categories).expect("valid registry")))
}

fn builtin() -> UnlockEngine {
    UnlockEngine::new(Arc::new(Registry::builtin().expect("valid registry")))
}

fn ids(items: Vec<&crate::catalog::Item>) -> Vec<&str> {
    items.into_iter().map(|item| item.id.as_str()).collect()
}

/// A unlocks B, and B is neither a root nor a child
fn propagation_engine() -> UnlockEngine {
    engine(
        vec![ItemDef::new("a", "A").unlocks(["b"]), ItemDef::new("b", "B")],
        vec![CategoryDef::new("start", "Start").items(["a"])],
    )
}

fn visible_ids(engine: &UnlockEngine, state: &MemoryStore) -> Vec<String> {
    let registry = engine.registry();
    engine
        .visibility(state)
        .visible_items()
        .map(|handle| registry.item(handle).id.clone())
        .collect()
}

#[test]
fn unlock_edge_propagates_visibility() {
    let engine = propagation_engine();
    let registry = engine.registry();
    let b = registry.resolve_item("b").unwrap();

    let empty = MemoryStore::new();
    assert!(!engine.is_item_visible(b, &empty));

    let mut state = empty.clone();
    let unlocked = engine.mark_complete("a", &mut state);
    assert_eq!(ids(unlocked), vec!["b"]);
    assert!(engine.is_item_visible(b, &state));
    assert_eq!(ids(engine.newly_unlocked_since(&empty, &state)), vec!["b"]);
}

#[test]
fn root_category_visible_with_empty_state() {
    let engine = builtin();
    let state = MemoryStore::new();
    let first_steps = engine.registry().resolve_category("firstSteps").unwrap();

    assert!(engine.is_category_unlocked(first_steps, &state));
    assert_eq!(visible_ids(&engine, &state), vec![ACHIEVEMENTS_INTRO]);
    let categories: Vec<&str> = engine
        .visible_categories(&state)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(categories, vec!["firstSteps"]);
}

#[test]
fn category_gated_on_prerequisite() {
    let engine = engine(
        vec![ItemDef::new("p", "P"), ItemDef::new("inside", "Inside")],
        vec![
            CategoryDef::new("open", "Open").items(["p"]),
            CategoryDef::new("c", "C").items(["inside"]).requires(["p"]),
        ],
    );
    let category = engine.registry().resolve_category("c").unwrap();
    let inside = engine.registry().resolve_item("inside").unwrap();

    let mut state = MemoryStore::new();
    assert!(!engine.is_category_unlocked(category, &state));
    assert!(!engine.is_item_visible(inside, &state));

    engine.mark_complete("p", &mut state);
    assert!(engine.is_category_unlocked(category, &state));
    assert!(engine.is_item_visible(inside, &state));
}

#[test]
fn children_appear_only_after_parent_done() {
    let engine = builtin();
    let registry = engine.registry();
    let intro = registry.resolve_item(ACHIEVEMENTS_INTRO).unwrap();
    let mut state = MemoryStore::new();

    assert!(engine.visible_children(intro, &state).is_empty());

    let unlocked = engine.mark_complete(ACHIEVEMENTS_INTRO, &mut state);
    assert_eq!(ids(unlocked), vec![CONNECT_TO_CLIENT, GLOBAL_SETTINGS]);
    assert_eq!(
        ids(engine.visible_children(intro, &state)),
        vec![CONNECT_TO_CLIENT, GLOBAL_SETTINGS]
    );
}

#[test]
fn completing_parent_does_not_complete_children() {
    let engine = builtin();
    let mut state = MemoryStore::new();
    engine.mark_complete(ACHIEVEMENTS_INTRO, &mut state);

    let connect = engine.registry().resolve_item(CONNECT_TO_CLIENT).unwrap();
    assert!(engine.is_item_visible(connect, &state));
    assert!(!engine.is_item_complete(connect, &state));
}

#[test]
fn cross_category_unlock_opens_categories() {
    let engine = builtin();
    let mut state = MemoryStore::new();
    engine.mark_complete(ACHIEVEMENTS_INTRO, &mut state);
    let unlocked = engine.mark_complete(CONNECT_TO_CLIENT, &mut state);

    assert_eq!(
        ids(unlocked),
        vec![SAMPLING_INTRO, INSTRUMENTATION_INTRO, LOAD_TRACE, SAVE_TRACE]
    );
    let categories: Vec<&str> = engine
        .visible_categories(&state)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(categories, vec!["firstSteps", "instrumentation", "sampling"]);
}

#[test]
fn derived_gate_opens_with_first_unlocked_root() {
    let engine = engine(
        vec![
            ItemDef::new("a", "A").unlocks(["x"]),
            ItemDef::new("b", "B").unlocks(["y"]),
            ItemDef::new("x", "X"),
            ItemDef::new("y", "Y"),
        ],
        vec![
            CategoryDef::new("start", "Start").items(["a", "b"]),
            CategoryDef::new("gated", "Gated").items(["x", "y"]),
        ],
    );
    let gated = engine.registry().resolve_category("gated").unwrap();
    let mut state = MemoryStore::new();
    assert!(!engine.is_category_unlocked(gated, &state));

    let unlocked = engine.mark_complete("a", &mut state);
    assert_eq!(ids(unlocked), vec!["x", "y"]);
    assert!(engine.is_category_unlocked(gated, &state));

    let categories: Vec<&str> = engine
        .visible_categories(&state)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(categories, vec!["start", "gated"]);

    // Every lesson carrying a badge is reachable from a listed category.
    let listed: Vec<&str> = engine
        .visible_categories(&state)
        .into_iter()
        .flat_map(|category| engine.visible_items(category, &state))
        .map(|item| item.id.as_str())
        .collect();
    for item in engine.new_items(&state) {
        assert!(listed.contains(&item.id.as_str()), "{} is not listed", item.id);
    }
}

#[test]
fn explicit_gate_waits_for_every_prerequisite() {
    let engine = engine(
        vec![
            ItemDef::new("a", "A"),
            ItemDef::new("b", "B"),
            ItemDef::new("x", "X"),
        ],
        vec![
            CategoryDef::new("start", "Start").items(["a", "b"]),
            CategoryDef::new("gated", "Gated").items(["x"]).requires(["a", "b"]),
        ],
    );
    let gated = engine.registry().resolve_category("gated").unwrap();
    let x = engine.registry().resolve_item("x").unwrap();
    let mut state = MemoryStore::new();

    engine.mark_complete("a", &mut state);
    assert!(!engine.is_category_unlocked(gated, &state));
    assert!(!engine.is_item_visible(x, &state));

    let unlocked = engine.mark_complete("b", &mut state);
    assert!(engine.is_category_unlocked(gated, &state));
    assert_eq!(ids(unlocked), vec!["x"]);
}

#[test]
fn unlock_target_visible_even_if_unlocker_hidden() {
    // Done flags may arrive out of order from persisted state.
    let engine = builtin();
    let state = MemoryStore::with_done([CONNECT_TO_CLIENT]);
    let sampling = engine.registry().resolve_item(SAMPLING_INTRO).unwrap();
    let save = engine.registry().resolve_item(SAVE_TRACE).unwrap();

    assert!(engine.is_item_visible(sampling, &state));
    // Children still need a visible parent.
    assert!(!engine.is_item_visible(save, &state));
}

#[test]
fn deep_chain_reaches_fixed_point() {
    let engine = engine(
        vec![
            ItemDef::new("leaf", "Leaf"),
            ItemDef::new("mid", "Mid").children(["leaf"]),
            ItemDef::new("top", "Top").children(["mid"]),
        ],
        vec![CategoryDef::new("c", "C").items(["top"])],
    );
    let state = MemoryStore::with_done(["top", "mid"]);
    assert_eq!(visible_ids(&engine, &state), vec!["leaf", "mid", "top"]);
}

#[test]
fn visibility_is_monotonic() {
    let engine = builtin();
    let all: Vec<String> = engine.registry().items().map(|item| item.id.clone()).collect();

    // Every subset of the catalog against every superset obtained by adding one more id.
    for mask in 0u32..(1 << all.len()) {
        let smaller: Vec<&String> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, id)| id)
            .collect();
        let small_state = MemoryStore::with_done(smaller.iter().map(|id| id.as_str()));
        let small_visible = engine.visibility(&small_state);

        for extra in &all {
            let mut big_state = small_state.clone();
            big_state.set_done(extra);
            let big_visible = engine.visibility(&big_state);
            for handle in small_visible.visible_items() {
                assert!(
                    big_visible.is_item_visible(handle),
                    "adding {extra} hid {}",
                    engine.registry().item(handle).id
                );
            }
        }
    }
}

#[test]
fn mark_complete_is_idempotent() {
    let engine = builtin();
    let mut once = MemoryStore::new();
    engine.mark_complete(ACHIEVEMENTS_INTRO, &mut once);

    let mut twice = once.clone();
    let unlocked = engine.mark_complete(ACHIEVEMENTS_INTRO, &mut twice);
    assert!(unlocked.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn mark_seen_is_idempotent_and_keeps_completion() {
    let engine = builtin();
    let mut once = MemoryStore::new();
    assert!(engine.mark_seen(ACHIEVEMENTS_INTRO, &mut once));

    let mut twice = once.clone();
    assert!(!engine.mark_seen(ACHIEVEMENTS_INTRO, &mut twice));
    assert_eq!(once, twice);
    assert!(!once.is_done(ACHIEVEMENTS_INTRO));
}

#[test]
fn unknown_ids_are_ignored() {
    let engine = builtin();
    let mut state = MemoryStore::new();
    assert!(engine.mark_complete("nope", &mut state).is_empty());
    assert!(!engine.mark_seen("nope", &mut state));
    assert!(state.is_empty());
}

#[test]
fn seen_clears_new_badge() {
    let engine = builtin();
    let mut state = MemoryStore::new();
    assert_eq!(ids(engine.new_items(&state)), vec![ACHIEVEMENTS_INTRO]);
    assert!(engine.needs_attention(&state));

    engine.mark_seen(ACHIEVEMENTS_INTRO, &mut state);
    assert!(engine.new_items(&state).is_empty());
    assert!(!engine.needs_attention(&state));

    // Completing the lesson keeps the badge cleared; only the new children show up.
    engine.mark_complete(ACHIEVEMENTS_INTRO, &mut state);
    assert_eq!(
        ids(engine.new_items(&state)),
        vec![CONNECT_TO_CLIENT, GLOBAL_SETTINGS]
    );
}

#[test]
fn mark_all_seen_clears_every_badge() {
    let engine = builtin();
    let mut state = MemoryStore::new();
    engine.mark_complete(ACHIEVEMENTS_INTRO, &mut state);
    assert_eq!(engine.mark_all_seen(&mut state), 3);
    assert!(!engine.needs_attention(&state));
    assert_eq!(engine.mark_all_seen(&mut state), 0);
}

#[test]
fn category_attention_tracks_unseen_lessons() {
    let engine = builtin();
    let mut state = MemoryStore::new();
    let first_steps = engine.registry().resolve_category("firstSteps").unwrap();
    let sampling = engine.registry().resolve_category("sampling").unwrap();

    assert!(engine.category_needs_attention(first_steps, &state));
    assert!(!engine.category_needs_attention(sampling, &state));

    engine.mark_seen(ACHIEVEMENTS_INTRO, &mut state);
    assert!(!engine.category_needs_attention(first_steps, &state));
}

#[test]
fn explicit_policy_leaves_parent_open() {
    let engine = builtin();
    let mut state = MemoryStore::with_done([ACHIEVEMENTS_INTRO, CONNECT_TO_CLIENT]);
    engine.mark_complete(INSTRUMENTATION_INTRO, &mut state);
    engine.mark_complete(HUNDRED_MILLION, &mut state);
    engine.mark_complete("instrumentationStatistics", &mut state);

    assert!(state.is_done(HUNDRED_MILLION));
    let instrumentation = engine.registry().resolve_category("instrumentation").unwrap();
    assert!(engine.is_category_complete(instrumentation, &state));

    let mut open = MemoryStore::with_done([SAVE_TRACE, LOAD_TRACE]);
    engine.mark_complete(GLOBAL_SETTINGS, &mut open);
    assert!(!open.is_done(CONNECT_TO_CLIENT));
    assert!(!open.is_done(ACHIEVEMENTS_INTRO));
}

#[test]
fn when_children_done_policy_cascades_upwards() {
    let engine = builtin().with_parent_completion(ParentCompletion::WhenChildrenDone);
    assert_eq!(engine.parent_completion(), ParentCompletion::WhenChildrenDone);

    let mut state = MemoryStore::with_done([ACHIEVEMENTS_INTRO, GLOBAL_SETTINGS]);
    engine.mark_complete(SAVE_TRACE, &mut state);
    assert!(!state.is_done(CONNECT_TO_CLIENT));

    let unlocked = engine.mark_complete(LOAD_TRACE, &mut state);
    assert!(state.is_done(CONNECT_TO_CLIENT));
    // The cascaded completion unlocks the cross-category lessons.
    assert!(ids(unlocked).contains(&SAMPLING_INTRO));
}

#[test]
fn cascade_climbs_multiple_levels() {
    let engine = engine(
        vec![
            ItemDef::new("leaf", "Leaf"),
            ItemDef::new("mid", "Mid").children(["leaf"]),
            ItemDef::new("top", "Top").children(["mid"]),
        ],
        vec![CategoryDef::new("c", "C").items(["top"])],
    )
    .with_parent_completion(ParentCompletion::WhenChildrenDone);

    let mut state = MemoryStore::new();
    engine.mark_complete("leaf", &mut state);
    assert!(state.is_done("mid"));
    assert!(state.is_done("top"));
    assert_eq!(
        state.take_changes(),
        vec!["leaf".to_string(), "mid".to_string(), "top".to_string()]
    );
}

#[test]
fn category_completion_requires_whole_tree() {
    let engine = builtin();
    let first_steps = engine.registry().resolve_category("firstSteps").unwrap();
    let partial = MemoryStore::with_done([ACHIEVEMENTS_INTRO, CONNECT_TO_CLIENT, GLOBAL_SETTINGS]);
    assert!(!engine.is_category_complete(first_steps, &partial));

    let full = MemoryStore::with_done([
        ACHIEVEMENTS_INTRO,
        CONNECT_TO_CLIENT,
        GLOBAL_SETTINGS,
        SAVE_TRACE,
        LOAD_TRACE,
    ]);
    assert!(engine.is_category_complete(first_steps, &full));
}

#[test]
fn engine_works_through_trait_objects() {
    let engine = propagation_engine();
    let mut store = MemoryStore::new();
    let state: &mut dyn CompletionStore = &mut store;
    assert_eq!(ids(engine.mark_complete("a", state)), vec!["b"]);
    assert!(engine.needs_attention(&*state));
}
