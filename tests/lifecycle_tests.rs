// Host-side tests for the scene lifecycle phase machine: ordering,
// dispose idempotence, content replacement, and the stale-async guard.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::*;

#[test]
fn init_requires_a_measurable_mount() {
    let mut state = LifecycleState::new();
    assert!(!state.begin_init(0, 600));
    assert!(!state.begin_init(800, 0));
    assert_eq!(state.phase(), Phase::Uninitialized);

    assert!(state.begin_init(800, 600));
    assert_eq!(state.phase(), Phase::Initialized);
    // An instance is single-use
    assert!(!state.begin_init(800, 600));
}

#[test]
fn content_before_init_is_rejected() {
    let mut state = LifecycleState::new();
    assert!(state.replace_content().is_none());
    state.begin_init(800, 600);
    state.dispose();
    assert!(state.replace_content().is_none());
}

#[test]
fn n_builds_dispose_n_minus_one_previous_contents() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);
    for i in 0..5 {
        let had_previous = state.replace_content().unwrap();
        assert_eq!(had_previous, i > 0);
        state.content_installed();
    }
    assert_eq!(state.content_disposals(), 4);
    assert!(state.has_content());
}

#[test]
fn async_content_leaves_the_slot_empty_until_installed() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);
    assert!(!state.replace_content().unwrap());
    assert_eq!(state.phase(), Phase::ContentBuilt);
    // Model still loading: nothing to rotate yet
    assert!(!state.has_content());
    state.content_installed();
    assert!(state.has_content());
}

#[test]
fn one_loop_per_resource_set() {
    let mut state = LifecycleState::new();
    assert!(!state.loop_started(1));
    state.begin_init(800, 600);
    state.replace_content();
    assert!(state.loop_started(1));
    assert_eq!(state.phase(), Phase::Animating);
    assert!(!state.loop_started(2));
    assert_eq!(state.raf_handle(), Some(1));
}

#[test]
fn self_scheduling_loop_keeps_the_latest_handle() {
    let mut state = LifecycleState::new();
    // Stored handles are ignored outside the animating phase
    state.store_raf(9);
    assert_eq!(state.raf_handle(), None);

    state.begin_init(800, 600);
    state.replace_content();
    state.loop_started(1);
    state.store_raf(2);
    state.store_raf(3);
    assert_eq!(state.raf_handle(), Some(3));
}

#[test]
fn resize_is_allowed_only_while_live() {
    let mut state = LifecycleState::new();
    assert!(!state.resize_allowed());
    state.begin_init(800, 600);
    assert!(state.resize_allowed());
    state.replace_content();
    state.loop_started(1);
    assert!(state.resize_allowed());
    state.dispose();
    assert!(!state.resize_allowed());
}

#[test]
fn dispose_yields_the_full_unwind_once() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);
    state.mark_resize_listener();
    state.replace_content();
    state.content_installed();
    state.loop_started(7);

    let actions = state.dispose().unwrap();
    assert_eq!(actions.raf, Some(7));
    assert!(actions.remove_resize_listener);
    assert!(actions.destroy_content);
    assert_eq!(state.phase(), Phase::Disposed);
    assert!(!state.has_content());

    // Every later call is a no-op
    assert!(state.dispose().is_none());
    assert!(state.dispose().is_none());
    assert_eq!(state.phase(), Phase::Disposed);
}

#[test]
fn dispose_without_a_loop_has_nothing_to_cancel() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);
    let actions = state.dispose().unwrap();
    assert_eq!(actions.raf, None);
    assert!(!actions.remove_resize_listener);
    assert!(!actions.destroy_content);
}

#[test]
fn dispose_before_init_still_terminates() {
    let mut state = LifecycleState::new();
    assert!(state.dispose().is_some());
    assert!(!state.begin_init(800, 600));
    assert_eq!(state.phase(), Phase::Disposed);
}

#[test]
fn stale_async_results_are_discarded_after_dispose() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);
    state.replace_content();
    let generation = state.async_started();
    assert!(state.async_result_valid(generation));

    state.dispose();
    // The load finishes after teardown: its result must be dropped.
    assert!(!state.async_result_valid(generation));
}

#[test]
fn stale_async_results_are_discarded_after_a_rebuild() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);

    // Build #1 starts a slow load (say a GLB fetch)
    state.replace_content();
    let first_load = state.async_started();
    assert!(state.async_result_valid(first_load));

    // Build #2 replaces the content while that load is still in flight
    state.replace_content();
    // The old load must not splice the previous artwork over the new one
    assert!(!state.async_result_valid(first_load));

    // The rebuild's own load stays valid
    let second_load = state.async_started();
    state.content_installed();
    assert!(state.async_result_valid(second_load));
}

#[test]
fn async_results_stay_valid_across_unrelated_progress() {
    let mut state = LifecycleState::new();
    state.begin_init(800, 600);
    state.replace_content();
    let generation = state.async_started();
    state.loop_started(1);
    state.store_raf(2);
    assert!(state.async_result_valid(generation));
}
