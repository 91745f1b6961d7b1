//! Full-screen rendering tests

use super::{view, ViewCache};
use crate::test_utils::{create_test_state, TestTerminal};
use crate::widgets::{evidence, past_blogs};
use blogsmith_app::state::LoadingOverlay;
use blogsmith_app::{AppState, FocusArea, ResultTab};
use blogsmith_client::test_utils::{sample_generation_result, sample_past_blog};

fn render_screen(term: &mut TestTerminal, state: &mut AppState, cache: &mut ViewCache) {
    term.draw_with(|frame| view(frame, state, cache));
}

fn with_result(evidence: usize) -> AppState {
    let mut state = create_test_state();
    state.view.submit().expect("submit");
    state.set_result(sample_generation_result("Async Rust", evidence));
    state.view.succeed().expect("succeed");
    state
}

#[test]
fn test_welcome_screen() {
    let mut state = create_test_state();
    let mut term = TestTerminal::new();
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    assert!(term.buffer_contains("Blogsmith"));
    assert!(term.buffer_contains("Topic"));
    assert!(term.buffer_contains(past_blogs::EMPTY_MESSAGE));
    assert!(term.buffer_contains("Write a blog post"));
    assert!(term.buffer_contains("Ready"));
}

#[test]
fn test_past_blogs_listed_in_sidebar() {
    let mut state = create_test_state();
    state
        .past_blogs
        .replace(vec![sample_past_blog("rust.md", "Rust Tips")]);
    let mut term = TestTerminal::new();
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    assert!(term.buffer_contains("Rust Tips"));
    assert!(!term.buffer_contains(past_blogs::EMPTY_MESSAGE));
}

#[test]
fn test_result_opens_on_plan_tab() {
    let mut state = with_result(2);
    let mut term = TestTerminal::new();
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    assert!(term.buffer_contains("1 Plan (3)"));
    assert!(term.buffer_contains("#1 Section 1"));
    assert!(term.buffer_contains("Result"));
}

#[test]
fn test_evidence_tab() {
    let mut state = with_result(2);
    state.view.select_tab(ResultTab::Evidence);
    let mut term = TestTerminal::with_size(140, 30);
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    assert!(term.buffer_contains("Source 1"));
    assert!(term.buffer_contains("https://example.com/2"));
    assert_eq!(state.scroll_for(ResultTab::Evidence).content_height, 2);
}

#[test]
fn test_empty_evidence_message() {
    let mut state = with_result(0);
    state.view.select_tab(ResultTab::Evidence);
    let mut term = TestTerminal::with_size(140, 30);
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    let first_sentence = evidence::EMPTY_MESSAGE
        .split_inclusive('.')
        .next()
        .unwrap_or_default();
    assert!(term.buffer_contains(first_sentence));
}

#[test]
fn test_preview_renders_markdown_and_caches() {
    let mut state = with_result(0);
    state.view.select_tab(ResultTab::Preview);
    let mut cache = ViewCache::new();
    let mut term = TestTerminal::new();
    render_screen(&mut term, &mut state, &mut cache);

    assert!(term.buffer_contains("# Async Rust"));
    assert!(term.buffer_contains("Intro paragraph."));
    let first_revision = cache.preview.as_ref().map(|(rev, _)| *rev);
    assert_eq!(first_revision, Some(state.result_revision()));

    // A new result invalidates the cached lines
    state.set_result(sample_generation_result("Second Post", 0));
    render_screen(&mut term, &mut state, &mut cache);
    assert!(term.buffer_contains("# Second Post"));
    assert_ne!(cache.preview.as_ref().map(|(rev, _)| *rev), first_revision);
}

#[test]
fn test_scroll_bounds_are_clamped() {
    let mut state = with_result(0);
    state.focus = FocusArea::Content;
    let mut term = TestTerminal::with_size(80, 12);
    let mut cache = ViewCache::new();
    render_screen(&mut term, &mut state, &mut cache);

    let scroll = *state.scroll_for(ResultTab::Plan);
    assert!(scroll.content_height > scroll.viewport_height);

    state.scroll_for(ResultTab::Plan).offset = u16::MAX;
    render_screen(&mut term, &mut state, &mut cache);
    let scroll = *state.scroll_for(ResultTab::Plan);
    assert_eq!(
        scroll.offset,
        scroll.content_height - scroll.viewport_height
    );
    // Scrollbar end marker is visible when content overflows
    assert!(term.buffer_contains("▼"));
}

#[test]
fn test_error_screen() {
    let mut state = create_test_state();
    state.view.submit().expect("submit");
    state.view.fail("Network error: timed out").expect("fail");
    let mut term = TestTerminal::new();
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    assert!(term.buffer_contains("Generation failed"));
    assert!(term.buffer_contains("Network error: timed out"));
    assert!(term.buffer_contains("Error"));
}

#[test]
fn test_loading_overlay_drawn_on_top() {
    let mut state = create_test_state();
    state.view.submit().expect("submit");
    state.overlay = Some(LoadingOverlay::generation("Async Rust"));
    let mut term = TestTerminal::new();
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    assert!(term.buffer_contains("Writing about Async Rust"));
    assert!(term.buffer_contains("Working"));
}

#[test]
fn test_compact_terminal_does_not_panic() {
    let mut state = with_result(3);
    state.view.select_tab(ResultTab::Preview);
    let mut term = TestTerminal::compact();
    render_screen(&mut term, &mut state, &mut ViewCache::new());

    let mut tiny = TestTerminal::with_size(10, 4);
    render_screen(&mut tiny, &mut state, &mut ViewCache::new());
}
