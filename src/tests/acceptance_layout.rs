//! Acceptance tests for screen layout, resize and scrolling
//!
//! Test scenarios:
//! 1. History, separator and text box occupy their rows
//! 2. Resizing rewraps history and moves the text box
//! 3. Keyboard and mouse scrolling of the history
//! 4. New lines follow the bottom only when already there

use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

fn rows(rendered: &str) -> Vec<&str> {
    rendered.lines().collect()
}

/// Harness with enough history to scroll.
fn harness_with_history(notices: usize) -> AcceptanceTestHarness {
    let mut harness = AcceptanceTestHarness::new().unwrap();
    for _ in 0..notices {
        harness.submit("/showfps");
    }
    harness
}

fn max_offset(harness: &AcceptanceTestHarness) -> usize {
    let total = harness.state().history().line_count();
    total.saturating_sub(harness.state().geometry().chatlog_height())
}

// ===== Layout =====

#[test]
fn standard_terminal_layout() {
    let mut harness = AcceptanceTestHarness::new().unwrap();
    harness.type_text("draft");

    let rendered = harness.render_to_string();
    let rows = rows(&rendered);

    // 72-wide chat: two text box rows, separator at row 21
    assert!(rows[0].starts_with("--- Welcome"));
    assert!(rows[21].starts_with("__ 10 fps | strobe interleaved | mem0 _"));
    assert!(rows[22].starts_with("draft"));
}

#[test]
fn status_shows_showfps_flag() {
    let mut harness = AcceptanceTestHarness::new().unwrap();
    harness.submit("/showfps");

    let rendered = harness.render_to_string();

    assert!(rows(&rendered)[21].contains("| mem0 | showfps"));
}

#[test]
fn cursor_is_placed_after_typed_text() {
    let mut harness = AcceptanceTestHarness::new().unwrap();
    harness.type_text("abc");
    harness.render_to_string();

    assert_eq!(harness.state().textbox().cursor(), (22, 3));
}

// ===== Resize =====

#[test]
fn resize_rewraps_history_to_new_width() {
    let mut harness = AcceptanceTestHarness::new().unwrap();
    harness.submit("a message long enough to need wrapping on a narrow screen");

    harness.resize(30, 40);

    // 30 columns minus the 8-column strobe panel
    let width = harness.state().geometry().width();
    assert_eq!(width, 22);
    for line in harness.history_lines() {
        assert!(line.chars().count() <= width, "{:?} exceeds {}", line, width);
    }
    assert!(harness.history_lines().len() > 6);
}

#[test]
fn resize_moves_text_box_and_keeps_cursor_index() {
    let mut harness = AcceptanceTestHarness::new().unwrap();
    let text: String = "abcdefghij".repeat(5);
    harness.type_text(&text);
    let index = harness.state().textbox().index();

    harness.resize(28, 30);

    // 20-wide chat: 7 text box rows, separator at row 22
    let geometry = harness.state().geometry();
    assert_eq!(geometry.textbox_height(), 7);
    assert_eq!(geometry.separator_row(), 22);
    assert_eq!(harness.state().textbox().index(), index);
    assert_eq!(harness.state().textbox().cursor(), (23 + 2, 10));
    assert_eq!(harness.state().textbox().text(), text);
}

#[test]
fn resize_keeps_bottom_pinned() {
    let mut harness = harness_with_history(30);
    assert_eq!(harness.state().scroll_offset(), max_offset(&harness));

    harness.resize(80, 30);

    assert_eq!(harness.state().scroll_offset(), max_offset(&harness));
}

#[test]
fn resize_renders_without_panic_when_tiny() {
    let mut harness = harness_with_history(5);
    harness.resize(6, 3);
    let _ = harness.render_to_string();
    harness.resize(80, 24);
    assert!(harness.render_to_string().contains("Welcome"));
}

// ===== Scrolling =====

#[test]
fn keyboard_scroll_moves_one_line() {
    let mut harness = harness_with_history(30);
    let bottom = max_offset(&harness);

    harness.send_key(KeyCode::Up);
    assert_eq!(harness.state().scroll_offset(), bottom - 1);

    harness.send_key(KeyCode::Down);
    assert_eq!(harness.state().scroll_offset(), bottom);
}

#[test]
fn scroll_is_clamped_at_both_ends() {
    let mut harness = harness_with_history(30);

    for _ in 0..5 {
        harness.send_key(KeyCode::PageUp);
    }
    assert_eq!(harness.state().scroll_offset(), 0);

    for _ in 0..5 {
        harness.send_key(KeyCode::PageDown);
    }
    assert_eq!(harness.state().scroll_offset(), max_offset(&harness));
}

#[test]
fn mouse_wheel_scrolls_three_lines() {
    let mut harness = harness_with_history(30);
    let bottom = max_offset(&harness);

    harness.scroll_wheel(true);
    assert_eq!(harness.state().scroll_offset(), bottom - 3);

    harness.scroll_wheel(false);
    assert_eq!(harness.state().scroll_offset(), bottom);
}

#[test]
fn new_lines_do_not_move_a_scrolled_view() {
    let mut harness = harness_with_history(30);
    harness.send_key(KeyCode::PageUp);
    let offset = harness.state().scroll_offset();

    harness.submit("/showfps");

    assert_eq!(harness.state().scroll_offset(), offset);
}

#[test]
fn new_lines_follow_bottom() {
    let mut harness = harness_with_history(30);

    harness.submit("/showfps");

    assert_eq!(harness.state().scroll_offset(), max_offset(&harness));
}

#[test]
fn end_key_returns_to_bottom() {
    let mut harness = harness_with_history(30);
    harness.send_key(KeyCode::PageUp);

    harness.send_key(KeyCode::End);

    assert_eq!(harness.state().scroll_offset(), max_offset(&harness));
}

#[test]
fn scrolled_view_renders_older_lines() {
    let mut harness = harness_with_history(30);
    for _ in 0..5 {
        harness.send_key(KeyCode::PageUp);
    }

    let rendered = harness.render_to_string();

    assert!(rows(&rendered)[0].starts_with("--- Welcome"));
}
