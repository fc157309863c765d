//! Tests for word wrapping and the history buffer.

use super::*;
use crate::model::EntryKind;
use chrono::{Local, TimeZone};

fn wrap(text: &str, width: usize) -> Vec<String> {
    wrap_entry(text, width).expect("wrap should not violate invariants")
}

// ===== wrap_entry =====

#[test]
fn greedy_fill_keeps_trailing_space_on_full_lines() {
    assert_eq!(wrap("the quick brown fox", 10), vec!["the quick ", "brown fox"]);
}

#[test]
fn oversized_token_is_chunked() {
    assert_eq!(wrap("superlongword", 5), vec!["super", "longw", "ord"]);
}

#[test]
fn filling_continues_after_partial_chunk() {
    assert_eq!(wrap("superlongword a", 6), vec!["superl", "ongwor", "d a"]);
}

#[test]
fn oversized_token_flushes_pending_line() {
    assert_eq!(wrap("hi abcdefgh", 4), vec!["hi ", "abcd", "efgh"]);
}

#[test]
fn token_exactly_width_fills_its_own_line() {
    assert_eq!(wrap("abcde fg", 5), vec!["abcde", "fg"]);
}

#[test]
fn short_text_is_one_line() {
    assert_eq!(wrap("hello", 80), vec!["hello"]);
}

#[test]
fn empty_text_is_one_empty_line() {
    assert_eq!(wrap("", 10), vec![""]);
}

#[test]
fn zero_width_produces_nothing() {
    assert!(wrap("anything at all", 0).is_empty());
}

#[test]
fn width_one_puts_each_char_on_a_line() {
    assert_eq!(wrap("ab c", 1), vec!["a", "b", "c"]);
}

#[test]
fn consecutive_spaces_are_preserved_as_empty_tokens() {
    assert_eq!(wrap("a  b", 10), vec!["a  b"]);
}

#[test]
fn lengths_are_counted_in_characters() {
    // four 2-byte chars fit a width of 4
    assert_eq!(wrap("\u{e9}\u{e9}\u{e9}\u{e9}", 4), vec!["\u{e9}\u{e9}\u{e9}\u{e9}"]);
}

#[test]
fn no_line_exceeds_width() {
    let text = "--- Welcome to the light transceiver client, have a nice session ---";
    for width in 1..40 {
        for line in wrap(text, width) {
            assert!(
                line.chars().count() <= width,
                "{:?} exceeds width {}",
                line,
                width
            );
        }
    }
}

#[test]
fn joined_lines_reconstruct_words() {
    let text = "the quick brown fox jumps over the lazy dog";
    let lines = wrap(text, 12);
    let joined: String = lines.concat();
    let words: Vec<&str> = joined.split_whitespace().collect();
    assert_eq!(words, text.split(' ').collect::<Vec<_>>());
}

// ===== wrap_all =====

fn fixed_entry(kind: EntryKind, body: &str) -> LogicalEntry {
    let ts = Local.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
    LogicalEntry::at(kind, body, ts)
}

#[test]
fn wrap_all_tags_lines_with_entry_index() {
    let entries = vec![
        fixed_entry(EntryKind::System, "Welcome"),
        fixed_entry(EntryKind::User, "hello there"),
    ];
    let lines = wrap_all(&entries, 13).unwrap();

    assert_eq!(
        lines,
        vec![
            DisplayLine {
                entry: 0,
                text: "--- Welcome ".to_string()
            },
            DisplayLine {
                entry: 0,
                text: "---".to_string()
            },
            DisplayLine {
                entry: 1,
                text: "[12:30] You: ".to_string()
            },
            DisplayLine {
                entry: 1,
                text: "hello there".to_string()
            },
        ]
    );
}

// ===== LineBuffer =====

#[test]
fn append_regenerates_lines() {
    let mut buffer = LineBuffer::new(80);
    buffer.append(fixed_entry(EntryKind::System, "one")).unwrap();
    buffer.append(fixed_entry(EntryKind::System, "two")).unwrap();

    assert_eq!(buffer.entries().len(), 2);
    assert_eq!(buffer.line_count(), 2);
    assert_eq!(buffer.lines()[1].text, "--- two ---");
}

#[test]
fn rewrap_recomputes_from_raw_entries() {
    let mut buffer = LineBuffer::new(80);
    buffer
        .append(fixed_entry(EntryKind::System, "the quick brown fox"))
        .unwrap();
    assert_eq!(buffer.line_count(), 1);

    buffer.rewrap(10).unwrap();
    let texts: Vec<&str> = buffer.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["--- the ", "quick ", "brown fox ", "---"]);

    buffer.rewrap(80).unwrap();
    assert_eq!(buffer.line_count(), 1);
    assert_eq!(buffer.lines()[0].text, "--- the quick brown fox ---");
}

#[test]
fn rewrap_at_same_width_is_idempotent() {
    let mut buffer = LineBuffer::new(7);
    buffer
        .append(fixed_entry(EntryKind::Error, "Unknown command: /frobnicate"))
        .unwrap();
    let first = buffer.lines().to_vec();
    buffer.rewrap(7).unwrap();
    assert_eq!(buffer.lines(), first.as_slice());
}

#[test]
fn visible_window_is_clipped() {
    let mut buffer = LineBuffer::new(80);
    for i in 0..5 {
        buffer
            .append(fixed_entry(EntryKind::System, &format!("line {}", i)))
            .unwrap();
    }
    assert_eq!(buffer.visible(3, 10).len(), 2);
    assert_eq!(buffer.visible(3, 10)[0].text, "--- line 3 ---");
    assert!(buffer.visible(9, 10).is_empty());
}
