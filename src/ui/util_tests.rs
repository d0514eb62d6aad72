#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_yen ────────────────────────────────────────────────

#[test]
fn test_format_yen_small() {
    assert_eq!(format_yen(0), "¥0");
    assert_eq!(format_yen(999), "¥999");
}

#[test]
fn test_format_yen_thousands() {
    assert_eq!(format_yen(1_000), "¥1,000");
    assert_eq!(format_yen(100_000), "¥100,000");
    assert_eq!(format_yen(1_234_567), "¥1,234,567");
}

#[test]
fn test_format_yen_negative() {
    assert_eq!(format_yen(-25_000), "-¥25,000");
    assert_eq!(format_yen(-1), "-¥1");
}

#[test]
fn test_format_yen_extreme() {
    assert_eq!(format_yen(i64::MIN), "-¥9,223,372,036,854,775,808");
}

// ── format_rate ───────────────────────────────────────────────

#[test]
fn test_format_rate() {
    assert_eq!(format_rate(dec!(40)), "40.0%");
    assert_eq!(format_rate(dec!(33.3)), "33.3%");
    assert_eq!(format_rate(dec!(0)), "0.0%");
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain() {
    assert_eq!(parse_amount("40000"), Some(40_000));
    assert_eq!(parse_amount(" 7 "), Some(7));
}

#[test]
fn test_parse_amount_decorated() {
    assert_eq!(parse_amount("¥100,000"), Some(100_000));
    assert_eq!(parse_amount("100_000"), Some(100_000));
}

#[test]
fn test_parse_amount_negative_passes_through() {
    assert_eq!(parse_amount("-500"), Some(-500));
}

#[test]
fn test_parse_amount_rejects_garbage() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("¥"), None);
    assert_eq!(parse_amount("12.5"), None);
    assert_eq!(parse_amount("lots"), None);
}

// ── split_trailing_amount ─────────────────────────────────────

#[test]
fn test_split_name_with_spaces() {
    assert_eq!(
        split_trailing_amount("Campaign X 100000"),
        Some(("Campaign X", 100_000))
    );
}

#[test]
fn test_split_single_word_name() {
    assert_eq!(split_trailing_amount("Ads ¥5,000"), Some(("Ads", 5_000)));
}

#[test]
fn test_split_missing_parts() {
    assert_eq!(split_trailing_amount(""), None);
    assert_eq!(split_trailing_amount("100000"), None);
    assert_eq!(split_trailing_amount("Campaign X"), None);
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("新規キャンペーン", 4), "新規キ…");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_fill() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
    assert_eq!(progress_bar(1.0, 4), "[████]");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(3.0, 4), "[████]");
    assert_eq!(progress_bar(-1.0, 4), "[░░░░]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
