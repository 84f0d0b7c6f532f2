use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::time::Duration;

use rstest::*;

use crate::{BufferedStream, StreamError, StreamOptions};

fn small_opts() -> StreamOptions {
    StreamOptions {
        default_capacity: 10,
        growth_multiplier: 5,
        soft_limit: 20,
        hard_limit: None,
    }
}

// ─────────────────────────────────────────────────────────────────────
// 1. Extension policy
// ─────────────────────────────────────────────────────────────────────

#[test]
fn small_requests_round_up_to_default_capacity() {
    let mut stream = BufferedStream::new(0..1000, StreamOptions::default());
    assert_eq!(stream.ensure_length(5, None), Ok(true));
    assert_eq!(stream.buffered_len(), 200);
}

#[test]
fn satisfied_request_is_a_no_op() {
    let mut stream = BufferedStream::new(0..1000, StreamOptions::default());
    assert_eq!(stream.ensure_length(300, None), Ok(true));
    assert_eq!(stream.buffered_len(), 300);
    assert_eq!(stream.ensure_length(300, None), Ok(true));
    assert_eq!(stream.ensure_length(10, None), Ok(true));
    assert_eq!(stream.buffered_len(), 300);
}

#[test]
fn short_sources_report_insufficient_data_but_keep_elements() {
    let mut stream = BufferedStream::new(0..4, small_opts());
    stream.extend(10..13);
    assert_eq!(stream.ensure_length(50, None), Ok(false));
    assert_eq!(stream.buffered_len(), 7);
    assert_eq!(stream.pending_sources(), 0);
    assert_eq!(stream.finalize().collect::<Vec<_>>(), [0, 1, 2, 3, 10, 11, 12]);
}

#[test]
fn extension_pulls_across_sources_in_order() {
    let mut stream = BufferedStream::new(vec![1, 2], small_opts());
    stream.extend(vec![3]);
    stream.extend(4..100);
    assert_eq!(stream.ensure_length(12, None), Ok(true));
    assert_eq!(stream.buffered_len(), 12);
    assert_eq!(stream.pending_sources(), 1);
    assert_eq!(stream.get(11), Ok(&12));
}

#[test]
fn extension_does_not_pull_past_the_target() {
    let mut pulled = 0;
    {
        let mut stream = BufferedStream::new((0..1000).inspect(|_| pulled += 1), small_opts());
        assert_eq!(stream.ensure_length(15, None), Ok(true));
    }
    assert_eq!(pulled, 15);
}

#[test]
fn point_reads_amortize_by_growth_multiplier() {
    let mut stream = BufferedStream::new(0..1000, small_opts());
    assert_eq!(stream.get(3), Ok(&3));
    assert_eq!(stream.buffered_len(), 15);
}

#[test]
fn soft_limit_narrows_to_the_true_minimum() {
    let mut stream = BufferedStream::new(0..1000, small_opts());
    // 50 * 5 would pull 250 elements, far past the soft limit of 20.
    assert_eq!(stream.get(50), Ok(&50));
    assert_eq!(stream.buffered_len(), 51);
}

#[test]
fn growth_multiplier_of_one_still_reaches_the_index() {
    let mut stream = BufferedStream::new(
        0..1000,
        StreamOptions {
            default_capacity: 1,
            growth_multiplier: 1,
            ..StreamOptions::default()
        },
    );
    assert_eq!(stream.get(7), Ok(&7));
    assert_eq!(stream.buffered_len(), 8);
}

#[rstest]
#[case::within_limit(50, Ok(50))]
#[case::far_past_limit(1000, Err(StreamError::RequestTooLarge { needed: 1001, hard_limit: 100 }))]
#[case::minimum_past_limit(150, Err(StreamError::RequestTooLarge { needed: 151, hard_limit: 100 }))]
#[case::exact_limit(99, Ok(99))]
fn hard_limit_is_absolute(#[case] index: usize, #[case] expected: Result<u32, StreamError>) {
    let mut stream = BufferedStream::new(
        0..10_000u32,
        StreamOptions {
            hard_limit: Some(100),
            ..small_opts()
        },
    );
    assert_eq!(stream.get(index).copied(), expected);
}

#[test]
fn hard_limit_failure_pulls_nothing() {
    let mut stream = BufferedStream::new(
        0..10_000,
        StreamOptions {
            hard_limit: Some(100),
            ..small_opts()
        },
    );
    assert!(stream.ensure_length(500, None).is_err());
    assert_eq!(stream.buffered_len(), 0);
    assert_eq!(stream.peek(), Ok(&0));
}

#[test]
fn read_past_the_end_is_out_of_range() {
    let mut stream = BufferedStream::new(0..5, small_opts());
    assert_eq!(
        stream.get(5),
        Err(StreamError::IndexOutOfRange {
            index: 5,
            available: 5
        })
    );
    assert_eq!(stream.get(4), Ok(&4));
}

// ─────────────────────────────────────────────────────────────────────
// 2. Mutation
// ─────────────────────────────────────────────────────────────────────

#[test]
fn consume_drops_the_prefix() {
    let mut stream = BufferedStream::new(0..300, StreamOptions::default());
    assert_eq!(stream.get(20), Ok(&20));
    assert_eq!(stream.consume(10), Ok(10));
    assert_eq!(stream.peek(), Ok(&10));
    assert_eq!(stream.get(10), Ok(&20));
}

#[test]
fn consume_past_the_end_removes_what_exists() {
    let mut stream = BufferedStream::new(0..5, small_opts());
    assert_eq!(stream.consume(8), Ok(5));
    assert!(stream.is_exhausted());
}

#[test]
fn insert_shifts_later_elements() {
    let mut stream = BufferedStream::new(
        (0..300).map(|n: i32| n.to_string()),
        StreamOptions::default(),
    );
    stream.insert(5, String::from("inserted")).unwrap();
    assert_eq!(stream.get(4).map(String::as_str), Ok("4"));
    assert_eq!(stream.get(5).map(String::as_str), Ok("inserted"));
    assert_eq!(stream.get(6).map(String::as_str), Ok("5"));
}

#[test]
fn insert_at_the_end_of_a_drained_stream() {
    let mut stream = BufferedStream::new(0..3, small_opts());
    assert_eq!(stream.insert(3, 99), Ok(()));
    assert_eq!(
        stream.insert(9, 100),
        Err(StreamError::IndexOutOfRange {
            index: 9,
            available: 4
        })
    );
    assert_eq!(stream.finalize().collect::<Vec<_>>(), [0, 1, 2, 99]);
}

#[test]
fn append_lands_after_every_source() {
    let mut stream = BufferedStream::new(0..3, small_opts());
    stream.append(42);
    stream.extend(3..5);
    stream.append(43);
    assert_eq!(stream.finalize().collect::<Vec<_>>(), [0, 1, 2, 42, 3, 4, 43]);
}

#[test]
fn extend_front_goes_before_buffered_elements() {
    let mut stream = BufferedStream::new(0..5, small_opts());
    assert_eq!(stream.get(2), Ok(&2));
    stream.extend_front(vec![100, 101]);
    assert_eq!(stream.peek(), Ok(&100));
    assert_eq!(stream.get(3), Ok(&1));
    assert_eq!(stream.finalize().collect::<Vec<_>>(), [100, 101, 0, 1, 2, 3, 4]);
}

// ─────────────────────────────────────────────────────────────────────
// 3. Search
// ─────────────────────────────────────────────────────────────────────

#[test]
fn index_of_extends_until_found() {
    let mut stream = BufferedStream::new(0..1000, small_opts());
    assert_eq!(stream.index_of(&95, 0, None), Ok(95));
    assert!(stream.buffered_len() <= 100);
}

#[test]
fn index_of_drained_stream_is_not_found() {
    let mut stream = BufferedStream::new(0..30, small_opts());
    stream.extend(40..50);
    assert_eq!(stream.index_of(&35, 0, None), Err(StreamError::NotFound));
    assert_eq!(stream.index_of(&45, 0, None), Ok(35));
}

#[test]
fn index_of_respects_start_and_stop() {
    let mut stream = BufferedStream::new([1, 2, 3, 1, 2, 3, 1], small_opts());
    assert_eq!(stream.index_of(&1, 0, None), Ok(0));
    assert_eq!(stream.index_of(&1, 1, None), Ok(3));
    assert_eq!(stream.index_of(&1, 4, None), Ok(6));
    assert_eq!(stream.index_of(&3, 3, Some(5)), Err(StreamError::NotFound));
    assert_eq!(stream.index_of(&3, 3, Some(6)), Ok(5));
}

#[test]
fn index_of_stop_beyond_buffer_keeps_extending() {
    let mut stream = BufferedStream::new(0..1000, small_opts());
    assert_eq!(stream.index_of(&57, 0, Some(60)), Ok(57));
    assert_eq!(stream.index_of(&700, 0, Some(60)), Err(StreamError::NotFound));
}

#[test]
fn index_of_matches_nan() {
    let mut stream = BufferedStream::new((0..300).map(f64::from), StreamOptions::default());
    stream.insert(5, f64::NAN).unwrap();
    assert_eq!(stream.index_of(&f64::NAN, 0, None), Ok(5));
    assert_eq!(stream.index_of(&5.0, 0, None), Ok(6));
}

#[test]
fn index_of_nan_without_nan_is_not_found() {
    let mut stream = BufferedStream::new((0..30).map(f64::from), small_opts());
    assert_eq!(stream.index_of(&f64::NAN, 0, None), Err(StreamError::NotFound));
}

#[test]
fn find_index_uses_predicate() {
    let mut stream = BufferedStream::new(1..1000, small_opts());
    assert_eq!(stream.find_index(|n| n % 37 == 0, 0, None), Ok(36));
    assert_eq!(stream.find_index(|n| n % 37 == 0, 37, None), Ok(73));
}

// ─────────────────────────────────────────────────────────────────────
// 4. Iteration and finalize
// ─────────────────────────────────────────────────────────────────────

#[rstest]
#[timeout(Duration::from_millis(250))]
fn consuming_iteration_crosses_sources() {
    let mut stream = BufferedStream::new(0..3, small_opts());
    stream.extend(core::iter::empty());
    stream.extend(3..6);
    assert_eq!(stream.get(1), Ok(&1));
    let all: Vec<_> = stream.by_ref().collect();
    assert_eq!(all, [0, 1, 2, 3, 4, 5]);

    stream.append(6);
    assert_eq!(stream.next(), Some(6));
    assert_eq!(stream.next(), None);
}

#[test]
fn is_exhausted_does_not_lose_elements() {
    let mut stream = BufferedStream::new(core::iter::empty(), small_opts());
    stream.extend(core::iter::empty());
    stream.extend(vec![1, 2]);
    assert!(!stream.is_exhausted());
    assert_eq!(stream.pending_sources(), 1);
    assert_eq!(stream.buffered_len(), 0);
    assert_eq!(stream.get(1), Ok(&2));
    assert_eq!(stream.consume(2), Ok(2));
    assert!(stream.is_exhausted());
}

#[test]
fn finalize_chains_buffer_and_pending() {
    let mut stream = BufferedStream::new(0..20, small_opts());
    stream.extend(100..103);
    assert_eq!(stream.get(2), Ok(&2));
    assert_eq!(stream.consume(5), Ok(5));
    let rest: Vec<_> = stream.finalize().collect();
    let expected: Vec<_> = (5..20).chain(100..103).collect();
    assert_eq!(rest, expected);
}

#[test]
fn debug_shows_buffer_and_queue_length() {
    let mut stream = BufferedStream::new(0..3, StreamOptions::default());
    stream.extend(3..4);
    assert_eq!(stream.ensure_length(2, None), Ok(false));
    let rendered = alloc::format!("{stream:?}");
    assert!(rendered.starts_with("BufferedStream { buffer: [0, 1, 2, 3], pending: 0"));
}
