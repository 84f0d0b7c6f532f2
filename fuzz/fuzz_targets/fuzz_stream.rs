#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use solidstream::{BufferedStream, StreamError, StreamOptions};

#[derive(Debug, Arbitrary)]
enum Op {
    Extend(Vec<u8>),
    ExtendFront(Vec<u8>),
    Append(u8),
    Insert(u8, u8),
    Get(u16),
    Consume(u8),
    IndexOf(u8, u8),
    Slice { start: u8, len: u8, step: u8 },
    SliceConsuming { start: u8, len: u8, step: u8 },
    Next,
    IsExhausted,
}

#[derive(Debug, Arbitrary)]
struct Input {
    first: Vec<u8>,
    default_capacity: u8,
    growth_multiplier: u8,
    soft_limit: u8,
    ops: Vec<Op>,
}

/// Replays `input` against a `BufferedStream` and a plain `Vec` holding the
/// same logical sequence; every observable result must agree.
fn run(input: Input) {
    let options = StreamOptions {
        default_capacity: usize::from(input.default_capacity),
        growth_multiplier: usize::from(input.growth_multiplier),
        soft_limit: usize::from(input.soft_limit),
        hard_limit: None,
    };
    let mut model = input.first.clone();
    let mut stream = BufferedStream::new(input.first, options);

    for op in input.ops {
        match op {
            Op::Extend(values) => {
                model.extend_from_slice(&values);
                stream.extend(values);
            }
            Op::ExtendFront(values) => {
                model.splice(0..0, values.iter().copied());
                stream.extend_front(values);
            }
            Op::Append(value) => {
                model.push(value);
                stream.append(value);
            }
            Op::Insert(index, value) => {
                let index = usize::from(index);
                let result = stream.insert(index, value);
                if index <= model.len() {
                    assert_eq!(result, Ok(()));
                    model.insert(index, value);
                } else {
                    assert!(matches!(result, Err(StreamError::IndexOutOfRange { .. })));
                }
            }
            Op::Get(index) => {
                let index = usize::from(index);
                assert_eq!(stream.get(index).ok(), model.get(index));
            }
            Op::Consume(n) => {
                let n = usize::from(n);
                let removed = stream.consume(n).expect("no hard limit");
                assert_eq!(removed, n.min(model.len()));
                model.drain(..removed);
            }
            Op::IndexOf(value, start) => {
                let start = usize::from(start);
                let expected = model
                    .iter()
                    .skip(start)
                    .position(|&v| v == value)
                    .map(|offset| start + offset)
                    .ok_or(StreamError::NotFound);
                assert_eq!(stream.index_of(&value, start, None), expected);
            }
            Op::Slice { start, len, step } => {
                let (start, stop, step) = bounds(start, len, step);
                let expected = stepped(&model, start, stop, step);
                let sliced: Vec<u8> = stream.collect_slice(start..stop, step).expect("no hard limit");
                assert_eq!(sliced, expected);
            }
            Op::SliceConsuming { start, len, step } => {
                let (start, stop, step) = bounds(start, len, step);
                let expected = stepped(&model, start, stop, step);
                let sliced: Vec<u8> = stream
                    .slice_consuming(start..stop, step)
                    .collect::<Result<_, _>>()
                    .expect("no hard limit");
                assert_eq!(sliced, expected);
                if !sliced.is_empty() {
                    let removed = start + (sliced.len() - 1) * step + 1;
                    model.drain(..removed);
                }
            }
            Op::Next => {
                let expected = (!model.is_empty()).then(|| model.remove(0));
                assert_eq!(stream.next(), expected);
            }
            Op::IsExhausted => {
                assert_eq!(stream.is_exhausted(), model.is_empty());
            }
        }
    }

    assert_eq!(stream.finalize().collect::<Vec<_>>(), model);
}

fn bounds(start: u8, len: u8, step: u8) -> (usize, usize, usize) {
    let start = usize::from(start);
    (start, start + usize::from(len), 1 + usize::from(step % 16))
}

fn stepped(model: &[u8], start: usize, stop: usize, step: usize) -> Vec<u8> {
    model
        .iter()
        .copied()
        .skip(start)
        .take(stop - start)
        .step_by(step)
        .collect()
}

fuzz_target!(|input: Input| run(input));
