//! Splits `key=value;` records out of a byte stream that arrives in irregular
//! chunks, the way a socket or a pipe would deliver it.
//!
//! Each chunk is queued on a [`BufferedStream`] as its own source. The reader
//! searches ahead for the next `;` without consuming anything, copies the
//! record out with a slice, and only then consumes it. A record that spans
//! several chunks needs no special handling.
//!
//! Run with
//!
//! ```bash
//! cargo run -p solidstream --example chunked_reader
//! ```

use solidstream::{BufferedStream, StreamError, StreamOptions};

fn main() -> Result<(), StreamError> {
    // In real life these would come from the network.
    let chunks: [&[u8]; 6] = [
        b"user=ada;la",
        b"ng=rust;edi",
        b"tion=2024",
        b";",
        b"mode=stream;tail=",
        b"unterminated",
    ];

    let options = StreamOptions {
        default_capacity: 8,
        hard_limit: Some(1024),
        ..StreamOptions::default()
    };
    let mut stream = BufferedStream::new(core::iter::empty(), options);
    for chunk in chunks {
        stream.extend(chunk.iter().copied());
    }

    loop {
        let end = match stream.index_of(&b';', 0, None) {
            Ok(end) => end,
            Err(StreamError::NotFound) => break,
            Err(err) => return Err(err),
        };
        let record: Vec<u8> = stream.collect_slice(..end, 1)?;
        let split = stream.index_of(&b'=', 0, Some(end)).unwrap_or(end);
        stream.consume(end + 1)?;

        let record = String::from_utf8_lossy(&record);
        let (key, value) = record.split_at(split);
        println!("{key:>8} -> {}", value.trim_start_matches('='));
    }

    let leftover: Vec<u8> = stream.finalize().collect();
    println!("leftover: {:?}", String::from_utf8_lossy(&leftover));
    Ok(())
}
