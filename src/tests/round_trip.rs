use crate::tests::deflate;
use crate::{decompress_file, output_path_for, StreamingDecoder, IO_BUFFER_SIZE};
use rand::{Rng, SeedableRng};
use std::fs;
use std::io::Read;

/// Log-like content: runs of text with random bytes sprinkled in, so the
/// deflate stream mixes literals and matches.
fn payload(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let words: [&[u8]; 5] = [b"INFO ", b"connection ", b"established ", b"42\n", b"WARN "];
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        if rng.gen_bool(0.2) {
            data.push(rng.gen());
        } else {
            data.extend_from_slice(words[rng.gen_range(0..words.len())]);
        }
    }
    data.truncate(len);
    data
}

#[test]
fn file_round_trip_around_chunk_size() {
    let dir = tempfile::tempdir().unwrap();
    let sizes = [
        0,
        1,
        IO_BUFFER_SIZE - 1,
        IO_BUFFER_SIZE,
        IO_BUFFER_SIZE + 1,
        1_000_000,
    ];

    for (seed, size) in sizes.into_iter().enumerate() {
        let data = payload(size, seed as u64);
        let input = dir.path().join(format!("sample_{size}.clog"));
        fs::write(&input, deflate(&data)).unwrap();

        let output = output_path_for(&input);
        let written = decompress_file(&input, &output).unwrap();
        assert_eq!(written, size as u64);
        assert_eq!(fs::read(&output).unwrap(), data, "size {size}");
    }
}

#[test]
fn incompressible_input() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let data: Vec<u8> = (0..300_000).map(|_| rng.gen()).collect();
    let compressed = deflate(&data);

    let mut result = Vec::new();
    StreamingDecoder::new(compressed.as_slice())
        .read_to_end(&mut result)
        .unwrap();
    assert_eq!(result, data);
}

#[test]
fn empty_clog_file_gives_empty_log() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.clog");
    fs::write(&input, b"").unwrap();

    let output = output_path_for(&input);
    assert_eq!(decompress_file(&input, &output).unwrap(), 0);
    assert_eq!(fs::read(&output).unwrap(), b"");
}
