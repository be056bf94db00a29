//! The collector and the decompressor driven together, the way the command line tool does.

use crate::decoding::errors::{DecompressFileError, InflateError};
use crate::tests::deflate;
use crate::{decompress_file, output_path_for, InputCollector};
use std::fs;
use std::path::{Path, PathBuf};

fn run<S: Into<PathBuf>>(args: Vec<S>) -> Result<Vec<PathBuf>, DecompressFileError> {
    let mut produced = Vec::new();
    for input in InputCollector::from_args(args) {
        let output = output_path_for(&input);
        decompress_file(&input, &output)?;
        produced.push(output);
    }
    Ok(produced)
}

fn write_clog(path: &Path, content: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, deflate(content)).unwrap();
}

#[test]
fn six_levels_deep() {
    let dir = tempfile::tempdir().unwrap();
    let mut level = dir.path().to_path_buf();
    let mut inputs = Vec::new();
    for depth in 1..=6 {
        let input = level.join(format!("level{depth}.clog"));
        write_clog(&input, format!("level {depth}\n").as_bytes());
        inputs.push(input);
        level.push("deeper");
    }

    let produced = run(vec![dir.path()]).unwrap();
    assert_eq!(produced.len(), 5);
    for (depth, input) in inputs.iter().enumerate().take(5) {
        let output = output_path_for(input);
        assert_eq!(
            fs::read(&output).unwrap(),
            format!("level {}\n", depth + 1).as_bytes()
        );
    }
    assert!(!output_path_for(&inputs[5]).exists());
}

#[test]
fn non_matching_file_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("notes.txt");
    fs::write(&plain, deflate(b"not picked up")).unwrap();

    let produced = run(vec![plain]).unwrap();
    assert!(produced.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn truncated_input_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.clog");
    let later = dir.path().join("later.clog");

    let content = b"2021-01-01 00:00:00 something happened\n".repeat(5_000);
    let compressed = deflate(&content);
    fs::write(&broken, &compressed[..compressed.len() / 3]).unwrap();
    write_clog(&later, b"never reached");

    let err = run(vec![broken.clone(), later.clone()]).unwrap_err();
    assert!(
        matches!(err, DecompressFileError::Decode(InflateError::Truncated { .. })),
        "{err:?}"
    );

    // The partial output stays, the next input is never touched
    let partial = fs::read(output_path_for(&broken)).unwrap();
    assert!(partial.len() < content.len());
    assert_eq!(&partial[..], &content[..partial.len()]);
    assert!(!output_path_for(&later).exists());
}

#[test]
fn corrupt_input_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.clog");
    fs::write(&corrupt, [0xff; 64]).unwrap();

    let err = run(vec![corrupt.clone()]).unwrap_err();
    assert!(
        matches!(err, DecompressFileError::Decode(InflateError::Corrupt { .. })),
        "{err:?}"
    );
    assert!(output_path_for(&corrupt).exists());
}
