//! Decompressing whole `.clog` files.

use crate::decoding::errors::{DecompressFileError, InflateError};
use crate::decoding::inflate_decoder::InflateDecoder;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Compressed input is read and inflated in chunks of this size.
pub const IO_BUFFER_SIZE: usize = 4096;

/// Open `input` for reading, then create (or truncate) `output` for writing.
///
/// Nothing is created when the input can not be opened.
pub fn open_files(input: &Path, output: &Path) -> Result<(File, File), DecompressFileError> {
    let source = File::open(input).map_err(|source| DecompressFileError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let sink = File::create(output).map_err(|source| DecompressFileError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })?;
    Ok((source, sink))
}

/// Inflate the raw-deflate stream read from `source` into `sink`.
///
/// The source is consumed in [`IO_BUFFER_SIZE`] chunks and decoded bytes are
/// written as soon as inflate yields them. Returns the amount of decompressed
/// bytes. On error, whatever was already written stays written.
pub fn decompress_stream<R: Read, W: Write>(
    mut source: R,
    mut sink: W,
) -> Result<u64, DecompressFileError> {
    let mut decoder = InflateDecoder::new();
    let mut buf = [0u8; IO_BUFFER_SIZE];

    loop {
        let read = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecompressFileError::Read(e)),
        };
        decoder.decode_chunk(&buf[..read], &mut sink)?;
    }
    decoder.finish(&mut sink)?;
    sink.flush().map_err(InflateError::from)?;

    if decoder.trailing_bytes() > 0 {
        warn!(
            trailing = decoder.trailing_bytes(),
            "ignoring bytes after the end of the deflate stream"
        );
    }
    debug!(
        compressed = decoder.bytes_read(),
        decompressed = decoder.bytes_written(),
        "deflate stream complete"
    );
    Ok(decoder.bytes_written())
}

/// Decompress the `.clog` file at `input` into `output`.
///
/// `output` is created or truncated and receives every inflated block as soon
/// as it is decoded. If the input turns out to be corrupt or truncated, the
/// partially written output is left on disk.
pub fn decompress_file(input: &Path, output: &Path) -> Result<u64, DecompressFileError> {
    let (source, sink) = open_files(input, output)?;
    decompress_stream(source, sink)
}
