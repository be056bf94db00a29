//! Errors that might occur while decompressing `.clog` data.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum InflateError {
    #[error("Corrupt deflate data after {consumed} input bytes: {source}")]
    Corrupt {
        consumed: u64,
        #[source]
        source: flate2::DecompressError,
    },
    #[error("Deflate stream ended early. Consumed: {consumed} bytes, Produced: {produced} bytes, final block never reached")]
    Truncated { consumed: u64, produced: u64 },
    #[error("Failed to write decompressed bytes to the sink")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressFileError {
    #[error("Failed to open input {path}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create output {path}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read compressed input")]
    Read(#[source] std::io::Error),
    #[error(transparent)]
    Decode(#[from] InflateError),
}
