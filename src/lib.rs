//! Decompressor for `.clog` files: logs stored as a bare raw-deflate stream.
//!
//! Each `report.clog` is inflated next to itself as `report.log`. The crate is
//! split in two halves:
//!
//! * [`path_collector`] turns command line arguments into the list of `.clog`
//!   files to work on, scanning directories a bounded number of levels deep.
//! * [`decoding`] holds the raw-deflate decoder, both as a chunk-fed
//!   [`InflateDecoder`] and as an [`std::io::Read`] adapter ([`StreamingDecoder`]),
//!   plus the file level [`decompress_file`] used by the command line tool.
//!
//! ```no_run
//! use clogdecomp::{decompress_file, output_path_for, InputCollector};
//!
//! for input in InputCollector::from_args(std::env::args_os().skip(1)) {
//!     let output = output_path_for(&input);
//!     decompress_file(&input, &output)?;
//!     println!("{}", output.display());
//! }
//! # Ok::<(), clogdecomp::decoding::errors::DecompressFileError>(())
//! ```
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

pub mod decoding;
pub mod path_collector;
mod tests;

pub use decoding::file::{decompress_file, decompress_stream, IO_BUFFER_SIZE};
pub use decoding::inflate_decoder::InflateDecoder;
pub use decoding::streaming_decoder::StreamingDecoder;
pub use path_collector::{output_path_for, InputCollector, MAX_SCAN_DEPTH};
