//! Structures and utilities used for decoding raw-deflate `.clog` data

pub mod errors;
pub mod file;
pub mod inflate_decoder;
pub mod streaming_decoder;
