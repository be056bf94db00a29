//! Chunk-fed raw-deflate decoder.
//!
//! `.clog` files carry no framing at all: no zlib or gzip header, no length
//! prefix and no checksum. The decoder therefore only knows the stream is
//! complete once the deflate block marked as final has been decoded.

use super::errors::InflateError;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Write;

/// Size of the scratch buffer inflated bytes pass through on their way to the sink.
const OUTPUT_BUFFER_SIZE: usize = 32 * 1024;

/// Low level decoder, fed one chunk of compressed input at a time.
///
/// Every byte the inflate stream produces is written to the sink passed to
/// [`InflateDecoder::decode_chunk`] before the call returns, so nothing is
/// retained between chunks apart from the inflate state itself. Once the input
/// is exhausted, [`InflateDecoder::finish`] must be called to flush the stream
/// and to find out whether it was complete.
///
/// ```
/// use clogdecomp::InflateDecoder;
///
/// // "hi" as a single fixed-huffman final block
/// let compressed = [0xcb, 0xc8, 0x04, 0x00];
/// let mut decoded = Vec::new();
///
/// let mut decoder = InflateDecoder::new();
/// decoder.decode_chunk(&compressed, &mut decoded).unwrap();
/// decoder.finish(&mut decoded).unwrap();
/// assert_eq!(decoded, b"hi");
/// ```
pub struct InflateDecoder {
    stream: Decompress,
    output: Vec<u8>,
    state: DecoderState,
    trailing_bytes: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum DecoderState {
    Decoding,
    Finished,
}

impl Default for InflateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl InflateDecoder {
    pub fn new() -> InflateDecoder {
        InflateDecoder {
            // false: raw deflate, no zlib header or adler32 trailer
            stream: Decompress::new(false),
            output: vec![0; OUTPUT_BUFFER_SIZE],
            state: DecoderState::Decoding,
            trailing_bytes: 0,
        }
    }

    /// Prepare the decoder for a new, unrelated stream.
    pub fn reset(&mut self) {
        self.stream.reset(false);
        self.state = DecoderState::Decoding;
        self.trailing_bytes = 0;
    }

    /// Inflate one chunk of compressed input and write everything it yields to `sink`.
    ///
    /// Returns the amount of decompressed bytes written. Input that follows the
    /// end of the deflate stream is not decoded, it is only counted in
    /// [`InflateDecoder::trailing_bytes`].
    pub fn decode_chunk(
        &mut self,
        mut input: &[u8],
        sink: &mut dyn Write,
    ) -> Result<usize, InflateError> {
        let mut written = 0;
        loop {
            if self.is_finished() {
                self.trailing_bytes += input.len() as u64;
                return Ok(written);
            }

            let (consumed, produced, status) = self.step(input, FlushDecompress::None)?;
            sink.write_all(&self.output[..produced])?;
            written += produced;
            input = &input[consumed..];

            match status {
                Status::StreamEnd => self.state = DecoderState::Finished,
                Status::Ok | Status::BufError => {
                    // A partially filled output buffer means inflate had nothing more to give
                    if input.is_empty() && produced < self.output.len() {
                        return Ok(written);
                    }
                    if consumed == 0 && produced == 0 {
                        return Ok(written);
                    }
                }
            }
        }
    }

    /// Flush whatever the inflate stream still holds into `sink` and check the
    /// stream was complete.
    ///
    /// Fails with [`InflateError::Truncated`] if the input ended before the
    /// final deflate block. A source that was completely empty counts as an
    /// empty stream and is not an error.
    pub fn finish(&mut self, sink: &mut dyn Write) -> Result<usize, InflateError> {
        if self.is_finished() {
            return Ok(0);
        }
        if self.stream.total_in() == 0 {
            self.state = DecoderState::Finished;
            return Ok(0);
        }

        let mut written = 0;
        loop {
            let (_, produced, status) = self.step(&[], FlushDecompress::None)?;
            sink.write_all(&self.output[..produced])?;
            written += produced;
            if status == Status::StreamEnd {
                self.state = DecoderState::Finished;
                return Ok(written);
            }
            if produced == 0 {
                break;
            }
        }

        // Backends differ in how they report missing input when told to finish,
        // anything short of StreamEnd at this point means the input stopped early.
        match self.step(&[], FlushDecompress::Finish) {
            Ok((_, produced, Status::StreamEnd)) => {
                sink.write_all(&self.output[..produced])?;
                self.state = DecoderState::Finished;
                Ok(written + produced)
            }
            Ok(_) | Err(InflateError::Corrupt { .. }) => Err(InflateError::Truncated {
                consumed: self.bytes_read(),
                produced: self.bytes_written(),
            }),
            Err(other) => Err(other),
        }
    }

    /// True once the final deflate block has been decoded.
    pub fn is_finished(&self) -> bool {
        self.state == DecoderState::Finished
    }

    /// Compressed bytes consumed by the inflate stream so far.
    pub fn bytes_read(&self) -> u64 {
        self.stream.total_in()
    }

    /// Decompressed bytes produced so far.
    pub fn bytes_written(&self) -> u64 {
        self.stream.total_out()
    }

    /// Bytes handed to the decoder after the deflate stream had already ended.
    pub fn trailing_bytes(&self) -> u64 {
        self.trailing_bytes
    }

    /// Run inflate once, returning (consumed, produced, status).
    fn step(
        &mut self,
        input: &[u8],
        flush: FlushDecompress,
    ) -> Result<(usize, usize, Status), InflateError> {
        let in_before = self.stream.total_in();
        let out_before = self.stream.total_out();
        let status = self
            .stream
            .decompress(input, &mut self.output, flush)
            .map_err(|source| InflateError::Corrupt {
                consumed: in_before,
                source,
            })?;
        let consumed = (self.stream.total_in() - in_before) as usize;
        let produced = (self.stream.total_out() - out_before) as usize;
        Ok((consumed, produced, status))
    }
}
