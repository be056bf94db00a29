use crate::decoding::file::IO_BUFFER_SIZE;
use crate::decoding::inflate_decoder::InflateDecoder;
use std::io::{self, Read};

/// High level decoder that implements io::Read, so it can be used with
/// io::Read::read_to_end / io::copy or handed to another library as the source
/// of the decompressed content.
///
/// The lower level InflateDecoder by comparison pushes decoded bytes into a
/// sink and needs to be fed the compressed input chunk by chunk.
pub struct StreamingDecoder<READ: Read> {
    pub decoder: InflateDecoder,
    source: READ,
    input: Vec<u8>,
    decoded: Vec<u8>,
    read_pos: usize,
    source_done: bool,
}

impl<READ: Read> StreamingDecoder<READ> {
    pub fn new(source: READ) -> StreamingDecoder<READ> {
        Self::new_with_decoder(source, InflateDecoder::new())
    }

    pub fn new_with_decoder(source: READ, mut decoder: InflateDecoder) -> StreamingDecoder<READ> {
        decoder.reset();
        StreamingDecoder {
            decoder,
            source,
            input: vec![0; IO_BUFFER_SIZE],
            decoded: Vec::new(),
            read_pos: 0,
            source_done: false,
        }
    }

    pub fn inner(self) -> InflateDecoder {
        self.decoder
    }

    /// Pull the next chunk from the source and inflate it into `self.decoded`.
    fn refill(&mut self) -> io::Result<()> {
        self.decoded.clear();
        self.read_pos = 0;

        let read = loop {
            match self.source.read(&mut self.input) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        let result = if read == 0 {
            self.source_done = true;
            self.decoder.finish(&mut self.decoded)
        } else {
            self.decoder
                .decode_chunk(&self.input[..read], &mut self.decoded)
        };
        result.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // No more bytes can ever be decoded, the rest of the source is ignored
        if self.decoder.is_finished() {
            self.source_done = true;
        }
        Ok(())
    }
}

impl<READ: Read> Read for StreamingDecoder<READ> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Chunks that only advance the inflate state yield nothing, keep going until
        // there is something to hand out or the source is exhausted
        while self.read_pos == self.decoded.len() {
            if self.source_done {
                return Ok(0);
            }
            self.refill()?;
        }

        let available = &self.decoded[self.read_pos..];
        let amount = available.len().min(buf.len());
        buf[..amount].copy_from_slice(&available[..amount]);
        self.read_pos += amount;
        Ok(amount)
    }
}
