#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate clogdecomp;
use std::io::Write;

fn decode_clogdecomp(data: &[u8]) -> Vec<u8> {
    let mut result: Vec<u8> = Vec::new();
    clogdecomp::decompress_stream(data, &mut result).expect("Decoding failed");
    result
}

fn encode_flate2(data: &[u8]) -> Result<Vec<u8>, std::io::Error> {
    let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fuzz_target!(|data: &[u8]| {
    let compressed = encode_flate2(data).unwrap();
    let decoded = decode_clogdecomp(&compressed);
    assert!(decoded == data, "Decoded data did not match the original input");
});
