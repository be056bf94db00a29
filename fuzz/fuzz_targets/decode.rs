#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate clogdecomp;
use std::io::Read;

fuzz_target!(|data: &[u8]| {
    let mut decoder = clogdecomp::StreamingDecoder::new(data);
    let mut output = Vec::new();
    _ = decoder.read_to_end(&mut output);
});
