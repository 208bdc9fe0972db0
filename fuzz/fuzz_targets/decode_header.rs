#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate ncstream;

use ncstream::DecodeOptions;

fuzz_target!(|data: &[u8]| {
    let _ = ncstream::decode(data, DecodeOptions::default());
});
