#![no_main]

use libfuzzer_sys::fuzz_target;
use snapshade_backend::decode_image;

fuzz_target!(|data: &[u8]| {
    // decode_image should never panic on any input
    let _ = decode_image(data);
});
