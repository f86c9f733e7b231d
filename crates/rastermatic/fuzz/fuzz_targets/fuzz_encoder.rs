#![no_main]

use libfuzzer_sys::fuzz_target;
use rastermatic::{encode, EncodeOptions, GLYPH};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
    pixel_size: u16,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as u32;
    let height = input.height as u32;

    let expected_size = (width * height * 4) as usize;
    if input.pixels.len() < expected_size {
        // Short buffers must be rejected, never read past
        assert!(encode(&input.pixels, width, height, &EncodeOptions::default()).is_err());
        return;
    }

    let pixels = &input.pixels[..expected_size];
    let opts = EncodeOptions {
        pixel_size: f64::from(input.pixel_size) / 1000.0,
    };

    let markup = encode(pixels, width, height, &opts).expect("valid buffer");
    let transparent = pixels
        .chunks_exact(4)
        .enumerate()
        .filter(|(i, c)| c[3] == 0 && (*i as u32 % width) + 1 != width)
        .count();
    assert_eq!(
        markup.chars().filter(|&c| c == GLYPH).count(),
        expected_size / 4 - transparent
    );
});
