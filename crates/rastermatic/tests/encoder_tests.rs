use image::{Rgba as ImageRgba, RgbaImage};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rastermatic::*;

const OPEN: &str = "&lt;mspace=0.47em&gt;&lt;line-height=0.47em&gt;";
const CLOSE: &str = "&lt;/mspace&gt;";
const BR: &str = "&lt;br&gt;";

fn encode_image(img: &RgbaImage) -> String {
    let (width, height) = img.dimensions();
    encode(img.as_raw(), width, height, &EncodeOptions::default()).unwrap()
}

fn glyphs(markup: &str) -> usize {
    markup.chars().filter(|&c| c == GLYPH).count()
}

fn transparent_pixels(img: &RgbaImage) -> usize {
    let width = img.width();
    img.enumerate_pixels()
        .filter(|(x, _, p)| p.0[3] == 0 && x + 1 != width)
        .count()
}

#[test]
fn test_two_pixel_row() {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, ImageRgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, ImageRgba([0, 0, 255, 255]));

    assert_eq!(
        encode_image(&img),
        format!("{OPEN}&lt;color=#FF0000FF&gt;■&lt;color=#0000FFFF&gt;■{CLOSE}")
    );
}

#[test]
fn test_single_column_of_forced_pixels() {
    // Width 1: every pixel is in the last column, so alpha 0 is still drawn
    let img = RgbaImage::from_pixel(1, 2, ImageRgba([0, 0, 0, 0]));
    let markup = encode_image(&img);

    assert_eq!(markup.matches("&lt;color=#00000000&gt;").count(), 2);
    assert_eq!(glyphs(&markup), 2);
    assert_eq!(markup.matches(BR).count(), 1);
    assert!(!markup.contains("&lt;space="));
}

#[test]
fn test_sprite_with_gaps() {
    // . R R .
    // G . . G
    let red = ImageRgba([200, 0, 0, 255]);
    let green = ImageRgba([0, 200, 0, 255]);
    let clear = ImageRgba([0, 0, 0, 0]);
    let mut img = RgbaImage::from_pixel(4, 2, clear);
    img.put_pixel(1, 0, red);
    img.put_pixel(2, 0, red);
    img.put_pixel(0, 1, green);
    img.put_pixel(3, 1, green);

    let expected = [
        OPEN,
        "&lt;space=0.470em&gt;&lt;color=#C80000FF&gt;■■",
        "&lt;color=#00000000&gt;■",
        BR,
        "&lt;color=#00C800FF&gt;■",
        "&lt;space=0.940em&gt;&lt;color=#00C800FF&gt;■",
        CLOSE,
    ]
    .concat();
    assert_eq!(encode_image(&img), expected);
}

#[test]
fn test_color_not_reset_by_transparent_gap() {
    // The tag after a gap repeats even though the color did not change
    let blue = ImageRgba([0, 0, 255, 255]);
    let mut img = RgbaImage::from_pixel(5, 1, blue);
    img.put_pixel(1, 0, ImageRgba([0, 0, 0, 0]));
    img.put_pixel(2, 0, ImageRgba([9, 9, 9, 0]));

    assert_eq!(
        encode_image(&img),
        format!(
            "{OPEN}&lt;color=#0000FFFF&gt;■&lt;space=0.940em&gt;&lt;color=#0000FFFF&gt;■■{CLOSE}"
        )
    );
}

#[test]
fn test_partial_alpha_is_opaque() {
    let img = RgbaImage::from_pixel(3, 1, ImageRgba([1, 2, 3, 1]));
    assert_eq!(
        encode_image(&img),
        format!("{OPEN}&lt;color=#01020301&gt;■■■{CLOSE}")
    );
}

#[test]
fn test_streaming_matches_one_shot() {
    let img = RgbaImage::from_fn(6, 4, |x, y| {
        ImageRgba([(x * 40) as u8, (y * 60) as u8, 7, if x % 3 == 1 { 0 } else { 255 }])
    });
    let opts = EncodeOptions::default();

    let mut encoder = MarkupEncoder::new(6, 4, &opts).unwrap();
    for pixel in PixelScanner::new(img.as_raw(), 6, 4).unwrap() {
        encoder.push(pixel).unwrap();
    }
    assert_eq!(encoder.finish(), encode_image(&img));
}

#[test]
fn test_space_width_rounding() {
    let img = RgbaImage::from_fn(4, 1, |x, _| {
        ImageRgba([0, 0, 0, if x == 3 { 255 } else { 0 }])
    });
    let opts = EncodeOptions { pixel_size: 0.333 };
    let markup = encode(img.as_raw(), 4, 1, &opts).unwrap();

    assert!(markup.starts_with("&lt;mspace=0.33em&gt;&lt;line-height=0.33em&gt;"));
    assert!(markup.contains("&lt;space=0.999em&gt;"));
}

#[test]
fn test_buffer_size_mismatch() {
    let rgba = vec![0u8; 12];
    let err = encode(&rgba, 2, 2, &EncodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        RastermaticError::BufferSizeMismatch {
            expected: 16,
            actual: 12
        }
    ));
    assert_eq!(err.stage(), ExportStage::Encode);
}

fn arb_image() -> impl Strategy<Value = RgbaImage> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        // A small palette so color runs and transparent gaps are common
        let channel = prop::sample::select(vec![0u8, 128, 255]);
        let alpha = prop::sample::select(vec![0u8, 0, 255, 64]);
        prop::collection::vec((channel.clone(), channel, alpha), (w * h) as usize).prop_map(
            move |cells| {
                let mut img = RgbaImage::new(w, h);
                for (i, (c, g, a)) in cells.into_iter().enumerate() {
                    let i = i as u32;
                    img.put_pixel(i % w, i / w, ImageRgba([c, g, c / 2, a]));
                }
                img
            },
        )
    })
}

proptest! {
    #[test]
    fn prop_row_breaks(img in arb_image()) {
        let markup = encode_image(&img);
        prop_assert_eq!(markup.matches(BR).count(), img.height() as usize - 1);
    }

    #[test]
    fn prop_glyph_count(img in arb_image()) {
        let markup = encode_image(&img);
        let total = (img.width() * img.height()) as usize;
        prop_assert_eq!(glyphs(&markup), total - transparent_pixels(&img));
    }

    #[test]
    fn prop_deterministic(img in arb_image()) {
        prop_assert_eq!(encode_image(&img), encode_image(&img));
    }

    #[test]
    fn prop_wrapped(img in arb_image()) {
        let markup = encode_image(&img);
        prop_assert!(markup.starts_with(OPEN));
        prop_assert!(markup.ends_with(CLOSE));
    }

    #[test]
    fn prop_last_column_always_drawn(img in arb_image()) {
        // Every row segment ends in a glyph
        let markup = encode_image(&img);
        let body = &markup[OPEN.len()..markup.len() - CLOSE.len()];
        for row in body.split(BR) {
            prop_assert!(row.ends_with(GLYPH));
        }
    }

    #[test]
    fn prop_opaque_run_single_tag(n in 1u32..40, r: u8, g: u8, b: u8, a in 1u8..=255) {
        let img = RgbaImage::from_pixel(n, 1, ImageRgba([r, g, b, a]));
        let expected = format!(
            "{OPEN}&lt;color=#{:02X}{:02X}{:02X}{:02X}&gt;{}{CLOSE}",
            r, g, b, a, GLYPH.to_string().repeat(n as usize)
        );
        prop_assert_eq!(encode_image(&img), expected);
    }

    #[test]
    fn prop_transparent_run_collapses(n in 1u32..40) {
        let color = ImageRgba([12, 34, 56, 255]);
        let mut img = RgbaImage::from_pixel(n + 2, 1, ImageRgba([0, 0, 0, 0]));
        img.put_pixel(0, 0, color);
        img.put_pixel(n + 1, 0, color);

        let markup = encode_image(&img);
        let space = format!("&lt;space={:.3}em&gt;", DEFAULT_PIXEL_SIZE * f64::from(n));
        prop_assert_eq!(markup.matches("&lt;space=").count(), 1);
        let retagged = format!("{space}&lt;color=#0C2238FF&gt;■");
        prop_assert!(markup.contains(&retagged));
        prop_assert_eq!(markup.matches("&lt;color=#0C2238FF&gt;").count(), 2);
        prop_assert_eq!(glyphs(&markup), 2);
    }
}
