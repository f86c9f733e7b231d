//! Run-length compressed rich-text markup encoder.
//!
//! Every pixel becomes one `■` glyph in a monospace label. Color tags are only
//! written when the color changes, and runs of fully transparent pixels are
//! collapsed into a single `space` tag that advances the cursor.
//!
//! Tags are written in their XML-escaped form (`&lt;` / `&gt;`) so the output
//! can be placed directly inside an XML attribute.

use crate::scanner::{Pixel, PixelScanner, Rgba};
use crate::Result;
use std::fmt::Write;

/// Default cell size in em, used for both cell width and line height.
pub const DEFAULT_PIXEL_SIZE: f64 = 0.47;

/// The glyph standing in for one filled cell.
pub const GLYPH: char = '■';

pub(crate) const ROW_BREAK: &str = "&lt;br&gt;";
pub(crate) const SIZING_CLOSE: &str = "&lt;/mspace&gt;";

/// Options for the markup encoder.
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Rendered size of one pixel in em. Written with 2 decimals in the
    /// sizing tag and used unrounded for transparent-run widths.
    pub pixel_size: f64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
        }
    }
}

/// Streaming encoder. Feed it every pixel of the image in row-major order,
/// then call [`MarkupEncoder::finish`].
#[derive(Debug)]
pub struct MarkupEncoder {
    out: String,
    width: u32,
    height: u32,
    pixel_size: f64,
    previous_color: Option<Rgba>,
    previous_was_transparent: bool,
    transparent_run: u32,
    color_tags: usize,
    space_tags: usize,
}

impl MarkupEncoder {
    /// Start a new encoding pass and write the opening sizing tag.
    pub fn new(width: u32, height: u32, opts: &EncodeOptions) -> Result<Self> {
        let cells = (width as usize).saturating_mul(height as usize);
        let mut out = String::with_capacity(64 + cells.min(1 << 20) * 4);
        write!(
            out,
            "&lt;mspace={size:.2}em&gt;&lt;line-height={size:.2}em&gt;",
            size = opts.pixel_size
        )?;
        Ok(Self {
            out,
            width,
            height,
            pixel_size: opts.pixel_size,
            previous_color: None,
            previous_was_transparent: false,
            transparent_run: 0,
            color_tags: 0,
            space_tags: 0,
        })
    }

    /// Encode one pixel. Pixels must arrive in scan order.
    pub fn push(&mut self, pixel: Pixel) -> Result<()> {
        let last_column = pixel.x + 1 == self.width;

        // The last cell of a row is always drawn so no row is ever empty.
        if pixel.color.a == 0 && !last_column {
            self.transparent_run += 1;
            self.previous_was_transparent = true;
            return Ok(());
        }

        let flushed = self.previous_was_transparent;
        if flushed {
            write!(
                self.out,
                "&lt;space={:.3}em&gt;",
                self.pixel_size * f64::from(self.transparent_run)
            )?;
            self.transparent_run = 0;
            self.space_tags += 1;
        }

        // A forced cell always gets its own tag, whatever came before it.
        let forced = pixel.color.a == 0;
        if flushed || forced || self.previous_color != Some(pixel.color) {
            write!(self.out, "&lt;color=#{:X}&gt;", pixel.color)?;
            self.color_tags += 1;
        }
        self.out.push(GLYPH);

        self.previous_color = Some(pixel.color);
        self.previous_was_transparent = false;

        if last_column && pixel.y + 1 < self.height {
            self.out.push_str(ROW_BREAK);
        }
        Ok(())
    }

    /// Write the closing sizing tag and return the markup.
    pub fn finish(mut self) -> String {
        self.out.push_str(SIZING_CLOSE);
        log::debug!(
            "encoded {}x{} image: {} color tags, {} space tags, {} bytes",
            self.width,
            self.height,
            self.color_tags,
            self.space_tags,
            self.out.len()
        );
        self.out
    }
}

/// Encode an RGBA8 buffer (4 bytes per pixel) into label markup.
///
/// # Example
/// ```ignore
/// use rastermatic::{encode, EncodeOptions};
///
/// let rgba = vec![255u8, 0, 0, 255, 0, 0, 255, 255];
/// let markup = encode(&rgba, 2, 1, &EncodeOptions::default())?;
/// ```
#[must_use = "this returns the encoded markup"]
pub fn encode(rgba: &[u8], width: u32, height: u32, opts: &EncodeOptions) -> Result<String> {
    encode_with_progress(rgba, width, height, opts, |_, _| {})
}

/// Like [`encode`], calling `on_row(row, height)` before each row is encoded.
/// `row` is zero-based.
pub fn encode_with_progress<F>(
    rgba: &[u8],
    width: u32,
    height: u32,
    opts: &EncodeOptions,
    mut on_row: F,
) -> Result<String>
where
    F: FnMut(u32, u32),
{
    let mut scanner = PixelScanner::new(rgba, width, height)?;
    let mut encoder = MarkupEncoder::new(width, height, opts)?;

    // Rows are counted even when they hold no pixels
    for row in 0..height {
        on_row(row, height);
        for pixel in scanner.by_ref().take(width as usize) {
            encoder.push(pixel)?;
        }
    }

    Ok(encoder.finish())
}
