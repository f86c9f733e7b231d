//! Row-major pixel iteration over RGBA8 buffers.

use crate::{RastermaticError, Result};
use std::fmt;
use std::iter::FusedIterator;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    fn from_slice(c: &[u8]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Formats as `RRGGBBAA`, two uppercase hex digits per channel.
impl fmt::UpperHex for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// One pixel and its position in the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: Rgba,
}

/// Single-pass iterator over an RGBA8 buffer, row 0 first, left to right.
#[derive(Clone, Debug)]
pub struct PixelScanner<'a> {
    rgba: &'a [u8],
    width: u32,
    index: usize,
}

impl<'a> PixelScanner<'a> {
    /// Create a scanner over `rgba` (4 bytes per pixel).
    ///
    /// Fails if the buffer length does not equal `width * height * 4`.
    pub fn new(rgba: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(RastermaticError::BufferSizeMismatch {
                expected: usize::MAX,
                actual: rgba.len(),
            })?;
        if rgba.len() != expected {
            return Err(RastermaticError::BufferSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            rgba,
            width,
            index: 0,
        })
    }

    #[inline]
    fn pixel_count(&self) -> usize {
        self.rgba.len() / 4
    }
}

impl Iterator for PixelScanner<'_> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.index >= self.pixel_count() {
            return None;
        }
        let width = self.width as usize;
        let offset = self.index * 4;
        let pixel = Pixel {
            x: (self.index % width) as u32,
            y: (self.index / width) as u32,
            color: Rgba::from_slice(&self.rgba[offset..offset + 4]),
        };
        self.index += 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pixel_count() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PixelScanner<'_> {}

impl FusedIterator for PixelScanner<'_> {}
