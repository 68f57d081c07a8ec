use std::str::FromStr;

use crate::error::{CaplineError, CaplineResult};

/// An owned grid of straight-alpha RGBA8 pixels.
///
/// Pixel `(x, y)` lives at byte offset `(y * width + x) * 4`. Buffers are
/// value-like: clone when two stages both need one, never share mutably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Fully transparent buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
        buf
    }

    /// Wrap an existing RGBA8 byte vector, checking the length invariant.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> CaplineResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CaplineError::invalid_dimensions(format!(
                "pixel buffer is {} bytes, {width}x{height} rgba8 needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`; `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ])
    }

    /// Write a pixel; out-of-bounds writes are skipped.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let o = self.offset(x, y);
        self.pixels[o..o + 4].copy_from_slice(&rgba);
    }
}

/// Straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Color {
    type Err = CaplineError;

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    fn from_str(s: &str) -> CaplineResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let bad = || CaplineError::invalid_dimensions(format!("bad color literal '{s}'"));
        // multibyte input would break the two-byte slices below
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }
}

/// A rectangle in destination-buffer coordinates. May lie (partly) out of
/// bounds; clip before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersection with a `width x height` buffer anchored at the origin.
    /// `None` when the overlap is empty.
    pub fn clipped_to(self, width: u32, height: u32) -> Option<Self> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.x.saturating_add(self.width).min(width as i32);
        let y1 = self.y.saturating_add(self.height).min(height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }
}
