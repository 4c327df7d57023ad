// Core types shared by the loader, mask engine and renderer.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Packed RGB raster. Both the working image and the untouched original use it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // image width in pixels
    pub height: usize,     // image height in pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with one color.
    #[cfg(test)]
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.to_packed(); width * height] }
    }

    /// Color at (x, y), or an error if the point is off the image.
    pub fn color_at(&self, p: Point) -> Result<Color, Error> {
        let idx = self.index_of(p).ok_or(Error::OutOfBounds {
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
        })?;
        Ok(Color::from_packed(self.pixels[idx]))
    }

    #[cfg(test)]
    pub fn set(&mut self, p: Point, color: Color) {
        if let Some(idx) = self.index_of(p) {
            self.pixels[idx] = color.to_packed();
        }
    }

    #[inline]
    fn index_of(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

/// A pixel coordinate in image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// 8-bit color in R, G, B order. Serializes as a plain `[r, g, b]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    #[inline]
    pub fn from_packed(px: u32) -> Self {
        // px = 0x00RRGGBB
        Color([((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8])
    }

    #[inline]
    pub fn to_packed(self) -> u32 {
        let [r, g, b] = self.0;
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// HSV with the 8-bit convention common in vision tools:
    /// H in 0..180 (degrees / 2), S and V in 0..=255.
    pub fn to_hsv(self) -> [u8; 3] {
        let [r, g, b] = self.0.map(f32::from);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };

        let mut h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        if h < 0.0 {
            h += 360.0;
        }

        let h = (h / 2.0).round() as u32 % 180;
        [h as u8, s.round() as u8, max as u8]
    }
}

/// Inclusive per-channel color band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: Color,
    pub max: Color,
}

impl ColorRange {
    pub fn contains(&self, c: Color) -> bool {
        (0..3).all(|i| self.min.0[i] <= c.0[i] && c.0[i] <= self.max.0[i])
    }

    /// Grow the band so it also covers `c`.
    pub fn include(&mut self, c: Color) {
        for i in 0..3 {
            self.min.0[i] = self.min.0[i].min(c.0[i]);
            self.max.0[i] = self.max.0[i].max(c.0[i]);
        }
    }

    pub fn is_ordered(&self) -> bool {
        (0..3).all(|i| self.min.0[i] <= self.max.0[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks_rgb() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.to_packed(), 0x0012_3456);
        assert_eq!(Color::from_packed(0xFF12_3456), c); // top byte ignored
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::rgb(255, 0, 0).to_hsv(), [0, 255, 255]);
        assert_eq!(Color::rgb(0, 255, 0).to_hsv(), [60, 255, 255]);
        assert_eq!(Color::rgb(0, 0, 255).to_hsv(), [120, 255, 255]);
        assert_eq!(Color::rgb(80, 80, 80).to_hsv(), [0, 0, 80]);
        assert_eq!(Color::BLACK.to_hsv(), [0, 0, 0]);
    }

    #[test]
    fn color_at_rejects_points_off_the_image() {
        let fb = FrameBuffer::filled(4, 3, Color::WHITE);
        assert_eq!(fb.color_at(Point::new(3, 2)).unwrap(), Color::WHITE);
        assert!(matches!(fb.color_at(Point::new(4, 0)), Err(Error::OutOfBounds { .. })));
        assert!(matches!(fb.color_at(Point::new(0, -1)), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn range_is_inclusive() {
        let r = ColorRange { min: Color::rgb(10, 20, 30), max: Color::rgb(10, 25, 40) };
        assert!(r.contains(Color::rgb(10, 20, 30)));
        assert!(r.contains(Color::rgb(10, 25, 40)));
        assert!(!r.contains(Color::rgb(11, 22, 35)));
        assert!(!r.contains(Color::rgb(10, 19, 35)));
    }

    #[test]
    fn color_serializes_as_array() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
    }
}
