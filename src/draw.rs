// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the (masked) calibration image.
// 2) Filled black markers where the user sampled colors.
// 3) A tiny 5x7 bitmap font for the status line on top of the image.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::registry::PointRegistry;
use crate::session::InputEvent;
use crate::types::{Color, FrameBuffer, Point};

pub struct Drawer {
    window: Window, // the on-screen window you see
    left_was_down: bool,
    right_was_down: bool,
}

impl Drawer {
    /// Create a window sized to the fitted image, refreshed at ~60 FPS.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, left_was_down: false, right_was_down: false })
    }

    /// Push a full frame to the screen.
    /// Visual: the window immediately shows the new masked image and markers.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Pump window events without changing what is shown.
    /// Visual: nothing changes; clicks and keys keep being collected.
    pub fn idle(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Input seen since the last poll, in the order it is dispatched:
    /// mouse presses first, then keys.
    /// Visual: nothing yet; the session decides what to redraw.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if !self.is_open() {
            events.push(InputEvent::Quit);
            return events;
        }

        // Buttons are sampled once per frame, so a press and release inside
        // one frame (~16 ms) is not seen.
        let left = self.window.get_mouse_down(MouseButton::Left);
        let right = self.window.get_mouse_down(MouseButton::Right);
        // Discard: no position when the cursor is outside the image
        let pos = self.mouse_pos();

        if left && !self.left_was_down {
            if let Some(p) = pos {
                events.push(InputEvent::AddPoint(p));
            }
        }
        if right && !self.right_was_down {
            if let Some(p) = pos {
                events.push(InputEvent::RemovePoint(p));
            }
        }
        self.left_was_down = left;
        self.right_was_down = right;

        if self.window.is_key_pressed(Key::M, KeyRepeat::No) {
            events.push(InputEvent::Recompute);
        }
        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            events.push(InputEvent::Quit);
        }
        events
    }

    /// Mouse position in image pixel coordinates, None if outside the window.
    fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x.max(0.0) as i32, y.max(0.0) as i32))
    }
}

/* ---------- Software drawing: pixels, markers, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Filled disc of `radius` pixels centered at (cx,cy), clipped to the buffer.
/// Visual: a solid dot marks where the user sampled a color.
pub fn draw_filled_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius < 0 {
        return;
    }
    let color = color.to_packed();
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let r2 = r * r;

    // Only visit the part of the bounding box that lies on the buffer.
    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(fb.width as i64 - 1);
    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(fb.height as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                fb.pixels[y as usize * fb.width + x as usize] = color;
            }
        }
    }
}

/// One marker per registered point, every category in the same color.
/// Visual: a black dot over every sampled pixel.
pub fn draw_markers(fb: &mut FrameBuffer, registry: &PointRegistry, radius: i32, color: Color) {
    for (_category, points) in registry.iter() {
        for p in points {
            draw_filled_circle(fb, p.x, p.y, radius, color);
        }
    }
}

/* ---------- 5x7 bitmap font (ASCII subset for the status line) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters used by the status line
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),

        // Punctuation: space, vertical bar, colon, dash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black; the image is mostly white once masked
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }

        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; unknown characters leave a blank cell.
/// Visual: the status line appears in the top-left corner of the image.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
