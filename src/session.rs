//! Calibration session: owns the image buffers, sampled points and presets,
//! and applies input events to them one at a time, in arrival order.

use crate::draw::{draw_markers, draw_text_5x7};
use crate::error::Error;
use crate::mask::{apply_mask, apply_presets, compute_range};
use crate::presets::Presets;
use crate::registry::{PointRegistry, BACKGROUND};
use crate::types::{Color, ColorRange, FrameBuffer, Point};

pub const MARKER_COLOR: Color = Color::BLACK;

/// Everything the window can ask the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Left click: sample this pixel into the background category.
    AddPoint(Point),
    /// Right click: drop the nearest marker within the radius and rebuild the view.
    RemovePoint(Point),
    /// `m`: recompute the background range and mask with it.
    Recompute,
    /// ESC or window closed.
    Quit,
}

/// What the loop should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Unchanged,
    Quit,
}

pub struct Session {
    original: FrameBuffer,
    working: FrameBuffer,
    registry: PointRegistry,
    presets: Presets,
    radius: i32,
    hud: bool,
    last_range: Option<ColorRange>,
}

impl Session {
    /// Start from `original` with every preset already applied.
    pub fn new(original: FrameBuffer, presets: Presets, radius: i32, hud: bool) -> Result<Self, Error> {
        let mut working = original.clone();
        apply_presets(&mut working, &original, &presets)?;
        if presets.is_empty() {
            log::info!("no preset ranges, only sampled colors will be masked");
        } else {
            log::info!("applied {} preset range(s)", presets.len());
        }
        Ok(Self {
            original,
            working,
            registry: PointRegistry::new(),
            presets,
            radius,
            hud,
            last_range: None,
        })
    }

    pub fn registry(&self) -> &PointRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn working(&self) -> &FrameBuffer {
        &self.working
    }

    pub fn last_range(&self) -> Option<ColorRange> {
        self.last_range
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<Flow, Error> {
        match event {
            InputEvent::AddPoint(p) => self.add_point(p),
            InputEvent::RemovePoint(p) => self.remove_point(p),
            InputEvent::Recompute => self.recompute(),
            InputEvent::Quit => Ok(Flow::Quit),
        }
    }

    fn add_point(&mut self, p: Point) -> Result<Flow, Error> {
        // The window may be larger than the image if the OS resized it.
        let color = match self.original.color_at(p) {
            Ok(color) => color,
            Err(Error::OutOfBounds { x, y, width, height }) => {
                log::warn!("ignoring click at ({x}, {y}), outside the {width}x{height} image");
                return Ok(Flow::Unchanged);
            }
            Err(e) => return Err(e),
        };
        let [r, g, b] = color.0;
        let [h, s, v] = color.to_hsv();
        log::info!("color of point ({}, {}) is RGB({r}, {g}, {b}), HSV({h}, {s}, {v})", p.x, p.y);

        self.registry.add(BACKGROUND, p);
        Ok(Flow::Redraw)
    }

    /// The working buffer goes back to presets only; a range applied with `m`
    /// is dropped until the next recompute.
    fn remove_point(&mut self, p: Point) -> Result<Flow, Error> {
        match self.registry.remove_near(BACKGROUND, p, f64::from(self.radius)) {
            Some(removed) => log::info!("removed point ({}, {})", removed.x, removed.y),
            None => log::debug!("no point within {} px of ({}, {})", self.radius, p.x, p.y),
        }
        if self.registry.is_empty() {
            log::debug!("no points left, press m after sampling again");
        }

        self.working = self.original.clone();
        apply_presets(&mut self.working, &self.original, &self.presets)?;
        self.last_range = None;
        Ok(Flow::Redraw)
    }

    fn recompute(&mut self) -> Result<Flow, Error> {
        apply_presets(&mut self.working, &self.original, &self.presets)?;

        let range = match compute_range(BACKGROUND, &self.registry, &self.original) {
            Ok(range) => range,
            Err(Error::EmptyCategory(cat)) => {
                log::warn!("no '{cat}' points sampled yet, left-click the background first");
                return Ok(Flow::Unchanged);
            }
            Err(e) => return Err(e),
        };

        let matched = apply_mask(&mut self.working, &self.original, &range)?;
        log::info!(
            "masking values are min {:?}, max {:?} ({matched} pixels)",
            range.min.0,
            range.max.0
        );
        self.last_range = Some(range);
        Ok(Flow::Redraw)
    }

    /// Full redraw: working buffer, markers on top, then the status line.
    pub fn render(&self) -> FrameBuffer {
        let mut frame = self.working.clone();
        draw_markers(&mut frame, &self.registry, self.radius, MARKER_COLOR);

        if self.hud {
            let white = Color::WHITE.to_packed();
            let status = format!(
                "PTS: {} | LMB: ADD  RMB: DEL  M: MASK  ESC: QUIT",
                self.registry.len()
            );
            draw_text_5x7(&mut frame, 8, 8, &status, white);

            if let Some(r) = self.last_range {
                let line = format!(
                    "RANGE: {}-{} {}-{} {}-{}",
                    r.min.0[0], r.max.0[0], r.min.0[1], r.max.0[1], r.min.0[2], r.max.0[2]
                );
                draw_text_5x7(&mut frame, 8, 18, &line, white);
            }
        }
        frame
    }
}
