// Range mask engine.
// Sampled colors -> inclusive min/max band -> pixels inside the band go white.
use crate::error::Error;
use crate::presets::Presets;
use crate::registry::PointRegistry;
use crate::types::{Color, ColorRange, FrameBuffer};

/// What matched pixels are overwritten with.
pub const HIGHLIGHT: Color = Color::WHITE;

/// Elementwise min/max over the original-image colors of every point in `category`.
pub fn compute_range(
    category: &str,
    registry: &PointRegistry,
    original: &FrameBuffer,
) -> Result<ColorRange, Error> {
    let mut points = registry.points(category).iter();
    let first = points
        .next()
        .ok_or_else(|| Error::EmptyCategory(category.to_owned()))?;

    let c = original.color_at(*first)?;
    let mut range = ColorRange { min: c, max: c };
    for p in points {
        range.include(original.color_at(*p)?);
    }
    Ok(range)
}

/// Paint HIGHLIGHT into `working` wherever the `original` pixel falls inside `range`.
/// Returns how many pixels matched.
pub fn apply_mask(
    working: &mut FrameBuffer,
    original: &FrameBuffer,
    range: &ColorRange,
) -> Result<usize, Error> {
    if working.width != original.width || working.height != original.height {
        return Err(Error::SizeMismatch(format!(
            "mask: working {}x{} vs original {}x{}",
            working.width, working.height, original.width, original.height
        )));
    }

    let hl = HIGHLIGHT.to_packed();
    let mut matched = 0;
    for (dst, &src) in working.pixels.iter_mut().zip(&original.pixels) {
        if range.contains(Color::from_packed(src)) {
            *dst = hl;
            matched += 1;
        }
    }
    Ok(matched)
}

/// Apply every preset range in table order. The result is the union of all of them.
pub fn apply_presets(
    working: &mut FrameBuffer,
    original: &FrameBuffer,
    presets: &Presets,
) -> Result<(), Error> {
    for preset in presets.iter() {
        let n = apply_mask(working, original, &preset.range())?;
        log::debug!("preset '{}' matched {n} pixels", preset.name);
    }
    Ok(())
}
