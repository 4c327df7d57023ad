//! Preset color ranges, applied before any user-sampled range.
//!
//! The table is loaded once at startup and never changes afterwards. A preset
//! file is a JSON list:
//!
//! ```json
//! [{ "name": "background", "min": [253, 208, 120], "max": [255, 208, 124] }]
//! ```
//!
//! Channels are R, G, B.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Color, ColorRange};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRange {
    pub name: String,
    pub min: Color,
    pub max: Color,
}

impl NamedRange {
    pub fn new(name: &str, min: Color, max: Color) -> Self {
        Self { name: name.to_owned(), min, max }
    }

    pub fn range(&self) -> ColorRange {
        ColorRange { min: self.min, max: self.max }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presets {
    ranges: Vec<NamedRange>,
}

impl Default for Presets {
    /// The light-blue backdrop of the calibration shot (BGR 120..124, 208, 253..255).
    fn default() -> Self {
        Self {
            ranges: vec![NamedRange::new(
                "background",
                Color::rgb(253, 208, 120),
                Color::rgb(255, 208, 124),
            )],
        }
    }
}

impl Presets {
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Build a table, rejecting any range whose min is above its max.
    pub fn from_ranges(ranges: Vec<NamedRange>) -> Result<Self, Error> {
        if let Some(bad) = ranges.iter().find(|r| !r.range().is_ordered()) {
            return Err(Error::InvalidPreset {
                name: bad.name.clone(),
                min: bad.min.0,
                max: bad.max.0,
            });
        }
        Ok(Self { ranges })
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let ranges: Vec<NamedRange> =
            serde_json::from_str(text).map_err(|e| Error::PresetFile(e.to_string()))?;
        Self::from_ranges(ranges)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::PresetFile(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_background_backdrop_in_rgb() {
        let p = Presets::default();
        let bg = p.iter().next().unwrap();
        assert_eq!(bg.name, "background");
        assert_eq!(bg.min, Color::rgb(253, 208, 120));
        assert_eq!(bg.max, Color::rgb(255, 208, 124));
        assert!(bg.range().is_ordered());
    }

    #[test]
    fn parses_json_list_in_order() {
        let p = Presets::from_json(
            r#"[
                {"name": "wall", "min": [0, 0, 0], "max": [10, 10, 10]},
                {"name": "floor", "min": [100, 90, 80], "max": [110, 95, 90]}
            ]"#,
        )
        .unwrap();
        let names: Vec<_> = p.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["wall", "floor"]);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = Presets::from_json(r#"[{"name": "bad", "min": [5, 5, 5], "max": [5, 4, 5]}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPreset { ref name, .. } if name == "bad"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Presets::from_json("{ nope"), Err(Error::PresetFile(_))));
        // channel out of u8 range
        assert!(matches!(
            Presets::from_json(r#"[{"name": "x", "min": [0, 0, 0], "max": [256, 0, 0]}]"#),
            Err(Error::PresetFile(_))
        ));
    }

    #[test]
    fn missing_file_is_a_preset_error() {
        let err = Presets::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, Error::PresetFile(_)));
    }
}
