//! Screen size query.
//! Uses `xcap` to read the primary monitor resolution so the image can be
//! fitted before the window opens. `--screen WxH` skips the query entirely.

use std::fmt;
use std::str::FromStr;

use xcap::Monitor;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenSize {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
        let height: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
        if width == 0 || height == 0 {
            return Err(format!("screen size must be non-zero, got '{s}'"));
        }
        Ok(Self { width, height })
    }
}

/// Resolution of the primary monitor (first monitor if none reports primary).
pub fn primary_screen_size() -> Result<ScreenSize, Error> {
    let monitors = Monitor::all().map_err(|e| Error::Screen(format!("enumerate monitors: {e}")))?;

    let monitor = monitors
        .iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())
        .ok_or_else(|| Error::Screen("no monitors found".into()))?;

    let width = monitor.width().map_err(|e| Error::Screen(format!("monitor width: {e}")))?;
    let height = monitor.height().map_err(|e| Error::Screen(format!("monitor height: {e}")))?;
    if width == 0 || height == 0 {
        return Err(Error::Screen(format!("monitor reports {width}x{height}")));
    }
    Ok(ScreenSize { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_width_by_height() {
        assert_eq!("1920x1080".parse::<ScreenSize>(), Ok(ScreenSize { width: 1920, height: 1080 }));
        assert_eq!("800X600".parse::<ScreenSize>(), Ok(ScreenSize { width: 800, height: 600 }));
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert!("1920".parse::<ScreenSize>().is_err());
        assert!("ax1080".parse::<ScreenSize>().is_err());
        assert!("0x1080".parse::<ScreenSize>().is_err());
    }

    #[test]
    #[ignore = "requires a graphical display"]
    fn primary_monitor_has_a_size() {
        let s = primary_screen_size().expect("screen query failed");
        assert!(s.width > 0 && s.height > 0);
    }
}
