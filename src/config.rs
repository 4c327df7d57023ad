//! Command-line options and the startup configuration built from them.

use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::presets::Presets;
use crate::screen::ScreenSize;

/// Share of the screen height kept free for the taskbar.
pub const TASKBAR_RESERVE: f64 = 0.1;

/// Marker radius, also the right-click removal distance.
pub const DEFAULT_RADIUS: u32 = 4;

/// Largest marker radius accepted on the command line.
pub const MAX_RADIUS: u32 = 256;

#[derive(Debug, Parser)]
#[command(name = "chroma-picker", version, about = "Click background pixels to calibrate a chroma-key range")]
pub struct Args {
    /// Image to calibrate against
    #[arg(default_value = "images/ChatGPT Image.png")]
    pub image: PathBuf,

    /// JSON file with preset ranges (replaces the built-in background preset)
    #[arg(long, value_name = "FILE", conflicts_with = "no_presets")]
    pub presets: Option<PathBuf>,

    /// Start with no preset ranges at all
    #[arg(long)]
    pub no_presets: bool,

    /// Screen size to fit the image to, e.g. 1920x1080 (skips the monitor query)
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub screen: Option<ScreenSize>,

    /// Marker radius in pixels; right-click removes points this close
    #[arg(long, default_value_t = DEFAULT_RADIUS,
          value_parser = clap::value_parser!(u32).range(0..=MAX_RADIUS as i64))]
    pub radius: u32,

    /// Hide the status line drawn over the image
    #[arg(long)]
    pub no_hud: bool,
}

#[derive(Debug)]
pub struct Config {
    pub image: PathBuf,
    pub screen: Option<ScreenSize>,
    pub reserve: f64,
    pub radius: i32,
    pub hud: bool,
    pub presets: Presets,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, Error> {
        let presets = if args.no_presets {
            Presets::empty()
        } else if let Some(path) = &args.presets {
            Presets::load(path)?
        } else {
            Presets::default()
        };

        Ok(Self {
            image: args.image,
            screen: args.screen,
            reserve: TASKBAR_RESERVE,
            radius: args.radius.min(MAX_RADIUS) as i32,
            hud: !args.no_hud,
            presets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::from_args(Args::parse_from(["chroma-picker"])).unwrap();
        assert_eq!(cfg.image, PathBuf::from("images/ChatGPT Image.png"));
        assert_eq!(cfg.radius, 4);
        assert!(cfg.hud);
        assert_eq!(cfg.screen, None);
        assert_eq!(cfg.presets, Presets::default());
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "chroma-picker",
            "shot.png",
            "--screen",
            "1280x720",
            "--radius",
            "7",
            "--no-hud",
            "--no-presets",
        ]);
        let cfg = Config::from_args(args).unwrap();
        assert_eq!(cfg.image, PathBuf::from("shot.png"));
        assert_eq!(cfg.screen, Some(ScreenSize { width: 1280, height: 720 }));
        assert_eq!(cfg.radius, 7);
        assert!(!cfg.hud);
        assert!(cfg.presets.is_empty());
    }

    #[test]
    fn presets_and_no_presets_conflict() {
        let res = Args::try_parse_from(["chroma-picker", "--presets", "p.json", "--no-presets"]);
        assert!(res.is_err());
    }

    #[test]
    fn oversized_radius_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["chroma-picker", "--radius", "50000"]).is_err());
        assert!(Args::try_parse_from(["chroma-picker", "--radius", "257"]).is_err());
        let args = Args::try_parse_from(["chroma-picker", "--radius", "256"]).unwrap();
        assert_eq!(Config::from_args(args).unwrap().radius, 256);
    }

    #[test]
    fn bad_screen_size_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["chroma-picker", "--screen", "big"]).is_err());
    }
}
