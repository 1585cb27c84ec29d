use std::time::Duration;

use crate::loader::AssetManifest;
use crate::render::RenderConfig;
use crate::{ClockConfig, Easing, MorphTiming, StageWindow};

/// Show settings from a `show.toml` file.
///
/// All fields are optional; anything left out keeps its default. Values that
/// would stall the clock are clamped rather than rejected.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowDetails {
    pub asset_dir: Option<String>,
    pub text_files: Option<Vec<String>>,
    pub font_file: Option<String>,
    pub font_size: Option<f64>,
    pub line_height: Option<f64>,
    pub speed: Option<f64>,
    pub hold_seconds: Option<f64>,
    pub easing: Option<Easing>,
    pub start_jitter: Option<f64>,
    pub duration_jitter: Option<f64>,
    pub min_duration: Option<f64>,
    pub soft_width: Option<f64>,
    pub placeholder_portion: Option<f64>,
    pub early_start: Option<f64>,
    pub early_duration: Option<f64>,
    pub late_start: Option<f64>,
    pub late_duration: Option<f64>,
}

/// Smallest per-tick speed accepted, so a transition always finishes.
const MIN_SPEED: f64 = 1e-4;

impl ShowDetails {
    /// Parse a `show.toml` string into `ShowDetails`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn manifest(&self) -> AssetManifest {
        let defaults = AssetManifest::default();
        AssetManifest {
            asset_dir: self.asset_dir.clone().unwrap_or(defaults.asset_dir),
            text_files: self.text_files.clone().unwrap_or(defaults.text_files),
            font_file: self.font_file.clone().or(defaults.font_file),
        }
    }

    pub fn clock_config(&self) -> ClockConfig {
        let defaults = ClockConfig::default();
        let hold = match self.hold_seconds {
            Some(secs) if secs.is_finite() => Duration::from_millis((secs.max(0.0) * 1000.0).round() as u64),
            _ => defaults.hold,
        };
        ClockConfig {
            speed: self.speed.map_or(defaults.speed, |s| s.max(MIN_SPEED)),
            hold,
            easing: self.easing.unwrap_or(defaults.easing),
        }
    }

    pub fn morph_timing(&self) -> MorphTiming {
        let d = MorphTiming::default();
        MorphTiming {
            early: StageWindow::new(
                self.early_start.unwrap_or(d.early.start),
                self.early_duration.unwrap_or(d.early.duration),
            ),
            late: StageWindow::new(
                self.late_start.unwrap_or(d.late.start),
                self.late_duration.unwrap_or(d.late.duration),
            ),
            start_jitter: self.start_jitter.unwrap_or(d.start_jitter).max(0.0),
            duration_jitter: self.duration_jitter.unwrap_or(d.duration_jitter).max(0.0),
            min_duration: self.min_duration.unwrap_or(d.min_duration).max(0.0),
            soft_width: self.soft_width.unwrap_or(d.soft_width).max(0.0),
            placeholder_portion: self
                .placeholder_portion
                .unwrap_or(d.placeholder_portion)
                .clamp(0.0, 1.0),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let d = RenderConfig::default();
        RenderConfig {
            font_size: self.font_size.unwrap_or(d.font_size),
            line_height_mult: self.line_height.unwrap_or(d.line_height_mult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_components() {
        let details = ShowDetails::default();
        assert_eq!(details.manifest(), AssetManifest::default());
        assert_eq!(details.clock_config(), ClockConfig::default());
        assert_eq!(details.morph_timing(), MorphTiming::default());
        assert_eq!(details.render_config(), RenderConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let details = ShowDetails {
            asset_dir: Some("art".into()),
            text_files: Some(vec!["one.txt".into(), "two.txt".into()]),
            speed: Some(0.01),
            hold_seconds: Some(1.5),
            easing: Some(Easing::Linear),
            late_duration: Some(0.5),
            ..Default::default()
        };

        let manifest = details.manifest();
        assert_eq!(manifest.text_path(1).as_deref(), Some("art/two.txt"));
        assert_eq!(manifest.expected(), 3);

        let clock = details.clock_config();
        assert_eq!(clock.speed, 0.01);
        assert_eq!(clock.hold, Duration::from_millis(1500));
        assert_eq!(clock.easing, Easing::Linear);

        let timing = details.morph_timing();
        assert_eq!(timing.late, StageWindow::new(0.15, 0.5));
        assert_eq!(timing.early, MorphTiming::default().early);
    }

    #[test]
    fn degenerate_values_are_clamped() {
        let details = ShowDetails {
            speed: Some(0.0),
            hold_seconds: Some(-2.0),
            placeholder_portion: Some(3.0),
            soft_width: Some(-1.0),
            ..Default::default()
        };

        let clock = details.clock_config();
        assert!(clock.speed > 0.0);
        assert_eq!(clock.hold, Duration::ZERO);

        let timing = details.morph_timing();
        assert_eq!(timing.placeholder_portion, 1.0);
        assert_eq!(timing.soft_width, 0.0);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml() {
        let details = ShowDetails::from_toml_str(
            r#"
            asset_dir = "data/"
            text_files = ["a.txt", "b.txt", "c.txt"]
            font_file = "mono.otf"
            speed = 0.005
            hold_seconds = 0.6
            easing = "cubic-in-out"
            "#,
        )
        .unwrap();

        assert_eq!(details.manifest().font_path().as_deref(), Some("data/mono.otf"));
        assert_eq!(details.clock_config(), ClockConfig::default());
    }
}
