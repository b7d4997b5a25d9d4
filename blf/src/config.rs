use serde::{Deserialize, Serialize};

use nesty::NestyError;

use crate::io::svg::SvgDrawOptions;

/// Configuration for the BLF optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BLFConfig {
    /// Angle between two consecutive allowed rotations, in degrees. 90 allows 0°, 90°, 180° and 270°.
    pub rotation_step: i32,
    /// Whether shapes may also be placed mirrored
    pub allow_mirroring: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl BLFConfig {
    /// All (rotation, mirrored) pairs the optimizer tries, in the order it tries them.
    pub fn orientations(&self) -> Vec<(i32, bool)> {
        let rotations = (0..360).step_by(self.rotation_step.max(1) as usize);
        let mirrorings: &[bool] = match self.allow_mirroring {
            true => &[false, true],
            false => &[false],
        };
        rotations
            .flat_map(|r| mirrorings.iter().map(move |m| (r, *m)))
            .collect()
    }

    pub fn validate(&self) -> nesty::Result<()> {
        if !(1..=360).contains(&self.rotation_step) {
            return Err(NestyError::InvalidParameter(format!(
                "rotation step must be within [1, 360], got {}",
                self.rotation_step
            )));
        }
        Ok(())
    }
}

impl Default for BLFConfig {
    fn default() -> Self {
        Self {
            rotation_step: 90,
            allow_mirroring: false,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orientations_are_quarter_turns() {
        assert_eq!(
            BLFConfig::default().orientations(),
            vec![(0, false), (90, false), (180, false), (270, false)]
        );
    }

    #[test]
    fn mirroring_doubles_the_orientations() {
        let config = BLFConfig {
            rotation_step: 180,
            allow_mirroring: true,
            ..BLFConfig::default()
        };
        assert_eq!(
            config.orientations(),
            vec![(0, false), (0, true), (180, false), (180, true)]
        );
    }

    #[test]
    fn config_from_json_falls_back_on_svg_defaults() {
        let config: BLFConfig =
            serde_json::from_str(r#"{"rotation_step": 45, "allow_mirroring": false}"#).unwrap();
        assert_eq!(config.orientations().len(), 8);
        assert!(config.validate().is_ok());
        let invalid = BLFConfig {
            rotation_step: 0,
            ..config
        };
        assert!(invalid.validate().is_err());
    }
}
