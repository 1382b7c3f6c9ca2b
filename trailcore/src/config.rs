use bevy_math::Vec4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning for one trail instance.
///
/// All fields have sensible defaults so a config file only needs to name the
/// values it wants to change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailSpec {
    /// Number of historical samples retained (ring-buffer capacity). Must be >= 1.
    pub trail_length: usize,
    /// Cross-sections emitted into the output mesh per tick. Must be >= 2.
    pub granularity: usize,
    /// Fraction of the ribbon (from the tip) blended from white toward the
    /// trail color. Clamped to 0..1.
    pub whitestep: f32,
    /// Target sampling rate hint in Hz. Callers use this to pick a tick
    /// cadence; the geometry itself does not depend on it.
    pub sampling_frequency: u32,
    /// Trail color as linear RGBA.
    pub color: [f32; 4],
    /// Store samples relative to a moving reference frame instead of world
    /// space, so the ribbon stays put when the play space translates.
    pub relative_mode: bool,
    /// Throttle sampling to at most 90 Hz regardless of render frame rate.
    pub cap_fps: bool,
}

impl Default for TrailSpec {
    fn default() -> Self {
        Self {
            trail_length: 30,
            granularity: 60,
            whitestep: 0.0,
            sampling_frequency: 90,
            color: [1.0, 1.0, 1.0, 1.0],
            relative_mode: false,
            cap_fps: false,
        }
    }
}

impl TrailSpec {
    pub fn validate(&self) -> Result<(), TrailSpecError> {
        if self.trail_length < 1 {
            return Err(TrailSpecError::TrailLength(self.trail_length));
        }
        if self.granularity < 2 {
            return Err(TrailSpecError::Granularity(self.granularity));
        }
        Ok(())
    }

    pub fn color_vec4(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrailSpecError {
    #[error("trail length must be at least 1 (got {0})")]
    TrailLength(usize),
    #[error("granularity must be at least 2 (got {0})")]
    Granularity(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TrailSpec::default().validate().is_ok());
    }

    #[test]
    fn zero_length_is_rejected() {
        let spec = TrailSpec {
            trail_length: 0,
            ..Default::default()
        };
        assert_eq!(spec.validate(), Err(TrailSpecError::TrailLength(0)));
    }

    #[test]
    fn single_cross_section_is_rejected() {
        let spec = TrailSpec {
            granularity: 1,
            ..Default::default()
        };
        assert_eq!(spec.validate(), Err(TrailSpecError::Granularity(1)));
    }
}
