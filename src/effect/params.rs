//! Effect properties and their JSON persistence.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::fixed::PitchRatio;
use crate::effect::EffectType;
use crate::error::{PitchShiftError, Result};

/// Lowest coarse tune, in semitones.
pub const COARSE_TUNE_MIN: i32 = -12;
/// Highest coarse tune, in semitones.
pub const COARSE_TUNE_MAX: i32 = 12;
/// Lowest fine tune, in cents.
pub const FINE_TUNE_MIN: i32 = -50;
/// Highest fine tune, in cents.
pub const FINE_TUNE_MAX: i32 = 50;

const CENTS_PER_SEMITONE: i32 = 100;

/// Tuning of the pitch shifter.
///
/// The effect accepts any value; [`validate`](Self::validate) is for callers
/// that take tuning from users or files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PshifterProps {
    /// Transposition in semitones.
    pub coarse_tune: i32,
    /// Additional transposition in cents.
    pub fine_tune: i32,
}

impl PshifterProps {
    pub fn new(coarse_tune: i32, fine_tune: i32) -> Self {
        Self {
            coarse_tune,
            fine_tune,
        }
    }

    /// Splits a total in cents into coarse and fine parts.
    ///
    /// The fine part lands in -50..=50; the coarse part is not clamped.
    pub fn from_cents(cents: i32) -> Self {
        let coarse = (cents as f64 / CENTS_PER_SEMITONE as f64).round() as i32;
        Self {
            coarse_tune: coarse,
            fine_tune: cents - coarse * CENTS_PER_SEMITONE,
        }
    }

    /// Checks both tuning values against their ranges.
    pub fn validate(&self) -> Result<()> {
        if !(COARSE_TUNE_MIN..=COARSE_TUNE_MAX).contains(&self.coarse_tune) {
            return Err(PitchShiftError::CoarseTuneOutOfRange {
                value: self.coarse_tune,
                min: COARSE_TUNE_MIN,
                max: COARSE_TUNE_MAX,
            });
        }
        if !(FINE_TUNE_MIN..=FINE_TUNE_MAX).contains(&self.fine_tune) {
            return Err(PitchShiftError::FineTuneOutOfRange {
                value: self.fine_tune,
                min: FINE_TUNE_MIN,
                max: FINE_TUNE_MAX,
            });
        }
        Ok(())
    }

    /// Combined transposition in cents.
    #[inline]
    pub fn total_cents(&self) -> i32 {
        self.coarse_tune
            .saturating_mul(CENTS_PER_SEMITONE)
            .saturating_add(self.fine_tune)
    }

    #[inline]
    pub fn pitch_ratio(&self) -> PitchRatio {
        PitchRatio::from_cents(self.total_cents())
    }
}

/// Properties for any effect, tagged by effect type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectProps {
    #[default]
    Null,
    PitchShifter(PshifterProps),
}

impl EffectProps {
    pub fn effect_type(&self) -> EffectType {
        match self {
            EffectProps::Null => EffectType::Null,
            EffectProps::PitchShifter(_) => EffectType::PitchShifter,
        }
    }

    /// Default properties for `effect_type`.
    pub fn default_for(effect_type: EffectType) -> Self {
        match effect_type {
            EffectType::Null => EffectProps::Null,
            EffectType::PitchShifter => EffectProps::PitchShifter(PshifterProps::default()),
        }
    }
}

impl From<PshifterProps> for EffectProps {
    fn from(props: PshifterProps) -> Self {
        EffectProps::PitchShifter(props)
    }
}

/// Reads effect properties from a JSON file.
pub fn load_props(path: impl AsRef<Path>) -> Result<EffectProps> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let props: EffectProps = serde_json::from_str(&text)?;
    info!("Loaded {} props from {}", props.effect_type(), path.display());
    Ok(props)
}

/// Writes effect properties to a JSON file, pretty-printed.
pub fn save_props(path: impl AsRef<Path>, props: &EffectProps) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(props)?;
    fs::write(path, text)?;
    info!("Saved {} props to {}", props.effect_type(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_for_matches_type() {
        for ty in EffectType::ALL {
            assert_eq!(EffectProps::default_for(ty).effect_type(), ty);
        }
        assert_eq!(
            EffectProps::default_for(EffectType::PitchShifter),
            EffectProps::PitchShifter(PshifterProps::default())
        );
    }

    #[test]
    fn test_total_cents() {
        assert_eq!(PshifterProps::new(12, 0).total_cents(), 1200);
        assert_eq!(PshifterProps::new(-3, 25).total_cents(), -275);
        assert_eq!(PshifterProps::default().total_cents(), 0);
    }

    #[test]
    fn test_pitch_ratio_octave() {
        assert_eq!(PshifterProps::new(12, 0).pitch_ratio().as_f64(), 2.0);
        assert_eq!(PshifterProps::new(-12, 0).pitch_ratio().as_f64(), 0.5);
        assert_eq!(PshifterProps::default().pitch_ratio(), PitchRatio::UNITY);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(PshifterProps::new(12, 50).validate().is_ok());
        assert!(PshifterProps::new(-12, -50).validate().is_ok());
        assert!(matches!(
            PshifterProps::new(13, 0).validate(),
            Err(PitchShiftError::CoarseTuneOutOfRange { value: 13, .. })
        ));
        assert!(matches!(
            PshifterProps::new(0, -51).validate(),
            Err(PitchShiftError::FineTuneOutOfRange { value: -51, .. })
        ));
    }

    #[test]
    fn test_from_cents_splits() {
        assert_eq!(PshifterProps::from_cents(1250), PshifterProps::new(13, -50));
        assert_eq!(PshifterProps::from_cents(-275), PshifterProps::new(-3, 25));
        assert_eq!(PshifterProps::from_cents(730), PshifterProps::new(7, 30));
        for cents in -1250..=1250 {
            let p = PshifterProps::from_cents(cents);
            assert_eq!(p.total_cents(), cents);
            assert!((FINE_TUNE_MIN..=FINE_TUNE_MAX).contains(&p.fine_tune));
        }
    }

    #[test]
    fn test_json_shape() {
        let props = EffectProps::from(PshifterProps::new(5, -10));
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(
            json,
            r#"{"type":"pitch_shifter","coarse_tune":5,"fine_tune":-10}"#
        );
        let null: EffectProps = serde_json::from_str(r#"{"type":"null"}"#).unwrap();
        assert_eq!(null, EffectProps::Null);
    }

    #[test]
    fn test_missing_fields_default() {
        let props: EffectProps =
            serde_json::from_str(r#"{"type":"pitch_shifter","fine_tune":7}"#).unwrap();
        assert_eq!(props, EffectProps::PitchShifter(PshifterProps::new(0, 7)));
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        let props = EffectProps::from(PshifterProps::new(-7, 12));
        save_props(&path, &props).unwrap();
        assert_eq!(load_props(&path).unwrap(), props);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_props(&path), Err(PitchShiftError::Json(_))));
        assert!(matches!(
            load_props(dir.path().join("missing.json")),
            Err(PitchShiftError::Io(_))
        ));
    }
}
