//! Processing options and the named presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How strongly the prompt asks for photographic imperfection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RealismLevel {
    /// No extra realism clause.
    Standard,
    /// Extreme photorealism with imperfect surface textures.
    High,
    /// Maximum realism with micro-imperfections and atmospheric scattering.
    Ultra,
}

impl RealismLevel {
    /// All levels in display order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::High, Self::Ultra];

    /// Label shown to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::High => "High",
            Self::Ultra => "Ultra",
        }
    }
}

impl fmt::Display for RealismLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RealismLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidOption {
                kind: "realism level",
                value: s.to_string(),
            })
    }
}

/// The photographic style the model is asked to imitate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CameraProfile {
    /// High-end DSLR shot.
    Dslr,
    /// 35mm analog film.
    Film,
    /// Modern smartphone capture.
    Phone,
    /// Instant Polaroid print.
    Polaroid,
}

impl CameraProfile {
    /// All profiles in display order.
    pub const ALL: [Self; 4] = [Self::Dslr, Self::Film, Self::Phone, Self::Polaroid];

    /// Label shown to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dslr => "DSLR Camera",
            Self::Film => "Vintage Film (35mm)",
            Self::Phone => "Smartphone Capture",
            Self::Polaroid => "Polaroid",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Self::Dslr => "dslr",
            Self::Film => "film",
            Self::Phone => "phone",
            Self::Polaroid => "polaroid",
        }
    }
}

impl fmt::Display for CameraProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CameraProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.short_name().eq_ignore_ascii_case(s) || p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidOption {
                kind: "camera profile",
                value: s.to_string(),
            })
    }
}

/// Upper bound of the grain slider.
pub const MAX_GRAIN: u32 = 100;

/// Options for a single humanize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingOptions {
    /// Realism intensity.
    pub realism_level: RealismLevel,
    /// Target camera style.
    pub camera_profile: CameraProfile,
    /// Film grain amount, 0-100.
    pub grain_amount: u32,
}

impl ProcessingOptions {
    /// Build options, rejecting a grain amount above [`MAX_GRAIN`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrain`] when `grain_amount > 100`.
    pub fn new(
        realism_level: RealismLevel,
        camera_profile: CameraProfile,
        grain_amount: u32,
    ) -> Result<Self> {
        if grain_amount > MAX_GRAIN {
            return Err(Error::InvalidGrain(grain_amount));
        }
        Ok(Self {
            realism_level,
            camera_profile,
            grain_amount,
        })
    }
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Preset::Balanced.options()
    }
}

/// One-click combinations of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Preset {
    /// Web / social sharing.
    Fast,
    /// Realistic DSLR.
    Balanced,
    /// Cinematic film.
    #[cfg_attr(feature = "cli", value(name = "max"))]
    MaxQuality,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Self; 3] = [Self::Fast, Self::Balanced, Self::MaxQuality];

    /// The options this preset applies.
    #[must_use]
    pub fn options(self) -> ProcessingOptions {
        let (realism_level, camera_profile, grain_amount) = match self {
            Self::Fast => (RealismLevel::Standard, CameraProfile::Phone, 10),
            Self::Balanced => (RealismLevel::High, CameraProfile::Dslr, 30),
            Self::MaxQuality => (RealismLevel::Ultra, CameraProfile::Film, 50),
        };
        ProcessingOptions {
            realism_level,
            camera_profile,
            grain_amount,
        }
    }

    /// Short label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Balanced => "Balanced",
            Self::MaxQuality => "Max Quality",
        }
    }

    /// One-line description of the intended use.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Fast => "Web / Social",
            Self::Balanced => "Realistic DSLR",
            Self::MaxQuality => "Cinematic Film",
        }
    }

    /// This preset's options with any explicitly chosen values swapped in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrain`] when the grain override is above 100.
    pub fn with_overrides(
        self,
        realism_level: Option<RealismLevel>,
        camera_profile: Option<CameraProfile>,
        grain_amount: Option<u32>,
    ) -> Result<ProcessingOptions> {
        let base = self.options();
        ProcessingOptions::new(
            realism_level.unwrap_or(base.realism_level),
            camera_profile.unwrap_or(base.camera_profile),
            grain_amount.unwrap_or(base.grain_amount),
        )
    }

    /// The preset whose settings equal `options`, if any.
    #[must_use]
    pub fn matching(options: &ProcessingOptions) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.options() == *options)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_balanced() {
        let opts = ProcessingOptions::default();
        assert_eq!(opts.realism_level, RealismLevel::High);
        assert_eq!(opts.camera_profile, CameraProfile::Dslr);
        assert_eq!(opts.grain_amount, 30);
        assert_eq!(Preset::matching(&opts), Some(Preset::Balanced));
    }

    #[test]
    fn every_preset_matches_itself() {
        for preset in Preset::ALL {
            assert_eq!(Preset::matching(&preset.options()), Some(preset));
        }
    }

    #[test]
    fn tweaked_options_match_no_preset() {
        let mut opts = Preset::Fast.options();
        opts.grain_amount = 11;
        assert_eq!(Preset::matching(&opts), None);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let opts = Preset::MaxQuality
            .with_overrides(None, Some(CameraProfile::Polaroid), None)
            .unwrap();
        assert_eq!(opts.realism_level, RealismLevel::Ultra);
        assert_eq!(opts.camera_profile, CameraProfile::Polaroid);
        assert_eq!(opts.grain_amount, 50);

        let opts = Preset::Fast
            .with_overrides(Some(RealismLevel::High), None, Some(0))
            .unwrap();
        assert_eq!(opts.realism_level, RealismLevel::High);
        assert_eq!(opts.camera_profile, CameraProfile::Phone);
        assert_eq!(opts.grain_amount, 0);
    }

    #[test]
    fn no_overrides_is_the_preset() {
        for preset in Preset::ALL {
            assert_eq!(preset.with_overrides(None, None, None).unwrap(), preset.options());
        }
    }

    #[test]
    fn grain_override_above_100_is_rejected() {
        assert!(matches!(
            Preset::Balanced.with_overrides(None, None, Some(150)),
            Err(Error::InvalidGrain(150))
        ));
    }

    #[test]
    fn grain_above_100_is_rejected() {
        assert!(ProcessingOptions::new(RealismLevel::High, CameraProfile::Film, 100).is_ok());
        assert!(matches!(
            ProcessingOptions::new(RealismLevel::High, CameraProfile::Film, 101),
            Err(Error::InvalidGrain(101))
        ));
    }

    #[test]
    fn parses_short_names_and_labels() {
        assert_eq!("ultra".parse::<RealismLevel>().unwrap(), RealismLevel::Ultra);
        assert_eq!("Standard".parse::<RealismLevel>().unwrap(), RealismLevel::Standard);
        assert_eq!("DSLR".parse::<CameraProfile>().unwrap(), CameraProfile::Dslr);
        assert_eq!(
            "Vintage Film (35mm)".parse::<CameraProfile>().unwrap(),
            CameraProfile::Film
        );
        assert_eq!(
            "smartphone capture".parse::<CameraProfile>().unwrap(),
            CameraProfile::Phone
        );
    }

    #[test]
    fn unknown_names_fail_loudly() {
        let err = "medium".parse::<RealismLevel>().unwrap_err();
        assert!(err.to_string().contains("medium"));
        assert!("lomo".parse::<CameraProfile>().is_err());
    }

    #[test]
    fn options_serialize_camel_case() {
        let json = serde_json::to_value(ProcessingOptions::default()).unwrap();
        assert_eq!(json["grainAmount"], 30);
        assert_eq!(json["realismLevel"], "High");
        assert_eq!(json["cameraProfile"], "Dslr");
    }
}
