//! Instruction text sent alongside the image.
//!
//! The prompt is assembled in a fixed order: base instruction, camera
//! profile, realism level (High/Ultra only), grain (non-zero only), and a
//! closing instruction to keep the composition intact.

use crate::options::{CameraProfile, ProcessingOptions, RealismLevel};

const BASE_INSTRUCTION: &str = "Edit this image to make it look like a genuine, real-world photograph captured by a human. Remove all AI generation artifacts, such as overly smooth skin, plastic textures, or perfect symmetry. ";

const CLOSING_INSTRUCTION: &str = "Maintain the original composition, subject, and pose exactly, but completely overhaul the rendering style to be indistinguishable from a real photo.";

/// Qualitative label for a grain amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainIntensity {
    /// 1-30.
    Subtle,
    /// 31-70.
    Moderate,
    /// 71 and above.
    Heavy,
}

impl GrainIntensity {
    /// Classify a grain amount. Zero means no grain clause at all.
    #[must_use]
    pub fn for_amount(amount: u32) -> Option<Self> {
        match amount {
            0 => None,
            1..=30 => Some(Self::Subtle),
            31..=70 => Some(Self::Moderate),
            _ => Some(Self::Heavy),
        }
    }

    /// Word used in the prompt.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subtle => "subtle",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
        }
    }
}

fn camera_clause(profile: CameraProfile) -> &'static str {
    match profile {
        CameraProfile::Dslr => "Simulate a high-end DSLR camera shot (Canon 5D or Nikon D850). Focus on realistic depth of field, natural lighting dynamics, and sharp but organic details. ",
        CameraProfile::Film => "Simulate a 35mm film photograph (Kodak Portra 400). Add characteristic color grading, slight softness, and organic imperfections common in analog photography. ",
        CameraProfile::Polaroid => "Simulate an instant Polaroid photo. Add specific color shifts, softer focus, and the unique texture of instant film. ",
        CameraProfile::Phone => "Simulate a modern smartphone photo (iPhone or Pixel). Add slight digital noise in shadows and natural HDR processing. ",
    }
}

fn realism_clause(level: RealismLevel) -> Option<&'static str> {
    match level {
        RealismLevel::Standard => None,
        RealismLevel::High => Some("Prioritize extreme photorealism. Ensure textures on surfaces (skin, fabric, wood) are imperfect and detailed. "),
        RealismLevel::Ultra => Some("Maximum realism is required. Introduce subtle chaos, micro-imperfections, and atmospheric scattering to completely remove the 'digital' feel. "),
    }
}

/// Build the instruction string for the given options.
#[must_use]
pub fn build_prompt(options: &ProcessingOptions) -> String {
    let mut prompt = String::from(BASE_INSTRUCTION);
    prompt.push_str(camera_clause(options.camera_profile));

    if let Some(clause) = realism_clause(options.realism_level) {
        prompt.push_str(clause);
    }

    if let Some(intensity) = GrainIntensity::for_amount(options.grain_amount) {
        prompt.push_str("Add ");
        prompt.push_str(intensity.as_str());
        prompt.push_str(" natural film grain/noise to enhance the organic feel. ");
    }

    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}
