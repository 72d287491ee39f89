//! Brand style presets and their resolution into a session-bound preset.
//!
//! A marketer picks a tone, a nationality and an age group once; the result
//! is a [`ResolvedPreset`] that stays read-only for the life of the session
//! and feeds every later composition.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::lexicon::Lexicon;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Identifier of a brand style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneKey {
    VibrantEnergetic,
    AweInspiringNature,
    WarmLifeSnap,
    MinimalistCitySnap,
    VintageFilmLook,
}

impl ToneKey {
    /// Every tone, in display order.
    pub const ALL: [ToneKey; 5] = [
        Self::VibrantEnergetic,
        Self::AweInspiringNature,
        Self::WarmLifeSnap,
        Self::MinimalistCitySnap,
        Self::VintageFilmLook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VibrantEnergetic => "vibrant_energetic",
            Self::AweInspiringNature => "awe_inspiring_nature",
            Self::WarmLifeSnap => "warm_life_snap",
            Self::MinimalistCitySnap => "minimalist_city_snap",
            Self::VintageFilmLook => "vintage_film_look",
        }
    }

    /// Parse a tone key. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tone| tone.as_str() == s)
    }
}

impl std::fmt::Display for ToneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Nationality
// ---------------------------------------------------------------------------

/// Nationality of the people depicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nationality {
    Korean,
    Japanese,
    Chinese,
    Taiwanese,
    HongKong,
    SoutheastAsian,
    Indian,
    CentralAsian,
    MiddleEastern,
    Mediterranean,
    LatinAmerican,
    African,
    Western,
}

impl Nationality {
    /// Substituted when the stored key is not recognised.
    pub const DEFAULT: Nationality = Nationality::Korean;

    pub const ALL: [Nationality; 13] = [
        Self::Korean,
        Self::Japanese,
        Self::Chinese,
        Self::Taiwanese,
        Self::HongKong,
        Self::SoutheastAsian,
        Self::Indian,
        Self::CentralAsian,
        Self::MiddleEastern,
        Self::Mediterranean,
        Self::LatinAmerican,
        Self::African,
        Self::Western,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Korean => "korean",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
            Self::Taiwanese => "taiwanese",
            Self::HongKong => "hong_kong",
            Self::SoutheastAsian => "southeast_asian",
            Self::Indian => "indian",
            Self::CentralAsian => "central_asian",
            Self::MiddleEastern => "middle_eastern",
            Self::Mediterranean => "mediterranean",
            Self::LatinAmerican => "latin_american",
            Self::African => "african",
            Self::Western => "western",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// Age group
// ---------------------------------------------------------------------------

/// Age bracket of the people depicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "child_teen")]
    ChildTeen,
    #[serde(rename = "20s_30s")]
    YoungAdult,
    #[serde(rename = "middle_aged")]
    MiddleAged,
    #[serde(rename = "senior")]
    Senior,
}

impl AgeGroup {
    /// Substituted when the stored key is not recognised.
    pub const DEFAULT: AgeGroup = AgeGroup::YoungAdult;

    pub const ALL: [AgeGroup; 4] = [
        Self::ChildTeen,
        Self::YoungAdult,
        Self::MiddleAged,
        Self::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChildTeen => "child_teen",
            Self::YoungAdult => "20s_30s",
            Self::MiddleAged => "middle_aged",
            Self::Senior => "senior",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// A brand visual style as stored in the lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub key: ToneKey,
    pub name: String,
    pub description: String,
    pub style_tone: String,
    pub color_grade: String,
    pub default_lighting: String,
}

/// Listing entry for the preset picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSummary {
    pub key: ToneKey,
    pub name: String,
    pub description: String,
}

/// A style preset bound to the user's nationality and age group choice.
///
/// Created once per session, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPreset {
    pub tone_key: ToneKey,
    pub nationality: Nationality,
    pub age_group: AgeGroup,
    pub style_tone: String,
    pub color_grade: String,
    pub default_lighting: String,
    pub display_name: String,
    pub display_description: String,
}

/// Raw preset choice as submitted by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PresetSelection {
    #[validate(length(min = 1, max = 50))]
    pub tone_manner: String,
    #[validate(length(min = 1, max = 50))]
    pub nationality: String,
    #[validate(length(min = 1, max = 50))]
    pub age_group: String,
}

/// Resolve a raw selection against the lexicon.
///
/// The tone must be known; nationality and age group fall back to
/// [`Nationality::DEFAULT`] and [`AgeGroup::DEFAULT`].
pub fn resolve_preset(
    lexicon: &Lexicon,
    selection: &PresetSelection,
) -> Result<ResolvedPreset, CoreError> {
    selection.validate()?;

    let tone_key = ToneKey::from_str(&selection.tone_manner).ok_or_else(|| {
        let available: Vec<&str> = ToneKey::ALL.iter().map(ToneKey::as_str).collect();
        CoreError::Validation(format!(
            "Invalid tone_manner '{}'. Available: {}",
            selection.tone_manner,
            available.join(", ")
        ))
    })?;

    let nationality = Nationality::from_str(&selection.nationality).unwrap_or_else(|| {
        tracing::warn!(
            nationality = %selection.nationality,
            fallback = Nationality::DEFAULT.as_str(),
            "Unknown nationality, using default",
        );
        Nationality::DEFAULT
    });

    let age_group = AgeGroup::from_str(&selection.age_group).unwrap_or_else(|| {
        tracing::warn!(
            age_group = %selection.age_group,
            fallback = AgeGroup::DEFAULT.as_str(),
            "Unknown age group, using default",
        );
        AgeGroup::DEFAULT
    });

    let style = lexicon.style_preset(tone_key);

    Ok(ResolvedPreset {
        tone_key,
        nationality,
        age_group,
        style_tone: style.style_tone.clone(),
        color_grade: style.color_grade.clone(),
        default_lighting: style.default_lighting.clone(),
        display_name: style.name.clone(),
        display_description: style.description.clone(),
    })
}
