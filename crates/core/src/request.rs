//! Generation request and the discrete choices it carries.
//!
//! Requests arrive with raw string keys. Each key type exposes a strict
//! `from_str` plus a lenient `resolve` that substitutes the documented
//! default and reports whether it had to.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single composition request. Not persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text place name. Empty degrades to generic scenery.
    pub location: String,
    pub persona: String,
    /// `back` or `side`; anything else is treated as `back`.
    #[serde(default = "default_pose")]
    pub pose: String,
    #[serde(default)]
    pub pose_detail: String,
    #[serde(default)]
    pub expression: String,
    #[serde(default = "default_time_of_day")]
    pub time_of_day: String,
    pub layout: String,
    pub ratio: String,
}

fn default_pose() -> String {
    "back".to_string()
}

fn default_time_of_day() -> String {
    TimeOfDay::Auto.as_str().to_string()
}

/// Outcome of a lenient key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    /// `true` when the raw key was not recognised and a default was used.
    pub fell_back: bool,
}

impl<T> Resolved<T> {
    pub(crate) fn exact(value: T) -> Self {
        Self {
            value,
            fell_back: false,
        }
    }

    pub(crate) fn fallback(value: T) -> Self {
        Self {
            value,
            fell_back: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

/// How many people appear in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonCount {
    One,
    Two,
    Three,
}

impl PersonCount {
    /// Read the count from a persona key prefix (`1_`, `2_`, `3_`).
    pub fn from_key_prefix(key: &str) -> Option<Self> {
        if key.starts_with("1_") {
            Some(Self::One)
        } else if key.starts_with("2_") {
            Some(Self::Two)
        } else if key.starts_with("3_") {
            Some(Self::Three)
        } else {
            None
        }
    }
}

/// Count/gender/relationship composition of the people depicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "1_female")]
    SoloFemale,
    #[serde(rename = "1_male")]
    SoloMale,
    #[serde(rename = "2_friends")]
    Friends,
    #[serde(rename = "2_couple")]
    Couple,
    #[serde(rename = "3_family")]
    Family,
}

impl Persona {
    pub const DEFAULT: Persona = Persona::SoloFemale;

    pub const ALL: [Persona; 5] = [
        Self::SoloFemale,
        Self::SoloMale,
        Self::Friends,
        Self::Couple,
        Self::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoloFemale => "1_female",
            Self::SoloMale => "1_male",
            Self::Friends => "2_friends",
            Self::Couple => "2_couple",
            Self::Family => "3_family",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn count(&self) -> PersonCount {
        match self {
            Self::SoloFemale | Self::SoloMale => PersonCount::One,
            Self::Friends | Self::Couple => PersonCount::Two,
            Self::Family => PersonCount::Three,
        }
    }

    /// Lenient lookup.
    ///
    /// An unknown key keeps its head-count when the prefix is recognisable
    /// (`2_siblings` becomes the first two-person persona) so the persona
    /// fragment and the negative head-count clause never disagree.
    pub fn resolve(s: &str) -> Resolved<Self> {
        if let Some(persona) = Self::from_str(s) {
            return Resolved::exact(persona);
        }
        let by_count = PersonCount::from_key_prefix(s)
            .and_then(|count| Self::ALL.into_iter().find(|p| p.count() == count));
        Resolved::fallback(by_count.unwrap_or(Self::DEFAULT))
    }
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

/// Lighting period. `Auto` defers to the preset's default lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Auto,
    Morning,
    Afternoon,
    GoldenHour,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 5] = [
        Self::Auto,
        Self::Morning,
        Self::Afternoon,
        Self::GoldenHour,
        Self::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::GoldenHour => "golden_hour",
            Self::Night => "night",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn resolve(s: &str) -> Resolved<Self> {
        match Self::from_str(s) {
            Some(time) => Resolved::exact(time),
            None => Resolved::fallback(Self::Auto),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Region of the frame reserved for ad copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Center,
    Left,
    Right,
    Bottom,
}

impl Layout {
    pub const ALL: [Layout; 4] = [Self::Center, Self::Left, Self::Right, Self::Bottom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }

    pub fn resolve(s: &str) -> Resolved<Self> {
        match Self::from_str(s) {
            Some(layout) => Resolved::exact(layout),
            None => Resolved::fallback(Self::Center),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_persona_resolves_exactly() {
        let resolved = Persona::resolve("2_couple");
        assert_eq!(resolved.value, Persona::Couple);
        assert!(!resolved.fell_back);
    }

    #[test]
    fn unknown_persona_keeps_head_count() {
        assert_eq!(Persona::resolve("2_siblings").value.count(), PersonCount::Two);
        assert_eq!(Persona::resolve("3_grandparents").value, Persona::Family);
        assert_eq!(Persona::resolve("1_child").value, Persona::SoloFemale);
        assert!(Persona::resolve("2_siblings").fell_back);
    }

    #[test]
    fn unprefixed_persona_uses_default() {
        let resolved = Persona::resolve("crowd");
        assert_eq!(resolved.value, Persona::DEFAULT);
        assert!(resolved.fell_back);
    }

    #[test]
    fn unknown_time_of_day_falls_back_to_auto() {
        assert_eq!(TimeOfDay::resolve("midnight"), Resolved::fallback(TimeOfDay::Auto));
        assert_eq!(TimeOfDay::resolve("night"), Resolved::exact(TimeOfDay::Night));
    }

    #[test]
    fn unknown_layout_falls_back_to_center() {
        assert_eq!(Layout::resolve("top"), Resolved::fallback(Layout::Center));
        assert_eq!(Layout::resolve("left"), Resolved::exact(Layout::Left));
    }

    #[test]
    fn request_defaults_apply_on_deserialize() {
        let request: GenerationRequest = serde_json::from_str(
            r#"{"location":"Seoul","persona":"1_male","layout":"center","ratio":"1:1"}"#,
        )
        .unwrap();
        assert_eq!(request.pose, "back");
        assert_eq!(request.time_of_day, "auto");
        assert!(request.pose_detail.is_empty());
        assert!(request.expression.is_empty());
    }
}
