//! Pose policy: the single source of every pose-dependent phrase.
//!
//! People in generated images never face the camera. The base fragment, the
//! persona reinforcement clause and the negative exclusion clause are all
//! derived here from one [`Pose`] value so they cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::request::Resolved;

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// Camera-relative body orientation. Front-facing is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    Back,
    Side,
}

impl Pose {
    pub const ALL: [Pose; 2] = [Self::Back, Self::Side];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Side => "side",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "back" => Some(Self::Back),
            "side" => Some(Self::Side),
            _ => None,
        }
    }

    /// Lenient lookup: anything other than `back`/`side` (including the
    /// legacy `front`) becomes `Back`.
    pub fn resolve(s: &str) -> Resolved<Self> {
        match Self::from_str(s) {
            Some(pose) => Resolved::exact(pose),
            None => Resolved::fallback(Self::Back),
        }
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phrase tables
// ---------------------------------------------------------------------------

const BACK_DESCRIPTION: &str = "person in background, figure in distance, facing away from camera, \
     back view, subjects captured from back view, candidly looking away from camera";

const SIDE_DESCRIPTION: &str = "person in mid-ground, side profile view, gentle side profile, \
     subjects captured from side angle, looking away from camera, \
     only ear and side of head visible, partial face profile, no full face visible";

const BACK_REINFORCEMENT: &str = "(back view:1.5), (rear view:1.4), \
     (person completely facing away from camera:1.5), (back to camera:1.5), \
     (no face visible:1.6), (back side only:1.4), (completely turned away:1.4), \
     (looking away from camera:1.3), (cannot see facial features:1.5), posterior view";

const SIDE_REINFORCEMENT: &str = "(side profile:1.4), (side view:1.3), (profile shot:1.3), \
     (lateral view:1.3), (90 degree angle:1.2), (side angle:1.3), (only ear visible:1.4), \
     (partial face profile:1.3), (no full face:1.4), profile perspective";

/// Excluded for every pose.
pub const FRONT_EXCLUSION_TERMS: &[&str] = &[
    "front view",
    "frontal pose",
    "facing camera",
    "direct eye contact",
    "face toward viewer",
    "straight-on portrait",
    "eye contact with camera",
    "face clearly visible",
    "full face visible",
];

/// Back pose: no face, and none of the side pose's signature.
const BACK_EXCLUSION_TERMS: &[&str] = &[
    "face visible",
    "face shown",
    "facial features visible",
    "frontal shot",
    "face to camera",
    "person looking at viewer",
    "direct eye contact",
    "face portrait",
    "facial close-up",
    "seeing face",
    "front facing",
    "looking directly",
    "side profile",
    "side view",
    "profile shot",
    "ear visible",
];

/// Side pose: no full face, and not turned completely away.
const SIDE_EXCLUSION_TERMS: &[&str] = &[
    "front view",
    "back view",
    "facing camera",
    "turned completely away",
    "frontal view",
    "rear view",
    "back to camera",
    "posterior view",
    "full face visible",
    "both eyes visible",
    "nose visible",
    "mouth visible",
    "face portrait",
    "facial close-up",
];

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Every pose-derived phrase for one pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosePolicy {
    pose: Pose,
}

impl PosePolicy {
    pub fn for_pose(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Orientation phrasing appended to the common realism set.
    pub fn descriptive_clause(&self) -> &'static str {
        match self.pose {
            Pose::Back => BACK_DESCRIPTION,
            Pose::Side => SIDE_DESCRIPTION,
        }
    }

    /// Weighted phrasing appended to the persona fragment.
    pub fn reinforcement_clause(&self) -> &'static str {
        match self.pose {
            Pose::Back => BACK_REINFORCEMENT,
            Pose::Side => SIDE_REINFORCEMENT,
        }
    }

    pub fn exclusion_terms(&self) -> &'static [&'static str] {
        match self.pose {
            Pose::Back => BACK_EXCLUSION_TERMS,
            Pose::Side => SIDE_EXCLUSION_TERMS,
        }
    }

    /// Pose-specific negative clause, optionally emphasised as `(term:w)`.
    pub fn exclusion_clause(&self, weight: Option<f32>) -> String {
        weighted_join(self.exclusion_terms(), weight)
    }
}

/// The always-present front-facing exclusion clause.
pub fn front_exclusion_clause() -> String {
    FRONT_EXCLUSION_TERMS.join(", ")
}

fn weighted_join(terms: &[&str], weight: Option<f32>) -> String {
    match weight {
        Some(w) => terms
            .iter()
            .map(|term| format!("({term}:{w})"))
            .collect::<Vec<_>>()
            .join(", "),
        None => terms.join(", "),
    }
}

// ---------------------------------------------------------------------------
// Expression policy
// ---------------------------------------------------------------------------

/// Which poses keep the request's free-text expression.
///
/// Both supported poses hide the face, so the default suppresses expression
/// everywhere. Allow a pose explicitly to opt back in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionPolicy {
    allowed: Vec<Pose>,
}

impl ExpressionPolicy {
    pub fn suppress_all() -> Self {
        Self::default()
    }

    pub fn allow_for(poses: impl IntoIterator<Item = Pose>) -> Self {
        let mut allowed: Vec<Pose> = Vec::new();
        for pose in poses {
            if !allowed.contains(&pose) {
                allowed.push(pose);
            }
        }
        Self { allowed }
    }

    pub fn includes_expression(&self, pose: Pose) -> bool {
        self.allowed.contains(&pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_and_unknown_poses_normalise_to_back() {
        assert_eq!(Pose::resolve("front").value, Pose::Back);
        assert!(Pose::resolve("front").fell_back);
        assert_eq!(Pose::resolve("").value, Pose::Back);
        assert_eq!(Pose::resolve("side"), Resolved::exact(Pose::Side));
    }

    #[test]
    fn back_exclusion_rules_out_side_signature() {
        let clause = PosePolicy::for_pose(Pose::Back).exclusion_clause(None);
        assert!(clause.contains("side profile"));
        assert!(clause.contains("ear visible"));
        assert!(!clause.contains("turned completely away"));
    }

    #[test]
    fn side_exclusion_rules_out_turning_away() {
        let clause = PosePolicy::for_pose(Pose::Side).exclusion_clause(None);
        assert!(clause.contains("turned completely away"));
        assert!(clause.contains("full face visible"));
        assert!(!clause.contains("ear visible"));
    }

    #[test]
    fn weighted_exclusion_wraps_each_term() {
        let clause = PosePolicy::for_pose(Pose::Side).exclusion_clause(Some(1.3));
        assert!(clause.starts_with("(front view:1.3), (back view:1.3)"));
        assert_eq!(clause.matches(":1.3)").count(), SIDE_EXCLUSION_TERMS.len());
    }

    #[test]
    fn descriptive_and_reinforcement_clauses_agree() {
        let back = PosePolicy::for_pose(Pose::Back);
        assert!(back.descriptive_clause().contains("back view"));
        assert!(back.reinforcement_clause().contains("(back view:1.5)"));

        let side = PosePolicy::for_pose(Pose::Side);
        assert!(side.descriptive_clause().contains("side profile"));
        assert!(side.reinforcement_clause().contains("(side profile:1.4)"));
    }

    #[test]
    fn front_exclusion_clause_mentions_front_view() {
        assert!(front_exclusion_clause().starts_with("front view"));
    }

    #[test]
    fn expression_policy_defaults_to_suppression() {
        let policy = ExpressionPolicy::default();
        assert!(!policy.includes_expression(Pose::Back));
        assert!(!policy.includes_expression(Pose::Side));

        let side_only = ExpressionPolicy::allow_for([Pose::Side, Pose::Side]);
        assert!(side_only.includes_expression(Pose::Side));
        assert!(!side_only.includes_expression(Pose::Back));
    }
}
