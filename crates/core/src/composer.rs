//! Prompt composition: preset + request -> positive/negative prompt pair.
//!
//! Composition is a pure function of its inputs, the shared [`Lexicon`] and
//! the location catalog. Malformed keys never abort it; each is replaced by
//! its documented default, logged, and listed in a [`CompositionReport`].
//!
//! Positive fragments are joined in this order:
//!
//! 1. base (realism phrases + pose description)
//! 2. persona (template + pose reinforcement + detail + expression)
//! 3. location
//! 4. lighting
//! 5. layout
//! 6. style tone, color grade
//! 7. quality
//! 8. resolution hint (optional)

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::pose::{front_exclusion_clause, ExpressionPolicy, Pose, PosePolicy};
use crate::preset::ResolvedPreset;
use crate::request::{GenerationRequest, Layout, PersonCount, Persona, TimeOfDay};
use crate::resolution::{Dimensions, ResolutionTable, DEFAULT_RATIO};
use crate::resolver::LocationResolver;
use crate::template::PersonaSubstitution;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static COMMA_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("valid regex"));

const GENERIC_SCENERY: &str = "iconic travel destination, beautiful scenery";

const LANDMARK_SCENERY: &str =
    "iconic travel destination, beautiful scenery, recognizable landmark visible in background";

const REGIONAL_STYLE: &str = "regional architecture style";

const CLEAN_BACKGROUND: &str = "cluttered background, distracting elements";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Overridable composition policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerConfig {
    pub resolutions: ResolutionTable,
    /// Ratio key used when the request's ratio is not in `resolutions`.
    pub default_ratio: String,
    pub expression: ExpressionPolicy,
    /// When set, pose-specific negative terms are emitted as `(term:weight)`.
    pub pose_exclusion_weight: Option<f32>,
    /// Append the orientation/resolution hint fragment.
    pub resolution_hint: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            resolutions: ResolutionTable::standard(),
            default_ratio: DEFAULT_RATIO.to_string(),
            expression: ExpressionPolicy::suppress_all(),
            pose_exclusion_weight: None,
            resolution_hint: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Everything an image generator needs from the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptBundle {
    pub positive_prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
}

impl PromptBundle {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Request field that was replaced by a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedField {
    Persona,
    Pose,
    TimeOfDay,
    Layout,
    Ratio,
    Location,
}

impl DegradedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Persona => "persona",
            Self::Pose => "pose",
            Self::TimeOfDay => "time_of_day",
            Self::Layout => "layout",
            Self::Ratio => "ratio",
            Self::Location => "location",
        }
    }
}

/// One substitution applied during composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub field: DegradedField,
    pub raw: String,
    pub substituted: String,
}

/// Substitutions applied while composing one bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionReport {
    degradations: Vec<Degradation>,
}

impl CompositionReport {
    /// `true` when every key matched without substitution.
    pub fn is_clean(&self) -> bool {
        self.degradations.is_empty()
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn degraded(&self, field: DegradedField) -> bool {
        self.degradations.iter().any(|d| d.field == field)
    }

    fn record(&mut self, field: DegradedField, raw: &str, substituted: &str) {
        tracing::warn!(
            field = field.as_str(),
            raw = %raw,
            fallback = %substituted,
            "Composition input replaced by default",
        );
        self.degradations.push(Degradation {
            field,
            raw: raw.to_string(),
            substituted: substituted.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Builds prompt bundles. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    lexicon: Arc<Lexicon>,
    resolver: Arc<LocationResolver>,
    config: ComposerConfig,
}

impl PromptComposer {
    pub fn new(lexicon: Arc<Lexicon>, resolver: Arc<LocationResolver>, config: ComposerConfig) -> Self {
        Self {
            lexicon,
            resolver,
            config,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn compose(&self, preset: &ResolvedPreset, request: &GenerationRequest) -> PromptBundle {
        self.compose_with_report(preset, request).0
    }

    /// Compose and report every default that had to be substituted.
    pub fn compose_with_report(
        &self,
        preset: &ResolvedPreset,
        request: &GenerationRequest,
    ) -> (PromptBundle, CompositionReport) {
        let mut report = CompositionReport::default();

        let persona = Persona::resolve(&request.persona);
        if persona.fell_back {
            report.record(DegradedField::Persona, &request.persona, persona.value.as_str());
        }
        let pose = Pose::resolve(&request.pose);
        if pose.fell_back {
            report.record(DegradedField::Pose, &request.pose, pose.value.as_str());
        }
        let time = TimeOfDay::resolve(&request.time_of_day);
        if time.fell_back {
            report.record(DegradedField::TimeOfDay, &request.time_of_day, time.value.as_str());
        }
        let layout = Layout::resolve(&request.layout);
        if layout.fell_back {
            report.record(DegradedField::Layout, &request.layout, layout.value.as_str());
        }
        let dims = self.dimensions(&request.ratio, &mut report);

        let policy = PosePolicy::for_pose(pose.value);

        let base = format!("{}, {}", self.lexicon.realism_base(), policy.descriptive_clause());
        let persona_fragment = self.persona_fragment(preset, persona.value, &policy, request);
        let location = self.location_fragment(&request.location, &mut report);
        let lighting = self
            .lexicon
            .time_of_day_phrase(time.value)
            .unwrap_or(preset.default_lighting.as_str());
        let resolution_hint = if self.config.resolution_hint {
            resolution_hint(dims)
        } else {
            String::new()
        };

        let positive_prompt = join_fragments(&[
            base.as_str(),
            persona_fragment.as_str(),
            location.as_str(),
            lighting,
            self.lexicon.layout_phrase(layout.value),
            preset.style_tone.as_str(),
            preset.color_grade.as_str(),
            self.lexicon.quality_phrase(),
            resolution_hint.as_str(),
        ]);

        let front_exclusion = front_exclusion_clause();
        let pose_exclusion = policy.exclusion_clause(self.config.pose_exclusion_weight);
        let negative_prompt = join_fragments(&[
            self.lexicon.negative_base(),
            person_count_exclusion(persona.value.count()),
            front_exclusion.as_str(),
            pose_exclusion.as_str(),
            CLEAN_BACKGROUND,
        ]);

        let bundle = PromptBundle {
            positive_prompt,
            negative_prompt,
            width: dims.width,
            height: dims.height,
        };
        (bundle, report)
    }

    fn dimensions(&self, ratio: &str, report: &mut CompositionReport) -> Dimensions {
        let table = &self.config.resolutions;
        if !table.contains(ratio) {
            report.record(DegradedField::Ratio, ratio, &self.config.default_ratio);
        }
        table.lookup_or_default(ratio, &self.config.default_ratio)
    }

    fn persona_fragment(
        &self,
        preset: &ResolvedPreset,
        persona: Persona,
        policy: &PosePolicy,
        request: &GenerationRequest,
    ) -> String {
        let values = PersonaSubstitution {
            nationality: self.lexicon.nationality_phrase(preset.nationality),
            age_group: self.lexicon.age_group_phrase(preset.age_group),
        };
        let mut fragment = self.lexicon.persona_template(persona).render(&values);
        fragment.push_str(", ");
        fragment.push_str(policy.reinforcement_clause());

        let detail = request.pose_detail.trim();
        if !detail.is_empty() {
            fragment.push_str(", ");
            fragment.push_str(detail);
        }

        let expression = request.expression.trim();
        if !expression.is_empty() && self.config.expression.includes_expression(policy.pose()) {
            fragment.push_str(", ");
            fragment.push_str(expression);
        }
        fragment
    }

    fn location_fragment(&self, raw: &str, report: &mut CompositionReport) -> String {
        let query = raw.trim();
        if query.is_empty() {
            report.record(DegradedField::Location, raw, GENERIC_SCENERY);
            return GENERIC_SCENERY.to_string();
        }

        let Some(best) = self.resolver.best_match(query) else {
            let text = self.lexicon.transliterate_location(query);
            tracing::warn!(
                query = %query,
                fallback = %text,
                "No catalog match for location, using free text",
            );
            return format!("at {text}, {LANDMARK_SCENERY}, {REGIONAL_STYLE}");
        };

        let entry = best.entry;
        tracing::debug!(
            query = %query,
            location_id = %entry.id,
            score = best.score,
            "Resolved location",
        );

        let mut anchor = String::new();
        if !entry.city_en.is_empty() {
            anchor.push_str(&entry.city_en);
            anchor.push_str(", ");
        }
        anchor.push_str(&entry.country_en);

        let (subject, suffix) = match entry.landmark_phrase() {
            Some(landmark) => (landmark, None),
            None => {
                let name = [entry.display_name_en.as_str(), entry.display_name_ko.as_str()]
                    .into_iter()
                    .find(|name| !name.is_empty())
                    .unwrap_or(query);
                (name, Some(REGIONAL_STYLE))
            }
        };

        let mut fragment = match (anchor.is_empty(), suffix.is_some()) {
            (false, _) => format!("at {anchor}, {subject}, {LANDMARK_SCENERY}"),
            (true, true) => format!("at {subject}, {LANDMARK_SCENERY}"),
            (true, false) => format!("{subject}, {LANDMARK_SCENERY}"),
        };
        if let Some(suffix) = suffix {
            fragment.push_str(", ");
            fragment.push_str(suffix);
        }
        fragment
    }
}

/// Low-weight framing tag plus the literal resolution.
fn resolution_hint(dims: Dimensions) -> String {
    format!(
        "({}:1.1), ({}x{} resolution:1.05)",
        dims.orientation().hint(),
        dims.width,
        dims.height
    )
}

fn person_count_exclusion(count: PersonCount) -> &'static str {
    match count {
        PersonCount::One => "multiple people, group, crowd, more than one person",
        PersonCount::Two => "single person, alone, three or more people, crowd",
        PersonCount::Three => "one person, two people, crowd, many people",
    }
}

/// Join trimmed non-empty fragments with `", "`, then collapse whitespace
/// runs and repeated commas.
fn join_fragments(fragments: &[&str]) -> String {
    let joined = fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let collapsed = WHITESPACE_RUN_RE.replace_all(&joined, " ");
    COMMA_RUN_RE.replace_all(&collapsed, ",").into_owned()
}

#[cfg(test)]
mod tests {
    use crate::locations::LocationCatalog;
    use crate::preset::{resolve_preset, PresetSelection};

    use super::*;

    fn composer_with(config: ComposerConfig) -> PromptComposer {
        PromptComposer::new(
            Arc::new(Lexicon::standard()),
            Arc::new(LocationResolver::new(Arc::new(LocationCatalog::standard()))),
            config,
        )
    }

    fn composer() -> PromptComposer {
        composer_with(ComposerConfig::default())
    }

    fn preset() -> ResolvedPreset {
        resolve_preset(
            &Lexicon::standard(),
            &PresetSelection {
                tone_manner: "vibrant_energetic".to_string(),
                nationality: "korean".to_string(),
                age_group: "20s_30s".to_string(),
            },
        )
        .unwrap()
    }

    fn request(location: &str) -> GenerationRequest {
        GenerationRequest {
            location: location.to_string(),
            persona: "1_female".to_string(),
            pose: "back".to_string(),
            pose_detail: String::new(),
            expression: String::new(),
            time_of_day: "golden_hour".to_string(),
            layout: "center".to_string(),
            ratio: "1:1".to_string(),
        }
    }

    #[test]
    fn join_drops_empty_fragments_and_collapses_commas() {
        let joined = join_fragments(&["a", "  ", "b ,", ", c", "d\n\n  e"]);
        assert_eq!(joined, "a, b , c, d e");
        assert!(!joined.contains(", ,"));
        assert_eq!(join_fragments(&["x,,", ", , y"]), "x, y");
    }

    #[test]
    fn landmark_location_uses_city_country_and_phrase() {
        let mut report = CompositionReport::default();
        let fragment = composer().location_fragment("Eiffel Tower", &mut report);
        assert_eq!(
            fragment,
            "at Paris, France, Eiffel Tower, wide shot view from Trocadero, \
             iconic travel destination, beautiful scenery, recognizable landmark visible in background"
        );
        assert!(report.is_clean());
    }

    #[test]
    fn location_without_landmark_phrase_uses_display_name() {
        let mut report = CompositionReport::default();
        let fragment = composer().location_fragment("Japan", &mut report);
        assert_eq!(
            fragment,
            "at Japan, Japan, iconic travel destination, beautiful scenery, \
             recognizable landmark visible in background, regional architecture style"
        );
    }

    #[test]
    fn anchorless_entry_keeps_at_prefix_for_display_name() {
        let json = r#"[
            {
                "id": "ATLANTIS",
                "display_name_en": "Atlantis",
                "display_name_ko": "아틀란티스",
                "country_en": "",
                "country_ko": "",
                "type": "Landmark",
                "priority": 1,
                "search_keywords": ["sunken city"]
            },
            {
                "id": "EL_DORADO",
                "display_name_en": "El Dorado",
                "display_name_ko": "엘도라도",
                "country_en": "",
                "country_ko": "",
                "type": "Landmark",
                "priority": 1,
                "landmark_prompt": "golden temple ruins in the jungle"
            }
        ]"#;
        let catalog = LocationCatalog::from_json(json).unwrap();
        let composer = PromptComposer::new(
            Arc::new(Lexicon::standard()),
            Arc::new(LocationResolver::new(Arc::new(catalog))),
            ComposerConfig::default(),
        );

        let mut report = CompositionReport::default();
        assert_eq!(
            composer.location_fragment("Atlantis", &mut report),
            "at Atlantis, iconic travel destination, beautiful scenery, \
             recognizable landmark visible in background, regional architecture style"
        );
        assert_eq!(
            composer.location_fragment("El Dorado", &mut report),
            "golden temple ruins in the jungle, iconic travel destination, beautiful scenery, \
             recognizable landmark visible in background"
        );
        assert!(report.is_clean());
    }

    #[test]
    fn unmatched_location_is_transliterated() {
        let mut report = CompositionReport::default();
        let fragment = composer().location_fragment("제주 해변", &mut report);
        assert!(fragment.starts_with("at Jeju Island beach, iconic travel destination"));
        assert!(fragment.ends_with("regional architecture style"));
        assert!(report.is_clean());
    }

    #[test]
    fn empty_location_degrades_to_generic_scenery() {
        let mut report = CompositionReport::default();
        assert_eq!(composer().location_fragment("   ", &mut report), GENERIC_SCENERY);
        assert!(report.degraded(DegradedField::Location));
    }

    #[test]
    fn lighting_follows_time_of_day_or_preset_default() {
        let composer = composer();
        let preset = preset();

        let golden = composer.compose(&preset, &request("Seoul"));
        assert!(golden.positive_prompt.contains("golden hour sunset"));

        let mut auto = request("Seoul");
        auto.time_of_day = "auto".to_string();
        let bundle = composer.compose(&preset, &auto);
        assert!(bundle.positive_prompt.contains(&preset.default_lighting));
        assert!(!bundle.positive_prompt.contains("golden hour sunset"));
    }

    #[test]
    fn expression_is_suppressed_by_default_and_opt_in_per_pose() {
        let preset = preset();
        let mut req = request("Seoul");
        req.pose = "side".to_string();
        req.expression = "gentle smile".to_string();

        let suppressed = composer().compose(&preset, &req);
        assert!(!suppressed.positive_prompt.contains("gentle smile"));

        let allowing = composer_with(ComposerConfig {
            expression: ExpressionPolicy::allow_for([Pose::Side]),
            ..ComposerConfig::default()
        });
        assert!(allowing.compose(&preset, &req).positive_prompt.contains("gentle smile"));
    }

    #[test]
    fn pose_detail_is_appended_after_reinforcement() {
        let mut req = request("Seoul");
        req.pose_detail = "  holding a camera ".to_string();
        let prompt = composer().compose(&preset(), &req).positive_prompt;
        assert!(prompt.contains("posterior view, holding a camera, at Seoul"));
    }

    #[test]
    fn weighted_pose_exclusion_is_configurable() {
        let composer = composer_with(ComposerConfig {
            pose_exclusion_weight: Some(1.4),
            ..ComposerConfig::default()
        });
        let negative = composer.compose(&preset(), &request("Seoul")).negative_prompt;
        assert!(negative.contains("(side profile:1.4)"));
        assert!(negative.contains("front view, frontal pose"));
    }

    #[test]
    fn resolution_hint_can_be_disabled() {
        let preset = preset();
        let mut req = request("Seoul");
        req.ratio = "16:9".to_string();

        let with_hint = composer().compose(&preset, &req);
        assert!(with_hint
            .positive_prompt
            .ends_with("(landscape orientation, wide format:1.1), (1360x768 resolution:1.05)"));

        let without = composer_with(ComposerConfig {
            resolution_hint: false,
            ..ComposerConfig::default()
        })
        .compose(&preset, &req);
        assert!(!without.positive_prompt.contains("resolution:1.05"));
        assert_eq!((without.width, without.height), (1360, 768));
    }

    #[test]
    fn report_lists_every_degraded_field() {
        let mut req = request("");
        req.persona = "crowd".to_string();
        req.pose = "front".to_string();
        req.time_of_day = "midnight".to_string();
        req.layout = "top".to_string();
        req.ratio = "21:9".to_string();

        let (bundle, report) = composer().compose_with_report(&preset(), &req);
        let fields: Vec<DegradedField> = report.degradations().iter().map(|d| d.field).collect();
        assert_eq!(
            fields,
            [
                DegradedField::Persona,
                DegradedField::Pose,
                DegradedField::TimeOfDay,
                DegradedField::Layout,
                DegradedField::Ratio,
                DegradedField::Location,
            ]
        );
        assert_eq!(report.degradations()[4].substituted, "1:1");
        assert_eq!((bundle.width, bundle.height), (768, 768));
    }

    #[test]
    fn clean_request_has_clean_report() {
        let (_, report) = composer().compose_with_report(&preset(), &request("Eiffel Tower"));
        assert!(report.is_clean());
    }
}
