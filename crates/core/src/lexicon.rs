//! Static phrase tables behind every prompt fragment.
//!
//! [`Lexicon::standard`] builds the immutable table set once; callers share
//! it through `Arc` and there is no way to mutate it afterwards. Tables are
//! stored in the declaration order of their key enums and indexed by
//! discriminant.

use crate::preset::{AgeGroup, Nationality, PresetSummary, StylePreset, ToneKey};
use crate::request::{Layout, Persona, TimeOfDay};
use crate::template::PersonaTemplate;

// ---------------------------------------------------------------------------
// Style presets
// ---------------------------------------------------------------------------

struct StyleRow {
    key: ToneKey,
    name: &'static str,
    description: &'static str,
    style_tone: &'static str,
    color_grade: &'static str,
    default_lighting: &'static str,
}

const STYLE_PRESETS: [StyleRow; 5] = [
    StyleRow {
        key: ToneKey::VibrantEnergetic,
        name: "Vibrant & Energetic",
        description: "High-end advertising look with high saturation and dynamic composition",
        style_tone: "high saturation, dynamic composition, high-energy storytelling, cinematic lighting, bold commercial aesthetics",
        color_grade: "bright vivid palette, punchy contrast, luminous highlights, colorful gradients, energetic color pops",
        default_lighting: "dramatic cinematic lighting with strong directional beams, specular accents, glowing rim lights",
    },
    StyleRow {
        key: ToneKey::AweInspiringNature,
        name: "Awe-Inspiring Nature",
        description: "Documentary style that puts dramatic natural scenery first",
        style_tone: "deep contrast, sharp details, rich colors, dramatic lighting, documentary style landscape photography",
        color_grade: "earthy yet saturated greens and blues, crystal clear highlights, realistic tonal depth, high dynamic range",
        default_lighting: "golden hour rim light, mountain backlighting, dramatic natural sunlight with long shadows",
    },
    StyleRow {
        key: ToneKey::WarmLifeSnap,
        name: "Warm Life Snap",
        description: "Warm, cozy lifestyle snapshot mood",
        style_tone: "cozy atmosphere, soft natural daylight, shallow depth of field, warm and inviting storytelling, candid family moment",
        color_grade: "gentle golden undertones, pastel highlights, creamy whites, subtle film grain warmth",
        default_lighting: "soft window light, diffused afternoon sun, gentle bounce light, cozy indoor glow",
    },
    StyleRow {
        key: ToneKey::MinimalistCitySnap,
        name: "Minimalist City Snap",
        description: "Minimal, refined urban snapshot mood",
        style_tone: "minimalist aesthetic, clean composition, low contrast, selective focus, geometric framing, architectural balance",
        color_grade: "muted cool palette, desaturated grays and blues, subtle highlights, refined city tones",
        default_lighting: "soft overcast daylight, diffused skyline glow, minimal reflections, gentle ambient light",
    },
    StyleRow {
        key: ToneKey::VintageFilmLook,
        name: "Vintage Film Look",
        description: "Retro mood with film grain and light leaks",
        style_tone: "vintage film photography, organic film grain, light leaks, analog color grading, moody nostalgic atmosphere",
        color_grade: "retro faded tones, teal and amber palette, sepia hints, gentle roll-off highlights",
        default_lighting: "nostalgic evening glow, tungsten practical lights, dusk ambient light, cinematic film softness",
    },
];

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

const NATIONALITY_PHRASES: [(Nationality, &str); 13] = [
    (Nationality::Korean, "Korean"),
    (Nationality::Japanese, "Japanese"),
    (Nationality::Chinese, "Chinese"),
    (Nationality::Taiwanese, "Taiwanese"),
    (Nationality::HongKong, "Hong Kong traveler"),
    (Nationality::SoutheastAsian, "Southeast Asian"),
    (Nationality::Indian, "Indian"),
    (Nationality::CentralAsian, "Central Asian"),
    (Nationality::MiddleEastern, "Middle Eastern"),
    (Nationality::Mediterranean, "Mediterranean European"),
    (Nationality::LatinAmerican, "Latin American"),
    (Nationality::African, "African"),
    (Nationality::Western, "Western European"),
];

const AGE_GROUP_PHRASES: [(AgeGroup, &str); 4] = [
    (AgeGroup::ChildTeen, "child or teenager, youthful, innocent expression"),
    (AgeGroup::YoungAdult, "in late 20s to early 30s, young adult, fresh and energetic"),
    (AgeGroup::MiddleAged, "middle-aged, mature, experienced appearance"),
    (AgeGroup::Senior, "senior, elderly, graceful and wise"),
];

const PERSONA_TEMPLATES: [(Persona, &str); 5] = [
    (
        Persona::SoloFemale,
        "a single {nationality} woman {age_group}, fashionable casual outfit, chic fashion style, natural beauty, confident posture, genuine smile, solo traveler style, backpacker or luxury tourist aesthetic",
    ),
    (
        Persona::SoloMale,
        "a single {nationality} man {age_group}, stylish casual wear, chic fashion style, handsome features, confident expression, natural charm, solo traveler style, backpacker or luxury tourist aesthetic",
    ),
    (
        Persona::Friends,
        "two {nationality} women {age_group}, close friends, matching casual style, Kpop idol style or chic fashion, young adults style, backpackers or luxury tourists, genuine friendship, laughing together, natural interaction",
    ),
    (
        Persona::Couple,
        "a {nationality} couple {age_group}, romantic atmosphere, coordinated outfits, chic fashion style, honeymooners or luxury tourists, intimate moment, loving expressions, natural chemistry",
    ),
    (
        Persona::Family,
        "a {nationality} family with young child, parents {age_group}, families with kids, comfortable clothing, casual outfit style, warm family atmosphere, natural bonding, happy expressions",
    ),
];

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

const LAYOUT_PHRASES: [(Layout, &str); 4] = [
    (
        Layout::Center,
        "IMPORTANT: leave a clean vertical column in the center for typography, main subjects positioned slightly to left or right thirds, rule of thirds composition, central area must stay free from people or props, balanced composition with negative space in the middle, empty space center, rule of thirds",
    ),
    (
        Layout::Left,
        "subject anchored on the left third of the frame, right third must be clear empty background reserved for copy, shift people to left side only, rule of thirds composition, strong negative space on right, empty space right, no subjects or objects overlapping right copy zone, rule of thirds",
    ),
    (
        Layout::Right,
        "subject anchored on the right third of the frame, left third intentionally empty for text overlay, people and props stay on right only, rule of thirds composition, generous negative space on left, empty space left, absolutely no subjects blocking left copy zone, rule of thirds",
    ),
    (
        Layout::Bottom,
        "composition keeps subjects in upper two thirds, lower third remains clean gradient background for headline, horizon line raised, avoid people or objects near bottom edge, provide wide negative space across bottom for text banner, empty space bottom, rule of thirds composition",
    ),
];

/// `Auto` carries no phrase; the preset's default lighting is used instead.
const TIME_OF_DAY_PHRASES: [(TimeOfDay, Option<&str>); 5] = [
    (TimeOfDay::Auto, None),
    (
        TimeOfDay::Morning,
        Some("morning light, fresh sunrise atmosphere, soft warm glow, clear morning sky, gentle dawn light, refreshing early hours"),
    ),
    (
        TimeOfDay::Afternoon,
        Some("bright afternoon sunlight, clear sunny day, vivid natural colors, strong daylight, high noon brightness, cloudless sky"),
    ),
    (
        TimeOfDay::GoldenHour,
        Some("golden hour sunset, warm orange and pink light, long dramatic shadows, magical atmosphere, beautiful dusk, romantic evening glow"),
    ),
    (
        TimeOfDay::Night,
        Some("night scene, evening atmosphere, city lights bokeh, ambient soft glow, blue hour twilight, gentle artificial lighting"),
    ),
];

/// Realism phrases shared by both pose variants of the base fragment.
const REALISM_BASE: &str = "authentic travel photography for marketing, natural lifestyle photo, \
     social media content, real-life moment, candid travel shot, \
     unposed authentic vibe, natural lighting, realistic atmosphere, \
     slightly grainy texture, film grain effect, subtle imperfections, \
     natural color palette, not oversaturated, soft contrast, \
     smartphone or mirrorless camera aesthetic, genuine travel experience, \
     breathtaking landscape, panoramic view, wide shot, expansive scenery, \
     full body shot";

const QUALITY: &str = "natural photography, realistic lighting, organic composition, \
     natural skin tones, authentic moment captured, \
     slight film grain for realism, subtle depth of field, \
     natural imperfections, genuine expression, \
     not overly sharp, slightly soft focus in background, \
     real camera photo, unprocessed feel, natural color grading";

const NEGATIVE_BASE: &str = "worst quality, low quality, blurry, out of focus, \
     text, watermark, logo, signature, username, copyright, \
     (bad anatomy:1.5), (deformed:1.3), disfigured, distorted face, ugly, \
     duplicate, extra limbs, missing limbs, (bad hands:2.0), (missing fingers:1.5), \
     (fused fingers:1.5), (extra digit:1.5), (fewer fingers:1.5), (strange fingers:1.5), \
     poorly drawn hands, poorly drawn face, malformed limbs, \
     bad proportions, gross proportions, (mutated hands:2.0), \
     cartoon, anime, illustration, painting, drawing, CGI, 3D render, \
     oversaturated colors, overexposed, underexposed, jpeg artifacts, \
     artificial looking, overly perfect, too clean, plastic skin, synthetic appearance, \
     fake bokeh, excessive HDR, overprocessed, over-sharpened, unrealistic perfection, \
     digital painting look, airbrushed skin, too smooth, artificial lighting, \
     stock photo style, overly posed, staged photo, fake smile, \
     filters, beauty filters, face filters, instagram filters, \
     unnatural colors, neon colors, fantasy colors, sci-fi aesthetic, \
     professional studio setup, perfect lighting, flawless skin, \
     bad feet, bad art, mutilated, mutation, extra limbs, \
     bad proportions, long neck, cross-eye, disfigured, missing legs, missing arms, extra arms, \
     nsfw, pregnant, pubic hair, nipples, glans, bare thighs, naked, transexual, \
     vore, destruction, burn, \
     ugly, plump, moles, \
     ugly, messy, cluttered background, boring, dull, simple background, studio shot, indoor, \
     face portrait, close up, head shot, upper body, \
     out of focus destination, wrong landmark, \
     (ulzzang-6500-v1.1:0.5), ng_deepnegative_v1_75t, EasyNegative, badhandv4, Makeup";

/// Known place and scene words that are rewritten before an unmatched
/// location is used as-is.
const LOCATION_HINTS: &[(&str, &str)] = &[
    ("파리", "Paris"),
    ("에펠탑", "Eiffel Tower"),
    ("제주", "Jeju Island"),
    ("성산일출봉", "Seongsan Ilchulbong"),
    ("뉴욕", "New York"),
    ("센트럴파크", "Central Park"),
    ("런던", "London"),
    ("빅벤", "Big Ben"),
    ("도쿄", "Tokyo"),
    ("후지산", "Mt. Fuji"),
    ("해변", "beach"),
    ("바다", "ocean"),
    ("산", "mountain"),
    ("도시", "city"),
    ("거리", "street"),
];

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

/// Immutable phrase tables.
#[derive(Debug, Clone)]
pub struct Lexicon {
    presets: [StylePreset; 5],
    nationalities: [String; 13],
    age_groups: [String; 4],
    personas: [PersonaTemplate; 5],
    layouts: [String; 4],
    time_of_day: [Option<String>; 5],
    realism_base: String,
    quality: String,
    negative_base: String,
    location_hints: Vec<(String, String)>,
}

impl Lexicon {
    /// Build the standard table set.
    pub fn standard() -> Self {
        Self {
            presets: STYLE_PRESETS.map(|row| StylePreset {
                key: row.key,
                name: row.name.to_string(),
                description: row.description.to_string(),
                style_tone: row.style_tone.to_string(),
                color_grade: row.color_grade.to_string(),
                default_lighting: row.default_lighting.to_string(),
            }),
            nationalities: NATIONALITY_PHRASES.map(|(_, phrase)| phrase.to_string()),
            age_groups: AGE_GROUP_PHRASES.map(|(_, phrase)| phrase.to_string()),
            personas: PERSONA_TEMPLATES.map(|(_, template)| {
                PersonaTemplate::parse(template).expect("built-in persona template is well-formed")
            }),
            layouts: LAYOUT_PHRASES.map(|(_, phrase)| phrase.to_string()),
            time_of_day: TIME_OF_DAY_PHRASES.map(|(_, phrase)| phrase.map(str::to_string)),
            realism_base: REALISM_BASE.to_string(),
            quality: QUALITY.to_string(),
            negative_base: NEGATIVE_BASE.to_string(),
            location_hints: LOCATION_HINTS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    pub fn style_preset(&self, tone: ToneKey) -> &StylePreset {
        &self.presets[tone as usize]
    }

    /// Picker listing in display order.
    pub fn available_presets(&self) -> Vec<PresetSummary> {
        self.presets
            .iter()
            .map(|preset| PresetSummary {
                key: preset.key,
                name: preset.name.clone(),
                description: preset.description.clone(),
            })
            .collect()
    }

    pub fn nationality_phrase(&self, nationality: Nationality) -> &str {
        &self.nationalities[nationality as usize]
    }

    pub fn age_group_phrase(&self, age_group: AgeGroup) -> &str {
        &self.age_groups[age_group as usize]
    }

    pub fn persona_template(&self, persona: Persona) -> &PersonaTemplate {
        &self.personas[persona as usize]
    }

    pub fn layout_phrase(&self, layout: Layout) -> &str {
        &self.layouts[layout as usize]
    }

    /// `None` for [`TimeOfDay::Auto`].
    pub fn time_of_day_phrase(&self, time: TimeOfDay) -> Option<&str> {
        self.time_of_day[time as usize].as_deref()
    }

    pub fn realism_base(&self) -> &str {
        &self.realism_base
    }

    pub fn quality_phrase(&self) -> &str {
        &self.quality
    }

    pub fn negative_base(&self) -> &str {
        &self.negative_base
    }

    /// Apply every transliteration hint in table order.
    pub fn transliterate_location(&self, text: &str) -> String {
        self.location_hints
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_in_enum_declaration_order() {
        for (i, row) in STYLE_PRESETS.iter().enumerate() {
            assert_eq!(row.key, ToneKey::ALL[i]);
        }
        for (i, (key, _)) in NATIONALITY_PHRASES.iter().enumerate() {
            assert_eq!(*key, Nationality::ALL[i]);
        }
        for (i, (key, _)) in AGE_GROUP_PHRASES.iter().enumerate() {
            assert_eq!(*key, AgeGroup::ALL[i]);
        }
        for (i, (key, _)) in PERSONA_TEMPLATES.iter().enumerate() {
            assert_eq!(*key, Persona::ALL[i]);
        }
        for (i, (key, _)) in LAYOUT_PHRASES.iter().enumerate() {
            assert_eq!(*key, Layout::ALL[i]);
        }
        for (i, (key, _)) in TIME_OF_DAY_PHRASES.iter().enumerate() {
            assert_eq!(*key, TimeOfDay::ALL[i]);
        }
    }

    #[test]
    fn lookups_return_matching_phrases() {
        let lexicon = Lexicon::standard();
        assert_eq!(lexicon.nationality_phrase(Nationality::HongKong), "Hong Kong traveler");
        assert!(lexicon.age_group_phrase(AgeGroup::Senior).starts_with("senior"));
        assert!(lexicon.layout_phrase(Layout::Bottom).contains("empty space bottom"));
        assert_eq!(lexicon.style_preset(ToneKey::VintageFilmLook).name, "Vintage Film Look");
    }

    #[test]
    fn auto_time_of_day_has_no_phrase() {
        let lexicon = Lexicon::standard();
        assert!(lexicon.time_of_day_phrase(TimeOfDay::Auto).is_none());
        assert!(lexicon
            .time_of_day_phrase(TimeOfDay::GoldenHour)
            .unwrap()
            .starts_with("golden hour sunset"));
    }

    #[test]
    fn available_presets_lists_every_tone_in_order() {
        let keys: Vec<ToneKey> = Lexicon::standard()
            .available_presets()
            .into_iter()
            .map(|p| p.key)
            .collect();
        assert_eq!(keys, ToneKey::ALL.to_vec());
    }

    #[test]
    fn transliteration_rewrites_known_terms() {
        let lexicon = Lexicon::standard();
        assert_eq!(lexicon.transliterate_location("파리 에펠탑"), "Paris Eiffel Tower");
        assert_eq!(lexicon.transliterate_location("Lake Bled"), "Lake Bled");
    }

    #[test]
    fn negative_base_is_single_line_and_excludes_nsfw() {
        let negative = Lexicon::standard().negative_base().to_string();
        assert!(!negative.contains('\n'));
        assert!(negative.contains("nsfw"));
        assert!(!negative.contains("  "));
    }
}
