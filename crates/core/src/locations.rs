//! Location knowledge base: countries, cities and landmarks.
//!
//! The catalog is static reference data loaded once at process start,
//! either the built-in table or a JSON file with the same record shape.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Granularity of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Country,
    City,
    Landmark,
}

/// One place in the knowledge base. Names are kept in two locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: String,
    pub display_name_en: String,
    pub display_name_ko: String,
    #[serde(default)]
    pub city_en: String,
    #[serde(default)]
    pub city_ko: String,
    pub country_en: String,
    pub country_ko: String,
    #[serde(alias = "type")]
    pub kind: LocationKind,
    /// Lower is more prominent.
    pub priority: i32,
    #[serde(default)]
    pub search_keywords: Vec<String>,
    /// Curated scene anchor. Only set on landmarks and some cities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark_prompt: Option<String>,
}

impl LocationEntry {
    /// The landmark phrase, treating an empty string as absent.
    pub fn landmark_phrase(&self) -> Option<&str> {
        self.landmark_prompt
            .as_deref()
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
    }
}

/// Read-only collection of [`LocationEntry`] records in encounter order.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    entries: Vec<LocationEntry>,
}

impl LocationCatalog {
    /// Build a catalog from entries, checking the record invariants.
    pub fn new(entries: Vec<LocationEntry>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Location id must not be empty".to_string(),
                ));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate location id '{}'",
                    entry.id
                )));
            }
            if entry.priority < 1 {
                return Err(CoreError::Validation(format!(
                    "Location '{}' has priority {} (must be at least 1)",
                    entry.id, entry.priority
                )));
            }
            if entry.kind == LocationKind::Country && entry.landmark_phrase().is_some() {
                return Err(CoreError::Validation(format!(
                    "Country entry '{}' must not carry a landmark prompt",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<LocationEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// The built-in knowledge base.
    pub fn standard() -> Self {
        use LocationKind::{City, Country, Landmark};

        #[rustfmt::skip]
        let entries = vec![
            // Europe
            place("FRANCE", "France", "", "France", Country, &["France", "Paris", "Europe"], ""),
            place("FR_PAR", "Paris", "Paris", "France", City, &["Paris", "Eiffel", "Louvre"],
                "Paris, France, detailed historic architecture"),
            place("PAR_EIF", "Eiffel Tower", "Paris", "France", Landmark, &["Eiffel", "Tower", "Trocadero"],
                "Eiffel Tower, wide shot view from Trocadero"),
            place("UK", "United Kingdom", "", "United Kingdom", Country, &["UK", "London"], ""),
            place("UK_LON", "London", "London", "United Kingdom", City, &["London", "Big Ben", "Thames"],
                "London, UK, iconic city scene"),
            place("LON_BND", "Big Ben", "London", "United Kingdom", Landmark, &["Big Ben", "Parliament", "Clock"],
                "Big Ben, Houses of Parliament, detailed Gothic architecture"),
            place("ITALY", "Italy", "", "Italy", Country, &["Italy", "Rome", "Venice"], ""),
            place("IT_ROM", "Rome", "Rome", "Italy", City, &["Rome", "Colosseum", "Vatican"],
                "Rome, Italy, historic city, warm sunlight"),
            place("ROM_COL", "Colosseum", "Rome", "Italy", Landmark, &["Colosseum", "Ruins"],
                "Ancient Colosseum ruins, strong shadow, Roman Empire aesthetic"),
            place("SPAIN", "Spain", "", "Spain", Country, &["Spain", "Barcelona", "Madrid"], ""),
            place("BCN_SGF", "Sagrada Familia", "Barcelona", "Spain", Landmark, &["Sagrada", "Gaudi", "Cathedral"],
                "Sagrada Familia, intricate facades, stained glass"),
            place("SWITZ", "Switzerland", "", "Switzerland", Country, &["Switzerland", "Alps", "Zurich"], ""),
            place("ZRH_ALP", "Swiss Alps", "Near Zurich", "Switzerland", Landmark, &["Alps", "Mountains", "Snow"],
                "Swiss Alps panorama, snow-capped peaks, vast landscape"),
            // North America
            place("USA", "United States", "", "United States", Country, &["USA", "America", "New York", "LA"], ""),
            place("US_NYC", "New York", "New York", "United States", City, &["New York", "NYC", "Manhattan"],
                "New York City, USA, dynamic cityscape, modern aesthetic"),
            place("NYC_BKB", "Brooklyn Bridge", "New York", "United States", Landmark, &["Brooklyn", "Bridge", "Skyline"],
                "Brooklyn Bridge, Manhattan skyline view, cinematic lighting"),
            place("US_LA", "Los Angeles", "Los Angeles", "United States", City, &["LA", "Hollywood", "California"],
                "Los Angeles, USA, sunny atmosphere, palm trees"),
            place("LA_HOY", "Hollywood Sign", "Los Angeles", "United States", Landmark, &["Hollywood", "Sign", "Hills"],
                "Hollywood Sign on the hill, wide shot, clear L.A. sky"),
            place("CANADA", "Canada", "", "Canada", Country, &["Canada", "Vancouver", "Toronto"], ""),
            place("CAN_NIAG", "Niagara Falls", "Niagara", "Canada/US", Landmark, &["Niagara", "Falls", "Mist"],
                "Niagara Falls, massive waterfall, dramatic mist"),
            // Asia & Oceania
            place("KOREA", "South Korea", "", "South Korea", Country, &["Korea", "Seoul", "Busan"], ""),
            place("KOR_SEO", "Seoul", "Seoul", "South Korea", City, &["Seoul", "Palace", "Hanok"],
                "Seoul, South Korea, harmony of tradition and modernity"),
            place("SEO_PAL", "Gyeongbokgung Palace", "Seoul", "South Korea", Landmark, &["Gyeongbokgung", "Palace", "Hanok"],
                "Gyeongbokgung Palace, detailed traditional architecture"),
            place("JAPAN", "Japan", "", "Japan", Country, &["Japan", "Tokyo", "Kyoto"], ""),
            place("JP_TOK", "Tokyo", "Tokyo", "Japan", City, &["Tokyo", "Shibuya", "Neon"],
                "Tokyo, Japan, futuristic city"),
            place("TOK_SHB", "Shibuya Crossing", "Tokyo", "Japan", Landmark, &["Shibuya", "Scramble", "Street"],
                "Shibuya Crossing, neon lights, motion blur"),
            place("THAILAND", "Thailand", "", "Thailand", Country, &["Thailand", "Bangkok", "Phuket"], ""),
            place("TH_BKK", "Bangkok", "Bangkok", "Thailand", City, &["Bangkok", "Temple", "Market"],
                "Bangkok, Thailand, vibrant culture"),
            place("BKK_WTA", "Wat Arun (Temple of Dawn)", "Bangkok", "Thailand", Landmark, &["Wat Arun", "Temple", "Dawn"],
                "Wat Arun temple, detailed golden spires, reflection on river"),
            place("AUS", "Australia", "", "Australia", Country, &["Australia", "Sydney", "Melbourne"], ""),
            place("SYD_OPH", "Sydney Opera House", "Sydney", "Australia", Landmark, &["Opera House", "Harbour"],
                "Sydney Opera House, Harbour Bridge, clear blue water"),
            place("SIN", "Singapore", "", "Singapore", Country, &["Singapore", "Marina Bay"], ""),
            place("SIN_MBS", "Marina Bay Sands", "Singapore", "Singapore", Landmark, &["Marina Bay", "Hotel", "Pool"],
                "Marina Bay Sands hotel, infinity pool on rooftop"),
            // Africa & Middle East
            place("UAE", "UAE", "", "UAE", Country, &["UAE", "Dubai", "Abu Dhabi"], ""),
            place("DXB_BKL", "Burj Khalifa", "Dubai", "UAE", Landmark, &["Burj Khalifa", "Tower"],
                "Burj Khalifa, modern skyscraper, reflection pool"),
            place("EGYPT", "Egypt", "", "Egypt", Country, &["Egypt", "Pyramids", "Cairo"], ""),
            place("EGP_GIZ", "Pyramids of Giza", "Near Cairo", "Egypt", Landmark, &["Giza", "Pyramids", "Sphinx"],
                "Great Pyramids of Giza, vast desert landscape"),
            place("TURKEY", "Turkey", "", "Turkey", Country, &["Turkey", "Istanbul", "Cappadocia"], ""),
            place("IST_HGS", "Hagia Sophia", "Istanbul", "Turkey", Landmark, &["Hagia Sophia", "Mosque", "Dome"],
                "Hagia Sophia mosque, vast interior dome, ottoman architecture"),
            // Latin America & Caribbean
            place("MEXICO", "Mexico", "", "Mexico", Country, &["Mexico", "Cancun", "Aztec"], ""),
            place("CUN_BSH", "Cancun Beach", "Cancun", "Mexico", Landmark, &["Cancun", "Beach", "Caribbean"],
                "White sandy beach, clear turquoise water, palm trees"),
            place("BRAZIL", "Brazil", "", "Brazil", Country, &["Brazil", "Rio", "Football"], ""),
            place("RIO_CRD", "Christ the Redeemer", "Rio de Janeiro", "Brazil", Landmark, &["Christ the Redeemer", "Rio"],
                "Christ the Redeemer statue, vast panoramic view"),
            place("PERU", "Peru", "", "Peru", Country, &["Peru", "Machu Picchu", "Inca"], ""),
            place("PER_MP", "Machu Picchu", "Near Cusco", "Peru", Landmark, &["Machu Picchu", "Inca", "Ruins"],
                "Machu Picchu, lush green mountains, ancient Incan ruins"),
        ];

        Self { entries }
    }
}

/// Built-in entries carry the same text in both locales.
fn place(
    id: &str,
    display_name: &str,
    city: &str,
    country: &str,
    kind: LocationKind,
    keywords: &[&str],
    landmark_prompt: &str,
) -> LocationEntry {
    LocationEntry {
        id: id.to_string(),
        display_name_en: display_name.to_string(),
        display_name_ko: display_name.to_string(),
        city_en: city.to_string(),
        city_ko: city.to_string(),
        country_en: country.to_string(),
        country_ko: country.to_string(),
        kind,
        priority: 1,
        search_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        landmark_prompt: (!landmark_prompt.is_empty()).then(|| landmark_prompt.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn standard_catalog_passes_its_own_invariants() {
        let standard = LocationCatalog::standard();
        assert_eq!(standard.len(), 45);
        assert!(LocationCatalog::new(standard.entries().to_vec()).is_ok());
    }

    #[test]
    fn landmark_phrases_only_on_cities_and_landmarks() {
        for entry in LocationCatalog::standard().entries() {
            if entry.kind == LocationKind::Country {
                assert!(entry.landmark_phrase().is_none(), "{}", entry.id);
            }
        }
    }

    #[test]
    fn get_finds_entry_by_id() {
        let catalog = LocationCatalog::standard();
        assert_eq!(catalog.get("PAR_EIF").unwrap().display_name_en, "Eiffel Tower");
        assert!(catalog.get("ATLANTIS").is_none());
    }

    #[test]
    fn loads_catalog_from_json_with_type_alias() {
        let json = r#"[{
            "id": "SLO_BLD",
            "display_name_en": "Lake Bled",
            "display_name_ko": "블레드 호수",
            "city_en": "Bled",
            "country_en": "Slovenia",
            "country_ko": "슬로베니아",
            "type": "Landmark",
            "priority": 2,
            "search_keywords": ["Bled", "Lake"],
            "landmark_prompt": "Lake Bled island church, emerald water"
        }]"#;
        let catalog = LocationCatalog::from_json(json).unwrap();
        let entry = catalog.get("SLO_BLD").unwrap();
        assert_eq!(entry.kind, LocationKind::Landmark);
        assert_eq!(entry.city_ko, "");
        assert_eq!(entry.landmark_phrase(), Some("Lake Bled island church, emerald water"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut entries = LocationCatalog::standard().entries()[..2].to_vec();
        entries.push(entries[0].clone());
        assert_matches!(
            LocationCatalog::new(entries),
            Err(CoreError::Validation(ref msg)) if msg.contains("Duplicate")
        );
    }

    #[test]
    fn rejects_country_with_landmark_prompt() {
        let mut france = LocationCatalog::standard().get("FRANCE").unwrap().clone();
        france.landmark_prompt = Some("rolling vineyards".to_string());
        assert_matches!(LocationCatalog::new(vec![france]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_zero_priority_and_malformed_json() {
        let mut paris = LocationCatalog::standard().get("FR_PAR").unwrap().clone();
        paris.priority = 0;
        assert_matches!(LocationCatalog::new(vec![paris]), Err(CoreError::Validation(_)));
        assert_matches!(LocationCatalog::from_json("{not json"), Err(CoreError::Validation(_)));
    }
}
