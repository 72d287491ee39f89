//! Fuzzy lookup of a free-text place name in the location catalog.
//!
//! Each entry is tested against four tiers in order and scored by the first
//! tier that matches:
//!
//! | Tier         | Field matched             | Base score                       |
//! |--------------|---------------------------|----------------------------------|
//! | country      | country name              | 100 on a `Country`, else 50      |
//! | city         | city name                 | 80 on a `City`, else 40          |
//! | keyword      | any search keyword        | 60 on a `Landmark`, else 30      |
//! | display name | display name              | 70                               |
//!
//! A field matches when it contains the trimmed, lowercased query. The
//! final score adds `(2 - priority) * 10`, saturating at the `i32` bounds.

use std::sync::Arc;

use serde::Serialize;

use crate::locations::{LocationCatalog, LocationEntry, LocationKind};

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Country,
    City,
    Keyword,
    DisplayName,
}

/// A scored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationMatch<'a> {
    pub entry: &'a LocationEntry,
    pub score: i32,
    pub tier: MatchTier,
}

/// Ranks catalog entries against a query.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    catalog: Arc<LocationCatalog>,
}

impl LocationResolver {
    pub fn new(catalog: Arc<LocationCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Ranked matches, best first, at most `limit` long.
    ///
    /// Ties keep catalog order. An empty or whitespace-only query returns an
    /// empty list without scoring anything.
    pub fn resolve(&self, query: &str, limit: usize) -> Vec<LocationMatch<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<LocationMatch<'_>> = self
            .catalog
            .entries()
            .iter()
            .filter_map(|entry| {
                let (tier, base) = classify(entry, &needle)?;
                Some(LocationMatch {
                    entry,
                    score: base.saturating_add(priority_bonus(entry.priority)),
                    tier,
                })
            })
            .collect();

        // `sort_by` is stable, so equal scores stay in catalog order.
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);
        matches
    }

    /// The single best match, if any.
    pub fn best_match(&self, query: &str) -> Option<LocationMatch<'_>> {
        self.resolve(query, 1).into_iter().next()
    }
}

/// `(2 - priority) * 10`, saturating for out-of-range priorities.
fn priority_bonus(priority: i32) -> i32 {
    2i32.saturating_sub(priority).saturating_mul(10)
}

fn contains(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle)
}

/// First matching tier and its base score.
fn classify(entry: &LocationEntry, needle: &str) -> Option<(MatchTier, i32)> {
    if contains(&entry.country_en, needle) || contains(&entry.country_ko, needle) {
        let base = if entry.kind == LocationKind::Country { 100 } else { 50 };
        return Some((MatchTier::Country, base));
    }
    if contains(&entry.city_en, needle) || contains(&entry.city_ko, needle) {
        let base = if entry.kind == LocationKind::City { 80 } else { 40 };
        return Some((MatchTier::City, base));
    }
    if entry.search_keywords.iter().any(|k| contains(k, needle)) {
        let base = if entry.kind == LocationKind::Landmark { 60 } else { 30 };
        return Some((MatchTier::Keyword, base));
    }
    if contains(&entry.display_name_en, needle) || contains(&entry.display_name_ko, needle) {
        return Some((MatchTier::DisplayName, 70));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocationResolver {
        LocationResolver::new(Arc::new(LocationCatalog::standard()))
    }

    #[test]
    fn empty_query_returns_nothing() {
        let resolver = resolver();
        assert!(resolver.resolve("", 10).is_empty());
        assert!(resolver.resolve("   ", 5).is_empty());
        assert!(resolver.best_match("\t").is_none());
    }

    #[test]
    fn country_entry_ranks_first_for_country_name() {
        let resolver = resolver();
        let results = resolver.resolve("France", 10);
        assert_eq!(results[0].entry.id, "FRANCE");
        assert_eq!(results[0].score, 110);
        assert_eq!(results[0].tier, MatchTier::Country);
        for other in &results[1..] {
            assert!(other.score < results[0].score);
            assert_ne!(other.entry.kind, LocationKind::Country);
        }
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let resolver = resolver();
        let upper = resolver.resolve("  FRANCE ", 10);
        let lower = resolver.resolve("france", 10);
        assert_eq!(upper, lower);
    }

    #[test]
    fn landmark_display_name_wins_for_full_landmark_name() {
        let best = resolver().best_match("Eiffel Tower").map(|m| m.entry.id.clone());
        assert_eq!(best.as_deref(), Some("PAR_EIF"));
    }

    #[test]
    fn keyword_match_prefers_landmarks() {
        let resolver = resolver();
        let results = resolver.resolve("Eiffel", 10);
        assert_eq!(results[0].entry.id, "PAR_EIF");
        assert_eq!(results[0].tier, MatchTier::Keyword);
        assert_eq!(results[0].score, 70);
        assert_eq!(results[1].entry.id, "FR_PAR");
        assert_eq!(results[1].score, 40);
    }

    #[test]
    fn city_match_prefers_city_entries() {
        let resolver = resolver();
        let results = resolver.resolve("Tokyo", 10);
        assert_eq!(results[0].entry.id, "JP_TOK");
        assert_eq!(results[0].score, 90);
        assert_eq!(results[1].entry.id, "TOK_SHB");
    }

    #[test]
    fn ties_keep_catalog_order() {
        // "tower" is a keyword on two landmarks with equal score.
        let r = resolver();
        let results = r.resolve("tower", 10);
        let ids: Vec<&str> = results.iter().map(|m| m.entry.id.as_str()).collect();
        assert_eq!(ids, ["PAR_EIF", "DXB_BKL"]);
    }

    #[test]
    fn limit_truncates_results() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("a", 3).len(), 3);
        assert!(resolver.resolve("a", 0).is_empty());
    }

    #[test]
    fn lower_priority_value_gets_larger_bonus() {
        let mut entries = LocationCatalog::standard().entries().to_vec();
        entries.retain(|e| e.id == "FR_PAR" || e.id == "IT_ROM");
        entries[0].priority = 3;
        entries[0].search_keywords = vec!["Old Town".to_string()];
        entries[1].search_keywords = vec!["Old Town".to_string()];
        let resolver = LocationResolver::new(Arc::new(LocationCatalog::new(entries).unwrap()));

        let results = resolver.resolve("old town", 10);
        assert_eq!(results[0].entry.id, "IT_ROM");
        assert_eq!(results[0].score, 30 + 10);
        assert_eq!(results[1].score, 30 - 10);
    }

    #[test]
    fn huge_priority_saturates_instead_of_overflowing() {
        let json = r#"[
            {
                "id": "SLO_BLD",
                "display_name_en": "Lake Bled",
                "display_name_ko": "블레드 호수",
                "city_en": "Bled",
                "country_en": "Slovenia",
                "country_ko": "슬로베니아",
                "type": "Landmark",
                "priority": 300000000,
                "search_keywords": ["Bled"]
            },
            {
                "id": "SLO_BLD_TOWN",
                "display_name_en": "Bled Old Town",
                "display_name_ko": "블레드",
                "city_en": "Bled",
                "country_en": "Slovenia",
                "country_ko": "슬로베니아",
                "type": "City",
                "priority": 1
            }
        ]"#;
        let catalog = LocationCatalog::from_json(json).unwrap();
        let resolver = LocationResolver::new(Arc::new(catalog));

        let results = resolver.resolve("bled", 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].entry.id, "SLO_BLD_TOWN");
        assert_eq!(results[0].score, 90);
        assert_eq!(results[1].entry.id, "SLO_BLD");
        assert_eq!(results[1].score, 40 + i32::MIN);
    }

    #[test]
    fn priority_bonus_saturates_at_both_ends() {
        assert_eq!(priority_bonus(1), 10);
        assert_eq!(priority_bonus(2), 0);
        assert_eq!(priority_bonus(i32::MAX), i32::MIN);
        assert_eq!(priority_bonus(i32::MIN), i32::MAX);
    }

    #[test]
    fn unknown_place_has_no_match() {
        assert!(resolver().resolve("Reykjavik", 10).is_empty());
    }
}
