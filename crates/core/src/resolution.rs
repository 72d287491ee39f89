//! Aspect-ratio keys and the pixel dimensions they map to.

use serde::{Deserialize, Serialize};

/// Ratio used when the caller's key is not in the table.
pub const DEFAULT_RATIO: &str = "1:1";

/// Target output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::classify(self.width, self.height)
    }
}

/// Coarse framing derived from width / height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Landscape above 1.3, portrait below 0.8, square otherwise.
    pub fn classify(width: u32, height: u32) -> Self {
        if height == 0 {
            return Self::Landscape;
        }
        let ratio = f64::from(width) / f64::from(height);
        if ratio > 1.3 {
            Self::Landscape
        } else if ratio < 0.8 {
            Self::Portrait
        } else {
            Self::Square
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape orientation, wide format",
            Self::Portrait => "portrait orientation, vertical format",
            Self::Square => "square format",
        }
    }
}

/// Ordered ratio key -> dimensions table.
///
/// Lookups are exact on the key string. The table is replaceable through
/// [`ResolutionTable::with_entries`] or [`ResolutionTable::insert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTable {
    entries: Vec<(String, Dimensions)>,
}

impl ResolutionTable {
    pub fn standard() -> Self {
        Self::with_entries([
            ("1:1", Dimensions::new(768, 768)),
            ("16:9", Dimensions::new(1360, 768)),
            ("9:16", Dimensions::new(768, 1360)),
            ("4:5", Dimensions::new(768, 960)),
        ])
    }

    pub fn with_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Dimensions)>) -> Self {
        let mut table = Self { entries: Vec::new() };
        for (key, dims) in entries {
            table.insert(key, dims);
        }
        table
    }

    /// Add or replace the dimensions for `key`.
    pub fn insert(&mut self, key: impl Into<String>, dims: Dimensions) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = dims,
            None => self.entries.push((key, dims)),
        }
    }

    pub fn get(&self, ratio: &str) -> Option<Dimensions> {
        self.entries
            .iter()
            .find(|(key, _)| key == ratio)
            .map(|(_, dims)| *dims)
    }

    pub fn contains(&self, ratio: &str) -> bool {
        self.get(ratio).is_some()
    }

    pub fn ratios(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Dimensions for `ratio`, else for `default_ratio`, else the first row.
    ///
    /// Never fails: an empty table yields the square 768 default.
    pub fn lookup_or_default(&self, ratio: &str, default_ratio: &str) -> Dimensions {
        self.get(ratio)
            .or_else(|| self.get(default_ratio))
            .or_else(|| self.entries.first().map(|(_, dims)| *dims))
            .unwrap_or(Dimensions::new(768, 768))
    }
}

impl Default for ResolutionTable {
    fn default() -> Self {
        Self::standard()
    }
}
