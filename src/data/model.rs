use std::collections::BTreeSet;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// A single survey response (one row of the source CSV).
///
/// Field names are renamed to the exact CSV headers so the `csv` crate can
/// deserialize rows directly.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Social_Media_Platform")]
    pub platform: String,
    #[serde(rename = "Daily_Screen_Time(hrs)")]
    pub screen_time: f64,
    #[serde(rename = "Sleep_Quality(1-10)")]
    pub sleep_quality: f64,
    #[serde(rename = "Stress_Level(1-10)")]
    pub stress_level: f64,
    #[serde(rename = "Happiness_Index(1-10)")]
    pub happiness: f64,
    #[serde(rename = "Exercise_Frequency(week)")]
    pub exercise_freq: f64,
    /// Derived at load time from `age`; never present in the CSV.
    #[serde(skip)]
    pub age_range: &'static str,
}

// ---------------------------------------------------------------------------
// Age bucketing
// ---------------------------------------------------------------------------

/// Bucket labels in ascending age order.
pub const AGE_RANGE_LABELS: [&str; 7] =
    ["15-20", "21-25", "26-30", "31-35", "36-40", "41-50", "50+"];

/// Upper (inclusive) edge of each bucket. The first bucket also includes
/// its lower bound, 10.
const AGE_RANGE_EDGES: [u32; 7] = [20, 25, 30, 35, 40, 50, 100];

/// Map an age to its bucket label. Returns `None` outside 10..=100.
pub fn age_bucket(age: u32) -> Option<&'static str> {
    if age < 10 {
        return None;
    }
    AGE_RANGE_EDGES
        .iter()
        .position(|&edge| age <= edge)
        .map(|i| AGE_RANGE_LABELS[i])
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with the distinct value sets each filter offers.
/// Immutable after load; filtering produces index lists, never copies.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All survey responses (rows), with `age_range` already derived.
    pub records: Vec<Record>,
    /// Distinct platforms observed, sorted.
    pub platforms: BTreeSet<String>,
    /// Distinct age buckets observed, in bucket order (not alphabetical).
    pub age_ranges: Vec<&'static str>,
    /// Distinct genders observed, sorted.
    pub genders: BTreeSet<String>,
}

impl Dataset {
    /// Build the value indexes from loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut platforms = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut seen_ranges = BTreeSet::new();

        for rec in &records {
            platforms.insert(rec.platform.clone());
            genders.insert(rec.gender.clone());
            seen_ranges.insert(rec.age_range);
        }

        // Keep buckets in age order rather than the set's lexical order.
        let age_ranges = AGE_RANGE_LABELS
            .iter()
            .copied()
            .filter(|label| seen_ranges.contains(label))
            .collect();

        Dataset {
            records,
            platforms,
            age_ranges,
            genders,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Numeric columns
// ---------------------------------------------------------------------------

/// The numeric fields, in the order charts and tables present them.
pub const NUMERIC_FIELDS: [&str; 6] = [
    "Age",
    "Daily_Screen_Time(hrs)",
    "Sleep_Quality(1-10)",
    "Stress_Level(1-10)",
    "Happiness_Index(1-10)",
    "Exercise_Frequency(week)",
];

impl Record {
    /// Value of a numeric field by its position in [`NUMERIC_FIELDS`].
    pub fn numeric_value(&self, field_idx: usize) -> f64 {
        match field_idx {
            0 => self.age as f64,
            1 => self.screen_time,
            2 => self.sleep_quality,
            3 => self.stress_level,
            4 => self.happiness,
            _ => self.exercise_freq,
        }
    }
}
