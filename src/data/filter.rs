use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per filter column
// ---------------------------------------------------------------------------

/// The three independent multi-select filters. Each set defaults to every
/// distinct value observed in the table; deselecting narrows the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub platforms: BTreeSet<String>,
    pub age_ranges: BTreeSet<&'static str>,
    pub genders: BTreeSet<String>,
}

/// Initialise a [`FilterState`] with every observed value selected.
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    FilterState {
        platforms: dataset.platforms.clone(),
        age_ranges: dataset.age_ranges.iter().copied().collect(),
        genders: dataset.genders.clone(),
    }
}

/// Return indices of records that pass all three filters.
///
/// A record passes when its platform, age bucket and gender are each
/// members of the corresponding selected set (logical AND). An empty
/// selection therefore yields an empty view; there is no implicit
/// "nothing selected means everything" fallback.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            filters.platforms.contains(&rec.platform)
                && filters.age_ranges.contains(rec.age_range)
                && filters.genders.contains(&rec.gender)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{age_bucket, Record};

    fn record(age: u32, gender: &str, platform: &str) -> Record {
        Record {
            age,
            gender: gender.to_string(),
            platform: platform.to_string(),
            screen_time: 3.0,
            sleep_quality: 7.0,
            stress_level: 5.0,
            happiness: 6.0,
            exercise_freq: 2.0,
            age_range: age_bucket(age).unwrap(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record(18, "Female", "Instagram"),
            record(24, "Male", "TikTok"),
            record(33, "Female", "TikTok"),
            record(60, "Male", "Facebook"),
        ])
    }

    #[test]
    fn default_selection_keeps_every_record() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn filters_intersect_across_columns() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.platforms = ["TikTok".to_string()].into();
        filters.genders = ["Female".to_string()].into();
        // Only the record matching platform AND gender survives.
        assert_eq!(filtered_indices(&ds, &filters), vec![2]);
    }

    #[test]
    fn filtered_view_never_exceeds_table_size() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.age_ranges.remove("50+");
        let view = filtered_indices(&ds, &filters);
        assert!(view.len() <= ds.len());
        assert_eq!(view, vec![0, 1, 2]);
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.platforms.clear();
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn membership_is_exact() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.platforms = ["Instagram".to_string(), "Facebook".to_string()].into();
        let view = filtered_indices(&ds, &filters);
        for (i, rec) in ds.records.iter().enumerate() {
            let expected = filters.platforms.contains(&rec.platform)
                && filters.age_ranges.contains(rec.age_range)
                && filters.genders.contains(&rec.gender);
            assert_eq!(view.contains(&i), expected);
        }
    }
}
