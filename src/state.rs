use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
use crate::data::loader;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which of the three filter columns a UI action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Platform,
    AgeRange,
    Gender,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until the one-shot load on the first frame).
    pub dataset: Option<Arc<Dataset>>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Stable colours per platform / per gender.
    pub platform_colors: Option<ColorMap>,
    pub gender_colors: Option<ColorMap>,

    /// Terminal load error; when set, nothing but the message renders.
    pub load_error: Option<String>,

    /// Whether the one-shot load has been attempted.
    pub load_attempted: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            platform_colors: None,
            gender_colors: None,
            load_error: None,
            load_attempted: false,
        }
    }
}

impl AppState {
    /// One-shot session load. Goes through the memoized loader, so calling
    /// again with the same path never re-reads the file.
    pub fn load(&mut self, path: &Path) {
        self.load_attempted = true;
        match loader::load_dataset_cached(path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} records: {} platforms, {} age buckets, {} genders",
                    dataset.len(),
                    dataset.platforms.len(),
                    dataset.age_ranges.len(),
                    dataset.genders.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Ingest the loaded table, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.platform_colors = Some(ColorMap::new(dataset.platforms.iter().map(|p| p.as_str())));
        self.gender_colors = Some(ColorMap::new(dataset.genders.iter().map(|g| g.as_str())));
        self.dataset = Some(dataset);
        self.load_error = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }

    /// Toggle a platform in or out of the selection.
    pub fn toggle_platform(&mut self, platform: &str) {
        if !self.filters.platforms.remove(platform) {
            self.filters.platforms.insert(platform.to_string());
        }
        self.refilter();
    }

    /// Toggle an age bucket in or out of the selection.
    pub fn toggle_age_range(&mut self, bucket: &'static str) {
        if !self.filters.age_ranges.remove(bucket) {
            self.filters.age_ranges.insert(bucket);
        }
        self.refilter();
    }

    /// Toggle a gender in or out of the selection.
    pub fn toggle_gender(&mut self, gender: &str) {
        if !self.filters.genders.remove(gender) {
            self.filters.genders.insert(gender.to_string());
        }
        self.refilter();
    }

    /// Select every observed value in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let Some(ds) = &self.dataset {
            match column {
                FilterColumn::Platform => self.filters.platforms = ds.platforms.clone(),
                FilterColumn::AgeRange => {
                    self.filters.age_ranges = ds.age_ranges.iter().copied().collect()
                }
                FilterColumn::Gender => self.filters.genders = ds.genders.clone(),
            }
            self.refilter();
        }
    }

    /// Deselect every value in a column (empties the filtered view).
    pub fn select_none(&mut self, column: FilterColumn) {
        match column {
            FilterColumn::Platform => self.filters.platforms.clear(),
            FilterColumn::AgeRange => self.filters.age_ranges.clear(),
            FilterColumn::Gender => self.filters.genders.clear(),
        }
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{age_bucket, Record};

    fn dataset() -> Arc<Dataset> {
        let record = |age: u32, gender: &str, platform: &str| Record {
            age,
            gender: gender.to_string(),
            platform: platform.to_string(),
            screen_time: 3.0,
            sleep_quality: 7.0,
            stress_level: 5.0,
            happiness: 6.0,
            exercise_freq: 2.0,
            age_range: age_bucket(age).unwrap(),
        };
        Arc::new(Dataset::from_records(vec![
            record(18, "Female", "Instagram"),
            record(33, "Male", "TikTok"),
        ]))
    }

    #[test]
    fn set_dataset_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.filters.platforms.len(), 2);
    }

    #[test]
    fn toggle_narrows_and_restores() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.toggle_platform("TikTok");
        assert_eq!(state.visible_indices, vec![0]);
        state.toggle_platform("TikTok");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn select_none_empties_the_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_none(FilterColumn::Gender);
        assert!(state.visible_indices.is_empty());
        state.select_all(FilterColumn::Gender);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }
}
