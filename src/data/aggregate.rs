//! Pure aggregations over a filtered view (a slice of row indices into the
//! loaded [`Dataset`]). Nothing here touches the UI; every function is
//! recomputed from scratch on each interaction.

use crate::stats;

use super::model::{Dataset, Record, NUMERIC_FIELDS};

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// One scalar card: mean over the filtered view plus the signed delta
/// against the unfiltered population.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: f64,
    pub delta: f64,
}

fn view_mean(dataset: &Dataset, view: &[usize], field: impl Fn(&Record) -> f64) -> f64 {
    let values: Vec<f64> = view.iter().map(|&i| field(&dataset.records[i])).collect();
    stats::mean(&values)
}

fn full_mean(dataset: &Dataset, field: impl Fn(&Record) -> f64) -> f64 {
    let values: Vec<f64> = dataset.records.iter().map(field).collect();
    stats::mean(&values)
}

/// The four key metrics. The stress delta is inverted on purpose: a drop
/// in stress under the current filters reads as a positive change.
pub fn metric_cards(dataset: &Dataset, view: &[usize]) -> [MetricCard; 4] {
    let happiness = view_mean(dataset, view, |r| r.happiness);
    let stress = view_mean(dataset, view, |r| r.stress_level);
    let screen = view_mean(dataset, view, |r| r.screen_time);
    let exercise = view_mean(dataset, view, |r| r.exercise_freq);

    [
        MetricCard {
            label: "Average Happiness",
            value: happiness,
            delta: happiness - full_mean(dataset, |r| r.happiness),
        },
        MetricCard {
            label: "Average Stress Level",
            value: stress,
            delta: full_mean(dataset, |r| r.stress_level) - stress,
        },
        MetricCard {
            label: "Avg Screen Time (hrs)",
            value: screen,
            delta: screen - full_mean(dataset, |r| r.screen_time),
        },
        MetricCard {
            label: "Avg Exercise (weekly)",
            value: exercise,
            delta: exercise - full_mean(dataset, |r| r.exercise_freq),
        },
    ]
}

// ---------------------------------------------------------------------------
// Group-bys for the charts
// ---------------------------------------------------------------------------

/// Record count per platform, in the dataset's platform order. Platforms
/// filtered out of the view appear with a zero count.
pub fn platform_counts<'a>(dataset: &'a Dataset, view: &[usize]) -> Vec<(&'a str, usize)> {
    dataset
        .platforms
        .iter()
        .map(|platform| {
            let count = view
                .iter()
                .filter(|&&i| dataset.records[i].platform == *platform)
                .count();
            (platform.as_str(), count)
        })
        .collect()
}

/// Screen-time samples grouped by platform; empty groups are dropped.
pub fn screen_time_by_platform<'a>(dataset: &'a Dataset, view: &[usize]) -> Vec<(&'a str, Vec<f64>)> {
    dataset
        .platforms
        .iter()
        .filter_map(|platform| {
            let values: Vec<f64> = view
                .iter()
                .map(|&i| &dataset.records[i])
                .filter(|r| r.platform == *platform)
                .map(|r| r.screen_time)
                .collect();
            if values.is_empty() {
                None
            } else {
                Some((platform.as_str(), values))
            }
        })
        .collect()
}

/// Radar axes: the four wellbeing indicators compared per platform.
pub const RADAR_AXES: [&str; 4] = [
    "Sleep_Quality(1-10)",
    "Stress_Level(1-10)",
    "Happiness_Index(1-10)",
    "Exercise_Frequency(week)",
];

/// Per-platform means of the radar axes over the view; `None` when the
/// platform has no rows in the view.
pub fn radar_means(dataset: &Dataset, view: &[usize], platform: &str) -> Option<[f64; 4]> {
    let rows: Vec<&Record> = view
        .iter()
        .map(|&i| &dataset.records[i])
        .filter(|r| r.platform == platform)
        .collect();
    if rows.is_empty() {
        return None;
    }
    let mean_of = |f: fn(&Record) -> f64| {
        let values: Vec<f64> = rows.iter().map(|r| f(r)).collect();
        stats::mean(&values)
    };
    Some([
        mean_of(|r| r.sleep_quality),
        mean_of(|r| r.stress_level),
        mean_of(|r| r.happiness),
        mean_of(|r| r.exercise_freq),
    ])
}

/// Close a radar polygon by repeating the first value at the end.
pub fn close_loop(values: &[f64]) -> Vec<f64> {
    let mut closed = values.to_vec();
    if let Some(&first) = values.first() {
        closed.push(first);
    }
    closed
}

/// Record counts per age bucket, one row of counts per gender. Buckets
/// follow `dataset.age_ranges`, genders `dataset.genders`.
pub fn age_gender_counts<'a>(dataset: &'a Dataset, view: &[usize]) -> Vec<(&'a str, Vec<usize>)> {
    dataset
        .genders
        .iter()
        .map(|gender| {
            let counts = dataset
                .age_ranges
                .iter()
                .map(|bucket| {
                    view.iter()
                        .map(|&i| &dataset.records[i])
                        .filter(|r| r.gender == *gender && r.age_range == *bucket)
                        .count()
                })
                .collect();
            (gender.as_str(), counts)
        })
        .collect()
}

/// Every numeric field of the view as a named column, for the correlation
/// heatmap and the summary table.
pub fn numeric_columns(dataset: &Dataset, view: &[usize]) -> Vec<(&'static str, Vec<f64>)> {
    NUMERIC_FIELDS
        .iter()
        .enumerate()
        .map(|(field_idx, &name)| {
            let values = view
                .iter()
                .map(|&i| dataset.records[i].numeric_value(field_idx))
                .collect();
            (name, values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, init_filter_state};
    use crate::data::model::age_bucket;

    fn record(age: u32, gender: &str, platform: &str, happiness: f64, stress: f64) -> Record {
        Record {
            age,
            gender: gender.to_string(),
            platform: platform.to_string(),
            screen_time: 3.0,
            sleep_quality: 7.0,
            stress_level: stress,
            happiness,
            exercise_freq: 2.0,
            age_range: age_bucket(age).unwrap(),
        }
    }

    fn scenario_dataset() -> Dataset {
        Dataset::from_records(vec![
            record(18, "Female", "Instagram", 8.0, 4.0),
            record(33, "Male", "TikTok", 4.0, 6.0),
            record(60, "Female", "Facebook", 6.0, 5.0),
        ])
    }

    #[test]
    fn default_filters_give_zero_deltas() {
        let ds = scenario_dataset();
        let view = filtered_indices(&ds, &init_filter_state(&ds));
        let cards = metric_cards(&ds, &view);
        assert!((cards[0].value - 6.0).abs() < 1e-9);
        for card in &cards {
            assert!(card.delta.abs() < 1e-9, "{}: delta {}", card.label, card.delta);
        }
    }

    #[test]
    fn stress_delta_sign_is_inverted() {
        let ds = scenario_dataset();
        // Keep only the low-stress, high-happiness record.
        let view = [0usize];
        let cards = metric_cards(&ds, &view);
        // happiness: filtered(8) - overall(6) = +2
        assert!((cards[0].delta - 2.0).abs() < 1e-9);
        // stress: overall(5) - filtered(4) = +1, not -1
        assert!((cards[1].delta - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_view_yields_nan_metrics() {
        let ds = scenario_dataset();
        let cards = metric_cards(&ds, &[]);
        for card in cards {
            assert!(card.value.is_nan());
            assert!(card.delta.is_nan());
        }
    }

    #[test]
    fn platform_counts_cover_all_platforms() {
        let ds = scenario_dataset();
        let counts = platform_counts(&ds, &[0, 2]);
        assert_eq!(
            counts,
            vec![("Facebook", 1), ("Instagram", 1), ("TikTok", 0)]
        );
    }

    #[test]
    fn screen_time_groups_drop_empty_platforms() {
        let ds = scenario_dataset();
        let groups = screen_time_by_platform(&ds, &[1]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "TikTok");
        assert_eq!(groups[0].1, vec![3.0]);
    }

    #[test]
    fn radar_means_and_closure() {
        let ds = scenario_dataset();
        let view: Vec<usize> = (0..ds.len()).collect();
        let means = radar_means(&ds, &view, "Instagram").unwrap();
        assert_eq!(means, [7.0, 4.0, 8.0, 2.0]);
        assert!(radar_means(&ds, &view, "MySpace").is_none());

        let closed = close_loop(&means);
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[4], closed[0]);
    }

    #[test]
    fn age_gender_counts_are_grouped_not_summed() {
        let ds = scenario_dataset();
        let view: Vec<usize> = (0..ds.len()).collect();
        let rows = age_gender_counts(&ds, &view);
        // Genders sorted: Female, Male. Buckets: 15-20, 31-35, 50+.
        assert_eq!(rows[0], ("Female", vec![1, 0, 1]));
        assert_eq!(rows[1], ("Male", vec![0, 1, 0]));
    }

    #[test]
    fn numeric_columns_include_age() {
        let ds = scenario_dataset();
        let cols = numeric_columns(&ds, &[0, 1]);
        assert_eq!(cols.len(), 6);
        assert_eq!(cols[0].0, "Age");
        assert_eq!(cols[0].1, vec![18.0, 33.0]);
        assert_eq!(cols[4].0, "Happiness_Index(1-10)");
        assert_eq!(cols[4].1, vec![8.0, 4.0]);
    }
}
