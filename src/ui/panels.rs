use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::{self, MetricCard};
use crate::state::{AppState, FilterColumn};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title plus loaded/visible record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("MindScope");
        ui.label("Social Media & Mental Health Dashboard");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} in view",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(err) = &state.load_error {
            ui.label(RichText::new(err).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel: three collapsible multi-select columns.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_section(
                ui,
                state,
                FilterColumn::Platform,
                "Social Media Platform",
                dataset.platforms.iter().map(|p| p.as_str()),
            );
            filter_section(
                ui,
                state,
                FilterColumn::AgeRange,
                "Age Range",
                dataset.age_ranges.iter().copied(),
            );
            filter_section(
                ui,
                state,
                FilterColumn::Gender,
                "Gender",
                dataset.genders.iter().map(|g| g.as_str()),
            );
        });
}

/// One collapsible checkbox list with All/None shortcuts.
fn filter_section<'a>(
    ui: &mut Ui,
    state: &mut AppState,
    column: FilterColumn,
    title: &str,
    values: impl Iterator<Item = &'a str>,
) {
    let values: Vec<&str> = values.collect();
    let n_selected = match column {
        FilterColumn::Platform => state.filters.platforms.len(),
        FilterColumn::AgeRange => state.filters.age_ranges.len(),
        FilterColumn::Gender => state.filters.genders.len(),
    };
    let header_text = format!("{title}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            for value in values {
                let is_selected = match column {
                    FilterColumn::Platform => state.filters.platforms.contains(value),
                    FilterColumn::AgeRange => state.filters.age_ranges.contains(value),
                    FilterColumn::Gender => state.filters.genders.contains(value),
                };

                // Swatch the label with the category colour where one exists.
                let mut text = RichText::new(value);
                let color_map = match column {
                    FilterColumn::Platform => state.platform_colors.as_ref(),
                    FilterColumn::Gender => state.gender_colors.as_ref(),
                    FilterColumn::AgeRange => None,
                };
                if let Some(cm) = color_map {
                    text = text.color(cm.color_for(value));
                }

                let mut checked = is_selected;
                if ui.checkbox(&mut checked, text).changed() {
                    match column {
                        FilterColumn::Platform => state.toggle_platform(value),
                        FilterColumn::Gender => state.toggle_gender(value),
                        FilterColumn::AgeRange => {
                            // Bucket labels are the static label constants, so
                            // map the borrowed value back to its static str.
                            if let Some(&label) = crate::data::model::AGE_RANGE_LABELS
                                .iter()
                                .find(|&&l| l == value)
                            {
                                state.toggle_age_range(label);
                            }
                        }
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Render the four key-metric cards in one row.
pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let cards = aggregate::metric_cards(dataset, &state.visible_indices);

    ui.columns(4, |columns: &mut [Ui]| {
        for (ui, card) in columns.iter_mut().zip(cards.iter()) {
            metric_card(ui, card);
        }
    });
}

fn metric_card(ui: &mut Ui, card: &MetricCard) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(card.label);
        ui.heading(format_metric(card.value));

        let (delta_text, color) = if card.delta.is_nan() {
            ("NaN".to_string(), Color32::GRAY)
        } else if card.delta >= 0.0 {
            (format!("▲ {:+.2}", card.delta), Color32::from_rgb(0, 150, 70))
        } else {
            (format!("▼ {:+.2}", card.delta), Color32::from_rgb(200, 60, 60))
        };
        ui.label(RichText::new(delta_text).color(color).small());
    });
}

fn format_metric(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

// ---------------------------------------------------------------------------
// Load-failure screen
// ---------------------------------------------------------------------------

/// Terminal error view: the message and nothing else.
pub fn error_screen(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(RichText::new("Could not load the dataset").color(Color32::RED));
            ui.add_space(8.0);
            ui.label(message);
        });
    });
}
