use std::f64::consts::TAU;

use eframe::egui::{self, Color32, RichText, ScrollArea, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::data::aggregate;
use crate::data::model::{Dataset, NUMERIC_FIELDS};
use crate::state::AppState;
use crate::stats;
use crate::ui::panels;

const CHART_HEIGHT: f32 = 280.0;
const LOWESS_FRAC: f64 = 0.5;

// ---------------------------------------------------------------------------
// Dashboard layout (central panel)
// ---------------------------------------------------------------------------

/// Render the whole dashboard: metric cards, chart sections, summary table.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Loading dataset…");
        });
        return;
    };
    let view = &state.visible_indices;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Key Metrics");
            panels::metrics_row(ui, state);
            ui.add_space(12.0);

            ui.heading("Platform Analysis");
            ui.columns(2, |columns: &mut [Ui]| {
                platform_distribution(&mut columns[0], state, &dataset, view);
                screen_time_boxes(&mut columns[1], state, &dataset, view);
            });
            ui.add_space(12.0);

            ui.heading("Mental Health Insights");
            ui.columns(2, |columns: &mut [Ui]| {
                happiness_scatter(&mut columns[0], state, &dataset, view);
                radar_chart(&mut columns[1], state, &dataset, view);
            });
            ui.add_space(12.0);

            ui.heading("Demographics");
            ui.columns(2, |columns: &mut [Ui]| {
                age_distribution(&mut columns[0], state, &dataset, view);
                exercise_scatter(&mut columns[1], state, &dataset, view);
            });
            ui.add_space(12.0);

            ui.heading("Correlation Analysis");
            correlation_heatmap(ui, &dataset, view);
            ui.add_space(12.0);

            summary_table(ui, &dataset, view);
            ui.add_space(24.0);
        });
}

fn platform_color(state: &AppState, platform: &str) -> Color32 {
    state
        .platform_colors
        .as_ref()
        .map(|cm| cm.color_for(platform))
        .unwrap_or(Color32::GRAY)
}

fn gender_color(state: &AppState, gender: &str) -> Color32 {
    state
        .gender_colors
        .as_ref()
        .map(|cm| cm.color_for(gender))
        .unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// 1. Platform distribution (proportion breakdown)
// ---------------------------------------------------------------------------

fn platform_distribution(ui: &mut Ui, state: &AppState, dataset: &Dataset, view: &[usize]) {
    ui.strong("Social Media Platform Distribution");
    let counts = aggregate::platform_counts(dataset, view);
    let total = view.len();
    let labels: Vec<String> = counts.iter().map(|(p, _)| p.to_string()).collect();

    Plot::new("platform_distribution")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("% of records")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            for (i, (platform, count)) in counts.iter().enumerate() {
                let pct = 100.0 * *count as f64 / total as f64;
                let bar = Bar::new(i as f64, pct)
                    .width(0.6)
                    .name(*platform)
                    .fill(platform_color(state, platform));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(*platform)
                        .color(platform_color(state, platform)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 2. Screen time by platform (box plot)
// ---------------------------------------------------------------------------

fn screen_time_boxes(ui: &mut Ui, state: &AppState, dataset: &Dataset, view: &[usize]) {
    ui.strong("Screen Time Distribution by Platform");
    let groups = aggregate::screen_time_by_platform(dataset, view);
    let labels: Vec<String> = groups.iter().map(|(p, _)| p.to_string()).collect();

    Plot::new("screen_time_boxes")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Daily screen time (hrs)")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            for (i, (platform, values)) in groups.iter().enumerate() {
                let Some(summary) = stats::five_number_summary(values) else {
                    continue;
                };
                let color = platform_color(state, platform);
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(
                        summary.whisker_low,
                        summary.q1,
                        summary.median,
                        summary.q3,
                        summary.whisker_high,
                    ),
                )
                .name(*platform)
                .fill(color.linear_multiply(0.25))
                .stroke(Stroke::new(1.5, color))
                .box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(*platform).color(color));

                if !summary.outliers.is_empty() {
                    let pts: Vec<[f64; 2]> =
                        summary.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(Points::new(pts).color(color).radius(2.5).name(*platform));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// 3. Happiness vs. screen time (scatter + LOWESS trend)
// ---------------------------------------------------------------------------

fn happiness_scatter(ui: &mut Ui, state: &AppState, dataset: &Dataset, view: &[usize]) {
    ui.strong("Happiness Index vs Screen Time");

    let pairs: Vec<(f64, f64)> = view
        .iter()
        .map(|&i| {
            let r = &dataset.records[i];
            (r.screen_time, r.happiness)
        })
        .collect();
    // Trend failure falls back to the plain scatter, never an error.
    let trend = stats::lowess(&pairs, LOWESS_FRAC);

    Plot::new("happiness_scatter")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Daily Screen Time (hours)")
        .y_axis_label("Happiness Index (1-10)")
        .show(ui, |plot_ui| {
            for &i in view {
                let r = &dataset.records[i];
                plot_ui.points(
                    Points::new(vec![[r.screen_time, r.happiness]])
                        .color(platform_color(state, &r.platform))
                        .radius(point_radius(r.exercise_freq))
                        .name(&r.platform),
                );
            }
            if let Some(curve) = trend {
                plot_ui.line(
                    Line::new(PlotPoints::new(curve))
                        .color(Color32::WHITE)
                        .width(2.0)
                        .name("LOWESS trend"),
                );
            }
        });
}

/// Point radius scaled by a non-negative magnitude (exercise, screen time).
fn point_radius(magnitude: f64) -> f32 {
    (2.0 + magnitude.max(0.0).sqrt() * 1.5) as f32
}

// ---------------------------------------------------------------------------
// 4. Radar comparison (wellbeing indicators per selected platform)
// ---------------------------------------------------------------------------

const RADAR_AXIS_LABELS: [&str; 4] = ["Sleep", "Stress", "Happiness", "Exercise"];
const RADAR_SCALE: f64 = 10.0;

fn radar_chart(ui: &mut Ui, state: &AppState, dataset: &Dataset, view: &[usize]) {
    ui.strong("Mental Health Indicators by Platform");

    Plot::new("radar_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .include_x(-RADAR_SCALE * 1.4)
        .include_x(RADAR_SCALE * 1.4)
        .include_y(-RADAR_SCALE * 1.2)
        .include_y(RADAR_SCALE * 1.2)
        .show(ui, |plot_ui| {
            // Rings and spokes stand in for the missing polar grid.
            for ring in [2.5, 5.0, 7.5, RADAR_SCALE] {
                let circle: Vec<[f64; 2]> = (0..=64)
                    .map(|s| {
                        let a = s as f64 / 64.0 * TAU;
                        [ring * a.cos(), ring * a.sin()]
                    })
                    .collect();
                plot_ui.line(Line::new(circle).color(Color32::from_gray(70)).width(0.5));
            }
            for (axis, label) in RADAR_AXIS_LABELS.iter().enumerate() {
                let angle = radar_angle(axis);
                plot_ui.line(
                    Line::new(vec![
                        [0.0, 0.0],
                        [RADAR_SCALE * angle.cos(), RADAR_SCALE * angle.sin()],
                    ])
                    .color(Color32::from_gray(70))
                    .width(0.5),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(
                        RADAR_SCALE * 1.18 * angle.cos(),
                        RADAR_SCALE * 1.1 * angle.sin(),
                    ),
                    RichText::new(*label).small(),
                ));
            }

            // One closed polygon per *selected* platform.
            for platform in &state.filters.platforms {
                let Some(means) = aggregate::radar_means(dataset, view, platform) else {
                    continue;
                };
                let closed = aggregate::close_loop(&means);
                let points: Vec<[f64; 2]> = closed
                    .iter()
                    .enumerate()
                    .map(|(axis, &value)| {
                        let angle = radar_angle(axis % RADAR_AXIS_LABELS.len());
                        let r = value.clamp(0.0, RADAR_SCALE);
                        [r * angle.cos(), r * angle.sin()]
                    })
                    .collect();
                let color = platform_color(state, platform);
                plot_ui.polygon(
                    Polygon::new(points[..points.len() - 1].to_vec())
                        .fill_color(color.linear_multiply(0.12))
                        .stroke(Stroke::NONE),
                );
                plot_ui.line(Line::new(points).color(color).width(1.5).name(platform));
            }
        });
}

/// Angle of a radar axis, first axis pointing up, clockwise.
fn radar_angle(axis: usize) -> f64 {
    std::f64::consts::FRAC_PI_2 - axis as f64 / RADAR_AXIS_LABELS.len() as f64 * TAU
}

// ---------------------------------------------------------------------------
// 5. Age distribution by gender (grouped bars)
// ---------------------------------------------------------------------------

fn age_distribution(ui: &mut Ui, state: &AppState, dataset: &Dataset, view: &[usize]) {
    ui.strong("Age Distribution by Gender");
    let rows = aggregate::age_gender_counts(dataset, view);
    let labels: Vec<String> = dataset.age_ranges.iter().map(|b| b.to_string()).collect();

    let n_genders = rows.len().max(1);
    let group_width = 0.8;
    let bar_width = group_width / n_genders as f64;

    Plot::new("age_distribution")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("Records")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            for (g, (gender, counts)) in rows.iter().enumerate() {
                let color = gender_color(state, gender);
                // Adjacent bars: each gender gets its own slot inside the group.
                let offset = -group_width / 2.0 + bar_width * (g as f64 + 0.5);
                let bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .map(|(bucket, &count)| {
                        Bar::new(bucket as f64 + offset, count as f64)
                            .width(bar_width * 0.9)
                            .fill(color)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(*gender).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// 6. Exercise vs. stress (scatter)
// ---------------------------------------------------------------------------

fn exercise_scatter(ui: &mut Ui, state: &AppState, dataset: &Dataset, view: &[usize]) {
    ui.strong("Exercise Frequency vs Stress Level");

    Plot::new("exercise_scatter")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Exercise Frequency (per week)")
        .y_axis_label("Stress Level (1-10)")
        .show(ui, |plot_ui| {
            for &i in view {
                let r = &dataset.records[i];
                plot_ui.points(
                    Points::new(vec![[r.exercise_freq, r.stress_level]])
                        .color(gender_color(state, &r.gender))
                        .radius(point_radius(r.screen_time))
                        .name(&r.gender),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 7. Correlation heatmap
// ---------------------------------------------------------------------------

/// Short axis labels for the heatmap and summary table.
fn short_field_name(field: &str) -> &str {
    field.split('(').next().unwrap_or(field).trim_end_matches('_')
}

fn correlation_heatmap(ui: &mut Ui, dataset: &Dataset, view: &[usize]) {
    ui.strong("Correlation Heatmap of Numeric Variables");
    let columns = aggregate::numeric_columns(dataset, view);
    let values: Vec<Vec<f64>> = columns.iter().map(|(_, v)| v.clone()).collect();
    let matrix = stats::correlation_matrix(&values);
    let k = columns.len();

    let x_labels: Vec<String> = columns
        .iter()
        .map(|(name, _)| short_field_name(name).to_string())
        .collect();
    let y_labels = x_labels.clone();

    Plot::new("correlation_heatmap")
        .height(420.0)
        .data_aspect(1.0)
        .show_grid([false, false])
        .x_axis_formatter(move |mark, _range| index_label(&x_labels, mark.value))
        .y_axis_formatter(move |mark, _range| index_label(&y_labels, mark.value))
        .show(ui, |plot_ui| {
            for row in 0..k {
                for col in 0..k {
                    let r = matrix[row][col];
                    let (x, y) = (col as f64, row as f64);
                    let cell = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(diverging_color(r))
                            .stroke(Stroke::new(0.5, Color32::from_gray(40))),
                    );
                    let label = if r.is_nan() {
                        "–".to_string()
                    } else {
                        format!("{r:.2}")
                    };
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(label)
                            .small()
                            .color(annotation_color(r)),
                    ));
                }
            }
        });
}

/// Blue–white–red diverging scale over [-1, 1]; NaN renders gray.
fn diverging_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::from_gray(90);
    }
    let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
    let lerp = |a: u8, b: u8, t: f32| (a as f32 + (b as f32 - a as f32) * t) as u8;
    if t < 0.5 {
        let s = t * 2.0;
        Color32::from_rgb(lerp(40, 235, s), lerp(70, 235, s), lerp(200, 235, s))
    } else {
        let s = (t - 0.5) * 2.0;
        Color32::from_rgb(lerp(235, 200, s), lerp(235, 50, s), lerp(235, 50, s))
    }
}

fn annotation_color(r: f64) -> Color32 {
    if !r.is_nan() && r.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

// ---------------------------------------------------------------------------
// 8. Summary table (collapsed by default)
// ---------------------------------------------------------------------------

const SUMMARY_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn summary_table(ui: &mut Ui, dataset: &Dataset, view: &[usize]) {
    egui::CollapsingHeader::new("Show Data Summary")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let columns = aggregate::numeric_columns(dataset, view);
            let describes: Vec<stats::Describe> =
                columns.iter().map(|(_, v)| stats::describe(v)).collect();

            egui_extras::TableBuilder::new(ui)
                .striped(true)
                .column(egui_extras::Column::auto().at_least(60.0))
                .columns(
                    egui_extras::Column::remainder().at_least(80.0),
                    NUMERIC_FIELDS.len(),
                )
                .header(22.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("");
                    });
                    for (name, _) in &columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(short_field_name(name));
                        });
                    }
                })
                .body(|mut body| {
                    for stat in SUMMARY_ROWS {
                        body.row(20.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.strong(stat);
                            });
                            for d in &describes {
                                row.col(|ui: &mut Ui| {
                                    ui.label(summary_cell(stat, d));
                                });
                            }
                        });
                    }
                });
        });
}

fn summary_cell(stat: &str, d: &stats::Describe) -> String {
    let value = match stat {
        "count" => return d.count.to_string(),
        "mean" => d.mean,
        "std" => d.std,
        "min" => d.min,
        "25%" => d.q25,
        "50%" => d.median,
        "75%" => d.q75,
        _ => d.max,
    };
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Label integer axis positions with category names, everything else blank.
fn index_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 0.05 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
