/// UI layer: egui panels (top bar, filters, metric cards) and the chart
/// grid rendered from the data layer's aggregates.
pub mod charts;
pub mod panels;
