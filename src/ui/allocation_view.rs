use eframe::egui;

use crate::analysis::allocation::Slice;
use crate::ui::chart_utils::{donut_chart, height_control};

/// Donut of per-asset weights
pub fn render_weights(ui: &mut egui::Ui, slices: &[Slice], height: &mut f32) {
    ui.heading("Portfolio Repartition");
    ui.add_space(4.0);
    height_control(ui, height, "Weights Chart Height");
    donut_chart(ui, slices, "Stocks", *height);
}

/// Donut of weights summed by sector
pub fn render_sectors(ui: &mut egui::Ui, slices: &[Slice], height: &mut f32) {
    ui.heading("Portfolio Repartition in sectors");
    ui.add_space(4.0);
    height_control(ui, height, "Sector Chart Height");
    donut_chart(ui, slices, "Sectors Repartition", *height);
}
