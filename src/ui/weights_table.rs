use eframe::egui;

/// Horizontal weights table: one column per asset, a single "Repartition" row.
pub fn render(ui: &mut egui::Ui, rows: &[(String, String)]) {
    ui.heading("Portfolio Repartition");
    ui.add_space(4.0);

    egui::Frame::none()
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(208)))
        .inner_margin(egui::Margin::same(6.0))
        .rounding(egui::Rounding::same(2.0))
        .show(ui, |ui| {
            egui::ScrollArea::horizontal()
                .id_salt("weights_table_scroll")
                .show(ui, |ui| {
                    egui::Grid::new("weights_table")
                        .striped(true)
                        .min_col_width(70.0)
                        .spacing([16.0, 8.0])
                        .show(ui, |ui| {
                            ui.strong("Stock");
                            for (asset, _) in rows {
                                ui.vertical_centered(|ui| ui.strong(asset));
                            }
                            ui.end_row();

                            ui.strong("Repartition");
                            for (_, weight) in rows {
                                ui.vertical_centered(|ui| ui.label(weight));
                            }
                            ui.end_row();
                        });
                });
        });
}
