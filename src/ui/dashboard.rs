use eframe::egui;

use crate::analysis::horizon::{self, Horizon};
use crate::analysis::PortfolioView;
use crate::app::{AppState, ChartHeights};
use crate::config;
use crate::ui::{allocation_view, performance_view, weights_table};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if let Some(ref err) = state.load_error {
        ui.heading("Portfolio Dashboard");
        ui.add_space(8.0);
        ui.colored_label(egui::Color32::from_rgb(220, 50, 50), err);
        ui.label(format!(
            "Check the files in '{}' and click 'Reload Data'.",
            state.data_dir.display()
        ));
        return;
    }

    if state.pages.is_empty() {
        ui.label("No portfolios loaded.");
        return;
    }

    let AppState {
        pages,
        selected_portfolio,
        horizon,
        chart_heights,
        ..
    } = state;

    let page = &pages[(*selected_portfolio).min(pages.len() - 1)];
    match &page.view {
        Ok(view) => {
            ui.push_id(&page.name, |ui| render_portfolio(ui, view, horizon, chart_heights));
        }
        Err(e) => {
            ui.heading(format!("{} Portfolio", page.name));
            ui.add_space(8.0);
            ui.colored_label(
                egui::Color32::from_rgb(220, 50, 50),
                format!("Cannot display this portfolio: {}", e),
            );
        }
    }
}

fn render_portfolio(
    ui: &mut egui::Ui,
    view: &PortfolioView,
    horizon: &mut Horizon,
    heights: &mut ChartHeights,
) {
    ui.label(egui::RichText::new(format!("{} Portfolio", view.name)).size(28.0).strong());
    ui.add_space(12.0);

    // Key metrics row
    ui.columns(3, |cols| {
        metric_card(
            &mut cols[0],
            "Historical Annualized Return",
            &format!("{:.2}%", view.metrics.annualized_return * 100.0),
            "Average yearly return of the portfolio based on historical daily returns.",
        );
        metric_card(
            &mut cols[1],
            "Historical Annualized Volatility",
            &format!("{:.2}%", view.metrics.annualized_volatility * 100.0),
            "Annualized standard deviation of daily returns, indicating portfolio risk.",
        );
        metric_card(
            &mut cols[2],
            "Return / Risk Score",
            &format!("{:.2}", view.metrics.return_risk_ratio),
            "Ratio of expected return to volatility (Sharpe ratio); higher values indicate \
             better risk-adjusted performance.",
        );
    });

    ui.add_space(8.0);
    let [r, g, b] = config::DISCLAIMER_COLOR;
    let accent = egui::Color32::from_rgb(r, g, b);
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(egui::RichText::new("Disclaimer").color(accent).strong().italics());
        ui.label(
            egui::RichText::new(format!(" - {}", config::DISCLAIMER))
                .color(accent)
                .italics(),
        );
    });

    ui.add_space(12.0);
    weights_table::render(ui, &view.weight_rows);

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Choose horizon:").italics());
        for h in Horizon::ALL {
            ui.radio_value(horizon, h, h.label());
        }
    });

    let today = chrono::Local::now().date_naive();
    let filtered = horizon::filter_for_display(&view.value_series, *horizon, today);

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.columns(2, |cols| {
        performance_view::render(&mut cols[0], &filtered, *horizon, &mut heights.performance);
        allocation_view::render_weights(&mut cols[1], &view.asset_slices, &mut heights.weights);
    });

    ui.add_space(16.0);

    // Sector chart centred in the middle half of the page
    let width = ui.available_width();
    ui.horizontal(|ui| {
        ui.add_space(width * 0.25);
        ui.vertical(|ui| {
            ui.set_width(width * 0.5);
            allocation_view::render_sectors(ui, &view.sector_slices, &mut heights.sectors);
        });
    });
}

fn metric_card(ui: &mut egui::Ui, label: &str, value: &str, help: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.small(label);
                ui.label(egui::RichText::new(value).size(22.0).strong());
            });
        })
        .response
        .on_hover_text(help);
}
