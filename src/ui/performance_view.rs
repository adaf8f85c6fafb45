use chrono::{Datelike, NaiveDate};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoint, PlotPoints};

use crate::analysis::horizon::Horizon;
use crate::analysis::performance::{self, Trend};
use crate::config;
use crate::data::models::Series;
use crate::ui::chart_utils::height_control;

pub fn trend_color(trend: Trend) -> egui::Color32 {
    match trend {
        Trend::Gain => egui::Color32::from_rgb(50, 180, 50),
        Trend::Loss => egui::Color32::from_rgb(220, 50, 50),
    }
}

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Cumulative value of the portfolio over the selected horizon.
pub fn render(ui: &mut egui::Ui, series: &Series, horizon: Horizon, height: &mut f32) {
    ui.heading("Historical Portfolio's price evolution");
    ui.add_space(4.0);

    let summary = match performance::summarize(series, horizon) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Performance chart skipped: {}", e);
            ui.colored_label(egui::Color32::from_rgb(220, 50, 50), e.to_string());
            return;
        }
    };
    let color = trend_color(summary.trend);

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(&summary.subtitle).color(color).strong());
    });
    ui.add_space(4.0);

    let points: Vec<[f64; 2]> = series
        .dates
        .iter()
        .zip(&series.values)
        .map(|(d, v)| [date_to_x(*d), *v])
        .collect();

    height_control(ui, height, "Performance Chart Height");
    Plot::new("performance_plot")
        .height(*height)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(summary.y_min)
        .include_y(summary.y_max)
        .set_margin_fraction(egui::Vec2::new(0.02, 0.0))
        .y_axis_label("Value")
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|_name, value: &PlotPoint| match x_to_date(value.x) {
            Some(d) => format!("{}\n{:.2}", d.format("%Y-%m-%d"), value.y),
            None => format!("{:.2}", value.y),
        })
        .show(ui, |plot_ui| {
            if config::SHOW_AREA_FILL {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(color.gamma_multiply(config::AREA_FILL_ALPHA))
                        .fill(summary.y_min as f32),
                );
            }
            plot_ui.line(
                Line::new(PlotPoints::from(points))
                    .name("Value")
                    .color(color)
                    .width(2.0),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_colors() {
        assert_eq!(trend_color(Trend::Gain), egui::Color32::from_rgb(50, 180, 50));
        assert_eq!(trend_color(Trend::Loss), egui::Color32::from_rgb(220, 50, 50));
    }

    #[test]
    fn test_date_axis_roundtrip() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(date_to_x(d) + 0.4), Some(d));
    }
}
