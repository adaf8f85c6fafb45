//! Drawing helpers shared by the chart views: sizing row, teal palette and donut.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui;

use crate::analysis::allocation::{format_percent, Slice};
use crate::config;

/// Line segments used to approximate one radian of arc
const ARC_SEGMENTS_PER_RADIAN: f32 = 24.0;

/// Pixels added or removed by one click of the step buttons
const HEIGHT_STEP: f32 = 40.0;

/// `height` moved by `delta` pixels, kept inside the allowed chart range.
pub fn step_height(height: f32, delta: f32) -> f32 {
    (height + delta).clamp(config::CHART_MIN_HEIGHT, config::CHART_MAX_HEIGHT)
}

/// Sizing row drawn above a chart: a label, step buttons and a draggable
/// pixel value.
pub fn height_control(ui: &mut egui::Ui, height: &mut f32, label: &str) {
    let [r, g, b] = config::DISCLAIMER_COLOR;
    let accent = egui::Color32::from_rgb(r, g, b);

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).small().color(accent));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("+").on_hover_text("Taller").clicked() {
                *height = step_height(*height, HEIGHT_STEP);
            }
            ui.add(
                egui::DragValue::new(height)
                    .speed(2.0)
                    .range(config::CHART_MIN_HEIGHT..=config::CHART_MAX_HEIGHT)
                    .suffix(" px"),
            );
            if ui.small_button("-").on_hover_text("Shorter").clicked() {
                *height = step_height(*height, -HEIGHT_STEP);
            }
        });
    });
    ui.add_space(2.0);
}

/// Colour `index` of `count` on the light-to-dark teal scale.
pub fn teal_shade(index: usize, count: usize) -> egui::Color32 {
    let t = if count <= 1 {
        0.5
    } else {
        index as f32 / (count - 1) as f32
    };
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    let [lr, lg, lb] = config::TEAL_LIGHT;
    let [dr, dg, db] = config::TEAL_DARK;
    egui::Color32::from_rgb(lerp(lr, dr), lerp(lg, dg), lerp(lb, db))
}

/// Slice covering `fraction` (0..1 of the full turn, clockwise from 12 o'clock).
pub fn slice_at_fraction(slices: &[Slice], fraction: f64) -> Option<usize> {
    let total: f64 = slices.iter().map(|s| s.weight).sum();
    if total <= 0.0 || !(0.0..1.0).contains(&fraction) {
        return None;
    }
    let mut acc = 0.0;
    for (i, s) in slices.iter().enumerate() {
        acc += s.weight / total;
        if fraction < acc {
            return Some(i);
        }
    }
    Some(slices.len() - 1)
}

/// Donut chart with arc angle proportional to weight, a colour legend and a
/// hover tooltip showing the weight as a percentage.
pub fn donut_chart(ui: &mut egui::Ui, slices: &[Slice], legend_title: &str, height: f32) {
    if slices.is_empty() {
        ui.label(format!(
            "No holdings above {}.",
            format_percent(config::WEIGHT_THRESHOLD)
        ));
        return;
    }

    let outer = config::DONUT_OUTER_RADIUS.min(height / 2.0 - 4.0).max(20.0);
    let inner = outer * config::DONUT_INNER_RADIUS / config::DONUT_OUTER_RADIUS;
    let total: f64 = slices.iter().map(|s| s.weight).sum();

    ui.horizontal(|ui| {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(2.0 * outer + 8.0, height), egui::Sense::hover());
        let center = rect.center();
        let painter = ui.painter_at(rect);

        let mut start = -FRAC_PI_2;
        for (i, slice) in slices.iter().enumerate() {
            let sweep = (slice.weight / total) as f32 * TAU;
            paint_arc(&painter, center, inner, outer, start, sweep, teal_shade(i, slices.len()));
            start += sweep;
        }

        let hovered = response.hover_pos().and_then(|pos| {
            let d = pos - center;
            let r = d.length();
            if r < inner || r > outer {
                return None;
            }
            let fraction = (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU) / TAU;
            slice_at_fraction(slices, fraction as f64)
        });
        if let Some(idx) = hovered {
            let slice = &slices[idx];
            response.on_hover_ui_at_pointer(|ui| {
                ui.strong(&slice.label);
                ui.label(format_percent(slice.weight));
            });
        }

        ui.vertical(|ui| {
            ui.strong(legend_title);
            ui.add_space(4.0);
            for (i, slice) in slices.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, teal_shade(i, slices.len()));
                    ui.label(&slice.label);
                });
            }
        });
    });
}

/// Annular sector from `start` sweeping `sweep` radians, painted as convex quads.
fn paint_arc(
    painter: &egui::Painter,
    center: egui::Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    color: egui::Color32,
) {
    let steps = ((sweep * ARC_SEGMENTS_PER_RADIAN).ceil() as usize).max(1);
    let at = |angle: f32, radius: f32| center + egui::vec2(angle.cos(), angle.sin()) * radius;

    for k in 0..steps {
        let a0 = start + sweep * k as f32 / steps as f32;
        let a1 = start + sweep * (k + 1) as f32 / steps as f32;
        painter.add(egui::Shape::convex_polygon(
            vec![at(a0, inner), at(a0, outer), at(a1, outer), at(a1, inner)],
            color,
            egui::Stroke::NONE,
        ));
    }
    // Separator between slices
    painter.line_segment(
        [at(start, inner), at(start, outer)],
        egui::Stroke::new(1.0, egui::Color32::WHITE),
    );
}
