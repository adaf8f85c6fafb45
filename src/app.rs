use std::path::PathBuf;

use eframe::egui;

use crate::analysis::horizon::Horizon;
use crate::analysis::{self, PortfolioView};
use crate::config;
use crate::data::loader;
use crate::data::models::PortfolioData;
use crate::error::PresentationError;
use crate::ui;

/// Per-chart height overrides (pixels), adjustable by the user at runtime
#[derive(Debug, Clone)]
pub struct ChartHeights {
    pub performance: f32,
    pub weights: f32,
    pub sectors: f32,
}

impl Default for ChartHeights {
    fn default() -> Self {
        Self {
            performance: 280.0,
            weights: 2.0 * config::DONUT_OUTER_RADIUS + 20.0,
            sectors: 2.0 * config::DONUT_OUTER_RADIUS + 20.0,
        }
    }
}

/// One tab of the dashboard: a portfolio and its computed view, or the
/// reason it cannot be drawn
#[derive(Debug, Clone)]
pub struct PortfolioPage {
    pub name: String,
    pub view: Result<PortfolioView, PresentationError>,
}

/// Shared application state
pub struct AppState {
    pub data_dir: PathBuf,
    pub data: PortfolioData,
    pub pages: Vec<PortfolioPage>,
    pub selected_portfolio: usize,
    /// Reset to the default on every portfolio switch or reload
    pub horizon: Horizon,
    pub status_message: String,
    pub load_error: Option<String>,
    pub chart_heights: ChartHeights,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = Self {
            data_dir: config::data_dir(),
            data: PortfolioData::default(),
            pages: vec![],
            selected_portfolio: 0,
            horizon: Horizon::default(),
            status_message: "Ready.".to_string(),
            load_error: None,
            chart_heights: ChartHeights::default(),
        };
        state.reload();
        state
    }
}

impl AppState {
    /// Re-read every input file and rebuild the portfolio pages
    pub fn reload(&mut self) {
        self.horizon = Horizon::default();
        match loader::load_portfolio_data(&self.data_dir) {
            Ok(data) => {
                self.data = data;
                self.load_error = None;
                self.recompute_pages();
                self.status_message = format!(
                    "Loaded {} portfolios from {}. Last refresh: {}",
                    self.pages.len(),
                    self.data_dir.display(),
                    self.data.loaded_at.as_deref().unwrap_or("N/A")
                );
            }
            Err(e) => {
                tracing::warn!("Failed to load portfolio data: {:#}", e);
                self.data = PortfolioData::default();
                self.pages.clear();
                self.load_error = Some(format!("{:#}", e));
                self.status_message = "Loading failed.".to_string();
            }
        }
    }

    /// Recompute metrics and breakdowns for every loaded portfolio
    pub fn recompute_pages(&mut self) {
        self.pages = self
            .data
            .portfolios
            .iter()
            .map(|p| {
                let view = analysis::build_portfolio_view(p, &self.data);
                if let Err(ref e) = view {
                    tracing::warn!("Portfolio '{}' cannot be displayed: {}", p.name, e);
                }
                PortfolioPage {
                    name: p.name.clone(),
                    view,
                }
            })
            .collect();
        self.selected_portfolio = self.selected_portfolio.min(self.pages.len().saturating_sub(1));
    }

    pub fn select_portfolio(&mut self, idx: usize) {
        if idx != self.selected_portfolio {
            tracing::debug!("Switching to portfolio {}", idx);
            self.selected_portfolio = idx;
            self.horizon = Horizon::default();
        }
    }
}

/// Main application struct for eframe
#[derive(Default)]
pub struct PortfolioApp {
    pub state: AppState,
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel with one tab per portfolio
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut clicked = None;
                for (i, page) in self.state.pages.iter().enumerate() {
                    if ui
                        .selectable_label(self.state.selected_portfolio == i, &page.name)
                        .clicked()
                    {
                        clicked = Some(i);
                    }
                }
                if let Some(i) = clicked {
                    self.state.select_portfolio(i);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reload Data").clicked() {
                        self.state.reload();
                    }
                });
            });
        });

        // Bottom status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
            });
        });

        // Central panel (scrollable when content overflows)
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .show(ui, |ui| ui::dashboard::render(ui, &mut self.state));
        });
    }
}
