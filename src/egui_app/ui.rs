//! egui renderer. Reads [`UiState`](crate::egui_app::state::UiState) and
//! forwards interactions to the controller.

mod catalog_view;
mod predict_view;
pub mod style;

use eframe::egui::{self, Frame, Margin, RichText, StrokeKind, Vec2};

use crate::egui_app::controller::PetriController;
use crate::egui_app::state::MainTab;

/// Smallest usable window for the two-tab layout.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(960.0, 640.0);

/// Renders the egui UI using the shared controller state.
pub struct PetriApp {
    controller: PetriController,
    visuals_set: bool,
}

impl PetriApp {
    /// Create the app, load persisted configuration, and start the first
    /// catalog fetch so the list tab has data when opened.
    pub fn new() -> Result<Self, String> {
        let mut controller = PetriController::new();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        controller.refresh_catalog();
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Petri").color(palette.accent_ice).strong());
                    ui.add_space(8.0);
                    ui.separator();
                    let tab = self.controller.ui.tab;
                    if ui
                        .selectable_label(tab == MainTab::Predict, "Prediction")
                        .clicked()
                    {
                        self.controller.ui.tab = MainTab::Predict;
                    }
                    if ui
                        .selectable_label(tab == MainTab::Catalog, "Catalog")
                        .clicked()
                    {
                        self.controller.ui.tab = MainTab::Catalog;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }
}

/// Combo over string-valued options with a blank "unset" row. `value` holds
/// the stored option value, which may differ from its display label.
fn option_combo(
    ui: &mut egui::Ui,
    id: &str,
    value: &mut String,
    unset_label: &str,
    options: &[(&str, &str)],
) {
    let selected = options
        .iter()
        .find(|(option, _)| *option == value.as_str())
        .map(|(_, label)| *label)
        .unwrap_or(unset_label);
    egui::ComboBox::from_id_salt(id)
        .width(170.0)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            if ui.selectable_label(value.is_empty(), unset_label).clicked() {
                value.clear();
            }
            for (option, label) in options.iter().copied() {
                if ui
                    .selectable_label(value.as_str() == option, label)
                    .clicked()
                {
                    *value = option.to_string();
                }
            }
        });
}

impl eframe::App for PetriApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_jobs();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        if self.controller.ui.tab == MainTab::Catalog {
            self.render_catalog_detail(ctx);
        }
        egui::CentralPanel::default().show(ctx, |ui| match self.controller.ui.tab {
            MainTab::Predict => self.render_predict(ui),
            MainTab::Catalog => self.render_catalog(ui),
        });
        ctx.request_repaint();
    }
}
