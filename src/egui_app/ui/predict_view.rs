//! Prediction tab: trait form and the scored result view.

use eframe::egui::{self, RichText};

use super::{PetriApp, option_combo, style};
use crate::egui_app::state::PredictPane;

const GRAM_STAIN_OPTIONS: [(&str, &str); 3] = [
    ("Positive", "Positive"),
    ("Negative", "Negative"),
    ("Variable", "Variable"),
];

const SHAPE_OPTIONS: [(&str, &str); 4] = [
    ("Rod", "Rod"),
    ("Cocci", "Cocci"),
    ("Spiral", "Spiral"),
    ("Vibrio", "Vibrio"),
];

const PHYLUM_OPTIONS: [(&str, &str); 4] = [
    ("Proteobacteria", "Proteobacteria"),
    ("Firmicutes", "Firmicutes"),
    ("Actinobacteria", "Actinobacteria"),
    ("Bacteroidetes", "Bacteroidetes"),
];

const OXYGEN_OPTIONS: [(&str, &str); 4] = [
    ("Aerobe", "Aerobic"),
    ("Anaerobe", "Anaerobic"),
    ("Facultative anaerobe", "Facultative anaerobe"),
    ("Microaerophilic", "Microaerophilic"),
];

const MOBILITY_OPTIONS: [(&str, &str); 2] = [("Yes", "Motile"), ("No", "Non-motile")];

const YES_NO_OPTIONS: [(&str, &str); 2] = [("Yes", "Yes"), ("No", "No")];

const HABITAT_OPTIONS: [(&str, &str); 4] = [
    ("Soil", "Soil"),
    ("Water", "Water"),
    ("HostAssociated", "Host associated"),
    ("Multiple", "Multiple"),
];

impl PetriApp {
    pub(super) fn render_predict(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.heading("Bacteria Pathogenicity Prediction");
        ui.label(
            RichText::new("Enter bacteria characteristics to predict its pathogenicity.")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);
        if let Some(error) = self.controller.ui.predict.last_error.clone() {
            ui.label(
                RichText::new(error).color(style::status_badge_color(style::StatusTone::Error)),
            );
            ui.add_space(6.0);
        }
        let pane = self.controller.ui.predict.pane;
        let has_result = self.controller.ui.predict.result.is_some();
        ui.horizontal(|ui| {
            if ui
                .selectable_label(pane == PredictPane::Form, "Input Form")
                .clicked()
            {
                self.controller.start_new_prediction();
            }
            if ui
                .add_enabled(
                    has_result,
                    egui::SelectableLabel::new(pane == PredictPane::Result, "Results"),
                )
                .clicked()
            {
                self.controller.show_prediction_result();
            }
        });
        ui.add_space(8.0);
        match self.controller.ui.predict.pane {
            PredictPane::Form => self.render_predict_form(ui),
            PredictPane::Result => self.render_predict_result(ui),
        }
    }

    fn render_predict_form(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let submitting = self.controller.ui.predict.submitting;
        let missing = self.controller.ui.predict.missing_fields.clone();
        if !missing.is_empty() {
            ui.label(
                RichText::new(format!("Required: {}", missing.join(", ")))
                    .color(style::status_badge_color(style::StatusTone::Warning)),
            );
            ui.add_space(4.0);
        }
        let mut submit_clicked = false;
        egui::ScrollArea::vertical()
            .id_salt("predict_form_scroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                {
                    let draft = &mut self.controller.ui.predict.draft;
                    ui.label(RichText::new("Identity").color(palette.text_muted));
                    egui::Grid::new("predict_identity")
                        .num_columns(4)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Bacteria ID");
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.bacteria_id)
                                    .hint_text("Generated when left blank")
                                    .desired_width(170.0),
                            );
                            ui.label("Name");
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.name).desired_width(170.0),
                            );
                            ui.end_row();
                        });
                    ui.add_space(8.0);
                    ui.label(RichText::new("Classification").color(palette.text_muted));
                    egui::Grid::new("predict_classification")
                        .num_columns(4)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Genus *");
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.genus)
                                    .hint_text("e.g. Escherichia")
                                    .desired_width(170.0),
                            );
                            ui.label("Species *");
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.species)
                                    .hint_text("e.g. coli")
                                    .desired_width(170.0),
                            );
                            ui.end_row();
                            ui.label("Gram stain *");
                            option_combo(
                                ui,
                                "predict_gram",
                                &mut draft.gram_stain,
                                "Select gram stain",
                                &GRAM_STAIN_OPTIONS,
                            );
                            ui.label("Shape *");
                            option_combo(
                                ui,
                                "predict_shape",
                                &mut draft.shape,
                                "Select shape",
                                &SHAPE_OPTIONS,
                            );
                            ui.end_row();
                            ui.label("Phylum");
                            option_combo(
                                ui,
                                "predict_phylum",
                                &mut draft.phylum,
                                "Not specified",
                                &PHYLUM_OPTIONS,
                            );
                            ui.end_row();
                        });
                    ui.add_space(8.0);
                    ui.label(RichText::new("Physiology").color(palette.text_muted));
                    egui::Grid::new("predict_physiology")
                        .num_columns(4)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Oxygen preference");
                            option_combo(
                                ui,
                                "predict_oxygen",
                                &mut draft.oxygen_preference,
                                "Not specified",
                                &OXYGEN_OPTIONS,
                            );
                            ui.label("Mobility");
                            option_combo(
                                ui,
                                "predict_mobility",
                                &mut draft.mobility,
                                "Not specified",
                                &MOBILITY_OPTIONS,
                            );
                            ui.end_row();
                            ui.label("Flagella");
                            option_combo(
                                ui,
                                "predict_flagella",
                                &mut draft.flagellar_presence,
                                "Not specified",
                                &YES_NO_OPTIONS,
                            );
                            ui.label("Sporulation");
                            option_combo(
                                ui,
                                "predict_sporulation",
                                &mut draft.sporulation,
                                "Not specified",
                                &YES_NO_OPTIONS,
                            );
                            ui.end_row();
                            ui.label("Optimal temperature");
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.optimal_temperature)
                                    .hint_text("°C, e.g. 37")
                                    .desired_width(170.0),
                            );
                            ui.label("Habitat");
                            option_combo(
                                ui,
                                "predict_habitat",
                                &mut draft.habitat,
                                "Not specified",
                                &HABITAT_OPTIONS,
                            );
                            ui.end_row();
                        });
                    ui.add_space(8.0);
                    egui::CollapsingHeader::new("Additional taxonomy and physiology")
                        .id_salt("predict_more")
                        .show(ui, |ui| {
                            egui::Grid::new("predict_more_fields")
                                .num_columns(4)
                                .spacing([12.0, 6.0])
                                .show(ui, |ui| {
                                    for (index, (label, value)) in [
                                        ("Superkingdom", &mut draft.superkingdom),
                                        ("Kingdom", &mut draft.kingdom),
                                        ("Class", &mut draft.class_name),
                                        ("Order", &mut draft.order),
                                        ("Family", &mut draft.family),
                                        ("Strain", &mut draft.strain),
                                        ("Membranes", &mut draft.number_of_membranes),
                                        ("Temperature range", &mut draft.temperature_range),
                                        ("Biotic relationship", &mut draft.biotic_relationship),
                                        ("Cell arrangement", &mut draft.cell_arrangement),
                                        ("Metabolism", &mut draft.metabolism),
                                        ("Energy source", &mut draft.energy_source),
                                    ]
                                    .into_iter()
                                    .enumerate()
                                    {
                                        ui.label(label);
                                        ui.add(
                                            egui::TextEdit::singleline(value)
                                                .desired_width(170.0),
                                        );
                                        if index % 2 == 1 {
                                            ui.end_row();
                                        }
                                    }
                                });
                        });
                }
                ui.add_space(4.0);
                ui.label(RichText::new("* required").color(palette.text_muted));
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!submitting, egui::Button::new("Predict Pathogenicity"))
                        .clicked()
                    {
                        submit_clicked = true;
                    }
                    if submitting {
                        ui.label(
                            RichText::new("Processing your request…").color(palette.text_muted),
                        );
                    }
                });
            });
        if submit_clicked {
            self.controller.submit_prediction();
        }
    }

    fn render_predict_result(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let Some(view) = self.controller.ui.predict.result.clone() else {
            ui.label(
                RichText::new("No prediction results available. Submit the form first.")
                    .color(palette.text_muted),
            );
            return;
        };
        let accent = if view.is_pathogen {
            palette.danger
        } else {
            palette.success
        };
        ui.label(RichText::new("Prediction Result").strong());
        ui.label(
            RichText::new(format!("Analysis results for {}", view.subject))
                .color(palette.text_muted),
        );
        ui.add_space(8.0);
        ui.label(RichText::new(&view.headline).color(accent).size(20.0));
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Pathogenicity Probability");
            ui.label(RichText::new(format!("{}%", view.probability_percent)).strong());
        });
        ui.add(
            egui::ProgressBar::new(view.probability)
                .desired_width(360.0)
                .fill(accent),
        );
        ui.add_space(6.0);
        let alert = if view.is_pathogen {
            "Pathogenic Risk Detected"
        } else {
            "Low Pathogenic Risk"
        };
        ui.label(RichText::new(alert).color(accent).strong());
        ui.label(RichText::new(&view.advisory).color(palette.text_primary));
        ui.add_space(12.0);
        ui.label(RichText::new("Similar Bacteria").strong());
        ui.label(
            RichText::new("Bacteria with similar characteristics from our database")
                .color(palette.text_muted),
        );
        ui.add_space(4.0);
        if view.similar.is_empty() {
            ui.label(
                RichText::new("No similar bacteria found in the database.")
                    .color(palette.text_muted),
            );
        } else {
            egui::ScrollArea::vertical()
                .id_salt("similar_bacteria_scroll")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    egui::Grid::new("similar_bacteria")
                        .striped(true)
                        .spacing([16.0, 6.0])
                        .show(ui, |ui| {
                            for row in &view.similar {
                                ui.vertical(|ui| {
                                    ui.label(&row.name);
                                    ui.label(
                                        RichText::new(&row.taxonomy).color(palette.text_muted),
                                    );
                                });
                                let tone = if row.is_pathogen {
                                    palette.danger
                                } else {
                                    palette.success
                                };
                                ui.label(
                                    RichText::new(if row.is_pathogen {
                                        "Pathogenic"
                                    } else {
                                        "Non-pathogenic"
                                    })
                                    .color(tone),
                                );
                                ui.label(format!("{}% similarity", row.similarity_percent));
                                ui.end_row();
                            }
                        });
                });
        }
        ui.add_space(10.0);
        if ui.button("Make Another Prediction").clicked() {
            self.controller.start_new_prediction();
        }
    }
}
